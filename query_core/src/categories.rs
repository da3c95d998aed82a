//! Spin categories: fixed technology stacks turned into ready-made queries

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

/// Star filters offered next to the spin
pub const STAR_OPTIONS: &[u32] = &[0, 100, 500, 1000, 5000];

/// Name of the synthetic category holding every stack entry
pub const RANDOM_CATEGORY: &str = "Random";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: &'static str,
    pub stack: &'static [&'static str],
}

pub const BASE_CATEGORIES: &[Category] = &[
    Category {
        name: "AI / ML",
        stack: &[
            "topic:tensorflow",
            "topic:pytorch",
            "topic:scikit-learn",
            "topic:fastapi",
            "topic:pandas",
        ],
    },
    Category {
        name: "Web Dev",
        stack: &[
            "topic:react",
            "topic:nextjs",
            "topic:express",
            "topic:tailwindcss",
            "topic:nodejs",
        ],
    },
    Category {
        name: "DevOps / CI/CD",
        stack: &[
            "topic:docker",
            "topic:github-actions",
            "topic:kubernetes",
            "topic:helm",
            "topic:terraform",
        ],
    },
    Category {
        name: "Security",
        stack: &["topic:oauth", "topic:owasp", "topic:keycloak", "topic:snyk"],
    },
    Category {
        name: "Database",
        stack: &["topic:postgresql", "topic:mongodb", "topic:mysql", "topic:redis"],
    },
    Category {
        name: "Mobile",
        stack: &["topic:flutter", "topic:react-native", "topic:kotlin", "topic:swift"],
    },
];

static RANDOM_STACK: Lazy<Vec<&'static str>> = Lazy::new(|| {
    BASE_CATEGORIES
        .iter()
        .flat_map(|c| c.stack.iter().copied())
        .collect()
});

/// Entries drawn per spin
pub const SPIN_PICKS: usize = 5;

/// Category names in index order; index 0 is [`RANDOM_CATEGORY`]
pub fn category_names() -> Vec<&'static str> {
    std::iter::once(RANDOM_CATEGORY)
        .chain(BASE_CATEGORIES.iter().map(|c| c.name))
        .collect()
}

/// Stack entries of a category by index (0 = every entry)
pub fn category_stack(index: usize) -> Option<&'static [&'static str]> {
    match index {
        0 => Some(RANDOM_STACK.as_slice()),
        i => BASE_CATEGORIES.get(i - 1).map(|c| c.stack),
    }
}

/// Draw `count` entries from a stack, with replacement
pub fn pick_from_stack<R: Rng + ?Sized>(
    stack: &[&'static str],
    count: usize,
    rng: &mut R,
) -> Vec<&'static str> {
    (0..count).filter_map(|_| stack.choose(rng).copied()).collect()
}

/// Join stack fragments into a search query, adding `stars:>=N` when N > 0
pub fn spin_query(fragments: &[&str], stars: u32) -> String {
    let mut query = fragments.join(" ");
    if stars > 0 {
        if !query.is_empty() {
            query.push(' ');
        }
        query.push_str(&format!("stars:>={}", stars));
    }
    query
}

/// Spin a category: [`SPIN_PICKS`] random entries from its stack. `None` for
/// an unknown index.
pub fn spin_category<R: Rng + ?Sized>(index: usize, stars: u32, rng: &mut R) -> Option<String> {
    let stack = category_stack(index)?;
    let picks = pick_from_stack(stack, SPIN_PICKS, rng);
    let query = spin_query(&picks, stars);
    debug!(category = index, query = %query, "spin");
    Some(query)
}

/// `topic:` fragment for a readable stack name like "react" or "github-actions"
pub fn topic_for_readable(name: &str) -> Option<&'static str> {
    let wanted = name.trim().to_lowercase();
    RANDOM_STACK
        .iter()
        .copied()
        .find(|fragment| fragment.strip_prefix("topic:") == Some(wanted.as_str()))
}
