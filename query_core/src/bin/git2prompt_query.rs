use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use query_core::categories::{self, STAR_OPTIONS};
use query_core::prompt;
use query_core::{QueryConfig, QueryInterpreter, RepoRef, SearchRequest};

#[derive(Parser)]
#[command(name = "git2prompt-query", version)]
#[command(about = "Turn natural-language requests into GitHub repository searches", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the search query for a natural-language request
    Convert {
        /// Free-text request, e.g. "popular cli tool in rust"
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print the structured query as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the full GitHub search URL for a natural-language request
    Url {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Print the query for a spin category
    Spin {
        /// Category index (0 = Random, see `categories`)
        #[arg(long, default_value_t = 0)]
        category: usize,

        /// Minimum stars (0, 100, 500, 1000 or 5000)
        #[arg(long, default_value_t = 0)]
        stars: u32,

        /// Seed for a reproducible spin
        #[arg(long)]
        seed: Option<u64>,

        /// Always include this stack entry, by readable name (e.g. "react")
        #[arg(long = "tech")]
        tech: Vec<String>,

        /// Print the full search URL instead of the query
        #[arg(long)]
        url: bool,
    },
    /// List spin categories
    Categories {
        /// Print names and stacks as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the cache key and README endpoint for a repository, or the LLM
    /// prompt when a README file is given
    Prompt {
        /// Repository URL, e.g. https://github.com/tokio-rs/tokio
        url: String,

        /// README file to build the prompt from
        #[arg(long)]
        readme: Option<PathBuf>,
    },
    /// Clean a model reply read from stdin
    Clean,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => QueryConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => QueryConfig::default(),
    };

    match cli.command {
        Commands::Convert { query, json } => {
            let interpreter = build_interpreter(&config)?;
            let structured = interpreter.interpret(&query.join(" "));
            if json {
                println!("{}", serde_json::to_string_pretty(&structured)?);
            } else {
                println!("{}", structured);
            }
        }
        Commands::Url { query } => {
            let interpreter = build_interpreter(&config)?;
            let request =
                SearchRequest::from_user_query(&query.join(" "), &interpreter, &config.search)?;
            println!("{}", request.url(&config.search.api_base)?);
        }
        Commands::Spin {
            category,
            stars,
            seed,
            tech,
            url,
        } => {
            if !STAR_OPTIONS.contains(&stars) {
                anyhow::bail!("--stars must be one of {:?}", STAR_OPTIONS);
            }
            let pinned = tech
                .iter()
                .map(|name| {
                    categories::topic_for_readable(name)
                        .with_context(|| format!("Unknown stack entry '{}'", name))
                })
                .collect::<Result<Vec<_>>>()?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let spun = categories::spin_category(category, stars, &mut rng).with_context(|| {
                format!(
                    "Unknown category {} (expected 0..={})",
                    category,
                    categories::BASE_CATEGORIES.len()
                )
            })?;
            let query = if pinned.is_empty() {
                spun
            } else {
                format!("{} {}", pinned.join(" "), spun)
            };
            if url {
                let request = SearchRequest::from_spin_text(&query, &config.search)?;
                println!("{}", request.url(&config.search.api_base)?);
            } else {
                println!("{}", query);
            }
        }
        Commands::Categories { json } => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(categories::BASE_CATEGORIES)?
                );
            } else {
                for (index, name) in categories::category_names().iter().enumerate() {
                    println!("{:>2}  {}", index, name);
                }
            }
        }
        Commands::Prompt { url, readme } => {
            let repo = RepoRef::parse(&url)?;
            match readme {
                Some(path) => {
                    let text = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    println!("{}", prompt::build_prompt(&text));
                }
                None => {
                    println!("cache key: {}", repo.cache_key());
                    println!("readme:    {}", repo.readme_url(&config.search.api_base));
                }
            }
        }
        Commands::Clean => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read model output from stdin")?;
            println!("{}", prompt::clean_model_output(&raw));
        }
    }

    Ok(())
}

fn build_interpreter(config: &QueryConfig) -> Result<QueryInterpreter> {
    let tables = config
        .load_tables()
        .context("Failed to load lookup tables")?;
    Ok(QueryInterpreter::new(tables, config.interpreter.clone()))
}
