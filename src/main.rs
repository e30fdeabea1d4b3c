//! ingredient-analyzer 命令行入口
use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::debug;

use ingredient_analyzer::config::DEFAULT_CACHE_CAPACITY;
use ingredient_analyzer::{AnalyzerConfig, ConfigManager, DatasetSource, IngredientAnalyzer, Status};

/// 补充剂成分表合规分析
#[derive(Parser, Debug)]
#[command(name = "ingredient-analyzer", version)]
#[command(about = "Classify food-supplement ingredients against the Substance Guide and the novel food catalogue")]
struct Cli {
    /// Novel food catalogue (local JSON file or http(s) URL)
    #[arg(long, global = true, value_name = "SOURCE")]
    novel_foods: Option<DatasetSource>,

    /// Pharmaceutical substance guide (local JSON file or http(s) URL)
    #[arg(long, global = true, value_name = "SOURCE")]
    pharma: Option<DatasetSource>,

    /// MessagePack snapshot of both datasets
    #[arg(long, global = true, value_name = "PATH")]
    snapshot: Option<PathBuf>,

    /// Match cache capacity (0 disables caching)
    #[arg(long, global = true, default_value_t = DEFAULT_CACHE_CAPACITY)]
    cache_capacity: usize,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze an ingredient list (reads stdin when TEXT is omitted)
    Analyze {
        text: Option<String>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search the novel food catalogue
    Search { term: String },
}

impl Cli {
    fn config(&self) -> AnalyzerConfig {
        let mut builder = ConfigManager::custom()
            .cache_capacity(self.cache_capacity)
            .http_timeout(self.timeout)
            .verbose(self.verbose);
        if let Some(source) = &self.novel_foods {
            builder = builder.novel_food_source(source.clone());
        }
        if let Some(source) = &self.pharma {
            builder = builder.pharma_source(source.clone());
        }
        if let Some(path) = &self.snapshot {
            builder = builder.snapshot_path(path.clone());
        }
        builder.build()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let config = cli.config();
    debug!(
        "Datasets: novel foods = {}, pharma = {}",
        config.novel_food_source, config.pharma_source
    );
    let analyzer = IngredientAnalyzer::new(config)
        .await
        .context("failed to load reference databases")?;

    match cli.command {
        Command::Analyze { text, json } => {
            let text = match text {
                Some(text) => text,
                None => read_stdin()?,
            };
            let report = analyzer.analyze(&text);

            if json {
                println!("{}", report.to_pretty_json()?);
                return Ok(());
            }
            if report.is_empty() {
                bail!("no ingredients found in input");
            }

            for verdict in &report.verdicts {
                let marker = match verdict.status {
                    Status::Safe => "✓",
                    Status::Danger => "✗",
                    Status::Unknown => "?",
                };
                println!("{} {}", marker, verdict);
                let matched = verdict.evidence.matched_terms();
                if !matched.is_empty() {
                    println!("    matched: {}", matched.join(", "));
                }
            }
            println!();
            println!("{} ({:.2} ms)", report.summary, report.elapsed_ms);
        }
        Command::Search { term } => {
            let entries = analyzer.search_catalogue(&term);
            if entries.is_empty() {
                println!("No catalogue entries match '{}'", term);
            }
            for entry in entries {
                let record = &entry.record;
                println!(
                    "{} [{}] {}",
                    record.display(),
                    entry.policy_item_code.as_deref().unwrap_or("-"),
                    record.status.as_deref().unwrap_or("unknown status")
                );
                if !entry.all_common_names.is_empty() {
                    println!("    {}", entry.all_common_names.join(" / "));
                }
                for text in [record.status_desc_text(), record.description_text()].into_iter().flatten() {
                    if !text.is_empty() {
                        println!("    {}", text);
                    }
                }
            }
        }
    }

    Ok(())
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read ingredient list from stdin")?;
    Ok(buf)
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("ingredient_analyzer=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
