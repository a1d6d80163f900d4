use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tscope_analysis::scoring::ScoringConfig;
use tscope_analysis::{create_embedder, Analyzer, ModelConfig};
use tscope_core::{Article, ArticleSink, Fetcher};
use tscope_scrapers::{init_logging, scrape_website, HttpFetcher, Scheduler, SchedulerConfig, ScraperConfig, ScraperManager};
use tscope_storage::{create_sink, StorageConfig, StorageMode};
use tscope_web::{AppState, ServerConfig};

/// Durations like `30m`, `1h15m` or `90` (seconds).
#[derive(Debug, Clone, PartialEq)]
struct HumanDuration(Duration);

fn unit_seconds(unit: char) -> Option<u64> {
    match unit {
        's' => Some(1),
        'm' => Some(60),
        'h' => Some(3600),
        'd' => Some(86400),
        _ => None,
    }
}

impl FromStr for HumanDuration {
    type Err = String;

    /// Sums `<number><unit>` parts; a trailing bare number is seconds.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let overflow = || format!("Duration too large: {}", s);
        let mut total: u64 = 0;
        let mut digits = String::new();
        let mut parts = 0;

        let mut add = |digits: &str, scale: u64| -> std::result::Result<(), String> {
            let value: u64 = digits.parse().map_err(|_| overflow())?;
            let secs = value.checked_mul(scale).ok_or_else(overflow)?;
            total = total.checked_add(secs).ok_or_else(overflow)?;
            Ok(())
        };

        for c in s.chars().filter(|c| !c.is_whitespace()) {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }
            let scale = unit_seconds(c).ok_or_else(|| format!("Invalid duration unit: {}", c))?;
            if digits.is_empty() {
                return Err(format!("Missing number before unit: {}", c));
            }
            add(&digits, scale)?;
            digits.clear();
            parts += 1;
        }
        if !digits.is_empty() {
            add(&digits, 1)?;
            parts += 1;
        }

        if parts == 0 {
            return Err("Duration must include a number".to_string());
        }
        Ok(HumanDuration(Duration::from_secs(total)))
    }
}

#[derive(Parser, Debug)]
#[command(name = "tscope", author, version, about = "TechScope: tech news scraping and analysis", long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory for json/csv/txt/db output
    #[arg(long, global = true, env = "TECHSCOPE_DATA_DIR")]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Summarize a single article URL and score its credibility
    Summarize {
        url: String,
        /// Storage mode: json, csv, db, mongo or txt
        #[arg(long, default_value = "db")]
        storage: StorageMode,
    },
    /// Scrape the known sites, or one of them
    Scrape {
        /// Site name as listed by `tscope sites`. Scrapes every site when omitted.
        site: Option<String>,
        /// Articles per site
        #[arg(long)]
        limit: Option<usize>,
        /// Analyze and store each article with this mode
        #[arg(long)]
        storage: Option<StorageMode>,
    },
    /// Poll RSS feeds forever, storing unique entries
    Schedule {
        /// Time between cycles (e.g. 30m, 1h, 1h15m30s)
        #[arg(long, default_value = "30m")]
        interval: HumanDuration,
        #[arg(long, default_value = "json")]
        storage: StorageMode,
    },
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value_t = tscope_web::DEFAULT_PORT)]
        port: u16,
        /// Require this value in the `x-api-key` header of POST requests
        #[arg(long, env = "TECHSCOPE_API_KEY")]
        api_key: Option<String>,
    },
    /// List the scrapers and their names
    Sites,
}

fn storage_config(cli: &Cli) -> StorageConfig {
    let config = StorageConfig::from_env();
    match &cli.data_dir {
        Some(dir) => config.with_data_dir(dir),
        None => config,
    }
}

fn analyzer() -> Result<Arc<Analyzer>> {
    let analyzer = Analyzer::from_config(&ModelConfig::from_env(), ScoringConfig::from_env())?;
    info!("Analyzer ready: {:?}", analyzer);
    Ok(Arc::new(analyzer))
}

fn fetcher(config: &ScraperConfig) -> Result<Arc<dyn Fetcher>> {
    Ok(Arc::new(HttpFetcher::new(config)?))
}

fn credibility_label(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{:.2}", score),
        None => "Not enough text".to_string(),
    }
}

async fn summarize(url: &str, mode: StorageMode, storage: &StorageConfig) -> Result<()> {
    let config = ScraperConfig::from_env();
    info!("Fetching content from {}", url);
    let content = scrape_website(fetcher(&config)?.as_ref(), url)
        .await
        .with_context(|| format!("Failed to fetch content from {}", url))?;
    if content.is_empty() {
        bail!("No article text found at {}", url);
    }

    let article = analyzer()?
        .analyze(Article::new(url, "", "cli").with_content(content))
        .await?;

    let sink = create_sink(mode, storage)?;
    info!("Saving summary using [{}] mode", sink.name());
    sink.write(&article).await?;

    println!("Summary:\n{}\n", article.summary.unwrap_or_default());
    println!("Credibility Score: {}", credibility_label(article.credibility));
    println!("Keywords: {}", article.keywords.unwrap_or_default().join(", "));
    Ok(())
}

async fn scrape(site: Option<&str>, limit: Option<usize>, mode: Option<StorageMode>, storage: &StorageConfig) -> Result<()> {
    let mut config = ScraperConfig::from_env();
    if let Some(limit) = limit {
        config = config.with_limit(limit);
    }
    let manager = ScraperManager::new(fetcher(&config)?, config);

    info!("Scraping articles from {}", site.unwrap_or("all sources"));
    let articles = manager.scrape_source(site).await?;

    let Some(mode) = mode else {
        for article in &articles {
            let preview: String = article.content.chars().take(300).collect();
            println!(
                "\n{}\n{}\n{}\n{}\n---\n{}...",
                article.title,
                article.url,
                article.published_at.map(|d| d.to_rfc3339()).unwrap_or_default(),
                article.author.as_deref().unwrap_or_default(),
                preview
            );
        }
        return Ok(());
    };

    let analyzer = analyzer()?;
    let sink = create_sink(mode, storage)?;
    for article in articles {
        let article = analyzer.analyze(article).await?;
        sink.write(&article).await?;
        println!("{} [{}] {}", article.source, credibility_label(article.credibility), article.title);
    }
    Ok(())
}

async fn schedule(interval: Duration, mode: StorageMode, storage: &StorageConfig) -> Result<()> {
    let models = ModelConfig::from_env();
    let config = SchedulerConfig {
        storage_mode: mode,
        ..SchedulerConfig::from_env()
    }
    .with_interval(interval);

    let sink: Arc<dyn ArticleSink> = Arc::from(create_sink(config.storage_mode, storage)?);
    let scheduler = Scheduler::new(
        fetcher(&ScraperConfig::from_env())?,
        create_embedder(&models)?,
        sink,
        config,
    );
    scheduler.run().await?;
    Ok(())
}

async fn serve(port: u16, api_key: Option<String>, storage: StorageConfig) -> Result<()> {
    let config = ServerConfig {
        port,
        api_key: api_key.filter(|k| !k.is_empty()),
    };
    let state = AppState::new(analyzer()?, fetcher(&ScraperConfig::from_env())?, storage)
        .with_api_key(config.api_key.clone());
    tscope_web::serve(&config, state).await?;
    Ok(())
}

fn sites() -> Result<()> {
    let config = ScraperConfig::default();
    let manager = ScraperManager::new(fetcher(&config)?, config);
    for (source, names) in manager.list_scrapers() {
        println!("{} ({})", names.join(", "), source);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.verbose { Level::DEBUG } else { Level::INFO });
    let storage = storage_config(&cli);

    match cli.command {
        Commands::Summarize { url, storage: mode } => summarize(&url, mode, &storage).await,
        Commands::Scrape { site, limit, storage: mode } => scrape(site.as_deref(), limit, mode, &storage).await,
        Commands::Schedule { interval, storage: mode } => schedule(interval.0, mode, &storage).await,
        Commands::Serve { port, api_key } => serve(port, api_key, storage).await,
        Commands::Sites => sites(),
    }
}
