// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, warn};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::Config;
use crate::database::repository::HistoryRepository;
use crate::history::notifier::{ChangeNotifier, FileNotifier, NoopNotifier};
use crate::history::store::HistoryStore;
use crate::languages::AppLanguage;
use crate::ocr::{OcrEngine, OcrProgress, TesseractCli};
use crate::translation::batch::{BatchItemStatus, BatchTranslator, collect_queue};
use crate::translation::service::TranslationService;

mod app_config;
mod article;
mod database;
mod errors;
mod history;
mod keywords;
mod languages;
mod ocr;
mod providers;
mod translation;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a text and record it in the history
    Translate(TranslateArgs),

    /// Translate a queue of texts from .txt/.csv files or directories
    Batch(BatchArgs),

    /// Build a vocabulary from an article URL and translate its keywords
    Vocab(VocabArgs),

    /// Recognize text in images and translate it
    Ocr(OcrArgs),

    /// Inspect or edit the translation history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },

    /// Generate shell completions for traduki
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Text to translate
    #[arg(value_name = "TEXT")]
    text: String,

    /// Source language code (e.g. 'en', 'de', 'ukr', 'ru', 'auto')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code
    #[arg(short, long)]
    target_language: Option<String>,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Files or directories with queued texts (.txt: one per line, .csv: first column)
    #[arg(value_name = "PATHS", required = true)]
    paths: Vec<PathBuf>,

    /// Source language code
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code
    #[arg(short, long)]
    target_language: Option<String>,
}

#[derive(Parser, Debug)]
struct VocabArgs {
    /// URL of the article to read
    #[arg(value_name = "URL")]
    url: String,

    /// Source language code (used for stopwords and translation)
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code
    #[arg(short, long)]
    target_language: Option<String>,

    /// How many of the top keywords to translate
    #[arg(long, default_value_t = 30)]
    top: usize,

    /// Only list the extracted keywords, translate nothing
    #[arg(long)]
    keywords_only: bool,
}

#[derive(Parser, Debug)]
struct OcrArgs {
    /// Image files to recognize
    #[arg(value_name = "IMAGES", required = true)]
    images: Vec<PathBuf>,

    /// Recognition language codes (repeatable)
    #[arg(long = "ocr-language")]
    ocr_languages: Vec<String>,

    /// Source language code for the translation step
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code
    #[arg(short, long)]
    target_language: Option<String>,

    /// Only print the recognized text, translate nothing
    #[arg(long)]
    recognize_only: bool,
}

#[derive(Subcommand, Debug)]
enum HistoryCommands {
    /// Show the most recent records
    List {
        /// How many records to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Delete one record by id
    Delete {
        /// Record id
        #[arg(value_name = "ID")]
        id: i64,
    },

    /// Delete every record
    Clear {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },

    /// Show database statistics
    Stats,
}

/// Traduki - AI translation assistant with a local history
///
/// Translates text through an LLM provider and records every translation in
/// a local history that stays consistent across running instances.
#[derive(Parser, Debug)]
#[command(name = "traduki")]
#[command(version = "1.0.0")]
#[command(about = "AI translation assistant with a local history")]
#[command(long_about = "Traduki translates text through an LLM provider and records every \
translation in a local SQLite history shared by all running instances.

EXAMPLES:
    traduki translate \"good morning\"            # Translate with configured languages
    traduki translate -s en -t de \"good morning\"
    traduki batch words.txt                      # Translate a queue, one bulk history write
    traduki vocab https://example.com/article    # Keywords from an article, translated
    traduki ocr receipt.png                      # Recognize and translate an image
    traduki history list --limit 10              # Recent history
    traduki history clear --yes                  # Wipe the history
    traduki completions bash > traduki.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in traduki.json by default. You can specify a
    different config file with --config. If the config file doesn't exist, a
    default one will be created automatically. The Gemini API key is read
    from the config file or the GEMINI_API_KEY environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "traduki.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[0;32m",
            Level::Debug => "\x1B[0;36m",
            Level::Trace => "\x1B[0;90m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let options = CommandLineOptions::parse();

    // Completions need no config or logger
    if let Commands::Completions { shell } = &options.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "traduki", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load_or_create(&options.config_path)?;

    let log_level = options
        .log_level
        .map(app_config::LogLevel::from)
        .unwrap_or(config.log_level);
    CustomLogger::init(log_level.to_level_filter()).context("Failed to initialize logger")?;

    match options.command {
        Commands::Translate(args) => run_translate(&config, args).await,
        Commands::Batch(args) => run_batch(&config, args).await,
        Commands::Vocab(args) => run_vocab(&config, args).await,
        Commands::Ocr(args) => run_ocr(&config, args).await,
        Commands::History { command } => run_history(&config, command).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    }
}

/// Open the history store per config and install it process-wide
fn open_store(config: &Config) -> Result<Arc<HistoryStore>> {
    let repo = match &config.history.database_path {
        Some(path) => HistoryRepository::open(path)?,
        None => HistoryRepository::new_default()?,
    };

    let notifier: Arc<dyn ChangeNotifier> = if config.history.cross_instance_sync {
        Arc::new(
            FileNotifier::for_database(repo.connection().path())
                .with_poll_interval(Duration::from_millis(config.history.poll_interval_ms)),
        )
    } else {
        Arc::new(NoopNotifier)
    };

    let store = HistoryStore::new(repo, notifier);
    if history::store::install_global(store.clone()).is_err() {
        debug!("Global history store already installed");
    }
    Ok(store)
}

/// Resolve a language flag against the configured default
fn resolve_language(flag: Option<String>, configured: &str) -> Result<String> {
    let code = flag.unwrap_or_else(|| configured.to_string());
    let lang: AppLanguage = code
        .parse()
        .map_err(|_| anyhow!("Unsupported language code: {}", code))?;
    Ok(lang.code().to_string())
}

/// Progress bar in the application's house style
fn progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

async fn run_translate(config: &Config, args: TranslateArgs) -> Result<()> {
    let from = resolve_language(args.source_language, &config.source_language)?;
    let to = resolve_language(args.target_language, &config.target_language)?;

    let store = open_store(config)?;
    store.init().await?;

    let service = TranslationService::from_config(config);
    let (id, translated) = service
        .translate_and_record(&store, &args.text, &from, &to)
        .await?;

    println!("{}", translated);
    debug!("Recorded translation as history record {}", id);
    Ok(())
}

async fn run_batch(config: &Config, args: BatchArgs) -> Result<()> {
    let from = resolve_language(args.source_language, &config.source_language)?;
    let to = resolve_language(args.target_language, &config.target_language)?;

    let queue = collect_queue(&args.paths)?;
    if queue.is_empty() {
        warn!("No queue items found in the given paths");
        return Ok(());
    }

    let store = open_store(config)?;
    store.init().await?;

    let service = TranslationService::from_config(config);
    let translator =
        BatchTranslator::new(service).with_concurrency(config.provider.concurrent_requests);

    let pb = progress_bar(queue.len() as u64);
    let pb_for_callback = pb.clone();
    let report = translator
        .translate_all(&store, &queue, &from, &to, move |done, _total| {
            pb_for_callback.set_position(done as u64);
        })
        .await?;
    pb.finish_and_clear();

    println!(
        "Translated {} of {} items ({} failed)",
        report.translated_count(),
        report.outcomes.len(),
        report.failed_count()
    );
    for outcome in &report.outcomes {
        if let BatchItemStatus::Failed { message } = &outcome.status {
            println!("  FAILED [{}] {:?}: {}", outcome.index + 1, outcome.source_text, message);
        }
    }
    Ok(())
}

async fn run_vocab(config: &Config, args: VocabArgs) -> Result<()> {
    let from = resolve_language(args.source_language, &config.source_language)?;
    let to = resolve_language(args.target_language, &config.target_language)?;

    let fetcher = article::ArticleFetcher::new(config.provider.timeout_secs);
    let (article_text, keywords) = fetcher
        .fetch_vocabulary(&args.url, &from)
        .await?;

    println!(
        "Article: {} chars, {} keywords",
        article_text.len(),
        keywords.len()
    );
    for keyword in &keywords {
        println!("  {:4}  {}", keyword.count, keyword.word);
    }

    if args.keywords_only || keywords.is_empty() {
        return Ok(());
    }

    let store = open_store(config)?;
    store.init().await?;

    let words: Vec<String> = keywords
        .iter()
        .take(args.top)
        .map(|k| k.word.clone())
        .collect();

    let service = TranslationService::from_config(config);
    let translator =
        BatchTranslator::new(service).with_concurrency(config.provider.concurrent_requests);

    let pb = progress_bar(words.len() as u64);
    let pb_for_callback = pb.clone();
    let report = translator
        .translate_all(&store, &words, &from, &to, move |done, _total| {
            pb_for_callback.set_position(done as u64);
        })
        .await?;
    pb.finish_and_clear();

    println!(
        "Added {} words to the history ({} failed)",
        report.translated_count(),
        report.failed_count()
    );
    Ok(())
}

async fn run_ocr(config: &Config, args: OcrArgs) -> Result<()> {
    let from = resolve_language(args.source_language, &config.source_language)?;
    let to = resolve_language(args.target_language, &config.target_language)?;

    let ocr_languages = if args.ocr_languages.is_empty() {
        vec![from.clone()]
    } else {
        args.ocr_languages.clone()
    };

    let engine = TesseractCli::new();

    if args.recognize_only {
        for image in &args.images {
            match engine
                .recognize(image, &ocr_languages, &|p: OcrProgress| {
                    debug!("{:?}: {} {:.0}%", image, p.status, p.progress * 100.0);
                })
                .await
            {
                Ok(text) => println!("--- {:?}\n{}", image, text),
                Err(e) => println!("--- {:?}\nFAILED: {}", image, e),
            }
        }
        return Ok(());
    }

    let store = open_store(config)?;
    store.init().await?;

    let service = TranslationService::from_config(config);

    let pb = progress_bar(args.images.len() as u64);
    let pb_for_callback = pb.clone();
    let outcomes = ocr::translate_images(
        &engine,
        &service,
        &store,
        &args.images,
        &ocr_languages,
        &from,
        &to,
        move |done, _total| {
            pb_for_callback.set_position(done as u64);
        },
    )
    .await?;
    pb.finish_and_clear();

    for outcome in &outcomes {
        if outcome.succeeded() {
            println!("OK     {:?}", outcome.path);
        } else {
            println!(
                "FAILED {:?}: {}",
                outcome.path,
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
    Ok(())
}

async fn run_history(config: &Config, command: HistoryCommands) -> Result<()> {
    let store = open_store(config)?;
    store.init().await?;

    match command {
        HistoryCommands::List { limit } => {
            let items = store.items();
            if items.is_empty() {
                println!("History is empty");
                return Ok(());
            }
            for record in items.iter().take(limit) {
                let when = chrono::DateTime::from_timestamp_millis(record.created_at)
                    .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| record.created_at.to_string());
                println!(
                    "#{:<6} {}  {} -> {}  {:?} => {:?}",
                    record.id,
                    when,
                    record.from_lang,
                    record.to_lang,
                    truncate(&record.source_text, 40),
                    truncate(&record.translated_text, 40),
                );
            }
        }
        HistoryCommands::Delete { id } => {
            store.remove(id).await?;
            println!("Deleted record #{}", id);
        }
        HistoryCommands::Clear { yes } => {
            if !yes {
                return Err(anyhow!("Refusing to wipe the history without --yes"));
            }
            store.reset().await?;
            // Reclaim the space the deleted rows held
            store.repository().connection().vacuum()?;
            println!("History cleared");
        }
        HistoryCommands::Stats => {
            let stats = store.repository().connection().stats()?;
            println!("{}", stats);
        }
    }
    Ok(())
}

/// Shorten a string for single-line display
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let shortened: String = text.chars().take(max_chars).collect();
    format!("{}…", shortened)
}
