//! 命令行入口

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use haas_translator::env::{self, EnvVar};
use haas_translator::translation::{
    ConfigManager, ContentRewriter, TextCollector, TranslationCoordinator, TranslatorConfig,
};

#[derive(Parser, Debug)]
#[command(name = "haas-translator", version, about = "Chinese-to-English overlay for HAAS Studio webviews")]
struct Cli {
    /// Configuration file (TOML or JSON); searched in default locations when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate each argument and print one result per line
    Translate {
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Print the given HTML file with the translation overlay injected
    Augment { file: PathBuf },
    /// List translatable text found in an HTML file with its translation
    Scan { file: PathBuf },
    /// Print documentation for supported environment variables
    EnvDocs,
    /// Print the configuration read from environment variables
    Env,
    /// Write an example configuration file
    InitConfig { path: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let cli = Cli::parse();
    let config_path = cli.config;

    match cli.command {
        Command::Translate { texts } => {
            let (_, coordinator) = build(config_path.as_ref())?;
            for text in texts {
                println!("{}", coordinator.translate_text(&text).await);
            }
            report(&coordinator);
        }
        Command::Augment { file } => {
            let (config, coordinator) = build(config_path.as_ref())?;
            let markup = fs::read_to_string(&file)?;
            let rewriter = ContentRewriter::from_config(Arc::clone(&coordinator), &config);
            print!("{}", rewriter.augment_content(&markup));
        }
        Command::Scan { file } => {
            let (_, coordinator) = build(config_path.as_ref())?;
            let markup = fs::read_to_string(&file)?;
            for item in TextCollector::new().collect(&markup)? {
                let translated = coordinator.translate_text(&item.text).await;
                println!("{} => {}", item.text.trim(), translated.trim());
            }
            report(&coordinator);
        }
        Command::EnvDocs => {
            print!("{}", env::generate_env_docs());
        }
        Command::Env => {
            env::EnvConfig::from_env()?.print_summary();
        }
        Command::InitConfig { path } => {
            ConfigManager::generate_example_config(&path.to_string_lossy())?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

fn build(
    path: Option<&PathBuf>,
) -> Result<(TranslatorConfig, Arc<TranslationCoordinator>), Box<dyn std::error::Error>> {
    let config = load_config(path)?;
    let coordinator = Arc::new(TranslationCoordinator::from_config(&config));
    Ok((config, coordinator))
}

fn report(coordinator: &TranslationCoordinator) {
    let stats = coordinator.stats().snapshot();
    tracing::debug!(
        "请求 {} 次, 缓存命中 {} 次, 后端调用 {} 次",
        stats.requests,
        stats.cache_hits,
        stats.backend_calls
    );
}

fn load_config(path: Option<&PathBuf>) -> Result<TranslatorConfig, Box<dyn std::error::Error>> {
    let manager = match path {
        Some(path) => ConfigManager::from_path(&path.to_string_lossy())?,
        None => ConfigManager::new()?,
    };
    Ok(manager.into_config())
}

fn init_tracing() {
    let level = env::core::LogLevel::get()
        .ok()
        .and_then(|level| level.parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::INFO);
    let no_color = env::core::NoColor::get_or_default(false);

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .init();
}
