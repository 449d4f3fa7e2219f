use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use crossterm::style::Stylize;
use lang_core::config::{AppConfig, StorageBackend};
use lang_core::persistence::{open_database, open_profile_store};
use lang_core::seed::{seed_on_startup, seed_reference_profiles, StartupSeed};
use lang_core::translation::{RedbTranslationStore, TranslationOrigin, Translator};
use lang_core::{LanguageClassifier, LanguageCode};
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Character-frequency language detection with a cached toy translator
#[derive(Parser, Debug)]
#[command(name = "freq-translator", version)]
struct Cli {
    /// Config file (default: ~/.config/freq-translator/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for the database and profile files
    #[arg(long, global = true, env = "FREQ_TRANSLATOR_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Profile storage backend: redb or file
    #[arg(long, global = true)]
    backend: Option<StorageBackend>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Detect the language of a text
    Detect {
        text: String,

        /// Show the distance to every known language
        #[arg(long)]
        scores: bool,

        #[arg(long)]
        json: bool,
    },

    /// Add or replace a language profile from a sample text
    #[command(group(ArgGroup::new("sample").required(true).args(["text", "file"])))]
    Learn {
        code: String,

        #[arg(long)]
        text: Option<String>,

        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Translate a text (detects the source language unless --from is given)
    Translate {
        text: String,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },

    /// List the loaded language profiles
    Profiles {
        #[arg(long)]
        json: bool,
    },

    /// Show stored translations, newest first
    History {
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Store the bundled reference profiles (en, pt, es, fr)
    Seed,

    /// Interactive prompt (default)
    Repl,
}

struct App {
    classifier: LanguageClassifier,
    translator: Translator,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let mut app = open_app(&cli)?;

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Detect { text, scores, json } => run_detect(&app, &text, scores, json),
        Commands::Learn { code, text, file } => run_learn(&app, &code, text, file),
        Commands::Translate { text, from, to } => run_translate(&mut app, &text, from, to),
        Commands::Profiles { json } => run_profiles(&app, json),
        Commands::History { limit } => run_history(&app, limit),
        Commands::Seed => {
            let count = seed_reference_profiles(&app.classifier)?;
            println!("Stored {} reference profiles", count);
            Ok(())
        }
        Commands::Repl => run_repl(&mut app),
    }
}

fn open_app(cli: &Cli) -> Result<App> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = Some(dir.clone());
    }
    if let Some(backend) = cli.backend {
        config.storage.backend = backend;
    }

    let db_path = config.storage.database_file();
    let database = open_database(&db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    let profiles = open_profile_store(&config.storage, &database)
        .context("Failed to open profile store")?;
    let classifier = LanguageClassifier::bootstrap_from(profiles);

    if let Some(reason) = &classifier.bootstrap_report().degraded {
        eprintln!("{} profile store unavailable: {}", "warning:".yellow(), reason);
    }
    if config.seed.on_startup {
        if let StartupSeed::Failed(e) = seed_on_startup(&classifier) {
            eprintln!("{} could not seed reference profiles: {}", "warning:".yellow(), e);
        }
    }

    let translations = RedbTranslationStore::new(database).context("Failed to open translation cache")?;
    let translator = Translator::new(Arc::new(translations), config.translation.default_target.clone());

    Ok(App {
        classifier,
        translator,
    })
}

fn run_detect(app: &App, text: &str, scores: bool, json: bool) -> Result<()> {
    let detected = app.classifier.classify(text);
    let ranked = if scores || json {
        app.classifier.rank(text)
    } else {
        Vec::new()
    };

    if json {
        let scores: Vec<_> = ranked
            .iter()
            .map(|(code, distance)| serde_json::json!({ "code": code, "distance": distance }))
            .collect();
        let out = serde_json::json!({ "language": detected.as_str(), "scores": scores });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", detected);
    for (code, distance) in ranked {
        println!("  {:<8} {:.6}", code.as_str(), distance);
    }
    Ok(())
}

fn run_learn(app: &App, code: &str, text: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let code = LanguageCode::new(code)?;
    let sample = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read sample {}", path.display()))?,
        (None, None) => bail!("either --text or --file is required"),
    };

    app.classifier.upsert_profile(&code, &sample)?;
    println!("Stored profile '{}'", code);
    Ok(())
}

fn run_translate(app: &mut App, text: &str, from: Option<String>, to: Option<String>) -> Result<()> {
    let source_lang = match from {
        Some(lang) => lang,
        None => app.classifier.classify(text).to_string(),
    };
    let target_lang = match to {
        Some(lang) => lang,
        None => match LanguageCode::new(&source_lang) {
            Ok(code) => app.translator.target_for(&lang_core::Detection::Language(code)),
            Err(_) => app.translator.target_for(&lang_core::Detection::Unknown),
        },
    };

    let translation = app.translator.translate(text, &source_lang, &target_lang)?;
    println!("[{} -> {}] {}", source_lang, target_lang, translation.text);
    Ok(())
}

fn run_profiles(app: &App, json: bool) -> Result<()> {
    let catalog = app.classifier.catalog_snapshot();

    if json {
        let mut map = serde_json::Map::new();
        for (code, profile) in catalog.iter() {
            map.insert(code.to_string(), serde_json::to_value(profile.as_ref())?);
        }
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    if catalog.is_empty() {
        println!("No language profiles loaded.");
    }
    for (code, profile) in catalog.iter() {
        let mut top: Vec<(char, f64)> = profile.iter().collect();
        top.sort_by(|a, b| b.1.total_cmp(&a.1));
        let preview: Vec<String> = top
            .iter()
            .take(5)
            .map(|(c, p)| format!("{}={:.3}", c, p))
            .collect();
        println!("{:<8} {:>3} chars  {}", code.as_str(), profile.len(), preview.join(" "));
    }
    Ok(())
}

fn run_history(app: &App, limit: usize) -> Result<()> {
    for record in app.translator.history()?.into_iter().take(limit) {
        println!(
            "{}  [{} -> {}] {} => {}",
            record.created_at.format("%Y-%m-%d %H:%M:%S"),
            record.source_lang,
            record.target_lang,
            record.source_text,
            record.target_text
        );
    }
    Ok(())
}

fn run_repl(app: &mut App) -> Result<()> {
    println!("{}", "Frequency Translator. Type 'exit' to quit.".bold());
    println!("---------------------------------------------------------------");
    println!("Type text to detect and translate it.");
    println!("Commands: ':learn <code> <sample text>', ':profiles', ':history'.\n");

    loop {
        print!("> ");
        stdout().flush()?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let cmd = input.trim();

        match cmd {
            "exit" | "quit" => break,
            "" => continue,
            ":profiles" => run_profiles(app, false)?,
            ":history" => run_history(app, 10)?,
            s if s.starts_with(":learn ") => {
                let mut parts = s[":learn ".len()..].trim().splitn(2, char::is_whitespace);
                let code = parts.next().unwrap_or("");
                let sample = parts.next().unwrap_or("").trim();
                if sample.is_empty() {
                    println!("{}", "usage: :learn <code> <sample text>".red());
                    continue;
                }
                match LanguageCode::new(code) {
                    Ok(code) => match app.classifier.upsert_profile(&code, sample) {
                        Ok(()) => println!("Stored profile '{}'", code),
                        Err(e) => println!("{} {}", "error:".red(), e),
                    },
                    Err(e) => println!("{} {}", "error:".red(), e),
                }
            }
            text => match app.translator.detect_and_translate(&app.classifier, text) {
                Ok(Some(result)) => {
                    let origin = match result.translation.origin {
                        TranslationOrigin::Cache => "memory",
                        TranslationOrigin::Store => "store",
                        TranslationOrigin::Dictionary => "dictionary",
                    };
                    println!(
                        "Detected: {}",
                        result.detected.as_str().to_uppercase().green()
                    );
                    println!(
                        "{} {}  ({})",
                        format!("[{}]", result.target_lang).cyan(),
                        result.translation.text,
                        origin.dark_grey()
                    );
                }
                Ok(None) => {}
                Err(e) => println!("{} {}", "error:".red(), e),
            },
        }
    }

    Ok(())
}
