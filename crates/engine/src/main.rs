//! Loreforge command line - Main entry point.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loreforge_domain::{
    tokenize, DialogueLibrary, DialogueSelection, ExportKind, QuestProgress, StepRef, Token,
};
use loreforge_engine::infrastructure::config::EngineConfig;
use loreforge_engine::App;

#[derive(Debug, Parser)]
#[command(name = "loreforge", version, about = "Game content authoring tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the token tree of a dialogue script
    Tokenize {
        file: PathBuf,
        /// Print tokens as JSON instead of a tree
        #[arg(long)]
        json: bool,
    },
    /// Report structural issues in a dialogue library (.dlg.json)
    Check {
        file: PathBuf,
        /// Re-assign duplicate ids and names and write the file back
        #[arg(long)]
        fix: bool,
    },
    /// Show which entry a dialogue library selects for a quest state
    Select {
        file: PathBuf,
        #[arg(long, default_value = "")]
        quest: String,
        #[arg(long, default_value = "")]
        step: String,
        #[arg(long, default_value = "")]
        status: String,
    },
    /// Re-export a record under its canonical file name
    Export {
        file: PathBuf,
        /// Record kind: character, item, quest, dialogue, object, spell,
        /// faction, location, audio, lore (or a file suffix such as `dlg`)
        #[arg(long)]
        kind: ExportKind,
        /// Output directory (defaults to LOREFORGE_EXPORT_DIR)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loreforge_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Tokenize { file, json } => run_tokenize(&file, json).await,
        Command::Check { file, fix } => run_check(&file, fix).await,
        Command::Select {
            file,
            quest,
            step,
            status,
        } => run_select(&file, QuestProgress::new(quest, parse_step(&step), status)).await,
        Command::Export { file, kind, out } => run_export(&file, kind, out).await,
    }
}

async fn read_text(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

async fn read_library(path: &Path) -> anyhow::Result<DialogueLibrary> {
    let text = read_text(path).await?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} is not a dialogue library", path.display()))
}

async fn run_tokenize(path: &Path, json: bool) -> anyhow::Result<()> {
    let tokens = tokenize(&read_text(path).await?);
    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        print_tokens(&tokens, 0);
    }
    Ok(())
}

fn print_tokens(tokens: &[Token], depth: usize) {
    for token in tokens {
        println!(
            "{:indent$}{:?} {}..{} {:?}",
            "",
            token.kind,
            token.start,
            token.end,
            token.text,
            indent = depth * 2
        );
        print_tokens(&token.children, depth + 1);
    }
}

async fn run_check(path: &Path, fix: bool) -> anyhow::Result<()> {
    let mut library = read_library(path).await?;

    if fix {
        let changed = library.normalize();
        if changed > 0 {
            let json = serde_json::to_string_pretty(&library)?;
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), changed, "Dialogue library normalized");
        }
    }

    let issues = library.validate();
    println!(
        "{}: {} entries, {} issue(s)",
        library.subject_id,
        library.len(),
        issues.len()
    );
    for issue in &issues {
        println!("  - {}", issue);
    }
    Ok(())
}

fn parse_step(raw: &str) -> StepRef {
    match raw.trim().parse::<i64>() {
        Ok(n) => StepRef::Number(n),
        Err(_) => StepRef::from(raw),
    }
}

async fn run_select(path: &Path, progress: QuestProgress) -> anyhow::Result<()> {
    let library = read_library(path).await?;

    let (how, entry) = match library.select(&progress) {
        DialogueSelection::Matched(entry) => ("matched", entry),
        DialogueSelection::Default(entry) => ("default", entry),
        DialogueSelection::Empty => {
            println!("No line for this quest state");
            return Ok(());
        }
    };

    println!("[{}] #{} {}", how, entry.entry_id, entry.display_name);
    println!("{}", entry.conversation_text);
    Ok(())
}

async fn run_export(path: &Path, kind: ExportKind, out: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = EngineConfig::from_env()?;
    if let Some(dir) = out {
        config.export_dir = dir;
    }
    let app = App::in_memory(config);

    let document: serde_json::Value = serde_json::from_str(&read_text(path).await?)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    if !document.is_object() {
        bail!("{} must contain a JSON object", path.display());
    }

    let written = app.exporter.export_document(kind, document).await?;
    println!("{}", written.display());
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_export_kind_by_suffix() {
        let cli = Cli::try_parse_from(["loreforge", "export", "x.json", "--kind", "dlg"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Export {
                kind: ExportKind::Dialogue,
                out: None,
                ..
            }
        ));
    }

    #[test]
    fn numeric_steps_parse_as_numbers() {
        assert_eq!(parse_step("2"), StepRef::Number(2));
        assert_eq!(parse_step("intro"), StepRef::from("intro"));
        assert_eq!(parse_step(""), StepRef::any());
    }
}
