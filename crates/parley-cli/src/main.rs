//! Interactive terminal driver for the Parley conversation controller.
//!
//! This is a minimal view-layer consumer: it renders snapshots as text and
//! forwards typed intents. All conversation logic lives in the controller
//! crates.

use anyhow::Result;
use clap::Parser;
use parley_application::ViewCoordinator;
use parley_core::conversation::MessageRole;
use parley_core::view::NullViewEffects;
use parley_infrastructure::{JsonFileStore, load_controller_config};
use parley_interaction::{FilePayload, HttpAnswerBackend};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "parley")]
#[command(about = "Parley - conversational client for a citation-aware answering service", long_about = None)]
struct Cli {
    /// Ask endpoint URL (overrides the config file)
    #[arg(long)]
    ask_url: Option<String>,
    /// Upload endpoint URL (overrides the config file)
    #[arg(long)]
    upload_url: Option<String>,
    /// Do not resolve a persisted guest identity
    #[arg(long)]
    no_guest: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = load_controller_config().await?;
    if let Some(url) = cli.ask_url {
        config.ask_endpoint = url;
    }
    if let Some(url) = cli.upload_url {
        config.upload_endpoint = url;
    }
    if cli.no_guest {
        config.enable_guest_sessions = false;
    }

    let backend = Arc::new(HttpAnswerBackend::from_config(&config));
    let device_store = Arc::new(JsonFileStore::at_default_location()?);
    let coordinator =
        ViewCoordinator::initialize(config, backend, Arc::new(NullViewEffects), device_store)
            .await?;

    if coordinator.snapshot().await.session.is_guest {
        println!("You're chatting as a guest. Sign in to save your conversation.");
    }
    println!("Type a question, :upload <path>, :sources, :new, or :quit.");

    let mut printed = 0usize;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        match line.as_str() {
            "" => continue,
            ":quit" => break,
            ":sources" => {
                coordinator.toggle_panel().await;
                let snapshot = coordinator.snapshot().await;
                if !snapshot.panel.open {
                    println!("(sources hidden)");
                } else if snapshot.panel.citations.is_empty() {
                    println!("(no sources yet)");
                } else {
                    for citation in &snapshot.panel.citations {
                        println!("source> {}", citation.0);
                    }
                }
            }
            ":new" => {
                coordinator.switch_thread().await;
                printed = 0;
                println!("(new thread)");
            }
            _ if line.starts_with(":upload ") => {
                let path = line.trim_start_matches(":upload ").trim().to_string();
                match tokio::fs::read(&path).await {
                    Ok(bytes) => {
                        let file_name = Path::new(&path)
                            .file_name()
                            .map(|name| name.to_string_lossy().into_owned())
                            .unwrap_or_else(|| path.clone());
                        coordinator
                            .select_file(FilePayload::new(file_name, bytes))
                            .await;
                        printed = render_new(&coordinator, printed).await;
                    }
                    Err(e) => println!("Cannot read {path}: {e}"),
                }
            }
            _ => {
                coordinator.submit_query(&line).await;
                printed = render_new(&coordinator, printed).await;
            }
        }
    }

    coordinator.close();
    Ok(())
}

/// Prints messages appended since the last render; returns the new count.
async fn render_new(coordinator: &ViewCoordinator, printed: usize) -> usize {
    let snapshot = coordinator.snapshot().await;
    for message in &snapshot.messages[printed..] {
        let prefix = match message.role {
            MessageRole::User => "you",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
        };
        println!("{prefix}> {}", message.content.text());
    }
    if snapshot.panel.open && !snapshot.panel.citations.is_empty() {
        println!(
            "({} sources available - :sources to view)",
            snapshot.panel.citations.len()
        );
    }
    snapshot.messages.len()
}
