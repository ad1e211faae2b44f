use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use call_integration::EmbeddedCallConnector;
use clap::Parser;
use client_core::ScreenFlow;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod orchestration;
mod render;

use commands::parse_command;
use config::load_settings;
use orchestration::{dispatch, Reply};

#[derive(Parser, Debug)]
#[command(about = "Train custom signs and test a simulated recognizer")]
struct Args {
    /// TOML settings file (defaults to ./translator.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Read commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,
    /// Print every session event as a JSON line
    #[arg(long)]
    json_events: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref())?;
    info!(
        "settings: capture_latency_ms={} recognition_period_ms={} smoothing_window={}",
        settings.capture_latency_ms, settings.recognition_period_ms, settings.smoothing_window
    );

    let mut flow = ScreenFlow::new(settings.session_config())
        .with_call_connector(Arc::new(EmbeddedCallConnector::new(settings.embed_config())));

    let events = flow.subscribe_events();
    let json_events = args.json_events;
    let printer = tokio::spawn(render::forward_events(events, move |event| {
        if json_events {
            match serde_json::to_string(event) {
                Ok(line) => println!("{line}"),
                Err(err) => warn!("failed to encode event: {err}"),
            }
        } else if let Some(line) = render::describe_event(event) {
            println!("* {line}");
        }
    }));

    let input: Box<dyn AsyncBufRead + Unpin + Send> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            tokio::fs::File::open(path)
                .await
                .with_context(|| format!("failed to open script '{}'", path.display()))?,
        )),
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    println!("{}", render::status(&flow).await);
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("failed to read command")? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        match dispatch(&mut flow, command).await {
            Reply::Text(text) => println!("{text}"),
            Reply::Silent => {}
            Reply::Quit => break,
        }
    }

    flow.shutdown().await;
    tokio::task::yield_now().await;
    printer.abort();
    info!("session ended");
    Ok(())
}
