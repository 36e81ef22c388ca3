//! Listen command - parse a live transcript fed line by line on stdin.
//!
//! Each input line is the speech engine's full transcript so far. Every line
//! but the last is a partial result; end of input marks the last line final.
//! One JSON update is printed per line.

use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

use mileage_core::{
    parser_for, FillUpUpdate, ParseStrategy, TranscriptEvent, TranscriptSubscriber,
};

use super::config::load_config;

/// Arguments for the listen command.
#[derive(Args)]
pub struct ListenArgs {
    /// Parser strategy, overriding the configured one
    #[arg(short, long)]
    strategy: Option<ParseStrategy>,

    /// Only print the final update
    #[arg(long)]
    final_only: bool,

    /// Skip partial updates whose fields did not change
    #[arg(long)]
    skip_unchanged: bool,

    /// Channel capacity between the reader, parser and printer
    #[arg(long, default_value = "32")]
    buffer: usize,
}

pub async fn run(args: ListenArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(strategy) = args.strategy {
        config.extraction.strategy = strategy;
    }

    let buffer = args.buffer.max(1);
    let (event_tx, event_rx) = mpsc::channel::<TranscriptEvent>(buffer);
    let (update_tx, mut update_rx) = mpsc::channel::<FillUpUpdate>(buffer);

    let subscriber = TranscriptSubscriber::new(parser_for(&config.extraction))
        .skip_unchanged(args.skip_unchanged);
    let parse_task = tokio::spawn(subscriber.run(event_rx, update_tx));

    let reader_task = tokio::spawn(read_events(event_tx));

    let final_only = args.final_only;
    while let Some(update) = update_rx.recv().await {
        if final_only && !update.is_final {
            continue;
        }
        println!("{}", serde_json::to_string(&update)?);
    }

    let lines = reader_task.await??;
    let last = parse_task.await??;
    info!(
        "Read {} transcript lines, final fields: {:?}",
        lines,
        last.unwrap_or_default()
    );

    Ok(())
}

/// Forward stdin lines as transcript events, holding each back until the
/// next one shows whether it was the last.
async fn read_events(events: mpsc::Sender<TranscriptEvent>) -> anyhow::Result<usize> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<String> = None;
    let mut count = 0usize;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        count += 1;
        debug!("Transcript line {}: {:?}", count, line);

        if let Some(previous) = pending.replace(line) {
            if events.send(TranscriptEvent::Partial(previous)).await.is_err() {
                return Ok(count);
            }
        }
    }

    if let Some(last) = pending {
        // A closed channel only means the parser already stopped
        let _ = events.send(TranscriptEvent::Final(last)).await;
    }

    Ok(count)
}
