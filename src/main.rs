//! Command-line inspector for board files.
//!
//! `pinboard [BOARD.json] [--export OUT.json]` loads and normalizes a board,
//! prints a summary of its tabs and resource usage, and optionally writes
//! the normalized board elsewhere.

use anyhow::{Context, Result};
use clap::Parser;
use pinboard::persistence::{JsonStore, Persistence};
use pinboard::resources::FsResources;
use pinboard::settings::{AppSettings, default_settings_path};
use pinboard::status::LogStatus;
use pinboard::{Board, Document, logging};
use std::path::PathBuf;
use std::sync::Arc;

/// Inspect a pinboard board file.
#[derive(Parser, Debug)]
#[command(name = "pinboard", about = "Summarize and re-export pinboard boards")]
struct Args {
    /// Board file to load. A new empty board is used when omitted.
    #[arg(value_name = "BOARD.json")]
    board: Option<PathBuf>,

    /// Write the normalized board to this path.
    #[arg(long, value_name = "OUT.json")]
    export: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();
    let settings = AppSettings::load();

    let document = match &args.board {
        Some(path) => JsonStore
            .load(path.clone())
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => Document::new(),
    };

    let mut board = Board::new(
        tokio::runtime::Handle::current(),
        document,
        settings,
        JsonStore,
        Arc::new(FsResources),
        Arc::new(LogStatus),
    )
    .with_settings_path(default_settings_path());

    {
        let session = board.session();
        let session = session.lock();
        let doc = session.document();
        println!("format {} | ui scale {:.2}", doc.version, doc.ui.scale);
        for tab in &doc.tabs {
            let marker = if tab.id == doc.active_tab_id { "*" } else { " " };
            println!(
                "{marker} {:<40} {:>4} items  camera ({:.0}, {:.0}) x{:.2}",
                tab.name,
                tab.items.len(),
                tab.camera.tx,
                tab.camera.ty,
                tab.camera.scale
            );
        }
    }

    let usage = board.byte_usage();
    println!("active tab {:.1} MB | total {:.1} MB", usage.tab_mb(), usage.total_mb());

    if let Some(out) = &args.export {
        board
            .export(out)
            .await
            .with_context(|| format!("exporting to {}", out.display()))?;
    }
    board.close().await?;
    println!("{}", board.status_line());
    Ok(())
}
