mod presenter;
mod seed;

use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fonoteca_core::services::{ReportService, ReportSession, SessionEvent, ALL_CATEGORIES};

use crate::presenter::ConsolePresenter;

/// Console front-end for the song catalog report pipeline.
#[derive(Debug, Parser)]
#[command(name = "fonoteca", about = "Informe filtrable del catálogo de canciones")]
struct Args {
  /// TOML seed file with the catalog (songs and genres). A small built-in
  /// catalog is used when omitted.
  #[arg(long)]
  seed: Option<PathBuf>,

  /// Search text, matched case-insensitively against the product name.
  #[arg(long, default_value = "")]
  buscar: String,

  /// Exact category, or the "Todas" sentinel for no category restriction.
  #[arg(long, default_value = ALL_CATEGORIES)]
  categoria: String,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let args = Args::parse();

  // --- Dependency injection phase ---

  // 1. Data port adapter (in-memory catalog, seeded from TOML).
  let catalog = seed::load(args.seed.as_deref())?;

  // 2. Core pipeline over the data port.
  let service = ReportService::new(catalog);

  // 3. Presentation port adapter (stdout).
  let presenter = ConsolePresenter::default();

  // 4. Session wiring: initialization plus one filter request, serialized
  //    through the event channel like any other host would do it.
  let mut session = ReportSession::new(service, presenter);
  session.start();

  let (tx, rx) = mpsc::channel();
  tx.send(SessionEvent::Filter { search_text: args.buscar, category: args.categoria })?;
  tx.send(SessionEvent::Shutdown)?;
  session.run(rx);

  Ok(())
}
