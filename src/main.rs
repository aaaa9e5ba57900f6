//! Browse COM interface registrations
//!
//! Loads a registry snapshot (see [`snapshot`]), normalizes every interface
//! into an `InterfaceEntry`, adds the well-known roots and prints them sorted
//! by name. With `--json` the entries are printed in their attribute encoding
//! instead, which `InterfaceEntry` deserializes back losslessly.

mod snapshot;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use comentry::InterfaceEntry;

use crate::snapshot::Snapshot;

#[derive(Debug, Parser)]
#[command(name = "comentry-examples", about = "Normalize and list COM interface registrations")]
struct Args {
    /// JSON snapshot of HKCR\Interface. Without one, only well-known interfaces are listed.
    snapshot: Option<PathBuf>,

    /// Print entries as JSON attribute maps
    #[arg(long)]
    json: bool,

    /// Trace normalization defaults
    #[arg(short, long)]
    verbose: bool,
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("comentry=trace,comentry_examples=debug")
        } else {
            EnvFilter::new("comentry=info,comentry_examples=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn flags(entry: &InterfaceEntry) -> String {
    let mut flags = Vec::new();
    if entry.is_dispatch() {
        flags.push("dispatch");
    }
    if entry.is_ole_control() {
        flags.push("olecontrol");
    }
    if entry.is_marshal() {
        flags.push("marshal");
    }
    if entry.is_persist_stream() {
        flags.push("persiststream");
    }
    if entry.is_class_factory() {
        flags.push("classfactory");
    }
    if entry.has_proxy() {
        flags.push("proxy");
    }
    if entry.has_type_lib() {
        flags.push("typelib");
    }
    flags.join(",")
}

fn print_table(entries: &[InterfaceEntry]) {
    println!("=== {} interfaces ===\n", entries.len());
    for entry in entries {
        let base = if entry.base().is_empty() { "-" } else { entry.base() };
        println!(
            "{:<40} {:?} methods={:<3} base={:<20} {}",
            entry.name(),
            entry.iid(),
            entry.num_methods(),
            base,
            flags(entry)
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_tracing(args.verbose);

    let snapshot = match &args.snapshot {
        Some(path) => Snapshot::load(path)?,
        None => Snapshot::default(),
    };
    let entries = snapshot.entries();
    tracing::info!(count = entries.len(), "loaded interface entries");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print_table(&entries);
    }

    Ok(())
}
