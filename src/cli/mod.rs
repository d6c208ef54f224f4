//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod config;
pub mod distribute;
pub mod journal;
pub mod purchase;
pub mod summary;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::config::{GstrPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::journal::{JournalEntry, RunJournal};

pub use config::{handle_config_command, ConfigCommands};
pub use distribute::{handle_distribute_command, DistributeArgs};
pub use journal::{handle_journal_command, JournalArgs};
pub use purchase::{handle_purchase_command, PurchaseCommands};
pub use summary::{handle_summary_command, SummaryArgs};

/// Open an output file for buffered writing
fn create_output(path: &Path) -> LedgerResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

/// Open an input file, naming it in the error
fn open_input(path: &Path, what: &str) -> LedgerResult<File> {
    File::open(path).map_err(|e| {
        LedgerError::Import(format!("Failed to open {} {}: {}", what, path.display(), e))
    })
}

/// Append a run to the journal if journaling is enabled
///
/// A journal that cannot be written never fails the command itself.
fn record_run(paths: &GstrPaths, settings: &Settings, entry: JournalEntry) {
    if !settings.journal_enabled {
        return;
    }

    let result = paths
        .ensure_directories()
        .and_then(|()| RunJournal::new(paths.journal_file()).log(&entry));

    match result {
        Ok(()) => log::debug!("journaled {} run", entry.operation),
        Err(e) => log::warn!("could not write run journal: {}", e),
    }
}
