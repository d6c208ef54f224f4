//! CLI command for reviewing past runs

use clap::Args;

use crate::config::GstrPaths;
use crate::error::LedgerResult;
use crate::journal::RunJournal;

/// Arguments of `gstr journal`
#[derive(Args, Debug)]
pub struct JournalArgs {
    /// Number of most recent entries to show
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,

    /// Also print each entry's details as JSON
    #[arg(short, long)]
    pub verbose: bool,
}

/// Handle `gstr journal`
pub fn handle_journal_command(paths: &GstrPaths, args: JournalArgs) -> LedgerResult<()> {
    let journal = RunJournal::new(paths.journal_file());
    let entries = journal.read_recent(args.limit)?;

    if entries.is_empty() {
        println!("No journal entries.");
        return Ok(());
    }

    let total = journal.entry_count()?;
    println!("Showing {} of {} run(s):", entries.len(), total);

    for entry in &entries {
        println!("{}", entry.format_human_readable());
        if args.verbose && !entry.details.is_null() {
            println!("  {}", entry.details);
        }
    }

    Ok(())
}
