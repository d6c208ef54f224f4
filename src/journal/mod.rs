//! Run journal for gstr-ledger
//!
//! Records each distribution, profit summary and purchase check in an
//! append-only journal so past runs can be reviewed.
//!
//! # Architecture
//!
//! - `JournalEntry`: one run with timestamp, operation, a one-line summary,
//!   and JSON details (inputs and headline figures).
//! - `RunJournal`: writes entries to the journal file as line-delimited JSON
//!   (JSONL) and reads them back.
//!
//! # Example
//!
//! ```rust,ignore
//! use gstr_ledger::journal::{JournalEntry, Operation, RunJournal};
//! use serde_json::json;
//!
//! let journal = RunJournal::new(paths.journal_file());
//! let entry = JournalEntry::new(
//!     Operation::Distribute,
//!     "10000.00 over 2024-01-01 to 2024-01-30",
//!     json!({ "seed": 7 }),
//! );
//! journal.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{JournalEntry, Operation};
pub use logger::RunJournal;
