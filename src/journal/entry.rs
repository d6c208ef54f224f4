//! Journal entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kinds of runs that are journaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// A sale amount was distributed
    Distribute,
    /// A profit summary was produced
    Summary,
    /// Purchase drafts were validated
    PurchaseCheck,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Distribute => write!(f, "DISTRIBUTE"),
            Operation::Summary => write!(f, "SUMMARY"),
            Operation::PurchaseCheck => write!(f, "PURCHASE CHECK"),
        }
    }
}

/// A single journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// When the run finished (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// One-line description of the run
    pub summary: String,

    /// Inputs and headline figures
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl JournalEntry {
    /// Create an entry stamped with the current time
    pub fn new(
        operation: Operation,
        summary: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            summary: summary.into(),
            details,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.summary
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Distribute.to_string(), "DISTRIBUTE");
        assert_eq!(Operation::PurchaseCheck.to_string(), "PURCHASE CHECK");
    }

    #[test]
    fn test_serialization() {
        let entry =
            JournalEntry::new(Operation::PurchaseCheck, "3 accepted", json!({"rejected": 1}));

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"operation\":\"purchase_check\""));

        let deserialized: JournalEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.operation, Operation::PurchaseCheck);
        assert_eq!(deserialized.details["rejected"], 1);
    }

    #[test]
    fn test_null_details_omitted() {
        let entry = JournalEntry::new(Operation::Summary, "2 months", serde_json::Value::Null);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("details"));

        let deserialized: JournalEntry = serde_json::from_str(&json).unwrap();
        assert!(deserialized.details.is_null());
    }

    #[test]
    fn test_human_readable_format() {
        let entry = JournalEntry::new(Operation::Distribute, "10000.00 over 30 days", json!({}));
        let formatted = entry.format_human_readable();
        assert!(formatted.contains("UTC] DISTRIBUTE 10000.00 over 30 days"));
    }
}
