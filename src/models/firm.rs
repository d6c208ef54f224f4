//! Supplier firms and the directory used to look them up
//!
//! Purchase entry only ever reads firms: picking a firm name fills in its
//! GSTIN. Maintaining the list is somebody else's job.

use serde::{Deserialize, Serialize};

/// A supplier firm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Firm {
    #[serde(rename = "firmName", alias = "name", alias = "firm_name")]
    pub name: String,
    pub gstin: String,
}

impl Firm {
    pub fn new(name: impl Into<String>, gstin: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gstin: gstin.into(),
        }
    }
}

/// Read-only lookup of firms by name
pub trait FirmDirectory {
    /// Find a firm by name, ignoring case and surrounding whitespace
    fn lookup(&self, name: &str) -> Option<Firm>;

    /// All known firms
    fn list(&self) -> Vec<Firm>;
}

/// `FirmDirectory` over a list held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryFirmDirectory {
    firms: Vec<Firm>,
}

impl InMemoryFirmDirectory {
    pub fn new(firms: Vec<Firm>) -> Self {
        Self { firms }
    }

    pub fn len(&self) -> usize {
        self.firms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.firms.is_empty()
    }
}

impl FirmDirectory for InMemoryFirmDirectory {
    fn lookup(&self, name: &str) -> Option<Firm> {
        let wanted = name.trim();
        self.firms
            .iter()
            .find(|firm| firm.name.trim().eq_ignore_ascii_case(wanted))
            .cloned()
    }

    fn list(&self) -> Vec<Firm> {
        self.firms.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> InMemoryFirmDirectory {
        InMemoryFirmDirectory::new(vec![
            Firm::new("Sharma Traders", "27AAPFU0939F1ZV"),
            Firm::new("Gupta & Sons", "09AAACH7409R1ZZ"),
        ])
    }

    #[test]
    fn test_lookup_ignores_case_and_spaces() {
        let firms = directory();
        let found = firms.lookup("  sharma traders ").unwrap();
        assert_eq!(found.gstin, "27AAPFU0939F1ZV");
        assert!(firms.lookup("Unknown Firm").is_none());
    }

    #[test]
    fn test_deserialize_original_field_names() {
        let firm: Firm =
            serde_json::from_str(r#"{"firmName": "Gupta & Sons", "gstin": "09AAACH7409R1ZZ"}"#)
                .unwrap();
        assert_eq!(firm.name, "Gupta & Sons");

        let firm: Firm = serde_json::from_str(r#"{"name": "Gupta & Sons", "gstin": "X"}"#).unwrap();
        assert_eq!(firm.name, "Gupta & Sons");
    }

    #[test]
    fn test_list() {
        let firms = directory();
        assert_eq!(firms.list().len(), 2);
        assert!(!firms.is_empty());
    }
}
