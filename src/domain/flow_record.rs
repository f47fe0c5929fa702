// ============================================================
// Layer 3 — Flow Record Domain Type
// ============================================================
// Represents a single network flow after cleaning: the raw
// string fields exactly as they appeared in the CSV, plus the
// binary label derived from the label column.
//
// The label column itself stays inside `fields`; downstream
// code reads `label` and never parses that column again.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// Label value that marks a flow as benign. Anything else is an attack.
pub const BENIGN_LABEL: &str = "BENIGN";

/// One labelled flow record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowRecord {
    /// Raw CSV fields in column order
    pub fields: Vec<String>,

    /// 0 = benign, 1 = malicious
    pub label: u8,
}

impl FlowRecord {
    /// Build a record, deriving the label from the raw label text.
    pub fn new(fields: Vec<String>, label_text: &str) -> Self {
        Self {
            fields,
            label: binarize_label(label_text),
        }
    }

    /// Field at `index`, if the row is wide enough
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn is_malicious(&self) -> bool {
        self.label == 1
    }
}

/// Map a raw label to 0 (benign) or 1 (attack).
pub fn binarize_label(label_text: &str) -> u8 {
    if label_text.trim() == BENIGN_LABEL { 0 } else { 1 }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benign_is_zero() {
        assert_eq!(binarize_label("BENIGN"), 0);
        // CICIDS files sometimes pad values with spaces
        assert_eq!(binarize_label(" BENIGN "), 0);
    }

    #[test]
    fn test_any_attack_is_one() {
        assert_eq!(binarize_label("DoS Hulk"), 1);
        assert_eq!(binarize_label("PortScan"), 1);
        assert_eq!(binarize_label("benign"), 1);
    }

    #[test]
    fn test_record_label() {
        let r = FlowRecord::new(vec!["a".into(), "DDoS".into()], "DDoS");
        assert!(r.is_malicious());
        assert_eq!(r.field(0), Some("a"));
        assert_eq!(r.field(5), None);
    }
}
