// ============================================================
// Layer 4 — CSV Flow Loader
// ============================================================
// Reads a CICIDS flow CSV with the `csv` crate and cleans it
// row by row.
//
// Cleaning steps (applied in order):
//   1. Binarise the label column: "BENIGN" → 0, anything else → 1
//   2. Drop rows whose `Flow Packets/s` or `Flow Bytes/s` field
//      is the literal string "Infinity" or "NaN"
//   3. Drop every remaining row that has any missing value
//      outside the label column (a binarised label is never
//      missing, so an empty or NA label counts as malicious):
//        - an empty field
//        - a pandas-style NA marker ("NA", "null", "nan", ...)
//        - a numeric field that is not finite ("inf", "-Infinity")
//
// CICIDS headers carry stray spaces (" Label", " Flow Packets/s"),
// so headers are trimmed before columns are looked up by name.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::PathBuf;

use crate::domain::flow_record::FlowRecord;
use crate::domain::traits::FlowSource;

pub const LABEL_COLUMN:        &str = "Label";
pub const FLOW_PACKETS_COLUMN: &str = "Flow Packets/s";
pub const FLOW_BYTES_COLUMN:   &str = "Flow Bytes/s";

/// Literal markers that invalidate the two rate columns.
const INVALID_RATE_MARKERS: [&str; 2] = ["Infinity", "NaN"];

/// Strings pandas reads as NaN by default.
const NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan",
    "1.#IND", "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None",
    "n/a", "nan", "null",
];

/// Counts of what happened to each row during cleaning.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleaningReport {
    pub total:                usize,
    pub kept:                 usize,
    pub dropped_rate_markers: usize,
    pub dropped_missing:      usize,
}

/// Loads and cleans flow records from one CSV file.
/// Implements the FlowSource trait from Layer 3.
pub struct CsvFlowLoader {
    path: PathBuf,
}

impl CsvFlowLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the file and return the surviving records together with
    /// a breakdown of the rows that were dropped.
    pub fn load_with_report(&self) -> Result<(Vec<FlowRecord>, CleaningReport)> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::Headers)
            .from_path(&self.path)
            .with_context(|| format!("Cannot open CSV file '{}'", self.path.display()))?;

        let headers = reader
            .headers()
            .with_context(|| format!("Cannot read CSV header of '{}'", self.path.display()))?
            .clone();

        let label_idx   = column_index(&headers, LABEL_COLUMN)?;
        let packets_idx = column_index(&headers, FLOW_PACKETS_COLUMN)?;
        let bytes_idx   = column_index(&headers, FLOW_BYTES_COLUMN)?;

        let mut report  = CleaningReport::default();
        let mut records = Vec::new();

        for (i, row) in reader.records().enumerate() {
            // +2: one for the header line, one for 1-based line numbers
            let row = row.with_context(|| {
                format!("Malformed CSV row at line {} of '{}'", i + 2, self.path.display())
            })?;
            report.total += 1;

            if has_rate_marker(&row, packets_idx) || has_rate_marker(&row, bytes_idx) {
                report.dropped_rate_markers += 1;
                continue;
            }

            let missing = row
                .iter()
                .enumerate()
                .any(|(col, field)| col != label_idx && is_missing(field));
            if missing {
                report.dropped_missing += 1;
                continue;
            }

            let label_text = row.get(label_idx).unwrap_or_default().to_string();
            let fields: Vec<String> = row.iter().map(str::to_string).collect();
            records.push(FlowRecord::new(fields, &label_text));
        }

        report.kept = records.len();
        tracing::info!(
            "Loaded {} of {} rows from '{}' ({} dropped for Infinity/NaN rates, {} for missing values)",
            report.kept,
            report.total,
            self.path.display(),
            report.dropped_rate_markers,
            report.dropped_missing,
        );

        Ok((records, report))
    }
}

impl FlowSource for CsvFlowLoader {
    fn load_all(&self) -> Result<Vec<FlowRecord>> {
        self.load_with_report().map(|(records, _)| records)
    }
}

/// Position of a (trimmed) header name.
fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .with_context(|| format!("CSV has no '{name}' column"))
}

fn has_rate_marker(row: &StringRecord, idx: usize) -> bool {
    row.get(idx)
        .map(|v| INVALID_RATE_MARKERS.contains(&v.trim()))
        .unwrap_or(false)
}

/// True when a field would be NaN or ±inf after pandas-style parsing.
pub fn is_missing(field: &str) -> bool {
    let field = field.trim();
    if field.is_empty() || NA_VALUES.contains(&field) {
        return true;
    }
    // f64::from_str accepts "inf", "Infinity" and "NaN" in any case
    matches!(field.parse::<f64>(), Ok(v) if !v.is_finite())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    const SAMPLE: &str = "\
Flow ID, Source IP,Flow Bytes/s, Flow Packets/s, Label
f1,10.0.0.1,100.5,2.0,BENIGN
f2,10.0.0.2,Infinity,2.0,DDoS
f3,10.0.0.3,5.0,NaN,BENIGN
f4,10.0.0.4,5.0,1.0,PortScan
f5,,5.0,1.0,BENIGN
f6,10.0.0.6,-inf,1.0,BENIGN
";

    #[test]
    fn test_drops_marker_and_missing_rows() {
        let f = write_csv(SAMPLE);
        let (records, report) = CsvFlowLoader::new(f.path()).load_with_report().unwrap();

        assert_eq!(report.total, 6);
        assert_eq!(report.dropped_rate_markers, 2);
        assert_eq!(report.dropped_missing, 2);
        assert_eq!(report.kept, 2);

        let ids: Vec<&str> = records.iter().map(|r| r.fields[0].as_str()).collect();
        assert_eq!(ids, vec!["f1", "f4"]);
    }

    #[test]
    fn test_labels_are_binary() {
        let f = write_csv(SAMPLE);
        let records = CsvFlowLoader::new(f.path()).load_all().unwrap();
        let labels: Vec<u8> = records.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec![0, 1]);
        assert!(records.iter().all(|r| r.label <= 1));
    }

    #[test]
    fn test_empty_or_na_label_is_kept_as_malicious() {
        let f = write_csv("\
Flow Bytes/s,Flow Packets/s,Label
1.0,2.0,BENIGN
1.0,2.0,
1.0,2.0,NA
");
        let (records, report) = CsvFlowLoader::new(f.path()).load_with_report().unwrap();
        assert_eq!(report.kept, 3);
        assert_eq!(report.dropped_missing, 0);
        let labels: Vec<u8> = records.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec![0, 1, 1]);
    }

    #[test]
    fn test_missing_label_column_is_an_error() {
        let f = write_csv("Flow Bytes/s,Flow Packets/s\n1,2\n");
        assert!(CsvFlowLoader::new(f.path()).load_all().is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(CsvFlowLoader::new("/definitely/not/here.csv").load_all().is_err());
    }

    #[test]
    fn test_is_missing() {
        assert!(is_missing(""));
        assert!(is_missing("  "));
        assert!(is_missing("NaN"));
        assert!(is_missing("null"));
        assert!(is_missing("inf"));
        assert!(is_missing("-Infinity"));
        assert!(!is_missing("0"));
        assert!(!is_missing("192.168.10.5"));
        assert!(!is_missing("BENIGN"));
    }
}
