// ============================================================
// Layer 4 — Flow Preprocessor
// ============================================================
// Turns cleaned FlowRecords into fixed-length float vectors
// and splits them chronologically into train and test sets.
//
// Steps:
//   1. Check every row is wide enough for the layout
//   2. Fit the vocabulary over the four string columns and
//      persist it (TokenizerStore)
//   3. For each row assemble
//        [src_port, tok(flow_id), tok(src_ip), tok(dst_ip),
//         tok(timestamp), dst_port, numeric block...]
//   4. First floor(N * train_fraction) rows → train, rest → test
//
// Numeric fields that do not parse are reported with their
// row and column instead of being silently zeroed.

use anyhow::{bail, Context, Result};

use crate::data::{dataset::FlowSample, splitter::split_chronological};
use crate::domain::{flow_record::FlowRecord, layout::FlowLayout};
use crate::infra::tokenizer_store::{FieldTokenizer, TokenizerStore};

/// Output of preprocessing: chronological train/test sets.
#[derive(Debug)]
pub struct PreparedData {
    pub train:      Vec<FlowSample>,
    pub test:       Vec<FlowSample>,
    /// Vocabulary entries including the unknown token
    pub vocab_size: usize,
}

pub struct FlowPreprocessor {
    layout:         FlowLayout,
    train_fraction: f64,
}

impl FlowPreprocessor {
    pub fn new(layout: FlowLayout, train_fraction: f64) -> Self {
        Self { layout, train_fraction }
    }

    pub fn preprocess(
        &self,
        records: &[FlowRecord],
        store:   &TokenizerStore,
    ) -> Result<PreparedData> {
        tracing::info!(
            "Dataset shape: ({}, {})",
            records.len(),
            records.first().map(|r| r.fields.len()).unwrap_or(0)
        );

        let min_len = self.layout.min_row_len();
        if let Some((row, r)) = records.iter().enumerate().find(|(_, r)| r.fields.len() < min_len) {
            bail!(
                "Row {} has {} columns, the layout needs at least {}",
                row,
                r.fields.len(),
                min_len
            );
        }

        // ── Fit the vocabulary over the string columns ────────────────────────
        let columns = self.layout.token_columns();
        let values = records
            .iter()
            .flat_map(|r| columns.iter().map(move |&c| r.fields[c].as_str()));
        let tokenizer = store.fit_and_save(values)?;
        tracing::debug!(
            "Vocabulary: {} entries, dictionary at '{}'",
            tokenizer.vocab_size(),
            store.dictionary_file().display()
        );

        // ── Assemble feature vectors ──────────────────────────────────────────
        let samples = records
            .iter()
            .enumerate()
            .map(|(row, r)| self.assemble(r, row, &tokenizer))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!("Features shape: ({}, {})", samples.len(), self.layout.input_len());

        let (train, test) = split_chronological(samples, self.train_fraction);
        tracing::info!("Split: {} train, {} test", train.len(), test.len());

        Ok(PreparedData { train, test, vocab_size: tokenizer.vocab_size() })
    }

    /// Build the feature vector of one record.
    pub fn assemble(
        &self,
        record:    &FlowRecord,
        row:       usize,
        tokenizer: &FieldTokenizer,
    ) -> Result<FlowSample> {
        let l = &self.layout;
        let mut features = Vec::with_capacity(l.input_len());

        features.push(numeric(record, row, l.source_port)?);
        for c in l.token_columns() {
            features.push(tokenizer.id(&record.fields[c]) as f32);
        }
        features.push(numeric(record, row, l.destination_port)?);
        for c in l.numeric_start..l.num_features {
            features.push(numeric(record, row, c)?);
        }

        Ok(FlowSample { features, label: record.label })
    }
}

fn numeric(record: &FlowRecord, row: usize, col: usize) -> Result<f32> {
    let raw = record.field(col).unwrap_or_default();
    raw.trim()
        .parse::<f32>()
        .with_context(|| format!("Row {row}, column {col}: '{raw}' is not numeric"))
}
