// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full pipeline in order:
//
//   Step 1: Load + clean the flow CSV     (Layer 4 - data)
//   Step 2: Fit vocabulary, build vectors (Layer 4 / 6)
//   Step 3: Chronological train/test cut  (Layer 4 - data)
//   Step 4: Save config                   (Layer 6 - infra)
//   Step 5: Run training loop             (Layer 5 - ml)
//   Step 6: Reload model, score test set  (Layer 2 → 5)
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::application::evaluate_use_case::EvaluateUseCase;
use crate::data::{loader::CsvFlowLoader, preprocessor::FlowPreprocessor};
use crate::domain::{
    layout::{FlowLayout, DEFAULT_NUM_FEATURES},
    traits::FlowSource,
};
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::{EpochMetrics, MetricsLogger},
    tokenizer_store::TokenizerStore,
};
use crate::ml::{evaluator::EvaluationReport, trainer::run_training};

// ─── Training Configuration ──────────────────────────────────────────────────
// Every knob of a run. Saved next to the model as train_config.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub csv_file:         String,
    pub output_dir:       String,
    pub dictionary_file:  String,
    pub num_features:     usize,
    pub hidden_size:      usize,
    pub epochs:           usize,
    pub batch_size_train: usize,
    pub batch_size_test:  usize,
    pub lr:               f64,
    pub train_fraction:   f64,
    pub validation_split: f64,
    pub seed:             u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            csv_file:         "data/dataset/Wednesday-workingHours.pcap_ISCX_out.csv".to_string(),
            output_dir:       "resources/model_resources".to_string(),
            dictionary_file:  "resources/dictionary/word-dictionary.json".to_string(),
            num_features:     DEFAULT_NUM_FEATURES,
            hidden_size:      82,
            epochs:           5,
            batch_size_train: 1000,
            batch_size_test:  1000,
            lr:               1e-3,
            train_fraction:   0.7,
            validation_split: 0.33,
            seed:             42,
        }
    }
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub history:    Vec<EpochMetrics>,
    pub evaluation: EvaluationReport,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full pipeline end to end
    pub fn execute(&self) -> Result<RunSummary> {
        let cfg    = &self.config;
        let layout = FlowLayout::new(cfg.num_features)?;

        // ── Step 1: Load and clean ────────────────────────────────────────────
        tracing::info!("Loading flows from '{}'", cfg.csv_file);
        let records = CsvFlowLoader::new(&cfg.csv_file).load_all()?;
        if records.is_empty() {
            bail!("No usable rows left in '{}' after cleaning", cfg.csv_file);
        }
        let malicious = records.iter().filter(|r| r.is_malicious()).count();
        tracing::info!("{} flows: {} benign, {} malicious", records.len(), records.len() - malicious, malicious);

        // ── Steps 2–3: Tokenize, assemble, split ─────────────────────────────
        let store = TokenizerStore::new(&cfg.dictionary_file);
        let data  = FlowPreprocessor::new(layout, cfg.train_fraction)
            .preprocess(&records, &store)?;
        drop(records);
        tracing::info!("Vocabulary size: {} (including unknown)", data.vocab_size);

        if data.train.is_empty() || data.test.is_empty() {
            bail!(
                "Train fraction {} leaves {} train and {} test rows",
                cfg.train_fraction,
                data.train.len(),
                data.test.len()
            );
        }

        // ── Step 4: Save config ───────────────────────────────────────────────
        let ckpt_manager = CheckpointManager::new(&cfg.output_dir)?;
        ckpt_manager.save_config(cfg)?;
        let metrics = MetricsLogger::new(&cfg.output_dir)?;

        // ── Step 5: Train ─────────────────────────────────────────────────────
        let history = run_training(cfg, layout.input_len(), data.train, &ckpt_manager, &metrics)?;

        // ── Step 6: Evaluate the saved model ──────────────────────────────────
        let evaluation = EvaluateUseCase::new(&cfg.output_dir, cfg.batch_size_test)?
            .evaluate(data.test)?;

        Ok(RunSummary { history, evaluation })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    /// 10 columns: the 7 identifying ones, two rates, then the label
    fn write_dataset(path: &std::path::Path, rows: usize) {
        let mut csv = String::from(
            "Flow ID, Source IP, Source Port, Destination IP, Destination Port, Protocol, Timestamp,Flow Bytes/s, Flow Packets/s, Label\n",
        );
        for i in 0..rows {
            let attack = i % 5 == 0;
            let label  = if attack { "DDoS" } else { "BENIGN" };
            let bytes  = if i == 3 { "Infinity".to_string() } else { format!("{}", i * 10) };
            writeln!(
                csv,
                "10.0.0.{a}-10.0.0.9-{p}-80-6,10.0.0.{a},{p},10.0.0.9,80,6,5/7/2017 8:{m:02},{bytes},{pk},{label}",
                a = i % 3,
                p = 40000 + i,
                m = i % 60,
                pk = if attack { 900.0 } else { 2.0 },
            )
            .unwrap();
        }
        std::fs::write(path, csv).unwrap();
    }

    #[test]
    fn test_full_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("flows.csv");
        write_dataset(&csv, 41);

        let out  = dir.path().join("model_resources");
        let dict = dir.path().join("dictionary/word-dictionary.json");
        let cfg  = TrainConfig {
            csv_file:         csv.display().to_string(),
            output_dir:       out.display().to_string(),
            dictionary_file:  dict.display().to_string(),
            num_features:     9,
            hidden_size:      4,
            epochs:           2,
            batch_size_train: 8,
            batch_size_test:  8,
            ..TrainConfig::default()
        };

        let summary = TrainUseCase::new(cfg).execute().unwrap();

        assert_eq!(summary.history.len(), 2);
        // 41 rows - 1 Infinity row = 40 → 28 train / 12 test
        assert_eq!(summary.evaluation.samples, 12);
        assert!(summary.evaluation.loss.is_finite());
        assert!((0.0..=1.0).contains(&summary.evaluation.accuracy));

        assert!(dict.exists());
        assert!(std::fs::metadata(&dict).unwrap().len() > 2);
        for file in ["train_config.json", "metrics.csv", "lstm_weights.mpk.gz", "lstm_model.mpk", "lstm_model.json"] {
            assert!(out.join(file).exists(), "missing {file}");
        }
    }

    #[test]
    fn test_missing_csv_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TrainConfig {
            csv_file:   dir.path().join("nope.csv").display().to_string(),
            output_dir: dir.path().display().to_string(),
            ..TrainConfig::default()
        };
        assert!(TrainUseCase::new(cfg).execute().is_err());
    }
}
