// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// From a flow CSV on disk to tensor batches:
//
//   flow CSV
//       │
//       ▼
//   CsvFlowLoader     → reads rows, binarises labels, drops
//       │               Infinity/NaN and missing values
//       ▼
//   FlowPreprocessor  → fits the vocabulary, assembles one
//       │               float vector per flow
//       ▼
//   split_chronological → train / test (and fit / validation)
//       │
//       ▼
//   FlowDataset       → implements Burn's Dataset trait
//       │
//       ▼
//   FlowBatcher       → stacks samples into [batch, seq, 1]
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads and cleans CICIDS flow CSVs
pub mod loader;

/// Tokenizes string columns and assembles feature vectors
pub mod preprocessor;

/// Implements Burn's Dataset trait for flow samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Order-preserving head/tail splits
pub mod splitter;
