// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the filesystem on behalf of the
// other layers:
//
//   checkpoint.rs      — best-epoch checkpoints, final weights,
//                        the full model and the run config
//
//   tokenizer_store.rs — fits and persists the word dictionary
//                        for the string columns, reloads it as
//                        a WordLevel tokenizer
//
//   metrics.rs         — per-epoch training history as CSV
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Vocabulary fitting, saving, and loading
pub mod tokenizer_store;

/// Training metrics CSV logger
pub mod metrics;
