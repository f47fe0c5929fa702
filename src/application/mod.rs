// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only: no tensor math, no CSV parsing,
// no printing. Each use case tells the lower layers what to
// do in which order.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The full pipeline: load → preprocess → train → evaluate
pub mod train_use_case;

// Scoring the saved model on held-out flows
pub mod evaluate_use_case;
