// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer loads flows through this trait, so a
// different source (a database, a pcap-to-flow converter)
// only needs to implement `load_all`.
//
// Implementations:
//   - CsvFlowLoader → reads and cleans a CICIDS CSV file
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::flow_record::FlowRecord;

// ─── FlowSource ───────────────────────────────────────────────────────────────
/// Any component that can produce cleaned, labelled flow records.
pub trait FlowSource {
    /// Load every usable flow, in source order.
    fn load_all(&self) -> Result<Vec<FlowRecord>>;
}
