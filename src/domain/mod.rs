// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits describing what a flow record
// is and where its fields live. No Burn types, no file I/O.
//
// Everything above this layer (loaders, preprocessors, the
// training loop) speaks in terms of these types.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// One cleaned CSV row with its binary label
pub mod flow_record;

// Column positions used to assemble model features
pub mod layout;

// Core abstractions (traits) that other layers implement
pub mod traits;
