// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// Everything that builds, trains or scores the network.
//
//   model.rs        — 2-layer LSTM + sigmoid head, weighted BCE
//   class_weight.rs — "balanced" class weights for the loss
//   trainer.rs      — epoch loop with validation split, best
//                     checkpoint tracking and final save
//   evaluator.rs    — reloads the saved model and scores the
//                     held-out test flows
//
// Training runs on Autodiff<NdArray>; validation and evaluation
// run on the plain NdArray backend (what `model.valid()` yields).
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)
//            Hochreiter & Schmidhuber (1997) Long Short-Term Memory

use burn::backend::{ndarray::NdArrayDevice, Autodiff, NdArray};

pub type TrainBackend = Autodiff<NdArray>;
pub type EvalBackend  = NdArray;

pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}

/// LSTM classifier architecture and loss
pub mod model;

/// Class-balanced loss weights
pub mod class_weight;

/// Full training loop with validation and checkpointing
pub mod trainer;

/// Held-out evaluation of the saved model
pub mod evaluator;
