// ============================================================
// Layer 2 — Evaluate Use Case
// ============================================================
// Reloads the full model written at the end of training and
// scores it on held-out flows. Nothing from the training run
// is reused in memory: only what is on disk.

use anyhow::Result;

use crate::data::dataset::FlowSample;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::evaluator::{evaluate_saved_model, EvaluationReport};

pub struct EvaluateUseCase {
    ckpt_manager: CheckpointManager,
    batch_size:   usize,
}

impl EvaluateUseCase {
    pub fn new(output_dir: &str, batch_size: usize) -> Result<Self> {
        Ok(Self {
            ckpt_manager: CheckpointManager::new(output_dir)?,
            batch_size,
        })
    }

    pub fn evaluate(&self, test: Vec<FlowSample>) -> Result<EvaluationReport> {
        let report = evaluate_saved_model(&self.ckpt_manager, test, self.batch_size)?;
        tracing::info!(
            "Test loss={:.4}, accuracy={:.4} over {} samples",
            report.loss,
            report.accuracy,
            report.samples
        );
        Ok(report)
    }
}
