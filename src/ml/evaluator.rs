// ============================================================
// Layer 5 — Evaluator
// ============================================================
// Scores a model on a set of flows: mean binary cross-entropy
// and accuracy at the 0.5 threshold. Validation batches carry
// the training class weights; the test set is scored
// unweighted. Loss and accuracy are
// averaged per sample, so a short final batch counts for only
// as many samples as it holds.

use anyhow::{bail, Result};
use std::sync::Arc;
use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    prelude::*,
};

use crate::data::{
    batcher::{FlowBatch, FlowBatcher},
    dataset::{FlowDataset, FlowSample},
};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::{
    default_device,
    model::{count_correct, LstmClassifier},
    EvalBackend,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationReport {
    pub loss:     f64,
    pub accuracy: f64,
    pub samples:  usize,
}

/// Running loss/accuracy over batches, averaged per sample.
#[derive(Debug, Default, Clone)]
pub struct ScoreAccumulator {
    loss_sum: f64,
    correct:  usize,
    samples:  usize,
}

impl ScoreAccumulator {
    /// `batch_loss` is the mean loss over the batch's samples
    pub fn add(&mut self, batch_loss: f64, correct: usize, batch_size: usize) {
        self.loss_sum += batch_loss * batch_size as f64;
        self.correct  += correct;
        self.samples  += batch_size;
    }

    pub fn loss(&self) -> f64 {
        if self.samples > 0 { self.loss_sum / self.samples as f64 } else { f64::NAN }
    }

    pub fn accuracy(&self) -> f64 {
        if self.samples > 0 { self.correct as f64 / self.samples as f64 } else { 0.0 }
    }

    pub fn report(&self) -> EvaluationReport {
        EvaluationReport {
            loss:     self.loss(),
            accuracy: self.accuracy(),
            samples:  self.samples,
        }
    }
}

/// Unshuffled loader for validation and test flows.
/// `class_weights` of None scores every sample with weight 1.
pub fn eval_loader(
    samples:       Vec<FlowSample>,
    batch_size:    usize,
    class_weights: Option<[f32; 2]>,
    device:        <EvalBackend as Backend>::Device,
) -> Arc<dyn DataLoader<FlowBatch<EvalBackend>>> {
    let batcher = match class_weights {
        Some(w) => FlowBatcher::<EvalBackend>::new(device).with_class_weights(w),
        None    => FlowBatcher::<EvalBackend>::new(device),
    };
    DataLoaderBuilder::new(batcher)
        .batch_size(batch_size)
        .num_workers(1)
        .build(FlowDataset::new(samples))
}

/// Run `model` over every batch of `loader`.
pub fn score_loader(
    model:  &LstmClassifier<EvalBackend>,
    loader: &dyn DataLoader<FlowBatch<EvalBackend>>,
) -> ScoreAccumulator {
    let mut score = ScoreAccumulator::default();
    for batch in loader.iter() {
        let batch_size     = batch.targets.dims()[0];
        let (loss, probs)  = model.forward_loss(batch.inputs, batch.targets.clone(), batch.weights);
        let correct        = count_correct(probs, batch.targets);
        score.add(loss.into_scalar().elem::<f64>(), correct, batch_size);
    }
    score
}

/// Reload `lstm_model` from the output directory and score `test` with it.
pub fn evaluate_saved_model(
    ckpt:       &CheckpointManager,
    test:       Vec<FlowSample>,
    batch_size: usize,
) -> Result<EvaluationReport> {
    let Some(first) = test.first() else {
        bail!("No test samples to evaluate");
    };

    let device = default_device();
    let (model, config) = ckpt.load_model::<EvalBackend>(&device)?;

    if first.seq_len() != config.input_len {
        bail!(
            "Test flows have {} features but the saved model expects {}",
            first.seq_len(),
            config.input_len
        );
    }

    tracing::info!("Evaluating on {} test samples", test.len());
    let loader = eval_loader(test, batch_size, None, device);
    Ok(score_loader(&model, loader.as_ref()).report())
}
