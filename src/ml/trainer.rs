// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train + validation loop using Burn's DataLoader and Adam.
//
//   - The last `validation_split` share of the training rows
//     is held out (no shuffling before the cut), the rest is
//     fitted in shuffled batches
//   - The loss is class-weighted BCE, on the validation rows too
//   - model.valid() returns the model on EvalBackend (NdArray),
//     so the validation loader is built on that backend
//   - A checkpoint is written whenever validation accuracy
//     strictly improves on the best epoch so far
//   - After the last epoch the final weights and full model
//     are written, whatever the best epoch was
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::{bail, Result};
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{
    batcher::FlowBatcher,
    dataset::{FlowDataset, FlowSample},
    splitter::split_chronological,
};
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::{EpochMetrics, MetricsLogger},
};
use crate::ml::{
    class_weight::ClassWeights,
    default_device,
    evaluator::{eval_loader, score_loader, ScoreAccumulator},
    model::{count_correct, LstmClassifier, LstmClassifierConfig},
    TrainBackend,
};

pub fn run_training(
    cfg:          &TrainConfig,
    input_len:    usize,
    samples:      Vec<FlowSample>,
    ckpt_manager: &CheckpointManager,
    metrics:      &MetricsLogger,
) -> Result<Vec<EpochMetrics>> {
    let device = default_device();
    tracing::info!("Using NdArray device: {:?}", device);
    train_loop(cfg, input_len, samples, ckpt_manager, metrics, device)
}

fn train_loop(
    cfg:          &TrainConfig,
    input_len:    usize,
    samples:      Vec<FlowSample>,
    ckpt_manager: &CheckpointManager,
    metrics:      &MetricsLogger,
    device:       <TrainBackend as Backend>::Device,
) -> Result<Vec<EpochMetrics>> {
    if samples.is_empty() {
        bail!("No training samples");
    }

    // ── Class weights over every training row ─────────────────────────────────
    let labels: Vec<u8> = samples.iter().map(|s| s.label).collect();
    let class_weights   = ClassWeights::balanced(&labels);
    tracing::info!(
        "Class weights: benign={:.4}, malicious={:.4}",
        class_weights.benign,
        class_weights.malicious
    );

    // ── Hold out the tail for validation ──────────────────────────────────────
    let (fit, val) = split_chronological(samples, 1.0 - cfg.validation_split);
    if fit.is_empty() || val.is_empty() {
        bail!(
            "Validation split {} leaves {} training and {} validation rows",
            cfg.validation_split,
            fit.len(),
            val.len()
        );
    }
    tracing::info!("Train on {} samples, validate on {} samples", fit.len(), val.len());

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = LstmClassifierConfig::new(input_len, cfg.hidden_size);
    let mut model: LstmClassifier<TrainBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: LSTM({h}) → LSTM({h}) → Dense(1), input [batch, {}, 1]",
        input_len,
        h = cfg.hidden_size
    );

    let mut optim = AdamConfig::new().with_epsilon(1e-7).init();

    // ── Training data loader (AutodiffBackend, class-weighted) ────────────────
    let train_batcher = FlowBatcher::<TrainBackend>::new(device.clone())
        .with_class_weights(class_weights.as_array());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size_train)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(FlowDataset::new(fit));

    // ── Validation data loader (InnerBackend, class-weighted) ─────────────────
    let val_loader = eval_loader(
        val,
        cfg.batch_size_train,
        Some(class_weights.as_array()),
        device.clone(),
    );

    let mut history      = Vec::with_capacity(cfg.epochs);
    let mut best_val_acc = f64::NEG_INFINITY;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {
        let mut train_score = ScoreAccumulator::default();

        for batch in train_loader.iter() {
            let batch_size    = batch.targets.dims()[0];
            let (loss, probs) = model.forward_loss(
                batch.inputs,
                batch.targets.clone(),
                batch.weights,
            );

            let correct = count_correct(probs, batch.targets);
            train_score.add(loss.clone().into_scalar().elem::<f64>(), correct, batch_size);

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let val_score = score_loader(&model.valid(), val_loader.as_ref());

        let m = EpochMetrics {
            epoch,
            train_loss: train_score.loss(),
            train_acc:  train_score.accuracy(),
            val_loss:   val_score.loss(),
            val_acc:    val_score.accuracy(),
        };

        println!(
            "Epoch {:>3}/{} | loss={:.4} | acc={:.4} | val_loss={:.4} | val_acc={:.4}",
            epoch, cfg.epochs, m.train_loss, m.train_acc, m.val_loss, m.val_acc,
        );
        metrics.log(&m)?;

        if m.is_improvement(best_val_acc) {
            let name = ckpt_manager.save_best(&model, epoch, m.val_acc)?;
            tracing::info!(
                "Epoch {:02}: val_acc improved from {:.5} to {:.5}, saved '{}'",
                epoch, best_val_acc, m.val_acc, name
            );
            best_val_acc = m.val_acc;
        } else {
            tracing::info!("Epoch {:02}: val_acc did not improve from {:.5}", epoch, best_val_acc);
        }

        history.push(m);
    }

    ckpt_manager.save_final(&model, &model_cfg)?;
    tracing::info!("Training complete! History in '{}'", metrics.csv_path().display());
    Ok(history)
}
