// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores the LSTM classifier with Burn's recorders.
//
// Files written to the output directory (overwritten each run):
//   weights-{epoch:02}-{val_acc:.2}.mpk.gz  best-so-far checkpoints
//   lstm_weights.mpk.gz                     final weights
//   lstm_model.mpk + lstm_model.json        full model: weights at
//                                           full precision plus the
//                                           architecture config
//   train_config.json                       run configuration
//
// Checkpoints and final weights are half-precision MessagePack,
// gzipped (NamedMpkGzFileRecorder). The full model is stored
// uncompressed at full precision (NamedMpkFileRecorder).
// Loading only needs lstm_model.json and lstm_model.mpk: the
// config rebuilds the architecture, the record fills it in.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{
        FullPrecisionSettings, HalfPrecisionSettings, NamedMpkFileRecorder,
        NamedMpkGzFileRecorder, Recorder,
    },
};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::{LstmClassifier, LstmClassifierConfig};

pub const FINAL_WEIGHTS: &str = "lstm_weights";
pub const FINAL_MODEL:   &str = "lstm_model";

/// Writes `<stem>.mpk.gz`
type WeightsRecorder = NamedMpkGzFileRecorder<HalfPrecisionSettings>;
/// Writes `<stem>.mpk`
type ModelRecorder = NamedMpkFileRecorder<FullPrecisionSettings>;

pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// `weights-03-0.97` for epoch 3 at 97.4% validation accuracy
    pub fn checkpoint_name(epoch: usize, val_acc: f64) -> String {
        format!("weights-{epoch:02}-{val_acc:.2}")
    }

    /// Save a best-so-far checkpoint. Returns the file stem used.
    pub fn save_best<B: Backend>(
        &self,
        model:   &LstmClassifier<B>,
        epoch:   usize,
        val_acc: f64,
    ) -> Result<String> {
        let name = Self::checkpoint_name(epoch, val_acc);
        let path = self.record_path(&name);

        WeightsRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save checkpoint to '{}'", path.display()))?;

        tracing::debug!("Saved checkpoint '{}'", name);
        Ok(name)
    }

    /// Save the final weights and the full model (record + config).
    pub fn save_final<B: Backend>(
        &self,
        model:  &LstmClassifier<B>,
        config: &LstmClassifierConfig,
    ) -> Result<()> {
        let weights_path = self.record_path(FINAL_WEIGHTS);
        WeightsRecorder::new()
            .record(model.clone().into_record(), weights_path.clone())
            .with_context(|| format!("Failed to save weights to '{}'", weights_path.display()))?;

        let model_path = self.record_path(FINAL_MODEL);
        ModelRecorder::new()
            .record(model.clone().into_record(), model_path.clone())
            .with_context(|| format!("Failed to save model to '{}'", model_path.display()))?;

        let config_path = self.model_config_path();
        fs::write(&config_path, serde_json::to_string_pretty(config)?)
            .with_context(|| format!("Cannot write model config to '{}'", config_path.display()))?;

        tracing::info!("Saved final weights and model to '{}'", self.dir.display());
        Ok(())
    }

    /// Rebuild the full model saved by `save_final`.
    pub fn load_model<B: Backend>(
        &self,
        device: &B::Device,
    ) -> Result<(LstmClassifier<B>, LstmClassifierConfig)> {
        let config_path = self.model_config_path();
        let json = fs::read_to_string(&config_path).with_context(|| {
            format!(
                "Cannot read model config '{}'. Has the model been trained?",
                config_path.display()
            )
        })?;
        let config: LstmClassifierConfig = serde_json::from_str(&json)
            .with_context(|| format!("Invalid model config '{}'", config_path.display()))?;

        let model_path = self.record_path(FINAL_MODEL);
        let record = ModelRecorder::new()
            .load(model_path.clone(), device)
            .with_context(|| format!("Cannot load model '{}'", model_path.display()))?;

        let model = config.init::<B>(device).load_record(record);
        tracing::info!("Model loaded from '{}'", self.dir.display());
        Ok((model, config))
    }

    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join("train_config.json");
        fs::write(&path, serde_json::to_string_pretty(cfg)?)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    fn model_config_path(&self) -> PathBuf {
        self.dir.join(format!("{FINAL_MODEL}.json"))
    }

    /// File recorders replace the last extension with their own, so a
    /// placeholder keeps dots inside `stem` (e.g. "-0.97") intact.
    fn record_path(&self, stem: &str) -> PathBuf {
        self.dir.join(format!("{stem}.record"))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn test_checkpoint_name() {
        assert_eq!(CheckpointManager::checkpoint_name(3, 0.9741), "weights-03-0.97");
        assert_eq!(CheckpointManager::checkpoint_name(12, 1.0), "weights-12-1.00");
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("resources/model_resources");
        CheckpointManager::new(&path).unwrap();
        assert!(path.is_dir());
    }

    #[test]
    fn test_save_and_reload_model() {
        let dir    = tempfile::tempdir().unwrap();
        let ckpt   = CheckpointManager::new(dir.path()).unwrap();
        let device = Default::default();
        let config = LstmClassifierConfig::new(5, 3);
        let model  = config.init::<NdArray>(&device);

        let name = ckpt.save_best(&model, 1, 0.8765).unwrap();
        assert!(dir.path().join(format!("{name}.mpk.gz")).exists());

        ckpt.save_final(&model, &config).unwrap();
        assert!(dir.path().join("lstm_weights.mpk.gz").exists());
        assert!(dir.path().join("lstm_model.mpk").exists());
        assert!(dir.path().join("lstm_model.json").exists());

        let (reloaded, reloaded_cfg) = ckpt.load_model::<NdArray>(&device).unwrap();
        assert_eq!(reloaded_cfg.input_len, 5);
        assert_eq!(reloaded_cfg.hidden_size, 3);

        // Same weights → same output
        let x = Tensor::<NdArray, 3>::ones([2, 5, 1], &device);
        let a: Vec<f32> = model.forward_logits(x.clone()).into_data().to_vec().unwrap();
        let b: Vec<f32> = reloaded.forward_logits(x).into_data().to_vec().unwrap();
        for (p, q) in a.iter().zip(&b) {
            assert!((p - q).abs() < 1e-6);
        }
    }

    #[test]
    fn test_weight_files_are_gzipped_and_reloadable() {
        let dir    = tempfile::tempdir().unwrap();
        let ckpt   = CheckpointManager::new(dir.path()).unwrap();
        let device = Default::default();
        let config = LstmClassifierConfig::new(4, 2);
        let model  = config.init::<NdArray>(&device);

        ckpt.save_best(&model, 1, 0.8765).unwrap();
        ckpt.save_final(&model, &config).unwrap();

        let mut files: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        files.sort();
        assert_eq!(
            files,
            vec!["lstm_model.json", "lstm_model.mpk", "lstm_weights.mpk.gz", "weights-01-0.88.mpk.gz"]
        );

        // gzip magic bytes
        let bytes = fs::read(dir.path().join("weights-01-0.88.mpk.gz")).unwrap();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);

        let record = WeightsRecorder::new()
            .load(ckpt.record_path("weights-01-0.88"), &device)
            .unwrap();
        let restored = config.init::<NdArray>(&device).load_record(record);
        assert_eq!(restored.input_len, 4);
    }

    #[test]
    fn test_load_without_training_fails() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path()).unwrap();
        assert!(ckpt.load_model::<NdArray>(&Default::default()).is_err());
    }
}
