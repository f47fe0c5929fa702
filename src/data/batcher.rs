// ============================================================
// Layer 4 — Flow Batcher
// ============================================================
// Implements Burn's Batcher trait to stack FlowSamples into
// the tensors the LSTM consumes.
//
// Shapes for a batch of N samples with sequence length S:
//   inputs  : [N, S, 1]   one scalar feature per time step
//   targets : [N]         0 / 1 labels
//   weights : [N]         per-sample loss weight
//
// Per-sample weights come from the class weights of the
// training set (weights[label]). Batchers without class
// weights emit 1.0 everywhere, which is what validation and
// evaluation use.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::FlowSample;

#[derive(Debug, Clone)]
pub struct FlowBatch<B: Backend> {
    pub inputs:  Tensor<B, 3>,
    pub targets: Tensor<B, 1, Int>,
    pub weights: Tensor<B, 1>,
}

#[derive(Clone, Debug)]
pub struct FlowBatcher<B: Backend> {
    pub device: B::Device,
    /// Loss weight indexed by label; None means unweighted
    class_weights: Option<[f32; 2]>,
}

impl<B: Backend> FlowBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device, class_weights: None }
    }

    pub fn with_class_weights(mut self, weights: [f32; 2]) -> Self {
        self.class_weights = Some(weights);
        self
    }

    fn weight_of(&self, label: u8) -> f32 {
        match self.class_weights {
            Some(w) => w[usize::from(label.min(1))],
            None    => 1.0,
        }
    }
}

impl<B: Backend> Batcher<FlowSample, FlowBatch<B>> for FlowBatcher<B> {
    fn batch(&self, items: Vec<FlowSample>) -> FlowBatch<B> {
        let batch_size = items.len();
        // Every sample comes from the same layout, so lengths agree
        let seq_len    = items[0].features.len();

        let flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.features.iter().copied())
            .collect();

        let labels: Vec<i32> = items.iter().map(|s| i32::from(s.label)).collect();
        let weights: Vec<f32> = items.iter().map(|s| self.weight_of(s.label)).collect();

        let inputs = Tensor::<B, 1>::from_floats(flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len, 1]);

        let targets = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        let weights = Tensor::<B, 1>::from_floats(weights.as_slice(), &self.device);

        FlowBatch { inputs, targets, weights }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    fn sample(label: u8) -> FlowSample {
        FlowSample { features: vec![1.0, 2.0, 3.0], label }
    }

    #[test]
    fn test_batch_shapes() {
        let batcher = FlowBatcher::<NdArray>::new(Default::default());
        let batch   = batcher.batch(vec![sample(0), sample(1)]);

        assert_eq!(batch.inputs.dims(),  [2, 3, 1]);
        assert_eq!(batch.targets.dims(), [2]);
        assert_eq!(batch.weights.dims(), [2]);
    }

    #[test]
    fn test_class_weights_follow_labels() {
        let batcher = FlowBatcher::<NdArray>::new(Default::default())
            .with_class_weights([0.5, 4.0]);
        let batch = batcher.batch(vec![sample(1), sample(0), sample(1)]);

        let w: Vec<f32> = batch.weights.into_data().to_vec().unwrap();
        assert_eq!(w, vec![4.0, 0.5, 4.0]);
    }

    #[test]
    fn test_unweighted_is_all_ones() {
        let batcher = FlowBatcher::<NdArray>::new(Default::default());
        let batch   = batcher.batch(vec![sample(1), sample(0)]);
        let w: Vec<f32> = batch.weights.into_data().to_vec().unwrap();
        assert_eq!(w, vec![1.0, 1.0]);
    }
}
