use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One assembled flow: `features.len()` is the LSTM sequence length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSample {
    pub features: Vec<f32>,
    pub label:    u8,
}

impl FlowSample {
    pub fn seq_len(&self) -> usize {
        self.features.len()
    }
}

pub struct FlowDataset {
    samples: Vec<FlowSample>,
}

impl FlowDataset {
    pub fn new(samples: Vec<FlowSample>) -> Self { Self { samples } }
}

impl Dataset<FlowSample> for FlowDataset {
    fn get(&self, index: usize) -> Option<FlowSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
