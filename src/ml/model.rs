use burn::{
    nn::{Linear, LinearConfig, Lstm, LstmConfig},
    prelude::*,
    tensor::activation::{log_sigmoid, sigmoid},
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct LstmClassifierConfig {
    /// Sequence length: one time step per flow feature
    pub input_len:   usize,
    /// Units in each of the two LSTM layers
    pub hidden_size: usize,
}

impl LstmClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> LstmClassifier<B> {
        // Each time step carries a single scalar feature
        let sequence_lstm = LstmConfig::new(1, self.hidden_size, true).init(device);
        let summary_lstm  = LstmConfig::new(self.hidden_size, self.hidden_size, true).init(device);
        let output        = LinearConfig::new(self.hidden_size, 1).init(device);
        LstmClassifier {
            sequence_lstm, summary_lstm, output,
            input_len: self.input_len,
        }
    }
}

/// LSTM (full sequence) → LSTM (last hidden state) → Linear → sigmoid
#[derive(Module, Debug)]
pub struct LstmClassifier<B: Backend> {
    pub sequence_lstm: Lstm<B>,
    pub summary_lstm:  Lstm<B>,
    pub output:        Linear<B>,
    pub input_len:     usize,
}

impl<B: Backend> LstmClassifier<B> {
    /// inputs: [batch, seq_len, 1] → logits: [batch]
    pub fn forward_logits(&self, inputs: Tensor<B, 3>) -> Tensor<B, 1> {
        let [batch_size, _, _] = inputs.dims();

        let (sequence, _) = self.sequence_lstm.forward(inputs, None); // [batch, seq_len, hidden]
        let (_, state)    = self.summary_lstm.forward(sequence, None);

        self.output
            .forward(state.hidden) // [batch, 1]
            .reshape([batch_size])
    }

    /// Weighted binary cross-entropy, plus the probabilities it was computed from.
    pub fn forward_loss(
        &self,
        inputs:  Tensor<B, 3>,
        targets: Tensor<B, 1, Int>,
        weights: Tensor<B, 1>,
    ) -> (Tensor<B, 1>, Tensor<B, 1>) {
        let logits = self.forward_logits(inputs);
        let probs  = sigmoid(logits.clone());
        (binary_cross_entropy(logits, targets, weights), probs)
    }
}

/// mean_i( -w_i * (y_i * log σ(z_i) + (1 - y_i) * log σ(-z_i)) )
///
/// Computed from logits with log-sigmoid so saturated outputs
/// never take the log of zero.
pub fn binary_cross_entropy<B: Backend>(
    logits:  Tensor<B, 1>,
    targets: Tensor<B, 1, Int>,
    weights: Tensor<B, 1>,
) -> Tensor<B, 1> {
    let y = targets.float();
    let log_p     = log_sigmoid(logits.clone());
    let log_not_p = log_sigmoid(logits.neg());

    let per_sample = (y.clone() * log_p + y.neg().add_scalar(1.0) * log_not_p).neg();
    (per_sample * weights).mean()
}

/// Number of samples whose probability lands on the right side of 0.5
pub fn count_correct<B: Backend>(probs: Tensor<B, 1>, targets: Tensor<B, 1, Int>) -> usize {
    let correct: i64 = probs
        .greater_elem(0.5)
        .int()
        .equal(targets)
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>();
    correct as usize
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type B = NdArray;

    #[test]
    fn test_forward_outputs_one_probability_per_sample() {
        let device = Default::default();
        let model  = LstmClassifierConfig::new(6, 4).init::<B>(&device);

        let inputs  = Tensor::<B, 3>::ones([3, 6, 1], &device);
        let targets = Tensor::<B, 1, Int>::from_ints([0, 1, 0], &device);
        let weights = Tensor::<B, 1>::ones([3], &device);
        let (loss, probs) = model.forward_loss(inputs, targets, weights);
        assert_eq!(probs.dims(), [3]);
        assert_eq!(loss.dims(), [1]);

        let values: Vec<f32> = probs.into_data().to_vec().unwrap();
        assert!(values.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_bce_of_zero_logit_is_ln2() {
        let device  = Default::default();
        let logits  = Tensor::<B, 1>::zeros([2], &device);
        let targets = Tensor::<B, 1, Int>::from_ints([0, 1], &device);
        let weights = Tensor::<B, 1>::ones([2], &device);

        let loss: f64 = binary_cross_entropy(logits, targets, weights).into_scalar().elem();
        assert!((loss - std::f64::consts::LN_2).abs() < 1e-5);
    }

    #[test]
    fn test_bce_scales_with_weights() {
        let device  = Default::default();
        let logits  = Tensor::<B, 1>::zeros([2], &device);
        let targets = Tensor::<B, 1, Int>::from_ints([0, 1], &device);
        let weights = Tensor::<B, 1>::from_floats([2.0, 2.0], &device);

        let loss: f64 = binary_cross_entropy(logits, targets, weights).into_scalar().elem();
        assert!((loss - 2.0 * std::f64::consts::LN_2).abs() < 1e-5);
    }

    #[test]
    fn test_count_correct() {
        let device  = Default::default();
        let probs   = Tensor::<B, 1>::from_floats([0.9, 0.2, 0.7, 0.5], &device);
        let targets = Tensor::<B, 1, Int>::from_ints([1, 0, 0, 1], &device);
        // 0.5 is not above the threshold, so the last one counts as 0
        assert_eq!(count_correct(probs, targets), 2);
    }
}
