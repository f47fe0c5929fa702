// ============================================================
// Layer 1 — CLI Arguments
// ============================================================
// Every flag of a training run. Only `-f/--file` is commonly
// changed; the rest default to the values the model was tuned
// with.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::Args;
use crate::application::train_use_case::TrainConfig;
use crate::domain::layout::DEFAULT_NUM_FEATURES;

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Flow CSV file to train and evaluate on
    #[arg(short = 'f', long = "file", default_value = "data/dataset/Wednesday-workingHours.pcap_ISCX_out.csv")]
    pub file: String,

    /// Directory for checkpoints, final weights and the saved model
    #[arg(long, default_value = "resources/model_resources")]
    pub output_dir: String,

    /// Where the fitted word dictionary (JSON) is written
    #[arg(long, default_value = "resources/dictionary/word-dictionary.json")]
    pub dictionary_file: String,

    /// Column layout width; the model sees num_features - 1 values per flow
    #[arg(long, default_value_t = DEFAULT_NUM_FEATURES)]
    pub num_features: usize,

    /// Units in each LSTM layer
    #[arg(long, default_value_t = 82)]
    pub hidden_size: usize,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 5)]
    pub epochs: usize,

    #[arg(long, default_value_t = 1000)]
    pub batch_size_train: usize,

    #[arg(long, default_value_t = 1000)]
    pub batch_size_test: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Leading share of the rows used for training (the rest is the test set)
    #[arg(long, default_value_t = 0.7)]
    pub train_fraction: f64,

    /// Trailing share of the training rows held out for validation
    #[arg(long, default_value_t = 0.33)]
    pub validation_split: f64,

    /// Seed for shuffling training batches
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            csv_file:         a.file,
            output_dir:       a.output_dir,
            dictionary_file:  a.dictionary_file,
            num_features:     a.num_features,
            hidden_size:      a.hidden_size,
            epochs:           a.epochs,
            batch_size_train: a.batch_size_train,
            batch_size_test:  a.batch_size_test,
            lr:               a.lr,
            train_fraction:   a.train_fraction,
            validation_split: a.validation_split,
            seed:             a.seed,
        }
    }
}
