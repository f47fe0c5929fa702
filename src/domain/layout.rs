// ============================================================
// Layer 3 — Flow Column Layout
// ============================================================
// CICIDS flow CSVs start with a fixed block of identifying
// columns followed by numeric flow statistics:
//
//   0 Flow ID          (string → token)
//   1 Source IP        (string → token)
//   2 Source Port      (numeric)
//   3 Destination IP   (string → token)
//   4 Destination Port (numeric)
//   5 Protocol         (not used)
//   6 Timestamp        (string → token)
//   7.. num_features   (numeric statistics)
//
// The model input for one flow is assembled in this order:
//   [src_port, tok(flow_id), tok(src_ip), tok(dst_ip), tok(timestamp),
//    dst_port, col7, col8, ..., col(num_features-1)]
//
// which gives num_features - 1 values per flow.

use anyhow::{bail, Result};

/// Default layout width for the CICIDS 2017 flow files.
pub const DEFAULT_NUM_FEATURES: usize = 83;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowLayout {
    pub flow_id:          usize,
    pub source_ip:        usize,
    pub source_port:      usize,
    pub destination_ip:   usize,
    pub destination_port: usize,
    pub timestamp:        usize,
    /// First column of the numeric statistics block
    pub numeric_start:    usize,
    /// Numeric block ends here (exclusive)
    pub num_features:     usize,
}

impl FlowLayout {
    pub fn new(num_features: usize) -> Result<Self> {
        let layout = Self::with_width(num_features);
        if num_features <= layout.numeric_start {
            bail!(
                "num_features must be greater than {} (got {})",
                layout.numeric_start,
                num_features
            );
        }
        Ok(layout)
    }

    fn with_width(num_features: usize) -> Self {
        Self {
            flow_id:          0,
            source_ip:        1,
            source_port:      2,
            destination_ip:   3,
            destination_port: 4,
            timestamp:        6,
            numeric_start:    7,
            num_features,
        }
    }

    /// The four string columns, in the order their tokens enter the feature vector.
    pub fn token_columns(&self) -> [usize; 4] {
        [self.flow_id, self.source_ip, self.destination_ip, self.timestamp]
    }

    /// Length of one assembled feature vector (the LSTM sequence length).
    pub fn input_len(&self) -> usize {
        // src_port + 4 tokens + dst_port + numeric block
        2 + self.token_columns().len() + (self.num_features - self.numeric_start)
    }

    /// A row must have at least this many fields to be assembled.
    pub fn min_row_len(&self) -> usize {
        self.num_features
    }
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self::with_width(DEFAULT_NUM_FEATURES)
    }
}
