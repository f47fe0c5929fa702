// ============================================================
// Layer 5 — Class Weights
// ============================================================
// Attack flows are rare next to benign ones, so each class's
// loss contribution is rescaled ("balanced" weighting):
//
//   w_c = n_samples / (n_classes * count_c)
//
// where n_classes counts only the classes present in the
// labels. A class that never occurs keeps weight 1.0.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassWeights {
    pub benign:    f32,
    pub malicious: f32,
}

impl ClassWeights {
    pub fn balanced(labels: &[u8]) -> Self {
        let malicious = labels.iter().filter(|&&l| l != 0).count();
        let benign    = labels.len() - malicious;
        let present   = usize::from(benign > 0) + usize::from(malicious > 0);

        let weight = |count: usize| {
            if count == 0 {
                1.0
            } else {
                labels.len() as f32 / (present * count) as f32
            }
        };

        Self { benign: weight(benign), malicious: weight(malicious) }
    }

    /// Indexed by label
    pub fn as_array(&self) -> [f32; 2] {
        [self.benign, self.malicious]
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_weights() {
        // 3 benign, 1 attack: 4 / (2 * 3) and 4 / (2 * 1)
        let w = ClassWeights::balanced(&[0, 0, 1, 0]);
        assert!((w.benign - 4.0 / 6.0).abs() < 1e-6);
        assert!((w.malicious - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_even_classes_are_unweighted() {
        let w = ClassWeights::balanced(&[0, 1, 0, 1]);
        assert_eq!(w.as_array(), [1.0, 1.0]);
    }

    #[test]
    fn test_single_class() {
        let w = ClassWeights::balanced(&[0, 0, 0]);
        assert_eq!(w.benign, 1.0);
        assert_eq!(w.malicious, 1.0);
    }

    #[test]
    fn test_empty_labels() {
        assert_eq!(ClassWeights::balanced(&[]).as_array(), [1.0, 1.0]);
    }
}
