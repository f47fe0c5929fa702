// ============================================================
// Layer 4 — Chronological Splitter
// ============================================================
// Splits samples into a leading and a trailing part WITHOUT
// shuffling. Flow CSVs are ordered by capture time, so the
// trailing part is always "later" traffic than the leading one.
//
// Used twice:
//   - train/test split      (train_fraction = 0.7)
//   - fit/validation split  (1 - validation_split = 0.67)
//
// The split index is floor(N * fraction).
//
// Reference: Rust Book §8 (Vectors)

/// Split `samples` into (head, tail) at floor(len * head_fraction).
///
/// # Example
/// ```ignore
/// let (train, test) = split_chronological((0..10).collect::<Vec<_>>(), 0.7);
/// assert_eq!(train, vec![0, 1, 2, 3, 4, 5, 6]);
/// ```
pub fn split_chronological<T>(mut samples: Vec<T>, head_fraction: f64) -> (Vec<T>, Vec<T>) {
    let total    = samples.len();
    let split_at = split_index(total, head_fraction);

    // split_off(n) leaves [0..n) in `samples` and returns [n..total)
    let tail = samples.split_off(split_at);

    tracing::debug!(
        "Chronological split: {} head, {} tail ({}% / {}%)",
        samples.len(),
        tail.len(),
        (samples.len() * 100) / total.max(1),
        (tail.len()    * 100) / total.max(1),
    );

    (samples, tail)
}

/// floor(total * fraction), clamped to [0, total]
pub fn split_index(total: usize, fraction: f64) -> usize {
    let fraction = fraction.clamp(0.0, 1.0);
    ((total as f64) * fraction).floor() as usize
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, test)     = split_chronological(items, 0.7);
        assert_eq!(train.len(), 70);
        assert_eq!(test.len(),  30);
    }

    #[test]
    fn test_uses_floor() {
        // 0.7 * 11 = 7.7 → 7
        let items: Vec<usize> = (0..11).collect();
        let (train, test)     = split_chronological(items, 0.7);
        assert_eq!(train.len(), 7);
        assert_eq!(test.len(),  4);
    }

    #[test]
    fn test_order_is_preserved() {
        let items: Vec<usize> = (0..10).collect();
        let (train, test)     = split_chronological(items, 0.7);
        assert_eq!(train, vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(test,  vec![7, 8, 9]);
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, test)     = split_chronological(items, 0.7);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }

    #[test]
    fn test_full_head_split() {
        let items: Vec<usize> = (0..10).collect();
        let (train, test)     = split_chronological(items, 1.0);
        assert_eq!(train.len(), 10);
        assert!(test.is_empty());
    }

    #[test]
    fn test_validation_split_index() {
        // Validation keeps the last 33%: 100 → 67 fit, 33 held out
        assert_eq!(split_index(100, 1.0 - 0.33), 67);
    }
}
