//! Micro- and macro-averaged F1 over argmax predictions

use crate::autograd::Tensor;

use super::ConfusionMatrix;

/// Averaging strategy for multi-class F1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Average {
    /// Aggregate TP/FP/FN globally across classes before computing F1.
    Micro,
    /// Compute F1 per class, then take the unweighted mean over all classes.
    Macro,
}

/// Row-wise argmax over flattened (rows × cols) logits.
///
/// Ties resolve to the lowest class index.
pub fn argmax_rows(logits: &Tensor, n_classes: usize) -> Vec<usize> {
    assert!(n_classes > 0, "argmax_rows: n_classes must be positive");
    let data = logits.data();
    assert_eq!(data.len() % n_classes, 0, "argmax_rows: logits size mismatch");

    data.as_slice()
        .expect("logits buffer is contiguous")
        .chunks_exact(n_classes)
        .map(|row| {
            let mut best = 0;
            for (c, &v) in row.iter().enumerate() {
                if v > row[best] {
                    best = c;
                }
            }
            best
        })
        .collect()
}

fn f1_from_counts(tp: f64, fp: f64, fn_: f64) -> f64 {
    let p = if tp + fp > 0.0 { tp / (tp + fp) } else { 0.0 };
    let r = if tp + fn_ > 0.0 { tp / (tp + fn_) } else { 0.0 };
    if p + r > 0.0 {
        2.0 * p * r / (p + r)
    } else {
        0.0
    }
}

/// F1 over discrete labels with a fixed class count and averaging strategy.
pub fn f1_score(y_pred: &[usize], y_true: &[usize], n_classes: usize, average: Average) -> f64 {
    let cm = ConfusionMatrix::from_labels(y_pred, y_true, n_classes);

    match average {
        Average::Micro => {
            let tp: usize = (0..n_classes).map(|c| cm.true_positives(c)).sum();
            let fp: usize = (0..n_classes).map(|c| cm.false_positives(c)).sum();
            let fn_: usize = (0..n_classes).map(|c| cm.false_negatives(c)).sum();
            f1_from_counts(tp as f64, fp as f64, fn_ as f64)
        }
        Average::Macro => {
            if n_classes == 0 {
                return 0.0;
            }
            let sum: f64 = (0..n_classes)
                .map(|c| {
                    f1_from_counts(
                        cm.true_positives(c) as f64,
                        cm.false_positives(c) as f64,
                        cm.false_negatives(c) as f64,
                    )
                })
                .sum();
            sum / n_classes as f64
        }
    }
}

/// Micro-averaged F1 of (batch × n_classes) logits against true labels.
pub fn f1_micro(pred_logits: &Tensor, true_labels: &[usize], n_classes: usize) -> f64 {
    let y_pred = argmax_rows(pred_logits, n_classes);
    f1_score(&y_pred, true_labels, n_classes, Average::Micro)
}

/// Macro-averaged F1 of (batch × n_classes) logits against true labels.
pub fn f1_macro(pred_logits: &Tensor, true_labels: &[usize], n_classes: usize) -> f64 {
    let y_pred = argmax_rows(pred_logits, n_classes);
    f1_score(&y_pred, true_labels, n_classes, Average::Macro)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_argmax_rows() {
        let logits = Tensor::from_vec(vec![0.1, 0.9, 0.8, 0.2, 0.5, 0.5], false);
        assert_eq!(argmax_rows(&logits, 2), vec![1, 0, 0]);
    }

    #[test]
    fn test_f1_perfect_predictions() {
        let y = vec![0, 1, 2, 1, 0];
        assert_relative_eq!(f1_score(&y, &y, 3, Average::Micro), 1.0);
        assert_relative_eq!(f1_score(&y, &y, 3, Average::Macro), 1.0);
    }

    #[test]
    fn test_f1_all_wrong() {
        let y_pred = vec![1, 0];
        let y_true = vec![0, 1];
        assert_relative_eq!(f1_score(&y_pred, &y_true, 2, Average::Micro), 0.0);
        assert_relative_eq!(f1_score(&y_pred, &y_true, 2, Average::Macro), 0.0);
    }

    #[test]
    fn test_f1_micro_equals_accuracy_single_label() {
        // In single-label classification, micro-F1 collapses to accuracy.
        let y_pred = vec![0, 1, 1, 2, 0, 2];
        let y_true = vec![0, 1, 0, 2, 1, 2];
        let correct = y_pred.iter().zip(&y_true).filter(|(p, t)| p == t).count();
        let acc = correct as f64 / y_true.len() as f64;
        assert_relative_eq!(f1_score(&y_pred, &y_true, 3, Average::Micro), acc, epsilon = 1e-12);
    }

    #[test]
    fn test_f1_macro_penalizes_absent_class() {
        // Class 2 never predicted nor present: contributes 0 to the macro mean.
        let y = vec![0, 1, 0, 1];
        let macro_f1 = f1_score(&y, &y, 3, Average::Macro);
        assert_relative_eq!(macro_f1, 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_f1_macro_known_value() {
        // pred [0,1,1,0] vs true [0,1,0,1]:
        // class 0: tp=1 fp=1 fn=1 → f1 = 0.5; class 1 symmetric.
        let macro_f1 = f1_score(&[0, 1, 1, 0], &[0, 1, 0, 1], 2, Average::Macro);
        assert_relative_eq!(macro_f1, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_f1_from_logits() {
        // Logits whose argmax matches the labels exactly.
        let logits = Tensor::from_vec(vec![5.0, 0.0, 0.0, 5.0, 5.0, 0.0], false);
        let labels = vec![0, 1, 0];
        assert_relative_eq!(f1_micro(&logits, &labels, 2), 1.0);
        assert_relative_eq!(f1_macro(&logits, &labels, 2), 1.0);
    }

    #[test]
    fn test_f1_bounded() {
        let y_pred = vec![0, 0, 1, 2, 2, 1, 0];
        let y_true = vec![2, 0, 1, 1, 2, 0, 0];
        for avg in [Average::Micro, Average::Macro] {
            let f1 = f1_score(&y_pred, &y_true, 3, avg);
            assert!((0.0..=1.0).contains(&f1));
        }
    }
}
