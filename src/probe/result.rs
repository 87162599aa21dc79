//! Probe run outcome

use std::fmt;

use serde::{Deserialize, Serialize};

/// Best epoch and score for each of the four tracked metrics.
///
/// Epochs are 1-based. The four metric pairs are selected independently, so
/// the reported epochs may differ from one another.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub best_val_f1_micro_epoch: usize,
    pub best_val_f1_micro: f64,
    pub best_val_f1_macro_epoch: usize,
    pub best_val_f1_macro: f64,
    pub best_test_f1_micro_epoch: usize,
    pub best_test_f1_micro: f64,
    pub best_test_f1_macro_epoch: usize,
    pub best_test_f1_macro: f64,
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "val  f1-micro {:.4} @ epoch {:>4}  │  f1-macro {:.4} @ epoch {:>4}",
            self.best_val_f1_micro,
            self.best_val_f1_micro_epoch,
            self.best_val_f1_macro,
            self.best_val_f1_macro_epoch,
        )?;
        write!(
            f,
            "test f1-micro {:.4} @ epoch {:>4}  │  f1-macro {:.4} @ epoch {:>4}",
            self.best_test_f1_micro,
            self.best_test_f1_micro_epoch,
            self.best_test_f1_macro,
            self.best_test_f1_macro_epoch,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProbeResult {
        ProbeResult {
            best_val_f1_micro_epoch: 12,
            best_val_f1_micro: 0.91,
            best_val_f1_macro_epoch: 14,
            best_val_f1_macro: 0.88,
            best_test_f1_micro_epoch: 12,
            best_test_f1_micro: 0.90,
            best_test_f1_macro_epoch: 15,
            best_test_f1_macro: 0.87,
        }
    }

    #[test]
    fn test_display_mentions_both_splits() {
        let text = sample().to_string();
        assert!(text.contains("val"));
        assert!(text.contains("test"));
        assert!(text.contains("0.9100"));
    }

    #[test]
    fn test_serde_has_all_eight_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 8);
        for key in [
            "best_val_f1_micro_epoch",
            "best_val_f1_micro",
            "best_val_f1_macro_epoch",
            "best_val_f1_macro",
            "best_test_f1_micro_epoch",
            "best_test_f1_micro",
            "best_test_f1_macro_epoch",
            "best_test_f1_macro",
        ] {
            assert!(obj.contains_key(key), "missing field {key}");
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let result = sample();
        let json = serde_json::to_string(&result).unwrap();
        let back: ProbeResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
