//! Probe run configuration

use serde::{Deserialize, Serialize};

/// Hyperparameters and toggles for a linear probe run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Request GPU execution; falls back to CPU when no device is available.
    pub use_gpu: bool,
    /// Adam learning rate.
    pub lr: f32,
    /// Number of full-batch training epochs.
    pub num_epochs: usize,
    /// Render a progress bar on stderr during training.
    pub progress: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self { use_gpu: true, lr: 0.001, num_epochs: 500, progress: true }
    }
}

impl ProbeConfig {
    /// Builder-style learning rate override.
    #[must_use]
    pub fn with_lr(mut self, lr: f32) -> Self {
        self.lr = lr;
        self
    }

    /// Builder-style epoch budget override.
    #[must_use]
    pub fn with_epochs(mut self, num_epochs: usize) -> Self {
        self.num_epochs = num_epochs;
        self
    }

    /// Builder-style progress toggle.
    #[must_use]
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let cfg = ProbeConfig::default();
        assert!(cfg.use_gpu);
        assert_eq!(cfg.lr, 0.001);
        assert_eq!(cfg.num_epochs, 500);
        assert!(cfg.progress);
    }

    #[test]
    fn test_builder_overrides() {
        let cfg = ProbeConfig::default().with_lr(0.01).with_epochs(50).with_progress(false);
        assert_eq!(cfg.lr, 0.01);
        assert_eq!(cfg.num_epochs, 50);
        assert!(!cfg.progress);
    }

    #[test]
    fn test_serde_round_trip() {
        let cfg = ProbeConfig::default().with_epochs(10);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ProbeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.num_epochs, 10);
    }
}
