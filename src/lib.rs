//! # sondear
//!
//! Linear probe evaluation for learned representations.
//!
//! A probe answers one question: how much class information do frozen
//! feature vectors carry? `evaluate` trains a single linear classifier on
//! the train split with full-batch Adam and cross-entropy, scores the val
//! and test splits with micro- and macro-F1 after every epoch, and returns
//! the best epoch and score of each of the four metric curves.
//!
//! ```no_run
//! use ndarray::Array2;
//! use sondear::{evaluate, ProbeConfig, ProbeSplits};
//!
//! let features = Array2::<f32>::zeros((6, 32));
//! let labels = vec![0, 1, 0, 1, 0, 1];
//!
//! let splits = ProbeSplits {
//!     train_features: features.view(),
//!     train_labels: &labels,
//!     val_features: features.view(),
//!     val_labels: &labels,
//!     test_features: features.view(),
//!     test_labels: &labels,
//! };
//! let result = evaluate(&splits, &ProbeConfig::default());
//! println!("{result}");
//! ```

pub mod autograd;
pub mod device;
pub mod loss;
pub mod metrics;
pub mod nn;
pub mod optim;
pub mod probe;
pub mod progress;

pub use autograd::Tensor;
pub use device::Device;
pub use probe::{evaluate, MetricCurve, ProbeConfig, ProbeResult, ProbeSplits};
