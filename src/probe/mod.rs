//! Linear probe evaluation
//!
//! Trains one fresh linear classifier on frozen features with full-batch
//! Adam and cross-entropy, scores the validation and test splits with
//! micro- and macro-F1 after every epoch, and reports the best epoch and
//! score for each of the four metric curves.

mod config;
mod curve;
mod result;

pub use config::ProbeConfig;
pub use curve::MetricCurve;
pub use result::ProbeResult;

use std::collections::BTreeSet;

use ndarray::ArrayView2;

use crate::autograd::{backward, Tensor};
use crate::device::select_device;
use crate::loss::cross_entropy;
use crate::metrics::{f1_macro, f1_micro};
use crate::nn::{Linear, Mode};
use crate::optim::{Adam, Optimizer};
use crate::progress::ProgressBar;

/// The three labeled splits of one probe run.
///
/// Features are (samples × feature_dim) views over host memory; labels are
/// 0-based class indices aligned row-for-row with the features.
#[derive(Clone, Copy, Debug)]
pub struct ProbeSplits<'a> {
    pub train_features: ArrayView2<'a, f32>,
    pub train_labels: &'a [usize],
    pub val_features: ArrayView2<'a, f32>,
    pub val_labels: &'a [usize],
    pub test_features: ArrayView2<'a, f32>,
    pub test_labels: &'a [usize],
}

impl ProbeSplits<'_> {
    /// Number of classes: the count of distinct labels across all splits.
    ///
    /// The classifier head is sized by this count, so labels are expected to
    /// be contiguous from 0. A gapped label set (say `{0, 2}`) yields a
    /// smaller head and the out-of-range label fails in the loss, not here.
    #[must_use]
    pub fn num_classes(&self) -> usize {
        self.train_labels
            .iter()
            .chain(self.val_labels)
            .chain(self.test_labels)
            .collect::<BTreeSet<_>>()
            .len()
    }

    fn validate(&self) {
        assert_eq!(
            self.train_features.nrows(),
            self.train_labels.len(),
            "train features and labels disagree on sample count"
        );
        assert_eq!(
            self.val_features.nrows(),
            self.val_labels.len(),
            "val features and labels disagree on sample count"
        );
        assert_eq!(
            self.test_features.nrows(),
            self.test_labels.len(),
            "test features and labels disagree on sample count"
        );
        assert!(!self.train_labels.is_empty(), "train split is empty");
        assert!(!self.val_labels.is_empty(), "val split is empty");
        assert!(!self.test_labels.is_empty(), "test split is empty");

        let dim = self.train_features.ncols();
        assert_eq!(self.val_features.ncols(), dim, "val feature dim differs from train");
        assert_eq!(self.test_features.ncols(), dim, "test feature dim differs from train");
    }
}

/// True when a best epoch (1-based) lands in the last 20 epochs of the
/// budget, i.e. the metric was still improving near the end of training.
fn near_budget_end(best_epoch: usize, num_epochs: usize) -> bool {
    best_epoch + 20 > num_epochs
}

fn to_tensor(features: ArrayView2<'_, f32>) -> Tensor {
    Tensor::from_vec(features.iter().copied().collect(), false)
}

/// Train a linear probe and report best-epoch F1 for val and test.
///
/// Runs exactly `config.num_epochs` full-batch Adam steps; after each step
/// both held-out splits are scored with micro- and macro-F1. Each of the
/// four resulting curves selects its own best epoch (highest score, earliest
/// epoch on ties). When the best val- or test-micro epoch falls in the last
/// 20 epochs, a convergence warning is logged; the returned values are not
/// affected.
///
/// Shape mismatches, empty splits, and out-of-range labels panic; there is
/// no partial result.
pub fn evaluate(splits: &ProbeSplits<'_>, config: &ProbeConfig) -> ProbeResult {
    assert!(config.num_epochs > 0, "num_epochs must be positive");
    splits.validate();

    let device = select_device(config.use_gpu);
    let n_classes = splits.num_classes();
    let feature_dim = splits.train_features.ncols();
    let n_train = splits.train_labels.len();
    let n_val = splits.val_labels.len();
    let n_test = splits.test_labels.len();

    log::debug!(
        "probe: {n_train}/{n_val}/{n_test} samples, {feature_dim} features, \
         {n_classes} classes on {device}"
    );

    let train_x = to_tensor(splits.train_features);
    let val_x = to_tensor(splits.val_features);
    let test_x = to_tensor(splits.test_features);

    let model = Linear::new(feature_dim, n_classes);
    let mut params = model.parameters();
    let mut optimizer = Adam::default_params(config.lr);

    let mut val_micro = MetricCurve::new();
    let mut val_macro = MetricCurve::new();
    let mut test_micro = MetricCurve::new();
    let mut test_macro = MetricCurve::new();

    let mut bar = config.progress.then(|| ProgressBar::new(config.num_epochs, 30));

    for epoch in 1..=config.num_epochs {
        // One full-batch gradient step.
        let logits = model.forward(&train_x, n_train, Mode::Train);
        let loss = cross_entropy(&logits, splits.train_labels, n_classes);

        optimizer.zero_grad(&mut params);
        backward(&loss, None);
        optimizer.step(&mut params);

        // Score both held-out splits against the updated parameters.
        let val_logits = model.forward(&val_x, n_val, Mode::Eval);
        val_micro.record(epoch, f1_micro(&val_logits, splits.val_labels, n_classes));
        val_macro.record(epoch, f1_macro(&val_logits, splits.val_labels, n_classes));

        let test_logits = model.forward(&test_x, n_test, Mode::Eval);
        test_micro.record(epoch, f1_micro(&test_logits, splits.test_labels, n_classes));
        test_macro.record(epoch, f1_macro(&test_logits, splits.test_labels, n_classes));

        if let Some(bar) = bar.as_mut() {
            bar.update(epoch);
            bar.draw("probe");
        }
    }

    let (best_val_micro_epoch, best_val_micro) = val_micro.best().expect("val curve is non-empty");
    let (best_val_macro_epoch, best_val_macro) = val_macro.best().expect("val curve is non-empty");
    let (best_test_micro_epoch, best_test_micro) =
        test_micro.best().expect("test curve is non-empty");
    let (best_test_macro_epoch, best_test_macro) =
        test_macro.best().expect("test curve is non-empty");

    if near_budget_end(best_val_micro_epoch, config.num_epochs)
        || near_budget_end(best_test_micro_epoch, config.num_epochs)
    {
        log::warn!(
            "best F1-micro epoch (val {best_val_micro_epoch}, test {best_test_micro_epoch}) \
             within 20 epochs of the {} budget; model may not have converged",
            config.num_epochs
        );
    }

    // Per-call state is dropped before returning so repeated probes do not
    // stack live device buffers.
    drop(params);
    drop(model);
    drop(train_x);
    drop(val_x);
    drop(test_x);

    ProbeResult {
        best_val_f1_micro_epoch: best_val_micro_epoch,
        best_val_f1_micro: best_val_micro,
        best_val_f1_macro_epoch: best_val_macro_epoch,
        best_val_f1_macro: best_val_macro,
        best_test_f1_micro_epoch: best_test_micro_epoch,
        best_test_f1_micro: best_test_micro,
        best_test_f1_macro_epoch: best_test_macro_epoch,
        best_test_f1_macro: best_test_macro,
    }
}
