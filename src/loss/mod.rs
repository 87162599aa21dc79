//! Categorical cross-entropy from logits

use std::cell::RefCell;
use std::rc::Rc;

use ndarray::Array1;

use crate::autograd::{BackwardOp, Tensor};

/// Numerically stable softmax over one row of logits.
pub(crate) fn softmax(row: &[f32]) -> Vec<f32> {
    let max = row.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let exp: Vec<f32> = row.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = exp.iter().sum();
    exp.into_iter().map(|e| e / sum).collect()
}

/// Categorical cross-entropy of (batch × n_classes) logits against integer
/// class labels, mean-reduced over the batch.
///
/// Returns a scalar tensor. When `logits` tracks gradients, the backward pass
/// accumulates d(CE)/d(logits) = (softmax - onehot)/batch into it and then
/// continues down the tape.
pub fn cross_entropy(logits: &Tensor, labels: &[usize], n_classes: usize) -> Tensor {
    let batch = labels.len();
    assert!(batch > 0, "cross_entropy: empty batch");
    assert_eq!(logits.len(), batch * n_classes, "cross_entropy: logits size mismatch");

    let logits_data = logits.data();
    let mut total = 0.0f32;
    let mut grad = Array1::<f32>::zeros(batch * n_classes);

    for (r, &label) in labels.iter().enumerate() {
        assert!(label < n_classes, "cross_entropy: label {label} outside [0, {n_classes})");

        let row = &logits_data.as_slice().expect("logits buffer is contiguous")
            [r * n_classes..(r + 1) * n_classes];
        let probs = softmax(row);

        total -= (probs[label] + 1e-10).max(f32::MIN_POSITIVE).ln();

        for (c, &p) in probs.iter().enumerate() {
            let target = if c == label { 1.0 } else { 0.0 };
            grad[r * n_classes + c] = (p - target) / batch as f32;
        }
    }

    let mut loss = Tensor::from_vec(vec![total / batch as f32], logits.requires_grad());

    if logits.requires_grad() {
        loss.set_backward_op(Rc::new(CrossEntropyBackward {
            logits: logits.clone(),
            grad,
            loss_grad: loss.grad_cell(),
        }));
    }

    loss
}

struct CrossEntropyBackward {
    logits: Tensor,
    grad: Array1<f32>,
    loss_grad: Rc<RefCell<Option<Array1<f32>>>>,
}

impl BackwardOp for CrossEntropyBackward {
    fn backward(&self) {
        if let Some(seed) = self.loss_grad.borrow().as_ref() {
            self.logits.accumulate_grad(&self.grad * seed[0]);
            if let Some(op) = self.logits.backward_op() {
                op.backward();
            }
        }
    }
}
