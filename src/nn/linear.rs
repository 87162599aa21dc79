//! Linear classifier layer

use ndarray::Array1;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

use crate::autograd::ops::{add_bias, matmul};
use crate::autograd::Tensor;

/// Forward-pass mode, passed explicitly on every call.
///
/// `Eval` forwards run against detached parameter copies, so no tape is
/// built and no gradients can flow; there is no hidden mode state on the
/// layer itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Build the gradient tape for a training step.
    Train,
    /// Inference only; the forward records nothing.
    Eval,
}

/// A single linear transform: logits = x @ W + b.
///
/// Weight is stored (in_dim × out_dim) row-major, bias is (out_dim).
/// Parameters are freshly initialized at construction, uniform in
/// ±1/sqrt(in_dim).
pub struct Linear {
    weight: Tensor,
    bias: Tensor,
    in_dim: usize,
    out_dim: usize,
}

impl Linear {
    /// Create a layer with fresh parameters.
    pub fn new(in_dim: usize, out_dim: usize) -> Self {
        assert!(in_dim > 0, "Linear: in_dim must be positive");
        assert!(out_dim > 0, "Linear: out_dim must be positive");

        let bound = 1.0 / (in_dim as f32).sqrt();
        let weight = Array1::random(in_dim * out_dim, Uniform::new(-bound, bound));
        let bias = Array1::random(out_dim, Uniform::new(-bound, bound));

        Self {
            weight: Tensor::new(weight, true),
            bias: Tensor::new(bias, true),
            in_dim,
            out_dim,
        }
    }

    /// Input dimensionality.
    #[must_use]
    pub fn in_dim(&self) -> usize {
        self.in_dim
    }

    /// Output dimensionality (number of classes).
    #[must_use]
    pub fn out_dim(&self) -> usize {
        self.out_dim
    }

    /// Handles to the trainable parameters, in `[weight, bias]` order.
    ///
    /// The handles share storage with the layer, so optimizer updates are
    /// visible to subsequent forwards.
    #[must_use]
    pub fn parameters(&self) -> Vec<Tensor> {
        vec![self.weight.clone(), self.bias.clone()]
    }

    /// Map a flattened (batch × in_dim) input to (batch × out_dim) logits.
    pub fn forward(&self, x: &Tensor, batch: usize, mode: Mode) -> Tensor {
        match mode {
            Mode::Train => {
                let z = matmul(x, &self.weight, batch, self.in_dim, self.out_dim);
                add_bias(&z, &self.bias, batch, self.out_dim)
            }
            Mode::Eval => {
                let weight = self.weight.detach();
                let bias = self.bias.detach();
                let z = matmul(x, &weight, batch, self.in_dim, self.out_dim);
                add_bias(&z, &bias, batch, self.out_dim)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::backward;

    #[test]
    fn test_linear_shapes() {
        let layer = Linear::new(4, 3);
        assert_eq!(layer.in_dim(), 4);
        assert_eq!(layer.out_dim(), 3);
        let params = layer.parameters();
        assert_eq!(params[0].len(), 12);
        assert_eq!(params[1].len(), 3);
    }

    #[test]
    fn test_forward_output_size() {
        let layer = Linear::new(4, 3);
        let x = Tensor::zeros(2 * 4, false);
        let logits = layer.forward(&x, 2, Mode::Train);
        assert_eq!(logits.len(), 2 * 3);
    }

    #[test]
    fn test_init_within_bound() {
        let layer = Linear::new(16, 2);
        let bound = 1.0 / 4.0;
        for p in layer.parameters() {
            assert!(p.data().iter().all(|&w| w.abs() <= bound));
        }
    }

    #[test]
    fn test_train_forward_reaches_parameters() {
        let layer = Linear::new(2, 2);
        let x = Tensor::from_vec(vec![1.0, -1.0], false);
        let logits = layer.forward(&x, 1, Mode::Train);

        backward(&logits, Some(ndarray::Array1::ones(2)));

        let params = layer.parameters();
        assert!(params[0].grad().is_some());
        assert!(params[1].grad().is_some());
    }

    #[test]
    fn test_eval_forward_builds_no_tape() {
        let layer = Linear::new(2, 2);
        let x = Tensor::from_vec(vec![1.0, -1.0], false);
        let logits = layer.forward(&x, 1, Mode::Eval);

        assert!(!logits.requires_grad());
        assert!(logits.backward_op().is_none());
        for p in layer.parameters() {
            assert!(p.grad().is_none());
        }
    }

    #[test]
    fn test_eval_matches_train_values() {
        let layer = Linear::new(3, 2);
        let x = Tensor::from_vec(vec![0.5, -0.25, 1.5], false);
        let train_out = layer.forward(&x, 1, Mode::Train);
        let eval_out = layer.forward(&x, 1, Mode::Eval);
        assert_eq!(train_out.data(), eval_out.data());
    }
}
