//! Optimizer trait

use crate::autograd::Tensor;

/// Trait for optimization algorithms.
pub trait Optimizer {
    /// Apply one update using the gradients accumulated on `params`.
    fn step(&mut self, params: &mut [Tensor]);

    /// Clear the gradients on `params`.
    fn zero_grad(&mut self, params: &mut [Tensor]) {
        for param in params {
            param.zero_grad();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    struct PlainSgd {
        learning_rate: f32,
    }

    impl Optimizer for PlainSgd {
        fn step(&mut self, params: &mut [Tensor]) {
            for param in params {
                if let Some(grad) = param.grad() {
                    let updated = param.data() - &grad * self.learning_rate;
                    *param.data_mut() = updated;
                }
            }
        }

    }

    #[test]
    fn test_default_zero_grad() {
        let mut opt = PlainSgd { learning_rate: 0.1 };
        let mut params = vec![Tensor::from_vec(vec![1.0, 2.0], true)];
        params[0].set_grad(arr1(&[0.5, 0.5]));

        opt.zero_grad(&mut params);
        assert!(params[0].grad().is_none());
    }

    #[test]
    fn test_step_applies_gradient() {
        let mut opt = PlainSgd { learning_rate: 0.1 };
        let mut params = vec![Tensor::from_vec(vec![1.0, 2.0], true)];
        params[0].set_grad(arr1(&[1.0, 2.0]));

        opt.step(&mut params);
        assert_eq!(params[0].data(), arr1(&[0.9, 1.8]));
    }
}
