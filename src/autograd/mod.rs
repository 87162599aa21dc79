//! Tape-based autograd engine
//!
//! Automatic differentiation over flat `f32` tensors using a gradient tape:
//! each operation output carries a recorded [`BackwardOp`] that pushes
//! gradients to its inputs and recurses toward the leaves.

mod backward;
pub mod ops;
mod tensor;

pub use backward::BackwardOp;
pub use tensor::Tensor;

/// Perform a backward pass starting from `tensor`.
///
/// Seeds the output gradient with `grad_output`, or with ones for a scalar
/// loss, then walks the recorded tape.
pub fn backward(tensor: &Tensor, grad_output: Option<ndarray::Array1<f32>>) {
    match grad_output {
        Some(grad) => tensor.set_grad(grad),
        None => tensor.set_grad(ndarray::Array1::ones(tensor.len())),
    }

    if let Some(op) = tensor.backward_op() {
        op.backward();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_backward_seeds_ones_for_scalar() {
        let t = Tensor::from_vec(vec![3.0], true);
        backward(&t, None);
        assert_eq!(t.grad().unwrap(), arr1(&[1.0]));
    }

    #[test]
    fn test_backward_uses_provided_seed() {
        let t = Tensor::from_vec(vec![1.0, 2.0], true);
        backward(&t, Some(arr1(&[0.5, 0.25])));
        assert_eq!(t.grad().unwrap(), arr1(&[0.5, 0.25]));
    }
}
