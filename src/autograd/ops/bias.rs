//! Row-broadcast bias addition with recorded backward pass

use std::cell::RefCell;
use std::rc::Rc;

use ndarray::Array1;

use crate::autograd::{BackwardOp, Tensor};

/// Add a bias vector to every row of a flattened (rows × cols) matrix.
///
/// The backward pass passes the output gradient through to `x` unchanged and
/// sums it over rows for `bias`.
pub fn add_bias(x: &Tensor, bias: &Tensor, rows: usize, cols: usize) -> Tensor {
    assert_eq!(x.len(), rows * cols, "add_bias: input size mismatch");
    assert_eq!(bias.len(), cols, "add_bias: bias size mismatch");

    let x_data = x.data();
    let bias_data = bias.data();
    let mut out = x_data.clone();
    for r in 0..rows {
        for c in 0..cols {
            out[r * cols + c] += bias_data[c];
        }
    }

    let requires_grad = x.requires_grad() || bias.requires_grad();
    let mut result = Tensor::new(out, requires_grad);

    if requires_grad {
        let backward_op = Rc::new(AddBiasBackward {
            x: x.clone(),
            bias: bias.clone(),
            rows,
            cols,
            result_grad: result.grad_cell(),
        });
        result.set_backward_op(backward_op);
    }

    result
}

struct AddBiasBackward {
    x: Tensor,
    bias: Tensor,
    rows: usize,
    cols: usize,
    result_grad: Rc<RefCell<Option<Array1<f32>>>>,
}

impl BackwardOp for AddBiasBackward {
    fn backward(&self) {
        if let Some(grad) = self.result_grad.borrow().as_ref() {
            if self.x.requires_grad() {
                self.x.accumulate_grad(grad.clone());
            }

            if self.bias.requires_grad() {
                let mut grad_bias = Array1::<f32>::zeros(self.cols);
                for r in 0..self.rows {
                    for c in 0..self.cols {
                        grad_bias[c] += grad[r * self.cols + c];
                    }
                }
                self.bias.accumulate_grad(grad_bias);
            }

            if let Some(op) = self.x.backward_op() {
                op.backward();
            }
            if let Some(op) = self.bias.backward_op() {
                op.backward();
            }
        }
    }
}
