//! Matrix multiplication with recorded backward pass

use std::cell::RefCell;
use std::rc::Rc;

use ndarray::linalg::general_mat_mul;
use ndarray::{Array1, Array2, ArrayView2};

use crate::autograd::{BackwardOp, Tensor};

/// Transpose a row-major matrix (rows × cols) to (cols × rows).
#[inline]
pub(crate) fn transpose(data: &[f32], rows: usize, cols: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            out[c * rows + r] = data[r * cols + c];
        }
    }
    out
}

/// Compute C = A @ B on flat row-major buffers via ndarray GEMM.
pub(crate) fn matmul_compute(a: &[f32], b: &[f32], m: usize, k: usize, n: usize) -> Vec<f32> {
    let a = ArrayView2::from_shape((m, k), a).expect("lhs buffer matches m*k");
    let b = ArrayView2::from_shape((k, n), b).expect("rhs buffer matches k*n");
    let mut c = Array2::<f32>::zeros((m, n));
    general_mat_mul(1.0, &a, &b, 0.0, &mut c);
    c.into_raw_vec_and_offset().0
}

/// Matrix multiplication.
///
/// Computes `C = A @ B` where A is m×k, B is k×n and C is m×n, all flattened
/// row-major. Records a backward op when either input tracks gradients.
pub fn matmul(a: &Tensor, b: &Tensor, m: usize, k: usize, n: usize) -> Tensor {
    assert_eq!(a.len(), m * k, "matmul: lhs size mismatch");
    assert_eq!(b.len(), k * n, "matmul: rhs size mismatch");

    let a_data = a.data();
    let b_data = b.data();
    let result_data = matmul_compute(
        a_data.as_slice().expect("lhs buffer is contiguous"),
        b_data.as_slice().expect("rhs buffer is contiguous"),
        m,
        k,
        n,
    );

    let requires_grad = a.requires_grad() || b.requires_grad();
    let mut result = Tensor::new(Array1::from(result_data), requires_grad);

    if requires_grad {
        let backward_op = Rc::new(MatmulBackward {
            a: a.clone(),
            b: b.clone(),
            m,
            k,
            n,
            result_grad: result.grad_cell(),
        });
        result.set_backward_op(backward_op);
    }

    result
}

struct MatmulBackward {
    a: Tensor,
    b: Tensor,
    m: usize,
    k: usize,
    n: usize,
    result_grad: Rc<RefCell<Option<Array1<f32>>>>,
}

impl BackwardOp for MatmulBackward {
    fn backward(&self) {
        if let Some(grad_output) = self.result_grad.borrow().as_ref() {
            let grad_c = grad_output.as_slice().expect("output grad is contiguous");
            let a_data = self.a.data();
            let b_data = self.b.data();
            let a_slice = a_data.as_slice().expect("lhs buffer is contiguous");
            let b_slice = b_data.as_slice().expect("rhs buffer is contiguous");

            if self.a.requires_grad() {
                // ∂L/∂A = ∂L/∂C @ Bᵀ : (m,n) @ (n,k) = (m,k)
                let b_t = transpose(b_slice, self.k, self.n);
                let grad_a = matmul_compute(grad_c, &b_t, self.m, self.n, self.k);
                self.a.accumulate_grad(Array1::from(grad_a));
            }

            if self.b.requires_grad() {
                // ∂L/∂B = Aᵀ @ ∂L/∂C : (k,m) @ (m,n) = (k,n)
                let a_t = transpose(a_slice, self.m, self.k);
                let grad_b = matmul_compute(&a_t, grad_c, self.k, self.m, self.n);
                self.b.accumulate_grad(Array1::from(grad_b));
            }

            if let Some(op) = self.a.backward_op() {
                op.backward();
            }
            if let Some(op) = self.b.backward_op() {
                op.backward();
            }
        }
    }
}
