//! Flat f32 tensor with shared storage and a gradient cell

use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use ndarray::Array1;

use super::BackwardOp;

/// A flat `f32` tensor participating in the gradient tape.
///
/// Storage is `Rc`-shared: `Clone` produces a handle to the same buffer and
/// gradient cell, which is how optimizers and recorded backward ops observe
/// parameter updates without threading mutable references everywhere.
/// Matrix shape is carried by the operations (`ops::matmul` takes `m, k, n`),
/// not by the tensor itself.
#[derive(Clone)]
pub struct Tensor {
    data: Rc<RefCell<Array1<f32>>>,
    grad: Rc<RefCell<Option<Array1<f32>>>>,
    op: Rc<RefCell<Option<Rc<dyn BackwardOp>>>>,
    requires_grad: bool,
}

impl Tensor {
    /// Create a tensor from an ndarray buffer.
    pub fn new(data: Array1<f32>, requires_grad: bool) -> Self {
        Self {
            data: Rc::new(RefCell::new(data)),
            grad: Rc::new(RefCell::new(None)),
            op: Rc::new(RefCell::new(None)),
            requires_grad,
        }
    }

    /// Create a tensor from a `Vec<f32>`.
    pub fn from_vec(data: Vec<f32>, requires_grad: bool) -> Self {
        Self::new(Array1::from(data), requires_grad)
    }

    /// Create a zero-filled tensor of the given length.
    pub fn zeros(len: usize, requires_grad: bool) -> Self {
        Self::new(Array1::zeros(len), requires_grad)
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    /// Whether the tensor holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the current values.
    #[must_use]
    pub fn data(&self) -> Array1<f32> {
        self.data.borrow().clone()
    }

    /// Mutable access to the underlying buffer.
    ///
    /// The borrow must be released before any other access to this tensor.
    pub fn data_mut(&self) -> RefMut<'_, Array1<f32>> {
        self.data.borrow_mut()
    }

    /// Whether gradients are tracked for this tensor.
    #[must_use]
    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    /// Snapshot of the accumulated gradient, if any.
    #[must_use]
    pub fn grad(&self) -> Option<Array1<f32>> {
        self.grad.borrow().clone()
    }

    /// The shared gradient cell, for backward ops to write into.
    #[must_use]
    pub fn grad_cell(&self) -> Rc<RefCell<Option<Array1<f32>>>> {
        Rc::clone(&self.grad)
    }

    /// Overwrite the gradient.
    pub fn set_grad(&self, grad: Array1<f32>) {
        *self.grad.borrow_mut() = Some(grad);
    }

    /// Add into the gradient, initializing it on first write.
    pub fn accumulate_grad(&self, grad: Array1<f32>) {
        let mut cell = self.grad.borrow_mut();
        match cell.as_mut() {
            Some(existing) => *existing = &*existing + &grad,
            None => *cell = Some(grad),
        }
    }

    /// Clear the gradient.
    pub fn zero_grad(&self) {
        *self.grad.borrow_mut() = None;
    }

    /// A gradient-free copy with fresh storage.
    ///
    /// The copy shares nothing with `self`: operations on it never reach the
    /// tape that produced the original values.
    #[must_use]
    pub fn detach(&self) -> Tensor {
        Tensor::new(self.data.borrow().clone(), false)
    }

    /// The recorded backward op, if this tensor is an op output.
    #[must_use]
    pub fn backward_op(&self) -> Option<Rc<dyn BackwardOp>> {
        self.op.borrow().clone()
    }

    /// Record the backward op that produced this tensor.
    pub fn set_backward_op(&mut self, op: Rc<dyn BackwardOp>) {
        *self.op.borrow_mut() = Some(op);
    }
}

impl std::fmt::Debug for Tensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("len", &self.len())
            .field("requires_grad", &self.requires_grad)
            .field("has_grad", &self.grad.borrow().is_some())
            .finish()
    }
}
