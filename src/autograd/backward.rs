//! Backward operation trait for the gradient tape

/// A recorded operation that knows how to push gradients to its inputs.
///
/// Implementations accumulate into the input tensors' gradient cells and then
/// recurse into the inputs' own backward ops, walking the tape to the leaves.
pub trait BackwardOp {
    /// Propagate the output gradient to the operation's inputs.
    fn backward(&self);
}
