//! Differentiable tensor operations

mod bias;
mod matmul;

pub use bias::add_bias;
pub use matmul::matmul;
