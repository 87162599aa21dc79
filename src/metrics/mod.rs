//! Classification metrics
//!
//! Confusion-matrix based multi-class metrics with explicit class counts:
//! a class that is absent from one split still occupies a slot in every
//! matrix and macro average.

mod confusion;
mod f1;

pub use confusion::ConfusionMatrix;
pub use f1::{argmax_rows, f1_macro, f1_micro, f1_score, Average};
