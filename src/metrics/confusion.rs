//! Confusion matrix for multi-class classification

use std::fmt;

/// Confusion matrix; element `[i][j]` counts samples with true label `i`
/// predicted as `j`.
///
/// The class count is supplied by the caller rather than inferred from the
/// label values, so classes absent from one label set still occupy a row and
/// column and shape any macro average computed from the matrix.
#[derive(Clone, Debug)]
pub struct ConfusionMatrix {
    matrix: Vec<Vec<usize>>,
    n_classes: usize,
}

impl ConfusionMatrix {
    /// Create an empty matrix for `n_classes` classes.
    pub fn new(n_classes: usize) -> Self {
        Self { matrix: vec![vec![0; n_classes]; n_classes], n_classes }
    }

    /// Build from predicted and true labels over a fixed class count.
    pub fn from_labels(y_pred: &[usize], y_true: &[usize], n_classes: usize) -> Self {
        assert_eq!(y_pred.len(), y_true.len(), "predictions and targets must have same length");

        let mut cm = Self::new(n_classes);
        for (&pred, &true_label) in y_pred.iter().zip(y_true.iter()) {
            assert!(pred < n_classes, "predicted label {pred} outside [0, {n_classes})");
            assert!(true_label < n_classes, "true label {true_label} outside [0, {n_classes})");
            cm.matrix[true_label][pred] += 1;
        }
        cm
    }

    /// Number of classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Count at `[true_label][predicted_label]`.
    #[must_use]
    pub fn get(&self, true_label: usize, predicted_label: usize) -> usize {
        self.matrix[true_label][predicted_label]
    }

    /// True positives for a class.
    #[must_use]
    pub fn true_positives(&self, class: usize) -> usize {
        self.matrix[class][class]
    }

    /// False positives for a class (predicted as `class` but was not).
    #[must_use]
    pub fn false_positives(&self, class: usize) -> usize {
        (0..self.n_classes).filter(|&i| i != class).map(|i| self.matrix[i][class]).sum()
    }

    /// False negatives for a class (was `class` but predicted otherwise).
    #[must_use]
    pub fn false_negatives(&self, class: usize) -> usize {
        (0..self.n_classes).filter(|&j| j != class).map(|j| self.matrix[class][j]).sum()
    }

    /// Total true instances of a class.
    #[must_use]
    pub fn support(&self, class: usize) -> usize {
        self.matrix[class].iter().sum()
    }

    /// Total number of samples.
    #[must_use]
    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Confusion Matrix:")?;
        write!(f, "      ")?;
        for j in 0..self.n_classes {
            write!(f, "Pred {j} ")?;
        }
        writeln!(f)?;
        for i in 0..self.n_classes {
            write!(f, "True {i}")?;
            for j in 0..self.n_classes {
                write!(f, "{:>6} ", self.matrix[i][j])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
