//! Ordered, freezable collection of feature operators
//!
//! Operators are added while building and the coordinator is then finalized.
//! Only a finalized coordinator computes features, so every tile and cell of
//! a run lives in the same feature space.

use crate::analysis::operator::Operator;
use crate::io::error::{Result, configuration_error};
use crate::spatial::patch::ImagePatch;

/// Feature extractor built from one or more operators
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coordinator {
    operators: Vec<Operator>,
    finalized: bool,
}

impl Coordinator {
    /// Create an empty, unfinalized coordinator
    pub const fn new() -> Self {
        Self {
            operators: Vec::new(),
            finalized: false,
        }
    }

    /// Build and finalize a coordinator from a list of operators
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty
    pub fn from_operators(operators: impl IntoIterator<Item = Operator>) -> Result<Self> {
        let mut coordinator = Self::new();
        for operator in operators {
            coordinator.add_operator(operator)?;
        }
        if coordinator.operators.is_empty() {
            return Err(configuration_error(&"at least one operator is required"));
        }
        coordinator.finalize();
        Ok(coordinator)
    }

    /// Append an operator; its output follows those already added
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinator is already finalized
    pub fn add_operator(&mut self, operator: Operator) -> Result<()> {
        if self.finalized {
            return Err(configuration_error(&format!(
                "cannot add operator {operator} to a finalized coordinator"
            )));
        }
        self.operators.push(operator);
        Ok(())
    }

    /// Freeze the configuration
    ///
    /// Returns whether the coordinator was already finalized before the call.
    pub const fn finalize(&mut self) -> bool {
        let was_finalized = self.finalized;
        self.finalized = true;
        was_finalized
    }

    /// Whether [`finalize`](Self::finalize) has been called
    pub const fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Operators in insertion order
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Length of the feature vector for a patch with `channels` channels
    pub fn feature_len(&self, channels: usize) -> usize {
        self.operators
            .iter()
            .map(|operator| operator.output_len(channels))
            .sum()
    }

    /// Concatenate the output of every operator applied to `patch`
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinator is not finalized or has no
    /// operators, or if any operator fails on the patch
    pub fn compute(&self, patch: &ImagePatch) -> Result<Vec<f64>> {
        if !self.finalized {
            return Err(configuration_error(
                &"coordinator must be finalized before computing features",
            ));
        }
        if self.operators.is_empty() {
            return Err(configuration_error(&"coordinator has no operators"));
        }

        let mut coords = Vec::with_capacity(self.feature_len(patch.channels()));
        for operator in &self.operators {
            coords.extend(operator.compute(patch)?);
        }
        Ok(coords)
    }
}
