//! Severity label table for classifier outputs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Closed set of corrosion severity classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Resistant,
    Good,
    Questionable,
    Poor,
}

impl Severity {
    /// Map a classifier class id through the fitted label table.
    ///
    /// A miss here means the classifier and the label table disagree,
    /// which a correctly trained artifact can never produce; it is a
    /// fatal internal-consistency failure, not a user error.
    pub fn from_class_id(class_id: i64) -> Result<Self, PipelineError> {
        match class_id {
            0 => Ok(Self::Resistant),
            1 => Ok(Self::Good),
            2 => Ok(Self::Questionable),
            3 => Ok(Self::Poor),
            other => Err(PipelineError::UnmappedClass { class_id: other }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resistant => "Resistant",
            Self::Good => "Good",
            Self::Questionable => "Questionable",
            Self::Poor => "Poor",
        }
    }

    /// Corrosion-rate interpretation of the class, used in advisories.
    pub fn rate_band(&self) -> &'static str {
        match self {
            Self::Resistant => "< 0.002 inches/year",
            Self::Good => "< 0.020 inches/year",
            Self::Questionable => "0.020 - 0.050 inches/year",
            Self::Poor => "> 0.050 inches/year",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
