//! Fitted-artifact loading and the classification seam.

pub mod artifacts;
pub mod classifier;
pub mod labels;
