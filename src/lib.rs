//! Deterministic feature-composition pipeline for corrosion severity
//! prediction, with its CLI, JSON API, and advisory surfaces.
//!
//! The pipeline turns a raw observation (environment, temperature,
//! concentration, UNS alloy code, free-text condition description) into
//! exactly the feature row a set of offline-fitted artifacts expects,
//! classifies it, and maps the class id back to a severity label.

pub mod advisory;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod pipeline;
