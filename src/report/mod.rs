//! Aggregation and ranking over the student record set.
//!
//! This module turns the validated record collection into per-component
//! averages, branch-wise averages of the total, and top-3 rankings per
//! component, carrying the validation diagnostics through unchanged.

pub mod aggregate;
pub mod types;
pub mod utility;
