//! Selection, aggregation and comparison over the record store.
//!
//! This module computes corridor baselines, filters the store for a
//! submission, summarizes each traffic metric against its baseline, builds
//! the per-device difference distribution and assembles the comparison table
//! handed to the presentation layer.

pub mod aggregate;
pub mod analyzer;
pub mod baseline;
pub mod color;
pub mod comparison;
pub mod distribution;
pub mod filter;
pub mod types;
pub mod utility;

#[cfg(test)]
pub(crate) mod test_support;
