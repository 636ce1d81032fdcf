//! Wire message for regression metrics
//!
//! Encoded by `prost` with this schema:
//!
//! ```text
//! message RegressionMetricsMessage {
//!   optional string prediction_field = 1;
//!   optional string target_field     = 2;
//!   optional uint64 count            = 3;
//!   double sum_abs_diff              = 4;
//!   double sum_diff                  = 5;
//!   double sum2_diff                 = 6;
//! }
//! ```
//!
//! `count` has explicit presence, so it is written even when zero. An empty
//! accumulator therefore never encodes to zero bytes, and a zero-length buffer
//! means "no message".

#[cfg(feature = "std")]
use std::string::String;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Persisted form of [`RegressionMetrics`](super::RegressionMetrics)
///
/// A missing `count` decodes as zero.
#[derive(Clone, PartialEq, prost::Message)]
pub struct RegressionMetricsMessage {
    #[prost(string, optional, tag = "1")]
    pub prediction_field: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub target_field: Option<String>,
    #[prost(uint64, optional, tag = "3")]
    pub count: Option<u64>,
    #[prost(double, tag = "4")]
    pub sum_abs_diff: f64,
    #[prost(double, tag = "5")]
    pub sum_diff: f64,
    #[prost(double, tag = "6")]
    pub sum2_diff: f64,
}
