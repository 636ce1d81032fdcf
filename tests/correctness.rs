//! Correctness and invariant tests for flowmetrics
//!
//! These tests verify critical invariants, merge semantics, and edge cases.
//! They complement the unit tests in each module by focusing on properties
//! that must always hold.
//!
//! Run with: cargo test --test correctness --features full

#[cfg(not(feature = "regression"))]
compile_error!(
    "Correctness tests require the regression feature. Run: cargo test --test correctness --features full"
);

use flowmetrics::reduce::merge_all;
use flowmetrics::regression::{RegressionMetrics, RegressionMetricsMessage};
use flowmetrics::target::{AcceptAll, TargetHeuristic, TargetKind};
use flowmetrics::traits::{Aggregator, DecodeError, MetricsError};
use prost::Message;

fn metrics_from(predictions: &[f64], targets: &[f64]) -> RegressionMetrics {
    let mut metrics = RegressionMetrics::new();
    metrics.add(predictions, targets).unwrap();
    metrics
}

fn assert_same_sums(a: &RegressionMetrics, b: &RegressionMetrics) {
    assert_eq!(a.count(), b.count(), "counts differ");
    for (name, x, y) in [
        ("sum_abs_diff", a.sum_abs_diff(), b.sum_abs_diff()),
        ("sum_diff", a.sum_diff(), b.sum_diff()),
        ("sum2_diff", a.sum2_diff(), b.sum2_diff()),
    ] {
        assert!(
            (x - y).abs() <= 1e-9 * x.abs().max(1.0),
            "{} differs: {} vs {}",
            name,
            x,
            y
        );
    }
}

// ============================================================================
// Accumulation
// ============================================================================

mod accumulation {
    use super::*;

    #[test]
    fn reference_scenario() {
        let metrics = metrics_from(&[1.0, 2.0, 3.0], &[1.5, 2.0, 2.0]);

        assert_eq!(metrics.count(), 3);
        assert_eq!(metrics.sum_abs_diff(), 1.5);
        assert_eq!(metrics.sum_diff(), 0.5);
        assert_eq!(metrics.sum2_diff(), 1.25);

        assert_eq!(metrics.mean_absolute_error(), Some(0.5));
        assert!((metrics.mean_squared_error().unwrap() - 0.4167).abs() < 1e-4);
        assert!((metrics.root_mean_squared_error().unwrap() - 0.6455).abs() < 1e-4);
    }

    #[test]
    fn mae_matches_direct_computation() {
        let predictions: Vec<f64> = (0..500).map(|i| (i as f64 * 0.37).sin() * 10.0).collect();
        let targets: Vec<f64> = (0..500).map(|i| (i as f64 * 0.11).cos() * 10.0 + 0.5).collect();

        let metrics = metrics_from(&predictions, &targets);
        let direct: f64 = predictions
            .iter()
            .zip(&targets)
            .map(|(p, t)| (p - t).abs())
            .sum::<f64>()
            / predictions.len() as f64;

        assert_eq!(metrics.count(), 500);
        assert!((metrics.mean_absolute_error().unwrap() - direct).abs() < 1e-9);
    }

    #[test]
    fn empty_metrics_are_undefined_not_zero() {
        let metrics = RegressionMetrics::new();

        assert_eq!(metrics.mean_absolute_error(), None);
        assert_eq!(metrics.mean_squared_error(), None);
        assert_eq!(metrics.root_mean_squared_error(), None);
        assert_eq!(metrics.mean_error(), None);
    }

    #[test]
    fn length_mismatch_always_fails() {
        let mut metrics = RegressionMetrics::new();

        for (p, t) in [(3usize, 2usize), (1, 4), (0, 1)] {
            let predictions = vec![0.5; p];
            let targets = vec![1.5; t];
            assert_eq!(
                metrics.add(&predictions, &targets),
                Err(MetricsError::LengthMismatch {
                    predictions: p,
                    targets: t
                })
            );
        }
        assert!(metrics.is_empty());
    }

    #[test]
    fn categorical_targets_always_fail() {
        let mut metrics = RegressionMetrics::new();

        let binary = [0.0, 1.0, 1.0, 0.0, 1.0];
        let multiclass = [1.0, 2.0, 3.0, 2.0, 1.0];

        assert_eq!(
            metrics.add(&[0.3; 5], &binary),
            Err(MetricsError::UnsupportedTargetType {
                kind: TargetKind::Binary
            })
        );
        assert_eq!(
            metrics.add(&[0.3; 5], &multiclass),
            Err(MetricsError::UnsupportedTargetType {
                kind: TargetKind::Multiclass
            })
        );
        assert!(metrics.is_empty());
    }

    #[test]
    fn failed_add_leaves_state_unchanged() {
        let mut metrics = metrics_from(&[1.0, 2.0, 3.0], &[1.5, 2.0, 2.0]);
        let before = metrics.clone();

        let _ = metrics.add(&[1.0], &[0.5, 0.5]);
        let _ = metrics.add(&[1.0, 2.0], &[0.0, 1.0]);
        let _ = metrics.add(&[1.0], &[f64::NAN]);

        assert_eq!(metrics, before);
    }

    #[test]
    fn custom_classifier_is_used() {
        let mut metrics = RegressionMetrics::new();
        let strict = TargetHeuristic::new().with_min_samples(1);

        assert!(metrics.add_with(&[5.0], &[4.0], &strict).is_err());
        assert!(metrics.add_with(&[5.0], &[4.0], &AcceptAll).is_ok());
        assert_eq!(metrics.count(), 1);
    }
}

// ============================================================================
// Merge
// ============================================================================

mod merge {
    use super::*;

    #[test]
    fn reference_merge_scenario() {
        let a = metrics_from(&[1.0, 2.0, 3.0], &[1.5, 2.0, 2.0]);
        let b = metrics_from(&[5.0], &[4.0]);

        let merged = a.merge(&b);

        assert_eq!(merged.count(), 4);
        assert_eq!(merged.sum_abs_diff(), 2.5);
        assert_eq!(merged.sum2_diff(), 2.25);
    }

    #[test]
    fn merge_is_associative() {
        let a = metrics_from(&[1.0, 2.0, 3.0], &[1.5, 2.0, 2.0]);
        let b = metrics_from(&[0.1, 0.2], &[0.35, -0.4]);
        let c = metrics_from(&[10.0, -3.5, 7.25], &[9.5, -3.0, 8.0]);

        let left = a.merge(&b).merge(&c);
        let right = a.merge(&b.merge(&c));

        assert_same_sums(&left, &right);
    }

    #[test]
    fn merge_is_commutative() {
        let a = metrics_from(&[0.1, 0.2], &[0.35, -0.4]);
        let b = metrics_from(&[10.0, -3.5, 7.25], &[9.5, -3.0, 8.0]);

        assert_same_sums(&a.merge(&b), &b.merge(&a));
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let a = metrics_from(&[1.0, 2.0, 3.0], &[1.5, 2.0, 2.0]);
        let empty = RegressionMetrics::new();

        assert_eq!(a.merge(&empty), a);
        assert_eq!(empty.merge(&a), a);
    }

    #[test]
    fn merge_empty_into_empty() {
        let merged = RegressionMetrics::new().merge(&RegressionMetrics::new());

        assert!(merged.is_empty());
        assert_eq!(merged.mean_absolute_error(), None);
    }

    #[test]
    fn merge_result_is_independent() {
        let a = metrics_from(&[1.0, 2.0, 3.0], &[1.5, 2.0, 2.0]);
        let empty = RegressionMetrics::new();

        let mut merged = empty.merge(&a);
        merged.add(&[5.0], &[4.0]).unwrap();

        assert_eq!(a.count(), 3, "mutating the merge result must not affect its input");
        assert_eq!(merged.count(), 4);
    }

    #[test]
    fn sharded_reduction_matches_single_pass() {
        let predictions: Vec<f64> = (0..1000).map(|i| i as f64 * 0.5).collect();
        let targets: Vec<f64> = (0..1000).map(|i| i as f64 * 0.5 + 0.25).collect();

        let whole = metrics_from(&predictions, &targets);
        let shards: Vec<RegressionMetrics> = predictions
            .chunks(37)
            .zip(targets.chunks(37))
            .map(|(p, t)| metrics_from(p, t))
            .collect();

        assert_same_sums(&merge_all(shards), &whole);
    }

    #[test]
    fn shards_built_on_threads() {
        let handles: Vec<_> = (0..4)
            .map(|worker| {
                std::thread::spawn(move || {
                    let predictions: Vec<f64> = (0..100).map(|i| (worker * 100 + i) as f64).collect();
                    let targets: Vec<f64> = predictions.iter().map(|p| p + 0.5).collect();
                    metrics_from(&predictions, &targets)
                })
            })
            .collect();

        let shards = handles.into_iter().map(|h| h.join().unwrap());
        let total = merge_all(shards);

        assert_eq!(total.count(), 400);
        assert_eq!(total.mean_absolute_error(), Some(0.5));
        assert_eq!(total.mean_error(), Some(-0.5));
    }

    #[test]
    fn trait_merge_matches_inherent_merge() {
        let a = metrics_from(&[1.0, 2.0, 3.0], &[1.5, 2.0, 2.0]);
        let b = metrics_from(&[5.0], &[4.0]);

        assert_eq!(Aggregator::merge(&a, &b), a.merge(&b));
    }
}

// ============================================================================
// Serialization
// ============================================================================

mod serialization {
    use super::*;

    #[test]
    fn roundtrip_is_exact() {
        let mut metrics = RegressionMetrics::with_fields("score", "label");
        metrics.add(&[0.1, 0.7, 1e-300, 3.3e12], &[0.2, 0.65, 0.0, 3.1e12]).unwrap();

        let decoded = RegressionMetrics::from_bytes(&metrics.to_bytes())
            .unwrap()
            .expect("non-empty buffer must decode to an accumulator");

        assert_eq!(decoded.prediction_field(), Some("score"));
        assert_eq!(decoded.target_field(), Some("label"));
        assert_eq!(decoded.count(), metrics.count());
        assert_eq!(decoded.sum_abs_diff().to_bits(), metrics.sum_abs_diff().to_bits());
        assert_eq!(decoded.sum_diff().to_bits(), metrics.sum_diff().to_bits());
        assert_eq!(decoded.sum2_diff().to_bits(), metrics.sum2_diff().to_bits());
    }

    #[test]
    fn roundtrip_after_merge() {
        let a = metrics_from(&[1.0, 2.0, 3.0], &[1.5, 2.0, 2.0]);
        let b = metrics_from(&[5.0], &[4.0]);
        let merged = a.merge(&b);

        assert_eq!(
            RegressionMetrics::from_bytes(&merged.to_bytes()),
            Ok(Some(merged))
        );
    }

    #[test]
    fn empty_blob_is_no_accumulator() {
        assert_eq!(RegressionMetrics::from_bytes(&[]), Ok(None));
    }

    #[test]
    fn empty_accumulator_is_distinct_from_no_accumulator() {
        let bytes = RegressionMetrics::new().to_bytes();

        assert!(!bytes.is_empty());
        assert_eq!(
            RegressionMetrics::from_bytes(&bytes),
            Ok(Some(RegressionMetrics::new()))
        );
    }

    #[test]
    fn truncated_input_is_rejected() {
        let metrics = metrics_from(&[1.0], &[0.5]);
        let bytes = metrics.to_bytes();

        // Cutting inside a field is a decode error
        assert!(matches!(
            RegressionMetrics::from_bytes(&bytes[..bytes.len() - 3]),
            Err(DecodeError::Message(_))
        ));

        // Cutting on a field boundary is valid protobuf but never the original
        for cut in 1..bytes.len() {
            assert_ne!(
                RegressionMetrics::from_bytes(&bytes[..cut]),
                Ok(Some(metrics.clone())),
                "prefix of length {} decoded to the full accumulator",
                cut
            );
        }
    }

    #[test]
    fn message_conversion() {
        let metrics = metrics_from(&[1.0, 2.0, 3.0], &[1.5, 2.0, 2.0]);
        let message = RegressionMetricsMessage::from(&metrics);

        assert_eq!(message.count, Some(3));
        assert_eq!(message.sum_abs_diff, 1.5);
        assert_eq!(RegressionMetrics::try_from(message), Ok(metrics));
    }

    #[test]
    fn zero_count_with_sums_is_corrupted() {
        let bytes = RegressionMetricsMessage {
            count: Some(0),
            sum2_diff: 4.0,
            ..Default::default()
        }
        .encode_to_vec();

        assert!(matches!(
            RegressionMetrics::from_bytes(&bytes),
            Err(DecodeError::Corrupted(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        let mut metrics = RegressionMetrics::with_fields("pred", "actual");
        metrics.add(&[1.25, 2.5], &[1.0, 3.0]).unwrap();

        let json = serde_json::to_string(&metrics).unwrap();
        let decoded: RegressionMetrics = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, metrics);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_rejects_inconsistent_state() {
        let json = r#"{"prediction_field":null,"target_field":null,"count":0,
            "sum_abs_diff":1.0,"sum_diff":0.0,"sum2_diff":0.0}"#;

        assert!(serde_json::from_str::<RegressionMetrics>(json).is_err());
    }
}
