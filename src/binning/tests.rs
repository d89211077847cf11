//! Tests for bin-edge derivation.

use super::*;
use crate::config::DriftConfig;
use crate::data::{Sample, Value};
use crate::error::{DriftError, ErrorKind, Result, SampleRole};

fn derive(reference: impl Into<Sample>, spec: BinSpec, strategy: BinningStrategy) -> Result<BinEdges> {
    derive_edges(&reference.into(), &spec, strategy, &DriftConfig::default())
}

fn numeric(edges: BinEdges) -> Vec<f64> {
    edges.as_numeric().map(<[f64]>::to_vec).unwrap_or_default()
}

#[test]
fn test_strategy_parse_and_display() {
    for strategy in BinningStrategy::ALL {
        assert_eq!(strategy.name().parse::<BinningStrategy>().unwrap(), strategy);
        assert_eq!(strategy.to_string(), strategy.name());
    }
    assert_eq!(BinningStrategy::default(), BinningStrategy::EqualFreq);
}

#[test]
fn test_invalid_method() {
    let err = "unsupported_method".parse::<BinningStrategy>().unwrap_err();
    assert!(matches!(err, DriftError::UnknownStrategy { ref name } if name == "unsupported_method"));
    assert_eq!(err.kind(), ErrorKind::MissingCollaborator);
}

#[test]
fn test_strategy_serde_names() {
    let json = serde_json::to_string(&BinningStrategy::KMeans).unwrap();
    assert_eq!(json, "\"kmeans\"");
    let parsed: BinningStrategy = serde_json::from_str("\"equal_width\"").unwrap();
    assert_eq!(parsed, BinningStrategy::EqualWidth);
}

#[test]
fn test_equal_width_binning() {
    let edges = derive(vec![1.0, 2.0, 3.0, 4.0, 5.0], BinSpec::Count(2), BinningStrategy::EqualWidth);
    assert_eq!(numeric(edges.unwrap()), vec![1.0, 3.0, 5.0]);
}

#[test]
fn test_equal_freq_binning() {
    let edges =
        derive(vec![10.0, 20.0, 30.0, 40.0, 50.0], BinSpec::Count(2), BinningStrategy::EqualFreq);
    assert_eq!(numeric(edges.unwrap()), vec![10.0, 30.0, 50.0]);
}

#[test]
fn test_equal_width_ignores_missing() {
    let edges = derive(
        vec![Some(1.0), None, Some(5.0), Some(f64::NAN)],
        BinSpec::Count(4),
        BinningStrategy::EqualWidth,
    );
    assert_eq!(numeric(edges.unwrap()), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn test_domain_binning_verbatim() {
    let edges = derive(
        vec![1.0, 2.0, 3.0],
        BinSpec::domain([0.0, 2.0, 5.0]),
        BinningStrategy::Domain,
    )
    .unwrap();
    assert_eq!(
        edges.as_labels().unwrap(),
        &[Value::Number(0.0), Value::Number(2.0), Value::Number(5.0)]
    );
}

#[test]
fn test_domain_binning_keeps_caller_order() {
    let edges = derive(
        vec!["low", "high"],
        BinSpec::domain(["high", "low", "medium"]),
        BinningStrategy::Domain,
    )
    .unwrap();
    assert_eq!(
        edges.as_labels().unwrap(),
        &[Value::from("high"), Value::from("low"), Value::from("medium")]
    );
}

#[test]
fn test_domain_invalid_type() {
    let err = derive(vec![1.0, 2.0, 3.0], BinSpec::Count(3), BinningStrategy::Domain).unwrap_err();
    assert!(matches!(err, DriftError::DomainBinsNotList { count: 3 }));
    assert!(err.is_type_error());
}

#[test]
fn test_domain_too_few_bins() {
    let err =
        derive(vec![1.0, 2.0, 3.0], BinSpec::domain([1.0]), BinningStrategy::Domain).unwrap_err();
    assert!(matches!(err, DriftError::DomainTooShort { len: 1 }));
    assert_eq!(err.kind(), ErrorKind::InputShape);
}

#[test]
fn test_empty_input_raises() {
    for strategy in [BinningStrategy::EqualWidth, BinningStrategy::EqualFreq, BinningStrategy::KMeans]
    {
        let err = derive(Vec::<f64>::new(), BinSpec::Count(2), strategy).unwrap_err();
        assert!(matches!(err, DriftError::EmptySample { sample: SampleRole::Reference }));
        assert_eq!(err.kind(), ErrorKind::InputContent);
    }
}

#[test]
fn test_nan_only_input() {
    for strategy in [BinningStrategy::EqualWidth, BinningStrategy::EqualFreq, BinningStrategy::KMeans]
    {
        let err = derive(vec![f64::NAN, f64::NAN], BinSpec::Count(3), strategy).unwrap_err();
        assert!(matches!(err, DriftError::AllMissing { sample: SampleRole::Reference }));
    }
}

#[test]
fn test_non_numeric_expected() {
    let err = derive(vec!["a", "b", "c"], BinSpec::Count(2), BinningStrategy::EqualFreq).unwrap_err();
    assert!(matches!(err, DriftError::NonNumeric { .. }));
    assert!(err.is_type_error());
}

#[test]
fn test_zero_bins_rejected() {
    let err = derive(vec![1.0, 2.0], BinSpec::Count(0), BinningStrategy::EqualWidth).unwrap_err();
    assert!(matches!(err, DriftError::InvalidBinCount { bins: 0, .. }));
}

#[test]
fn test_counted_strategy_rejects_edge_list() {
    let err = derive(vec![1.0, 2.0], BinSpec::domain([0.0, 1.0]), BinningStrategy::EqualFreq)
        .unwrap_err();
    assert!(matches!(err, DriftError::BinCountRequired { strategy: BinningStrategy::EqualFreq }));
}

#[test]
fn test_kmeans_binning() {
    let edges = derive(
        vec![1.0, 2.0, 3.0, 10.0, 11.0, 12.0],
        BinSpec::Count(2),
        BinningStrategy::KMeans,
    )
    .unwrap();
    let centers = numeric(edges);
    assert_eq!(centers.len(), 2);
    assert!((centers[0] - 2.0).abs() < 1e-9);
    assert!((centers[1] - 11.0).abs() < 1e-9);
}

#[test]
fn test_invalid_config_rejected_by_deriver() {
    let mut config = DriftConfig::default();
    config.kmeans.n_init = 0;
    let err = EdgeDeriver::new(&config).err().unwrap();
    assert!(matches!(err, DriftError::Config { ref field, .. } if field == "kmeans.n_init"));

    let err = derive_edges(
        &Sample::from(vec![1.0, 2.0, 3.0]),
        &BinSpec::Count(2),
        BinningStrategy::KMeans,
        &config,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Environment);
}

#[test]
fn test_adaptive_binning_basic() {
    let spec = BinSpec::supervised(3, vec![0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0]);
    let edges = derive(
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
        spec,
        BinningStrategy::Adaptive,
    )
    .unwrap();
    let thresholds = numeric(edges);
    assert!(thresholds.len() <= 2);
    assert!(thresholds.iter().all(|&t| t > 0.0));
    assert_eq!(thresholds, vec![2.5, 5.5]);
}

#[test]
fn test_adaptive_binning_with_nans() {
    let reference = vec![Some(1.0), Some(2.0), None, Some(4.0), Some(5.0), None, Some(7.0)];
    let spec = BinSpec::supervised(3, vec![0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0]);
    let thresholds = numeric(derive(reference, spec, BinningStrategy::Adaptive).unwrap());
    assert!(thresholds.len() <= 2);
    assert_eq!(thresholds, vec![3.0, 6.0]);
}

#[test]
fn test_adaptive_text_target() {
    let spec = BinSpec::supervised(2, vec!["no", "no", "yes", "yes"]);
    let thresholds =
        numeric(derive(vec![1.0, 2.0, 3.0, 4.0], spec, BinningStrategy::Adaptive).unwrap());
    assert_eq!(thresholds, vec![2.5]);
}

#[test]
fn test_adaptive_target_required() {
    let err = derive(vec![1.0, 2.0, 3.0], BinSpec::Count(2), BinningStrategy::Adaptive).unwrap_err();
    assert!(matches!(err, DriftError::TargetRequired));
}

#[test]
fn test_adaptive_target_shape_mismatch() {
    let spec = BinSpec::supervised(2, vec![0.0, 1.0]);
    let err = derive(vec![1.0, 2.0, 3.0, 4.0], spec, BinningStrategy::Adaptive).unwrap_err();
    assert!(matches!(err, DriftError::TargetLengthMismatch { reference: 4, target: 2 }));
}

#[test]
fn test_adaptive_target_with_missing() {
    let spec = BinSpec::supervised(2, vec![Some(0.0), None, Some(1.0)]);
    let err = derive(vec![1.0, 2.0, 3.0], spec, BinningStrategy::Adaptive).unwrap_err();
    assert!(matches!(err, DriftError::TargetHasMissing));
}

/// Known quirk: a split exactly at 0.0 is indistinguishable from the leaf
/// sentinel and is dropped.
#[test]
fn test_adaptive_drops_split_at_zero() {
    let spec = BinSpec::supervised(2, vec![0.0, 0.0, 1.0, 1.0]);
    let thresholds =
        numeric(derive(vec![-2.0, -1.0, 1.0, 2.0], spec, BinningStrategy::Adaptive).unwrap());
    assert!(thresholds.is_empty());
}

#[test]
fn test_sanitize_thresholds() {
    let raw = [3.5, LEAF_THRESHOLD, 0.0, 1.5, LEAF_THRESHOLD, -0.5, f64::NAN];
    assert_eq!(sanitize_thresholds(&raw, 5), vec![1.5, 3.5]);
    assert_eq!(sanitize_thresholds(&raw, 1), vec![1.5]);
}

#[test]
fn test_widen_tails() {
    assert_eq!(
        widen_tails(&[1.0, 2.0, 2.0, 3.0]),
        vec![f64::NEG_INFINITY, 2.0, f64::INFINITY]
    );
    assert_eq!(widen_tails(&[4.0, 4.0]), vec![f64::NEG_INFINITY, f64::INFINITY]);
    assert_eq!(widen_tails(&[]), vec![f64::NEG_INFINITY, f64::INFINITY]);
}

struct FixedLearner(Vec<f64>);

impl SplitLearner for FixedLearner {
    fn fit_binary_splits(&self, _: &[f64], _: &[usize], _: usize) -> Result<Vec<f64>> {
        Ok(self.0.clone())
    }
}

#[test]
fn test_custom_learner_output_is_sanitized() {
    let deriver = EdgeDeriver::default().with_learner(FixedLearner(vec![
        9.0,
        LEAF_THRESHOLD,
        4.0,
        0.0,
        7.0,
    ]));
    let spec = BinSpec::supervised(3, vec![0.0, 1.0, 0.0]);
    let edges = deriver
        .derive(&Sample::from(vec![1.0, 2.0, 3.0]), &spec, BinningStrategy::Adaptive)
        .unwrap();
    assert_eq!(numeric(edges), vec![4.0, 7.0]);
}

struct MidpointClusterer;

impl Clusterer for MidpointClusterer {
    fn cluster_1d(&self, values: &[f64], _k: usize) -> Result<Vec<f64>> {
        Ok(vec![values.iter().sum::<f64>() / values.len() as f64])
    }
}

#[test]
fn test_custom_clusterer() {
    let deriver = EdgeDeriver::default().with_clusterer(MidpointClusterer);
    let edges = deriver
        .derive(&Sample::from(vec![1.0, 3.0]), &BinSpec::Count(2), BinningStrategy::KMeans)
        .unwrap();
    assert_eq!(numeric(edges), vec![2.0]);
}
