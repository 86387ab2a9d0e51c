use super::*;
use rstest::rstest;

#[test]
fn test_defaults() {
    let c = LayoutConfig::default();
    assert_eq!(c.lane_padding, 25.0);
    assert_eq!(c.lane_step, 5.0);
    assert_eq!(c.back_edge_emphasis, 0.2);
    assert_eq!(c.unreachable, UnreachablePolicy::Reject);
    assert!(c.validate().is_ok());
}

#[test]
fn test_partial_json_keeps_other_defaults() {
    let c = LayoutConfig::from_json(r#"{"lane_step": 8, "unreachable": "exclude"}"#).unwrap();
    assert_eq!(c.lane_step, 8.0);
    assert_eq!(c.unreachable, UnreachablePolicy::Exclude);
    assert_eq!(c.lane_padding, 25.0);
    assert_eq!(c.block_width, 160.0);
}

#[test]
fn test_empty_object_is_default() {
    assert_eq!(LayoutConfig::from_json("{}").unwrap(), LayoutConfig::default());
}

#[rstest]
#[case(r#"{"lane_step": 0}"#)]
#[case(r#"{"lane_step": -1}"#)]
#[case(r#"{"corridor_width": -4}"#)]
#[case(r#"{"margin": -0.5}"#)]
fn test_rejects_bad_values(#[case] json: &str) {
    let err = LayoutConfig::from_json(json).unwrap_err();
    assert!(matches!(err, LayoutError::Config { .. }), "got {err:?}");
}

#[test]
fn test_rejects_non_finite() {
    let c = LayoutConfig {
        block_height: f64::NAN,
        ..LayoutConfig::default()
    };
    assert!(c.validate().is_err());
    let c = LayoutConfig {
        back_edge_emphasis: f64::INFINITY,
        ..LayoutConfig::default()
    };
    assert!(c.validate().is_err());
}

#[test]
fn test_unknown_policy_is_json_error() {
    let err = LayoutConfig::from_json(r#"{"unreachable": "ignore"}"#).unwrap_err();
    assert!(matches!(err, LayoutError::Json(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = LayoutConfig::from_path("/nonexistent/wide-layout.json").unwrap_err();
    assert!(matches!(err, LayoutError::Io(_)));
}

#[test]
fn test_output_format_serde() {
    let f: OutputFormat = serde_json::from_str(r#""svg""#).unwrap();
    assert_eq!(f, OutputFormat::Svg);
    assert_eq!(OutputFormat::default(), OutputFormat::Json);
}
