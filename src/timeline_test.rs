use super::*;

#[test]
fn fallback_years_are_2018_through_2023() {
    let data = fallback_dataset();
    assert_eq!(data.years(), &[2018, 2019, 2020, 2021, 2022, 2023]);
}

#[test]
fn fallback_series_share_length_six() {
    let data = fallback_dataset();
    assert_eq!(data.len(), 6);
    assert_eq!(data.ndvi_values().len(), 6);
    assert_eq!(data.forest_loss_percent().len(), 6);
}

#[test]
fn fallback_ndvi_decreases_from_085_to_065() {
    let data = fallback_dataset();
    let ndvi = data.ndvi_values();
    assert!((ndvi[0] - 0.85).abs() < f64::EPSILON);
    assert!((ndvi[5] - 0.65).abs() < f64::EPSILON);
    assert!(ndvi.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn fallback_forest_loss_increases_from_0_to_22() {
    let data = fallback_dataset();
    let loss = data.forest_loss_percent();
    assert!(loss[0].abs() < f64::EPSILON);
    assert!((loss[5] - 22.0).abs() < f64::EPSILON);
    assert!(loss.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn fallback_satisfies_constructor_invariants() {
    let data = fallback_dataset();
    let rebuilt = TimelineDataset::new(
        data.years().to_vec(),
        data.ndvi_values().to_vec(),
        data.forest_loss_percent().to_vec(),
    )
    .unwrap();
    assert_eq!(rebuilt, data);
}

#[test]
fn new_rejects_length_mismatch() {
    let err = TimelineDataset::new(vec![2020, 2021], vec![0.5], vec![0.0, 1.0]).unwrap_err();
    assert_eq!(err, DatasetError::LengthMismatch { years: 2, ndvi: 1, forest_loss: 2 });
}

#[test]
fn new_rejects_unsorted_years() {
    let err = TimelineDataset::new(vec![2021, 2020], vec![0.5, 0.4], vec![0.0, 1.0]).unwrap_err();
    assert_eq!(err, DatasetError::YearsNotAscending { previous: 2021, next: 2020 });
}

#[test]
fn new_rejects_duplicate_years() {
    let err = TimelineDataset::new(vec![2020, 2020], vec![0.5, 0.4], vec![0.0, 1.0]).unwrap_err();
    assert!(matches!(err, DatasetError::YearsNotAscending { .. }));
}

#[test]
fn new_rejects_forest_loss_above_100() {
    let err = TimelineDataset::new(vec![2020], vec![0.5], vec![100.5]).unwrap_err();
    assert_eq!(err, DatasetError::ForestLossOutOfRange(100.5));
}

#[test]
fn new_rejects_nan_ndvi() {
    let err = TimelineDataset::new(vec![2020], vec![f64::NAN], vec![0.0]).unwrap_err();
    assert_eq!(err, DatasetError::NonFiniteNdvi(2020));
}

#[test]
fn new_accepts_empty_series() {
    let data = TimelineDataset::new(vec![], vec![], vec![]).unwrap();
    assert!(data.is_empty());
}

#[test]
fn provenance_serializes_with_kind_tag() {
    let live = serde_json::to_value(DataProvenance::Live).unwrap();
    assert_eq!(live, serde_json::json!({ "kind": "live" }));

    let fallback = serde_json::to_value(DataProvenance::Fallback { reason: "boom".into() }).unwrap();
    assert_eq!(fallback, serde_json::json!({ "kind": "fallback", "reason": "boom" }));
}
