//! Integration tests for bunting-types.

use bunting_types::{BuntingError, MaterialId, PointMassId};

// ─── ID Tests ──────────────────────────────────────────────────

#[test]
fn point_mass_id_index() {
    let id = PointMassId(42);
    assert_eq!(id.index(), 42);
}

#[test]
fn point_mass_id_from_grid_is_row_major() {
    assert_eq!(PointMassId::from_grid(0, 0, 5), PointMassId(0));
    assert_eq!(PointMassId::from_grid(0, 4, 5), PointMassId(4));
    assert_eq!(PointMassId::from_grid(2, 3, 5), PointMassId(13));
}

#[test]
fn material_id_defaults_to_zero() {
    assert_eq!(MaterialId::default(), MaterialId(0));
    assert_eq!(MaterialId::from(3).index(), 3);
}

#[test]
fn ids_are_serializable() {
    let id = PointMassId(100);
    let json = serde_json::to_string(&id).unwrap();
    let deserialized: PointMassId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, deserialized);
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn resolution_error_display() {
    let err = BuntingError::InvalidResolution {
        width_points: 1,
        height_points: 5,
    };
    let msg = err.to_string();
    assert!(msg.contains("1x5"));
    assert!(err.is_construction_error());
}

#[test]
fn config_error_is_not_construction_error() {
    let err = BuntingError::InvalidConfig("frame_dt must be positive".into());
    assert!(err.to_string().contains("frame_dt"));
    assert!(!err.is_construction_error());
}

#[test]
fn io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "scene.toml");
    let err: BuntingError = io.into();
    assert!(matches!(err, BuntingError::Io(_)));
}
