//! Integration tests for bunting-cloth.

use std::collections::HashSet;

use bunting_cloth::construction::{build_point_masses, build_springs, GridLayout};
use bunting_cloth::{
    Cloth, ClothMaterial, ClothState, ConstraintKind, PinPolicy, PointMass, Spring, SpringFamily,
};
use bunting_math::{face_normal, to_f32_array, DVec3};
use bunting_types::{BuntingError, PointMassId};

const GRAVITY: DVec3 = DVec3::new(0.0, -9.81, 0.0);

fn level_cloth(w: u32, h: u32) -> Cloth {
    Cloth::new(DVec3::ZERO, DVec3::new(1.0, 0.0, 0.0), 1.0, w, h).unwrap()
}

fn cloth_with(material: ClothMaterial, w: u32, h: u32) -> Cloth {
    Cloth::with_material(DVec3::ZERO, DVec3::new(1.0, 0.0, 0.0), 1.0, w, h, material).unwrap()
}

fn positions(cloth: &Cloth) -> Vec<DVec3> {
    cloth.point_masses().iter().map(|p| p.current_position()).collect()
}

fn max_diff(a: &[DVec3], b: &[DVec3]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (*x - *y).length()).fold(0.0, f64::max)
}

// ─── Construction ─────────────────────────────────────────────

#[test]
fn grid_sizes() {
    let cloth = level_cloth(4, 3);
    assert_eq!(cloth.point_masses().len(), 12);
    assert_eq!(cloth.springs().len(), 39);
    assert_eq!(cloth.triangles().len(), 12);
    assert_eq!(cloth.mesh().vertex_count(), 12);
    assert_eq!(cloth.mesh().triangle_count(), 12);
    assert!(cloth.mesh().validate().is_ok());
}

#[test]
fn minimal_grid_has_six_springs() {
    let cloth = level_cloth(2, 2);
    assert_eq!(cloth.springs().len(), 6);
    assert_eq!(cloth.triangles().len(), 2);
}

#[test]
fn spring_count_matches_families() {
    for (w, h) in [(2, 2), (2, 5), (5, 2), (3, 3), (7, 4), (10, 10)] {
        let cloth = level_cloth(w, h);
        let expected: usize = SpringFamily::ALL.iter().map(|f| f.count(w, h)).sum();
        assert_eq!(cloth.springs().len(), expected, "grid {w}x{h}");
        for family in SpringFamily::ALL {
            let n = cloth.springs().iter().filter(|s| s.family() == family).count();
            assert_eq!(n, family.count(w, h), "{family:?} on {w}x{h}");
        }
    }
}

#[test]
fn springs_are_unique() {
    let cloth = level_cloth(6, 5);
    let pairs: HashSet<(PointMassId, PointMassId)> = cloth
        .springs()
        .iter()
        .map(|s| (s.start().min(s.end()), s.start().max(s.end())))
        .collect();
    assert_eq!(pairs.len(), cloth.springs().len());
}

#[test]
fn every_offset_pair_is_present() {
    let (w, h) = (5u32, 4u32);
    let cloth = level_cloth(w, h);
    let pairs: HashSet<(PointMassId, PointMassId)> = cloth
        .springs()
        .iter()
        .map(|s| (s.start().min(s.end()), s.start().max(s.end())))
        .collect();

    for family in SpringFamily::ALL {
        let (d_row, d_col) = family.offset();
        for row in 0..h as i64 {
            for col in 0..w as i64 {
                let (r2, c2) = (row + d_row, col + d_col);
                if r2 >= h as i64 || c2 < 0 || c2 >= w as i64 {
                    continue;
                }
                let a = cloth.grid_index(row as u32, col as u32).unwrap();
                let b = cloth.grid_index(r2 as u32, c2 as u32).unwrap();
                assert!(pairs.contains(&(a.min(b), a.max(b))), "{family:?} ({row},{col})");
            }
        }
    }
}

#[test]
fn rest_lengths_from_rest_positions() {
    let cloth = level_cloth(4, 4);
    for s in cloth.springs() {
        let a = cloth.point_mass(s.start()).unwrap().rest_position();
        let b = cloth.point_mass(s.end()).unwrap().rest_position();
        assert_eq!(s.rest_length(), (a - b).length());
    }
}

#[test]
fn level_grid_positions() {
    let cloth = Cloth::new(DVec3::ZERO, DVec3::new(3.0, 0.0, 0.0), 2.0, 4, 3).unwrap();
    let p = cloth.point_mass(cloth.grid_index(2, 3).unwrap()).unwrap();
    assert_eq!(p.rest_position(), DVec3::new(3.0, -2.0, 0.0));
    let first = cloth.point_mass(PointMassId(0)).unwrap();
    assert_eq!(first.rest_position(), DVec3::ZERO);
}

#[test]
fn slanted_corners_give_level_bottom_edge() {
    let cloth =
        Cloth::new(DVec3::new(0.0, 2.0, 0.0), DVec3::new(2.0, 1.0, 0.0), 1.0, 5, 4).unwrap();
    for col in 0..5 {
        let id = cloth.grid_index(3, col).unwrap();
        let y = cloth.point_mass(id).unwrap().rest_position().y;
        assert!(y.abs() < 1e-12, "col {col} bottom y = {y}");
    }
    let top_mid = cloth.point_mass(cloth.grid_index(0, 2).unwrap()).unwrap();
    assert!((top_mid.rest_position() - DVec3::new(1.0, 1.5, 0.0)).length() < 1e-12);
}

#[test]
fn particle_mass_from_area() {
    let cloth = Cloth::new(DVec3::ZERO, DVec3::new(3.0, 4.0, 0.0), 2.0, 5, 4).unwrap();
    assert_eq!(cloth.width(), 5.0);
    assert_eq!(cloth.area(), 10.0);
    assert_eq!(cloth.particle_mass(), 75.0);
}

#[test]
fn top_corners_pinned_by_default() {
    let cloth = level_cloth(4, 3);
    assert_eq!(cloth.pinned_count(), 2);
    assert!(cloth.point_mass(PointMassId(0)).unwrap().is_pinned());
    assert!(cloth.point_mass(PointMassId(3)).unwrap().is_pinned());
    assert!(!cloth.point_mass(PointMassId(1)).unwrap().is_pinned());
}

#[test]
fn pin_policies() {
    let count = |policy| {
        cloth_with(ClothMaterial { pin_policy: policy, ..Default::default() }, 4, 3).pinned_count()
    };
    assert_eq!(count(PinPolicy::TopCorners), 2);
    assert_eq!(count(PinPolicy::TopRow), 4);
    assert_eq!(count(PinPolicy::BottomRow), 4);
    assert_eq!(count(PinPolicy::All), 12);
    assert_eq!(count(PinPolicy::None), 0);
}

#[test]
fn grid_index_bounds() {
    let cloth = level_cloth(4, 3);
    assert_eq!(cloth.grid_index(1, 2), Some(PointMassId(6)));
    assert_eq!(cloth.grid_index(3, 0), None);
    assert_eq!(cloth.grid_index(0, 4), None);
}

// ─── Construction Errors ──────────────────────────────────────

#[test]
fn rejects_small_resolution() {
    for (w, h) in [(1, 3), (3, 1), (0, 0), (0, 5)] {
        let err = Cloth::new(DVec3::ZERO, DVec3::X, 1.0, w, h).unwrap_err();
        assert!(
            matches!(err, BuntingError::InvalidResolution { width_points, height_points }
                if width_points == w && height_points == h),
            "{w}x{h}: {err}"
        );
        assert!(err.is_construction_error());
    }
}

#[test]
fn rejects_degenerate_geometry() {
    let cases = [
        (DVec3::ZERO, DVec3::ZERO, 1.0),
        (DVec3::ZERO, DVec3::X, 0.0),
        (DVec3::ZERO, DVec3::X, -1.0),
        (DVec3::new(f64::NAN, 0.0, 0.0), DVec3::X, 1.0),
        (DVec3::ZERO, DVec3::X, f64::INFINITY),
    ];
    for (a, b, h) in cases {
        let err = Cloth::new(a, b, h, 3, 3).unwrap_err();
        assert!(matches!(err, BuntingError::DegenerateGeometry(_)), "{err}");
    }
}

#[test]
fn rejects_zero_length_springs() {
    let err = Cloth::new(DVec3::ZERO, DVec3::X, 1e-12, 2, 2).unwrap_err();
    assert!(matches!(err, BuntingError::DegenerateGeometry(_)), "{err}");
}

#[test]
fn rejects_invalid_material() {
    let bad = ClothMaterial { density: 0.0, ..Default::default() };
    let err = Cloth::with_material(DVec3::ZERO, DVec3::X, 1.0, 3, 3, bad).unwrap_err();
    assert!(matches!(err, BuntingError::InvalidMaterial(_)));
}

#[test]
fn resolution_checked_before_material() {
    let bad = ClothMaterial { stiffness: f64::NAN, ..Default::default() };
    let err = Cloth::with_material(DVec3::ZERO, DVec3::X, 1.0, 1, 3, bad).unwrap_err();
    assert!(matches!(err, BuntingError::InvalidResolution { .. }));
}

#[test]
fn layout_validate_matches_cloth() {
    let layout = GridLayout {
        upper_left: DVec3::ZERO,
        upper_right: DVec3::X,
        height: 1.0,
        width_points: 2,
        height_points: 2,
    };
    assert!(layout.validate().is_ok());
    assert_eq!(layout.point_count(), 4);
}

// ─── Simulation ──────────────────────────────────────────────

#[test]
fn state_transitions() {
    let mut cloth = level_cloth(3, 3);
    assert_eq!(cloth.state(), ClothState::Constructed);
    cloth.simulate(1.0 / 60.0, 0, &[GRAVITY]);
    assert_eq!(cloth.state(), ClothState::Constructed);
    cloth.simulate(1.0 / 60.0, 4, &[GRAVITY]);
    assert_eq!(cloth.state(), ClothState::Simulating);
    assert_eq!(cloth.steps_taken(), 4);
    assert!((cloth.simulated_time() - 1.0 / 60.0).abs() < 1e-15);
}

#[test]
fn zero_sub_steps_is_noop() {
    let mut cloth = level_cloth(3, 3);
    let before = positions(&cloth);
    cloth.simulate(1.0, 0, &[GRAVITY]);
    assert_eq!(positions(&cloth), before);
    assert_eq!(cloth.simulated_time(), 0.0);
}

#[test]
fn invalid_delta_time_is_noop() {
    let mut cloth = level_cloth(2, 2);
    let before = positions(&cloth);
    for dt in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0] {
        cloth.simulate(dt, 1, &[]);
        cloth.simulate(dt, 4, &[GRAVITY]);
        assert_eq!(positions(&cloth), before, "dt = {dt}");
        assert_eq!(cloth.simulated_time(), 0.0);
        assert_eq!(cloth.steps_taken(), 0);
        assert_eq!(cloth.state(), ClothState::Constructed);
    }
    assert!(cloth.point_masses().iter().all(|p| p.current_position().is_finite()));
}

#[test]
fn pinned_points_never_move() {
    let mut cloth = level_cloth(5, 4);
    let pinned: Vec<(usize, DVec3)> = cloth
        .point_masses()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_pinned())
        .map(|(i, p)| (i, p.current_position()))
        .collect();
    assert_eq!(pinned.len(), 2);

    let wind = DVec3::new(0.0, 0.0, 3.0);
    for _ in 0..30 {
        cloth.simulate(1.0 / 60.0, 8, &[GRAVITY, wind]);
    }
    for (i, pos) in pinned {
        let p = &cloth.point_masses()[i];
        assert_eq!(p.current_position().to_array(), pos.to_array());
        assert_eq!(p.previous_position().to_array(), pos.to_array());
    }
}

#[test]
fn fully_pinned_cloth_is_frozen() {
    let material = ClothMaterial { pin_policy: PinPolicy::All, ..Default::default() };
    let mut cloth = cloth_with(material, 4, 4);
    let before = positions(&cloth);
    cloth.simulate(0.1, 10, &[GRAVITY]);
    assert_eq!(positions(&cloth), before);
}

#[test]
fn rest_state_is_equilibrium() {
    let material = ClothMaterial { pin_policy: PinPolicy::None, ..Default::default() };
    let mut cloth = cloth_with(material, 6, 5);
    let before = positions(&cloth);
    for _ in 0..20 {
        cloth.simulate(1.0 / 60.0, 16, &[]);
    }
    assert!(max_diff(&positions(&cloth), &before) < 1e-12);
    assert!(cloth.elastic_energy() < 1e-12);
}

#[test]
fn rest_lengths_invariant_under_simulation() {
    let mut cloth = level_cloth(5, 5);
    let before: Vec<f64> = cloth.springs().iter().map(|s| s.rest_length()).collect();
    for _ in 0..10 {
        cloth.simulate(1.0 / 60.0, 8, &[GRAVITY]);
    }
    let after: Vec<f64> = cloth.springs().iter().map(|s| s.rest_length()).collect();
    assert_eq!(before, after);
}

#[test]
fn free_cloth_falls_with_gravity() {
    let material = ClothMaterial { pin_policy: PinPolicy::None, ..Default::default() };
    let mut cloth = cloth_with(material, 3, 3);
    let dt = 1.0 / 60.0;
    cloth.simulate(dt, 1, &[GRAVITY]);
    // First Verlet step from rest: x += a·dt², no spring stretch anywhere.
    for p in cloth.point_masses() {
        let drop = p.rest_position().y - p.current_position().y;
        assert!((drop - 9.81 * dt * dt).abs() < 1e-12);
    }
}

#[test]
fn accelerations_are_summed() {
    let free = ClothMaterial { pin_policy: PinPolicy::None, ..Default::default() };
    let mut split = cloth_with(free.clone(), 3, 3);
    let mut combined = cloth_with(free, 3, 3);
    let a = DVec3::new(1.0, -2.0, 0.5);
    let b = DVec3::new(-0.25, 0.0, 2.0);
    split.simulate(0.01, 1, &[a, b]);
    combined.simulate(0.01, 1, &[a + b]);
    assert!(max_diff(&positions(&split), &positions(&combined)) < 1e-15);
}

#[test]
fn more_sub_steps_converge() {
    let material = ClothMaterial { damping: 0.0, ..Default::default() };
    let run = |sub_steps: u32| {
        let mut cloth = cloth_with(material.clone(), 4, 4);
        for _ in 0..6 {
            cloth.simulate(1.0 / 60.0, sub_steps, &[GRAVITY]);
        }
        positions(&cloth)
    };
    let reference = run(256);
    let coarse = max_diff(&run(4), &reference);
    let fine = max_diff(&run(64), &reference);
    assert!(coarse > 0.0);
    assert!(fine < coarse, "fine {fine} vs coarse {coarse}");
}

#[test]
fn hanging_cloth_stays_finite() {
    let mut cloth = level_cloth(8, 8);
    for _ in 0..120 {
        cloth.simulate(1.0 / 60.0, 16, &[GRAVITY, DVec3::new(0.0, 0.0, 2.0)]);
    }
    assert!(cloth.point_masses().iter().all(|p| p.current_position().is_finite()));
    cloth.recompute();
    assert!(cloth.mesh().validate().is_ok());
}

// ─── Verlet Step ─────────────────────────────────────────────

fn free_material(damping: f64) -> ClothMaterial {
    ClothMaterial { damping, pin_policy: PinPolicy::None, ..Default::default() }
}

#[test]
fn point_masses_start_at_rest() {
    let cloth = level_cloth(3, 3);
    for p in cloth.point_masses() {
        assert_eq!(p.current_position(), p.rest_position());
        assert_eq!(p.previous_position(), p.rest_position());
        assert_eq!(p.displacement(), DVec3::ZERO);
        assert_eq!(p.accumulated_force(), DVec3::ZERO);
    }
}

#[test]
fn step_records_external_force() {
    let mut cloth = cloth_with(free_material(0.0), 3, 3);
    cloth.simulate(0.01, 1, &[GRAVITY]);
    let expected = GRAVITY * cloth.particle_mass();
    for p in cloth.point_masses() {
        assert!((p.accumulated_force() - expected).length() < 1e-9);
    }
}

#[test]
fn force_resets_between_steps() {
    let mut cloth = cloth_with(free_material(0.0), 3, 3);
    let dt = 0.01;
    cloth.simulate(dt, 1, &[GRAVITY]);
    let first: Vec<DVec3> = cloth.point_masses().iter().map(|p| p.displacement()).collect();
    cloth.simulate(dt, 1, &[]);
    for (p, d) in cloth.point_masses().iter().zip(&first) {
        assert!(p.accumulated_force().length() < 1e-9);
        // Undamped and unforced: the step repeats the previous displacement.
        assert!((p.displacement() - *d).length() < 1e-12);
    }
}

#[test]
fn damping_scales_carried_velocity() {
    let damping = 0.1;
    let mut cloth = cloth_with(free_material(damping), 3, 3);
    let dt = 1.0 / 60.0;
    cloth.simulate(dt, 1, &[GRAVITY]);
    cloth.simulate(dt, 1, &[]);
    let expected = GRAVITY * dt * dt * (1.0 - damping);
    for p in cloth.point_masses() {
        assert!((p.displacement() - expected).length() < 1e-12);
    }
}

#[test]
fn pinned_point_keeps_previous_position() {
    let mut cloth = level_cloth(3, 3);
    cloth.simulate(0.01, 3, &[GRAVITY]);
    let pinned = cloth.point_mass(PointMassId(0)).unwrap();
    assert!(pinned.is_pinned());
    assert_eq!(pinned.displacement(), DVec3::ZERO);
    assert_eq!(pinned.current_position(), pinned.rest_position());
}

// ─── Springs ─────────────────────────────────────────────────

fn pair(distance: f64) -> (Vec<PointMass>, Spring) {
    let masses = vec![
        PointMass::new(DVec3::ZERO, false),
        PointMass::new(DVec3::new(distance, 0.0, 0.0), false),
    ];
    let spring =
        Spring::new(&masses, PointMassId(0), PointMassId(1), SpringFamily::StructuralHorizontal);
    (masses, spring)
}

#[test]
fn spring_rest_length_from_rest_positions() {
    let (_, spring) = pair(2.5);
    assert_eq!(spring.rest_length(), 2.5);
    assert_eq!(spring.kind(), ConstraintKind::Structural);
}

#[test]
fn stretched_spring_pulls_together() {
    let (_, spring) = pair(1.0);
    let f = spring.force_on_start(DVec3::ZERO, DVec3::new(1.5, 0.0, 0.0), 100.0, 0.2);
    assert!((f - DVec3::new(50.0, 0.0, 0.0)).length() < 1e-12);
}

#[test]
fn compressed_spring_pushes_apart() {
    let (_, spring) = pair(1.0);
    let f = spring.force_on_start(DVec3::ZERO, DVec3::new(0.5, 0.0, 0.0), 100.0, 0.2);
    assert!((f - DVec3::new(-50.0, 0.0, 0.0)).length() < 1e-12);
}

#[test]
fn spring_at_rest_exerts_no_force() {
    let (_, spring) = pair(1.0);
    let f = spring.force_on_start(DVec3::ZERO, DVec3::new(1.0, 0.0, 0.0), 100.0, 0.2);
    assert_eq!(f, DVec3::ZERO);
}

#[test]
fn coincident_endpoints_give_zero_force() {
    let (_, spring) = pair(1.0);
    let f = spring.force_on_start(DVec3::ONE, DVec3::ONE, 100.0, 0.2);
    assert!(f.is_finite());
    assert_eq!(f, DVec3::ZERO);
}

#[test]
fn bending_force_is_weighted() {
    let masses = vec![
        PointMass::new(DVec3::ZERO, false),
        PointMass::new(DVec3::new(1.0, 1.0, 0.0), false),
    ];
    let spring =
        Spring::new(&masses, PointMassId(0), PointMassId(1), SpringFamily::BendingDiagonal);
    let rest = spring.rest_length();
    let stretched = DVec3::new(1.0, 1.0, 0.0) * ((rest + 1.0) / rest);
    let f = spring.force_on_start(DVec3::ZERO, stretched, 100.0, 0.2);
    assert!((f.length() - 20.0).abs() < 1e-9);
}

#[test]
fn family_counts() {
    let counts: Vec<usize> = SpringFamily::ALL.iter().map(|f| f.count(4, 3)).collect();
    assert_eq!(counts, vec![8, 9, 4, 6, 6, 6]);
    assert_eq!(SpringFamily::total_count(4, 3), 39);
    assert_eq!(SpringFamily::total_count(2, 2), 6);
}

#[test]
fn spring_energy_zero_at_rest_and_grows_with_stretch() {
    let (mut masses, spring) = pair(1.0);
    assert_eq!(spring.elastic_energy(&masses, 100.0, 0.2), 0.0);
    masses[1] = PointMass::new(DVec3::new(1.5, 0.0, 0.0), false);
    let energy = spring.elastic_energy(&masses, 100.0, 0.2);
    assert!((energy - 0.5 * 100.0 * 0.25).abs() < 1e-12);
}

// ─── Grid Layout ─────────────────────────────────────────────

fn layout(upper_left: DVec3, upper_right: DVec3, height: f64, w: u32, h: u32) -> GridLayout {
    GridLayout { upper_left, upper_right, height, width_points: w, height_points: h }
}

#[test]
fn level_corners_drop_evenly() {
    let grid = layout(DVec3::ZERO, DVec3::new(3.0, 0.0, 0.0), 2.0, 4, 3);
    assert_eq!(grid.edge_drops(), (2.0, 2.0));
    assert_eq!(grid.point_count(), 12);
    assert_eq!(grid.rest_position(2, 3), DVec3::new(3.0, -2.0, 0.0));
    assert_eq!(grid.rest_position(1, 1), DVec3::new(1.0, -1.0, 0.0));
}

#[test]
fn slanted_corners_level_the_bottom_edge() {
    let grid = layout(DVec3::new(0.0, 2.0, 0.0), DVec3::new(2.0, 1.0, 0.0), 1.0, 3, 3);
    assert_eq!(grid.edge_drops(), (2.0, 1.0));
    for col in 0..3 {
        assert!(grid.rest_position(2, col).y.abs() < 1e-12);
    }
    assert!((grid.rest_position(0, 1) - DVec3::new(1.0, 1.5, 0.0)).length() < 1e-12);
}

#[test]
fn higher_right_corner_drops_further() {
    let grid = layout(DVec3::new(0.0, 1.0, 0.0), DVec3::new(2.0, 3.0, 0.0), 0.5, 2, 2);
    assert_eq!(grid.edge_drops(), (0.5, 2.5));
    assert!((grid.rest_position(1, 1).y - 0.5).abs() < 1e-12);
}

#[test]
fn built_springs_are_positive_and_distinct() {
    let grid = layout(DVec3::ZERO, DVec3::new(3.0, 0.0, 0.0), 2.0, 4, 3);
    let masses = build_point_masses(&grid, PinPolicy::TopCorners);
    assert_eq!(masses.len(), 12);
    assert_eq!(masses.iter().filter(|p| p.is_pinned()).count(), 2);
    let springs = build_springs(&grid, &masses).unwrap();
    assert_eq!(springs.len(), 39);
    for s in &springs {
        assert!(s.rest_length() > 0.0);
        assert_ne!(s.start(), s.end());
    }
}

// ─── Minimal Scenario ────────────────────────────────────────

#[test]
fn minimal_quad_under_gravity() {
    // Corners at equal height, drop equal to the spacing: a unit square.
    let mut cloth = Cloth::new(DVec3::ZERO, DVec3::X, 1.0, 2, 2).unwrap();
    for s in cloth.springs().iter().filter(|s| s.kind() != ConstraintKind::Bending) {
        assert!((s.rest_length() - 1.0).abs() < 1e-15);
    }
    let flat = DVec3::Z;
    for i in 0..4 {
        let n = cloth.mesh().normal(i);
        assert!((n[2] - 1.0).abs() < 1e-6);
    }

    cloth.simulate(1.0 / 60.0, 8, &[GRAVITY]);
    cloth.recompute();

    for col in 0..2 {
        let p = cloth.point_mass(cloth.grid_index(1, col).unwrap()).unwrap();
        assert!(p.current_position().y < p.rest_position().y, "corner {col} did not drop");
    }

    let mesh = cloth.mesh();
    let pos = |i: u32| {
        let [x, y, z] = mesh.position(i as usize);
        DVec3::new(x as f64, y as f64, z as f64)
    };
    for t in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle(t);
        assert!(face_normal(pos(a), pos(b), pos(c)).dot(flat) > 0.0, "triangle {t} flipped");
    }
    for i in 0..4 {
        let n = mesh.normal(i);
        assert!(n[2] > 0.0);
    }
}

// ─── Mesh Derivation ─────────────────────────────────────────

#[test]
fn initial_normals_face_forward() {
    let cloth = level_cloth(4, 4);
    for i in 0..cloth.mesh().vertex_count() {
        let [x, y, z] = cloth.mesh().normal(i);
        assert!(x.abs() < 1e-6 && y.abs() < 1e-6);
        assert!((z - 1.0).abs() < 1e-6);
    }
}

#[test]
fn recompute_copies_positions_exactly() {
    let mut cloth = level_cloth(6, 4);
    for _ in 0..10 {
        cloth.simulate(1.0 / 60.0, 8, &[GRAVITY, DVec3::new(0.0, 0.0, 4.0)]);
    }
    cloth.recompute();
    for (i, p) in cloth.point_masses().iter().enumerate() {
        assert_eq!(cloth.mesh().position(i), to_f32_array(p.current_position()));
        let [x, y, z] = cloth.mesh().normal(i);
        let len = (x * x + y * y + z * z).sqrt();
        assert!((len - 1.0).abs() < 1e-5, "normal {i} has length {len}");
    }
}

#[test]
fn recompute_without_simulate_is_stable() {
    let mut cloth = level_cloth(4, 3);
    let before = cloth.mesh().clone();
    cloth.recompute();
    assert_eq!(cloth.mesh(), &before);
}

#[test]
fn texcoords_and_indices_are_fixed() {
    let mut cloth = level_cloth(4, 3);
    let uv_before = cloth.mesh().interleaved_tex_coords();
    let indices_before = cloth.mesh().indices.clone();
    let indices_ptr = cloth.mesh().indices.as_ptr();

    for _ in 0..5 {
        cloth.simulate(1.0 / 60.0, 4, &[GRAVITY]);
        cloth.recompute();
    }
    assert_eq!(cloth.mesh().interleaved_tex_coords(), uv_before);
    assert_eq!(cloth.mesh().indices, indices_before);
    assert_eq!(cloth.mesh().indices.as_ptr(), indices_ptr);
}

#[test]
fn texcoord_convention() {
    let cloth = level_cloth(4, 2);
    let mesh = cloth.mesh();
    assert_eq!(mesh.tex_coord(0), [0.0, 0.0]);
    assert_eq!(mesh.tex_coord(3), [0.75, 0.0]);
    assert_eq!(mesh.tex_coord(5), [0.25, 0.5]);
}

#[test]
fn triangulation_convention() {
    let cloth = level_cloth(3, 2);
    assert_eq!(cloth.mesh().triangle(0), [0, 4, 1]);
    assert_eq!(cloth.mesh().triangle(1), [0, 3, 4]);
    assert_eq!(cloth.mesh().triangle(2), [1, 5, 2]);
}

#[test]
fn single_sided_by_default() {
    let cloth = level_cloth(3, 3);
    assert!(cloth.back_mesh().is_none());
    assert_eq!(cloth.meshes().count(), 1);
}

#[test]
fn double_sided_back_mesh() {
    let mut cloth = cloth_with(ClothMaterial { double_sided: true, ..Default::default() }, 4, 3);
    assert_eq!(cloth.meshes().count(), 2);

    cloth.simulate(1.0 / 30.0, 8, &[GRAVITY, DVec3::new(0.0, 0.0, 5.0)]);
    cloth.recompute();

    let front = cloth.mesh();
    let back = cloth.back_mesh().unwrap();
    assert_eq!(back.vertex_count(), front.vertex_count());
    for t in 0..front.triangle_count() {
        let [a, b, c] = front.triangle(t);
        assert_eq!(back.triangle(t), [a, c, b]);
    }
    for i in 0..front.vertex_count() {
        assert_eq!(back.position(i), front.position(i));
        assert_eq!(back.tex_coord(i), front.tex_coord(i));
        let [fx, fy, fz] = front.normal(i);
        assert_eq!(back.normal(i), [-fx, -fy, -fz]);
    }
}

// ─── Energy Diagnostics ──────────────────────────────────────

#[test]
fn energies_at_rest_are_zero() {
    let cloth = level_cloth(4, 4);
    assert_eq!(cloth.kinetic_energy(1.0 / 60.0), 0.0);
    assert_eq!(cloth.elastic_energy(), 0.0);
    assert_eq!(cloth.max_displacement(), 0.0);
}

#[test]
fn energies_rise_under_load() {
    let mut cloth = level_cloth(4, 4);
    let sub_steps = 8;
    let frame = 1.0 / 60.0;
    for _ in 0..5 {
        cloth.simulate(frame, sub_steps, &[GRAVITY]);
    }
    assert!(cloth.kinetic_energy(frame / sub_steps as f64) > 0.0);
    assert!(cloth.elastic_energy() > 0.0);
    assert!(cloth.max_displacement() > 0.0);
    assert_eq!(cloth.kinetic_energy(0.0), 0.0);
}

// ─── Material Config ─────────────────────────────────────────

#[test]
fn material_toml_partial() {
    let material: ClothMaterial = toml::from_str(
        r#"
        stiffness = 1200.0
        pin_policy = "top_row"
        "#,
    )
    .unwrap();
    assert_eq!(material.stiffness, 1200.0);
    assert_eq!(material.pin_policy, PinPolicy::TopRow);
    assert_eq!(material.density, ClothMaterial::default().density);
    assert!(material.validate().is_ok());
}

#[test]
fn material_toml_roundtrip() {
    let material = ClothMaterial { double_sided: true, ..ClothMaterial::silk() };
    let text = toml::to_string(&material).unwrap();
    let back: ClothMaterial = toml::from_str(&text).unwrap();
    assert_eq!(back, material);
}

#[test]
fn material_presets_validate() {
    for m in [ClothMaterial::default(), ClothMaterial::silk(), ClothMaterial::canvas()] {
        assert!(m.validate().is_ok());
    }
}
