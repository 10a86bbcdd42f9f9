//! Full pipeline: grid reference → map coordinates → elevation → firing solution.

use mortar_ballistics::{calculate_distance, calculate_firing_solution, validate_firing_solution};
use mortar_core::constants::{GRAVITY, MAX_ELEVATION_ANGLE, PROJECTILE_VELOCITY};
use mortar_core::enums::SolutionStatus;
use mortar_core::types::WorldPoint;
use mortar_grid::{calculate_grid_scale, grid_to_xy, parse_grid_reference, xy_to_grid};
use mortar_terrain::{HeightmapData, LoadedMap, MapMetadata};

/// Helper: 1300 m map (100 m squares) on a 14×14 heightmap sloping up to the south.
fn make_slope_map() -> LoadedMap {
    let resolution = 14u32;
    let mut data = Vec::with_capacity((resolution * resolution) as usize);
    for row in 0..resolution {
        for _ in 0..resolution {
            data.push((row * 5000) as u16);
        }
    }
    let heightmap = HeightmapData::new(resolution, data).unwrap();
    LoadedMap::new("slope", MapMetadata::new(1300.0, 200.0), heightmap)
}

fn resolve(map: &LoadedMap, reference: &str) -> WorldPoint {
    let gr = parse_grid_reference(reference).expect("reference should parse");
    let p = grid_to_xy(gr.column, gr.row, gr.keypad, map.grid_scale()).unwrap();
    map.point_at(p.x, p.y)
}

#[test]
fn test_reference_scenario() {
    let mortar = WorldPoint::new(1000.0, 1000.0, 50.0);
    let target = WorldPoint::new(1500.0, 1300.0, 120.0);
    let sol = calculate_firing_solution(&mortar, &target);

    assert!((sol.distance - 583.1).abs() < 0.1, "distance {}", sol.distance);
    assert_eq!(sol.distance, calculate_distance(1000.0, 1000.0, 1500.0, 1300.0));
    assert_eq!(sol.height_delta, 70.0);
    // Target lies east-south-east (y points south): 59° off due south.
    assert!((sol.azimuth - 120.96).abs() < 0.1, "azimuth {}", sol.azimuth);
    assert!((180.0 - sol.azimuth - 59.0).abs() < 0.1);

    assert!(sol.valid);
    assert_eq!(sol.status, SolutionStatus::Ok);
    let angle = sol.elevation_radians.unwrap();
    assert!(angle > 0.0 && angle < std::f64::consts::FRAC_PI_2);
    assert!(angle <= MAX_ELEVATION_ANGLE);

    let tof = sol.time_of_flight.unwrap();
    assert!(tof.is_finite() && tof > 0.0 && tof < 60.0, "tof {tof}");
    let horizontal = sol.distance / (PROJECTILE_VELOCITY * angle.cos());
    assert!((tof - horizontal).abs() < 0.1);
}

#[test]
fn test_solution_is_pure() {
    let mortar = WorldPoint::new(1000.0, 1000.0, 50.0);
    let target = WorldPoint::new(1500.0, 1300.0, 120.0);

    let a = calculate_firing_solution(&mortar, &target);
    let b = calculate_firing_solution(&mortar, &target);
    let c = calculate_firing_solution(&mortar, &target);

    for sol in [&b, &c] {
        assert_eq!(a.distance.to_bits(), sol.distance.to_bits());
        assert_eq!(a.azimuth.to_bits(), sol.azimuth.to_bits());
        assert_eq!(
            a.elevation_mils.map(f64::to_bits),
            sol.elevation_mils.map(f64::to_bits)
        );
        assert_eq!(
            a.time_of_flight.map(f64::to_bits),
            sol.time_of_flight.map(f64::to_bits)
        );
    }
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&c).unwrap()
    );
}

#[test]
fn test_reciprocal_geometry() {
    let a = WorldPoint::new(200.0, 900.0, 35.0);
    let b = WorldPoint::new(850.0, 400.0, 110.0);

    let forward = calculate_firing_solution(&a, &b);
    let reverse = calculate_firing_solution(&b, &a);

    assert_eq!(forward.distance, reverse.distance);
    assert_eq!(forward.height_delta, -reverse.height_delta);
    let back_bearing = (forward.azimuth + 180.0) % 360.0;
    assert!((back_bearing - reverse.azimuth).abs() < 1e-9);
}

#[test]
fn test_flat_ground_time_of_flight() {
    let mortar = WorldPoint::new(0.0, 0.0, 0.0);
    let target = WorldPoint::new(0.0, 600.0, 0.0);
    let sol = calculate_firing_solution(&mortar, &target);

    let phi = sol.elevation_radians.unwrap();
    let tof = sol.time_of_flight.unwrap();
    let vertical = 2.0 * PROJECTILE_VELOCITY * phi.sin() / GRAVITY;
    let horizontal = 600.0 / (PROJECTILE_VELOCITY * phi.cos());
    assert!((tof - vertical).abs() < 0.1);
    assert!((tof - horizontal).abs() < 0.1);
}

#[test]
fn test_status_chain() {
    assert_eq!(validate_firing_solution(0.5, 0.0).status, SolutionStatus::TooClose);
    assert_eq!(validate_firing_solution(1600.0, 0.0).status, SolutionStatus::Unreachable);
    assert_eq!(validate_firing_solution(20.0, 0.0).status, SolutionStatus::AngleTooHigh);
    assert_eq!(validate_firing_solution(1550.0, -100.0).status, SolutionStatus::Ok);
    assert_eq!(
        validate_firing_solution(1600.0, -300.0).status,
        SolutionStatus::ExtremeElevation
    );
    assert_eq!(
        validate_firing_solution(1000.0, 300.0).status,
        SolutionStatus::ExtremeElevation
    );
    assert_eq!(validate_firing_solution(700.0, 10.0).status, SolutionStatus::Ok);
}

/// Past 1500 m is still reachable when the target sits lower.
#[test]
fn test_long_downhill_shot_is_fired() {
    let mortar = WorldPoint::new(0.0, 0.0, 300.0);
    let target = WorldPoint::new(1550.0, 0.0, 200.0);
    let sol = calculate_firing_solution(&mortar, &target);

    assert!(sol.distance > 1500.0);
    assert!(sol.valid, "{}", sol.message);
    assert_eq!(sol.status, SolutionStatus::Ok);
    let tof = sol.time_of_flight.unwrap();
    assert!(tof.is_finite() && tof > 0.0, "tof {tof}");
}

/// Flat ground runs out of reach before the range ceiling does.
#[test]
fn test_flat_ground_max_range_is_unreachable() {
    let v2 = PROJECTILE_VELOCITY * PROJECTILE_VELOCITY;
    let ballistic_max = v2 / GRAVITY;
    assert!(ballistic_max < 1500.0);

    let inside = validate_firing_solution(ballistic_max - 1.0, 0.0);
    assert!(inside.valid, "{:?}", inside);
    let outside = validate_firing_solution(ballistic_max + 1.0, 0.0);
    assert_eq!(outside.status, SolutionStatus::Unreachable);
}

#[test]
fn test_grid_to_solution_pipeline() {
    let map = make_slope_map();
    assert_eq!(map.grid_scale(), calculate_grid_scale(1300.0));

    let mortar = resolve(&map, "C3-5");
    let target = resolve(&map, "Hotel 9 kpad 5");

    assert_eq!((mortar.x, mortar.y), (250.0, 250.0));
    assert_eq!((target.x, target.y), (750.0, 850.0));
    // Terrain rises southward, so the target sits higher
    assert!(target.z > mortar.z);

    let sol = calculate_firing_solution(&mortar, &target);
    assert!(sol.valid, "{}", sol.message);
    assert!((sol.height_delta - (target.z - mortar.z)).abs() < 1e-12);
    assert!(sol.azimuth > 90.0 && sol.azimuth < 180.0);

    // The target's position maps back to the same grid reference
    let gr = xy_to_grid(target.x, target.y, map.grid_scale()).unwrap();
    assert_eq!(gr.to_string(), "H9-5");
}

#[test]
fn test_off_map_marker_is_clamped_for_elevation_only() {
    let map = make_slope_map();

    // Slightly off the south edge: elevation still resolves
    let z = map.elevation_at(650.0, 1300.4);
    assert!((z - map.elevation_at(650.0, 1300.0)).abs() < 1e-12);

    // ...but the grid transform refuses it
    assert!(xy_to_grid(650.0, 1300.4, map.grid_scale()).is_err());
}
