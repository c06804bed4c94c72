use trailnav_core::geo::{haversine_distance, initial_bearing};
use trailnav_core::{Fix, Waypoint};
use trailnav_sim::{RouteWalker, WalkerConfig};

fn l_shaped_path() -> Vec<Waypoint> {
    vec![
        Waypoint::new(40.0, -75.0),
        Waypoint::new(40.001, -75.0),
        Waypoint::new(40.001, -74.999),
    ]
}

fn seeded(seed: u64, noise: f64) -> WalkerConfig {
    WalkerConfig {
        gps_noise_m: noise,
        seed: Some(seed),
        ..WalkerConfig::default()
    }
}

#[test]
fn walk_starts_and_ends_on_path_endpoints() {
    let path = l_shaped_path();
    let fixes: Vec<Fix> = RouteWalker::new(path.clone(), WalkerConfig::default())
        .unwrap()
        .collect();

    assert_eq!(fixes.first().unwrap().position, path[0]);
    assert_eq!(fixes.last().unwrap().position, path[2]);
}

#[test]
fn fixes_are_spaced_by_interval_and_speed() {
    let fixes: Vec<Fix> = RouteWalker::new(l_shaped_path(), WalkerConfig::default())
        .unwrap()
        .collect();

    for pair in fixes.windows(2) {
        assert_eq!(pair[1].timestamp_ms - pair[0].timestamp_ms, 2000);
        // Straight-line gap never exceeds the walked distance.
        let gap = haversine_distance(&pair[0].position, &pair[1].position);
        assert!(gap <= 2.8 + 1e-6, "gap {gap}");
    }
}

#[test]
fn fix_count_matches_path_length() {
    let walker = RouteWalker::new(l_shaped_path(), WalkerConfig::default()).unwrap();
    let length = walker.path_length_m();
    let count = walker.count();

    let expected = (length / 2.8).ceil() as usize + 1;
    assert!(
        count == expected || count == expected + 1,
        "length {length}, fixes {count}"
    );
}

#[test]
fn heading_follows_segment_bearing() {
    let path = l_shaped_path();
    let fixes: Vec<Fix> = RouteWalker::new(path.clone(), WalkerConfig::default())
        .unwrap()
        .collect();

    let north = initial_bearing(&path[0], &path[1]);
    let east = initial_bearing(&path[1], &path[2]);
    assert!((fixes[0].heading.unwrap() - north).abs() < 1e-9);
    assert!((fixes.last().unwrap().heading.unwrap() - east).abs() < 1e-9);
}

#[test]
fn seeded_noise_is_reproducible() {
    let a: Vec<Fix> = RouteWalker::new(l_shaped_path(), seeded(7, 3.0)).unwrap().collect();
    let b: Vec<Fix> = RouteWalker::new(l_shaped_path(), seeded(7, 3.0)).unwrap().collect();
    assert_eq!(a, b);
}

#[test]
fn noise_stays_near_the_true_track() {
    let clean: Vec<Fix> = RouteWalker::new(l_shaped_path(), WalkerConfig::default())
        .unwrap()
        .collect();
    let noisy: Vec<Fix> = RouteWalker::new(l_shaped_path(), seeded(42, 2.0)).unwrap().collect();

    assert_eq!(clean.len(), noisy.len());
    let mut moved = 0;
    for (c, n) in clean.iter().zip(&noisy) {
        let offset = haversine_distance(&c.position, &n.position);
        // 2 m sigma per axis; 12 m is far beyond any plausible draw.
        assert!(offset < 12.0, "offset {offset}");
        if offset > 0.0 {
            moved += 1;
        }
        assert_eq!(c.timestamp_ms, n.timestamp_ms);
    }
    assert!(moved > 0);
}

#[test]
fn start_time_offsets_timestamps() {
    let config = WalkerConfig {
        start_time_ms: 10_000,
        fix_interval_ms: 1000,
        ..WalkerConfig::default()
    };
    let mut walker = RouteWalker::new(l_shaped_path(), config).unwrap();
    assert_eq!(walker.next().unwrap().timestamp_ms, 10_000);
    assert_eq!(walker.next().unwrap().timestamp_ms, 11_000);
}

#[test]
fn walker_is_exhausted_after_final_vertex() {
    let mut walker = RouteWalker::new(l_shaped_path(), WalkerConfig::default()).unwrap();
    while walker.next().is_some() {}
    assert!(walker.is_finished());
    assert!(walker.next().is_none());
}
