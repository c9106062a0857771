use super::*;
use nalgebra::vector;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn square(x0: f64, y0: f64, side: f64) -> Polygon {
    Polygon::new(vec![
        vector![x0, y0],
        vector![x0 + side, y0],
        vector![x0 + side, y0 + side],
        vector![x0, y0 + side],
    ])
}

fn scene_800x600() -> Scene {
    Scene::with_boundary_rect(SceneCfg::default(), 800.0, 600.0)
}

#[test]
fn new_scene_has_player_light_only() {
    let s = Scene::default();
    assert_eq!(s.lights().len(), 1);
    let l = s.player_light();
    assert!(!l.is_static);
    assert!(!l.is_bounded());
    assert_eq!(l.color, Color::WHITE);
    assert_eq!(l.position, vector![400.0, 300.0]);
    assert!(s.polygons().is_empty());
    assert!(s.boundary().is_none());
    assert!(s.obstacles().is_empty());
}

#[test]
fn boundary_is_excluded_from_containment() {
    let mut s = scene_800x600();
    assert!(!s.is_point_inside_polygon(vector![10.0, 10.0]));
    s.add_polygon(square(100.0, 100.0, 50.0));
    assert!(s.is_point_inside_polygon(vector![120.0, 120.0]));
    assert!(!s.is_point_inside_polygon(vector![10.0, 10.0]));
}

#[test]
fn would_edge_intersect_two_disjoint_polygons() {
    let mut s = scene_800x600();
    s.add_polygon(square(100.0, 100.0, 50.0)); // P1
    s.add_polygon(square(300.0, 300.0, 50.0)); // P2
    // crosses P1 only
    assert!(s.would_edge_intersect(vector![80.0, 125.0], vector![200.0, 125.0]));
    // outside both
    assert!(!s.would_edge_intersect(vector![10.0, 10.0], vector![10.0, 500.0]));
    // boundary edges never count
    assert!(!s.would_edge_intersect(vector![-10.0, 300.0], vector![50.0, 300.0]));
}

#[test]
fn drawing_polygon_commits_on_close() {
    let mut s = scene_800x600();
    s.set_mode(Mode::DrawObstacles);
    s.begin_polygon(vector![100.0, 100.0]);
    assert!(s.add_vertex_to_last_polygon(vector![200.0, 100.0]));
    assert!(s.add_vertex_to_last_polygon(vector![150.0, 180.0]));
    assert!(s.obstacles().is_empty(), "not committed before close");
    assert!(s.close_polygon());
    assert_eq!(s.obstacles().len(), 1);
    assert_eq!(s.obstacles()[0].len(), 3);
    assert!(s.drawing().is_none());
}

#[test]
fn vertex_crossing_obstacle_is_refused() {
    let mut s = scene_800x600();
    s.add_polygon(square(100.0, 100.0, 50.0));
    s.begin_polygon(vector![50.0, 125.0]);
    assert!(!s.add_vertex_to_last_polygon(vector![200.0, 125.0]));
    assert_eq!(s.drawing().map(Polygon::len), Some(1));
    // vertices of the obstacle may be shared
    assert!(s.add_vertex_to_last_polygon(vector![100.0, 100.0]));
}

#[test]
fn vertex_crossing_own_chain_is_refused() {
    let mut s = scene_800x600();
    s.begin_polygon(vector![0.0, 0.0]);
    assert!(s.add_vertex_to_last_polygon(vector![100.0, 100.0]));
    assert!(s.add_vertex_to_last_polygon(vector![100.0, 0.0]));
    assert!(!s.add_vertex_to_last_polygon(vector![0.0, 100.0]));
}

#[test]
fn failed_close_discards_drawing() {
    let mut s = scene_800x600();
    s.add_polygon(square(100.0, 100.0, 50.0));
    s.begin_polygon(vector![50.0, 110.0]);
    assert!(s.add_vertex_to_last_polygon(vector![50.0, 300.0]));
    assert!(s.add_vertex_to_last_polygon(vector![300.0, 300.0]));
    assert!(s.add_vertex_to_last_polygon(vector![300.0, 130.0]));
    // closing edge (300,130)->(50,110) cuts through the obstacle
    assert!(!s.close_polygon());
    assert!(s.drawing().is_none());
    assert_eq!(s.obstacles().len(), 1);
}

#[test]
fn short_polygon_discarded_on_close() {
    let mut s = scene_800x600();
    s.begin_polygon(vector![10.0, 10.0]);
    assert!(s.add_vertex_to_last_polygon(vector![20.0, 10.0]));
    assert!(!s.close_polygon());
    assert!(s.obstacles().is_empty());
}

#[test]
fn update_last_polygon_moves_preview_vertex() {
    let mut s = scene_800x600();
    s.begin_polygon(vector![10.0, 10.0]);
    s.add_vertex_to_last_polygon(vector![20.0, 10.0]);
    s.update_last_polygon(vector![25.0, 15.0]);
    assert_eq!(s.drawing().and_then(Polygon::last), Some(vector![25.0, 15.0]));
}

#[test]
fn leaving_draw_mode_cancels_drawing() {
    let mut s = scene_800x600();
    s.set_mode(Mode::DrawObstacles);
    s.begin_polygon(vector![10.0, 10.0]);
    s.set_mode(Mode::StaticLights);
    assert!(s.drawing().is_none());
    assert!(s.is_light_mode());
}

#[test]
fn remove_last_polygon_prefers_drawing_and_keeps_boundary() {
    let mut s = scene_800x600();
    s.add_polygon(square(100.0, 100.0, 50.0));
    s.begin_polygon(vector![10.0, 10.0]);
    s.remove_last_polygon();
    assert!(s.drawing().is_none());
    assert_eq!(s.polygons().len(), 2);
    s.remove_last_polygon();
    assert_eq!(s.polygons().len(), 1);
    s.remove_last_polygon();
    assert_eq!(s.polygons().len(), 1, "boundary stays");
}

#[test]
fn boundary_updates_and_cache_follows() {
    let mut s = scene_800x600();
    s.add_polygon(square(100.0, 100.0, 50.0));
    assert_eq!(s.vertex_cache().len(), 8);
    s.set_boundary_rect(1000.0, 700.0);
    assert_eq!(s.polygons().len(), 2);
    assert!(s.vertex_cache().get(vector![1000.0, 700.0]).is_some());
    assert!(s.vertex_cache().get(vector![800.0, 600.0]).is_none());
}

#[test]
fn vertex_cache_dedups_shared_vertices() {
    let mut s = scene_800x600();
    s.add_polygon(square(100.0, 100.0, 50.0));
    s.add_polygon(square(150.0, 100.0, 50.0)); // shares two vertices
    let cache = s.vertex_cache();
    assert_eq!(cache.len(), 4 + 4 + 2);
    assert_eq!(cache.obstacle_vertices().count(), 6);
    let shared = cache.get(vector![150.0, 100.0]).unwrap();
    assert_eq!(shared.polygon_index, 1);
    assert_eq!(shared.vertex_index, 1);
}

#[test]
fn clear_obstacles_keeps_boundary() {
    let mut s = scene_800x600();
    s.add_example_polygons();
    assert_eq!(s.obstacles().len(), 5);
    s.clear_obstacles();
    assert_eq!(s.polygons().len(), 1);
    assert_eq!(s.vertex_cache().len(), 4);
}

#[test]
fn light_defaults_and_radius_updates() {
    let mut s = scene_800x600();
    let i = s.add_light_source(vector![50.0, 50.0], true);
    let j = s.add_light_source(vector![60.0, 60.0], false);
    assert_eq!((i, j), (1, 2));
    let st = s.light(i).unwrap();
    assert!(st.is_static);
    assert_eq!(st.radius, 350.0);
    assert_eq!(st.color, Color::STATIC_BLUE);
    assert_eq!(s.light(j).unwrap().radius, LightSource::UNBOUNDED);

    s.update_static_light_radius(i, 120.0);
    assert_eq!(s.light(i).unwrap().radius, 120.0);
    s.update_static_light_radius(j, 120.0);
    assert_eq!(s.light(j).unwrap().radius, LightSource::UNBOUNDED);
    s.update_static_light_radius(99, 120.0);
}

#[test]
fn remove_and_clear_lights() {
    let mut s = scene_800x600();
    s.add_light_source(vector![50.0, 50.0], true);
    s.add_light_source(vector![60.0, 60.0], false);
    s.add_light_source(vector![70.0, 70.0], true);
    s.remove_light_source(42);
    s.remove_light_source(0);
    assert_eq!(s.lights().len(), 4);
    s.clear_static_lights();
    assert_eq!(s.lights().len(), 2);
    assert!(s.lights().iter().all(|l| !l.is_static));
    s.remove_light_source(1);
    assert_eq!(s.lights().len(), 1);
}

#[test]
fn light_move_stays_inside_boundary() {
    let mut s = scene_800x600();
    let i = s.add_light_source(vector![50.0, 50.0], true);
    assert!(!s.update_light_source_position(i, vector![900.0, 50.0]));
    assert_eq!(s.light(i).unwrap().position, vector![50.0, 50.0]);
    assert!(s.update_light_source_position(i, vector![700.0, 50.0]));
    assert!(!s.update_light_source_position(77, vector![10.0, 10.0]));
}

#[test]
fn light_move_without_boundary_is_free() {
    let mut s = Scene::default();
    assert!(s.update_light_source_position(0, vector![-1e4, 5e3]));
}

#[test]
fn player_collision_probe_rejects_near_walls() {
    let mut s = scene_800x600();
    s.add_polygon(square(200.0, 200.0, 100.0));
    // inside
    assert!(!s.update_light_source_position(0, vector![250.0, 250.0]));
    // outside, but the probe (reach 19) overlaps the wall at x=300
    assert!(!s.update_light_source_position(0, vector![310.0, 250.0]));
    assert_eq!(s.player_light().position, vector![400.0, 300.0]);
    // clear of the wall
    assert!(s.update_light_source_position(0, vector![330.0, 250.0]));

    // static lights are not probed
    let i = s.add_light_source(vector![500.0, 500.0], true);
    assert!(s.update_light_source_position(i, vector![305.0, 250.0]));
}

#[test]
fn player_collision_can_be_disabled() {
    let mut s = scene_800x600();
    s.add_polygon(square(200.0, 200.0, 100.0));
    s.set_dynamic_light_collisions(false);
    assert!(s.update_light_source_position(0, vector![250.0, 250.0]));
    assert_eq!(s.player_light().position, vector![250.0, 250.0]);
}

#[test]
fn static_lights_ignore_obstacles() {
    let mut s = scene_800x600();
    s.add_polygon(square(200.0, 200.0, 100.0));
    let i = s.add_light_source(vector![500.0, 500.0], true);
    assert!(s.update_light_source_position(i, vector![250.0, 250.0]));
    assert!(s.is_point_inside_polygon(s.light(i).unwrap().position));
    // the boundary still applies
    assert!(!s.update_light_source_position(i, vector![900.0, 250.0]));
    // light 0 with collisions on is refused the same spot
    assert!(!s.update_light_source_position(0, vector![250.0, 250.0]));
}

#[test]
fn player_stuck_inside_obstacle_cannot_move() {
    let mut cfg = SceneCfg::default();
    cfg.player_start = vector![250.0, 250.0];
    let mut s = Scene::with_boundary_rect(cfg, 800.0, 600.0);
    s.add_polygon(square(200.0, 200.0, 100.0));
    assert!(!s.update_light_source_position(0, vector![500.0, 500.0]));
}

#[test]
fn random_walk_over_generated_field_stays_clear() {
    use crate::gen::{draw_scene, FieldCfg, ReplayToken};
    let mut rng = StdRng::seed_from_u64(42);
    for index in 0..4 {
        let mut s = draw_scene(
            SceneCfg::default(),
            FieldCfg {
                fill: 0.5,
                ..FieldCfg::default()
            },
            ReplayToken { seed: 9, index },
        );
        let mut accepted = 0;
        for _ in 0..200 {
            let cur = s.player_light().position;
            let step = vector![rng.gen_range(-40.0..40.0), rng.gen_range(-40.0..40.0)];
            if s.update_light_source_position(0, cur + step) {
                accepted += 1;
            }
            let p = s.player_light().position;
            assert!(!s.is_point_inside_polygon(p), "player entered an obstacle at {p:?}");
            assert!(p.x > 0.0 && p.x < 800.0 && p.y > 0.0 && p.y < 600.0);
        }
        assert!(accepted > 0);
    }
}

proptest! {
    #[test]
    fn player_never_enters_obstacles(
        obstacles in prop::collection::vec(
            (20.0f64..780.0, 20.0f64..580.0, 5.0f64..60.0, 3usize..8),
            1..6,
        ),
        targets in prop::collection::vec((0.0f64..800.0, 0.0f64..600.0), 1..30),
    ) {
        let mut s = scene_800x600();
        for (x, y, r, n) in obstacles {
            s.add_polygon(Polygon::regular(vector![x, y], r, n));
        }
        for (x, y) in targets {
            let p = vector![x, y];
            if s.update_light_source_position(0, p) {
                prop_assert_eq!(s.player_light().position, p);
                prop_assert!(!s.is_point_inside_polygon(p));
            }
        }
    }
}
