//! Print light-area and sight-layer sizes for the demo layout.
//!
//! Usage:
//!   cargo run -p raycaster --example light_area -- [x y]
//!
//! Moves the player light to `(x, y)` (default 400 300) and prints the
//! vertex counts of every light area and sight layer.

use raycaster::prelude::*;

fn main() {
    let args: Vec<f64> = std::env::args()
        .skip(1)
        .filter_map(|a| a.parse().ok())
        .collect();
    let target = match args.as_slice() {
        [x, y, ..] => Vec2::new(*x, *y),
        _ => Vec2::new(400.0, 300.0),
    };

    let mut scene = Scene::with_boundary_rect(SceneCfg::default(), 800.0, 600.0);
    scene.add_example_polygons();
    scene.add_light_source(Vec2::new(700.0, 500.0), true);
    if !scene.update_light_source_position(0, target) {
        eprintln!("player light cannot move to ({}, {})", target.x, target.y);
    }

    let player = scene.player_light().position;
    println!("player at ({:.1}, {:.1})", player.x, player.y);
    for (i, area) in light_areas(&scene).iter().enumerate() {
        let kind = if scene.lights()[i].is_static {
            "static"
        } else {
            "dynamic"
        };
        println!("light {i} ({kind}): {} vertices", area.len());
    }
    for (i, layer) in sight_polygons(&scene, player).iter().enumerate() {
        println!("sight layer {i}: {} vertices", layer.len());
    }
}
