use std::time::Instant;

use crate::simulation::body::Body;
use crate::simulation::collision::find_collision;
use crate::simulation::color::Rgba;
use crate::simulation::forces::{create_global_gravity, create_newtonian_gravity, create_physics_collision};
use crate::simulation::polygon::Polygon;
use crate::simulation::scene::Scene;
use crate::simulation::vector::NVec2;

pub fn bench_collision() {
    // Vertex counts per polygon
    let ns = [4, 16, 64, 256, 1024];
    let reps = 1000;

    for n in ns {
        let a = Polygon::regular_polygon(NVec2::new(0.0, 0.0), 1.0, n);
        let b = Polygon::regular_polygon(NVec2::new(1.5, 0.3), 1.0, n);

        // Warm up
        let mut hits = 0usize;
        if find_collision(a.vertices(), b.vertices()).collided() {
            hits += 1;
        }

        let t0 = Instant::now();
        for _ in 0..reps {
            if find_collision(a.vertices(), b.vertices()).collided() {
                hits += 1;
            }
        }
        let dt = t0.elapsed().as_secs_f64();

        println!("verts = {n:5}, SAT x{reps} = {:8.6} s, hits = {hits}", dt);
    }
}

pub fn bench_scene_tick() {
    // Scene sizes; gravity and collisions are pairwise so creators grow as n^2
    let ns = [10, 20, 40, 80];
    let steps = 100;
    let dt = 1e-3;

    for n in ns {
        let mut scene = Scene::new();
        let mut ids = Vec::with_capacity(n);
        for i in 0..n {
            let i_f = i as f64;
            // deterministic positions, no rand needed
            let center = NVec2::new((i_f * 0.37).sin() * 50.0, (i_f * 0.13).cos() * 50.0);
            let shape = Polygon::regular_polygon(center, 1.0, 8);
            ids.push(scene.add_body(Body::new(shape, 1.0, Rgba::from_hsv(i as f32 * 360.0 / n as f32, 1.0, 1.0))));
        }
        for (i, &a) in ids.iter().enumerate() {
            create_global_gravity(&mut scene, 9.8, a);
            for &b in &ids[i + 1..] {
                create_newtonian_gravity(&mut scene, 1.0, a, b);
                create_physics_collision(&mut scene, 0.9, a, b);
            }
        }

        // Warm up
        scene.tick(dt);

        let t0 = Instant::now();
        for _ in 0..steps {
            scene.tick(dt);
        }
        let elapsed = t0.elapsed().as_secs_f64();

        println!(
            "N = {n:4}, creators = {:6}, {steps} ticks = {:8.6} s",
            scene.force_creator_count(),
            elapsed
        );
    }
}
