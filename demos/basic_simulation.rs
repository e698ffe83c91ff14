use gridstep::*;

fn main() {
    let mut builder = Scene::builder().gravity(Vec3::ZERO);

    let ground = builder.add_body(RigidBody::fixed(Vec3::new(0.5, 0.0, 0.5)));

    let ball = builder.add_body(
        RigidBody::new(Vec3::new(0.5, 3.0, 0.5), 1.0)
            .with_angular_velocity(Vec3::new(0.0, 2.0, 0.0))
            .with_shape(CollisionShape::sphere(0.5)),
    );

    let mut scene = match builder.build() {
        Ok(scene) => scene,
        Err(err) => {
            eprintln!("failed to build scene: {err}");
            return;
        }
    };
    // scene gravity reaches zero-mass bodies too, so only the ball gets it
    let gravity = Vec3::new(0.0, -9.81, 0.0);
    let dt = scene.config().time_step;

    for tick in 0..60 {
        if let Some(body) = scene.body_mut(ball) {
            body.apply_gravity(gravity, dt);
        }
        scene.step(dt);

        if tick % 10 == 0 {
            scene.last_profile().log_summary();
            if let Some(body) = scene.body(ball) {
                println!(
                    "tick {tick:2}: ball y = {:.3}, rotation = {:?}",
                    body.position.y, body.rotation
                );
            }
        }
    }

    if let Some(body) = scene.body(ground) {
        println!("ground velocity after run: {:?}", body.velocity);
    }

    let hits = scene.raycast(Vec3::new(0.5, 5.0, 0.5), Vec3::new(0.5, -5.0, 0.5));
    for hit in hits {
        println!("ray hit {:?} at {:.3}", hit.body, hit.distance);
    }
}
