use gridstep::*;

fn main() {
    let mut builder = SceneBuilder::new(SceneConfig::default().with_cell_size(4.0));
    let pivot = builder.add_body(RigidBody::fixed(Vec3::new(0.0, 10.0, 0.0)));
    let bob = builder.add_body(RigidBody::new(Vec3::new(2.0, 10.0, 0.0), 1.0));

    let mut scene = match builder.build() {
        Ok(scene) => scene,
        Err(err) => {
            eprintln!("failed to build scene: {err}");
            return;
        }
    };
    // scene gravity reaches zero-mass bodies too, so only the bob gets it
    scene.set_gravity(Vec3::ZERO);
    let gravity = Vec3::new(0.0, -9.81, 0.0);

    let joints = [DistanceJoint::new(pivot, bob, 2.0)];
    let dt = scene.config().time_step;

    for tick in 0..240 {
        if let Some(body) = scene.body_mut(bob) {
            body.apply_gravity(gravity, dt);
        }
        if let Err(err) = scene.solve_joints(&joints) {
            eprintln!("joint solve failed: {err}");
            return;
        }
        scene.step(dt);

        if tick % 30 == 0 {
            if let Some(body) = scene.body(bob) {
                let length = (body.position - Vec3::new(0.0, 10.0, 0.0)).length();
                println!(
                    "t = {:.2}s bob = ({:.2}, {:.2}) rod length = {length:.3}",
                    tick as f32 * dt,
                    body.position.x,
                    body.position.y
                );
            }
        }
    }
}
