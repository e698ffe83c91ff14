use std::time::Instant;

use glam::Vec3;

use crate::{
    collision::{
        broadphase::SpatialHashGrid,
        contact::{ContactModel, UnitRestLength},
        queries::{cast_segment, RayHit},
    },
    config::SceneConfig,
    core::{constraints::DistanceJoint, rigidbody::RigidBody},
    dynamics::{
        integrator::Integrator,
        solver::{ConstraintSolver, ContactReport},
    },
    error::{PhysicsError, Result},
    utils::{
        allocator::{Arena, BodyHandle},
        logging::{warn_if_tick_budget_exceeded, ScopedTimer},
        profiling::{PhaseTimer, TickProfile},
    },
};

/// Owns the bodies and runs the per-tick pipeline over them.
///
/// The body count is fixed once the scene is built. Collaborators read
/// poses after each tick and may edit velocity or position in between
/// through [`Scene::body_mut`].
#[derive(Debug)]
pub struct Scene {
    bodies: Arena<RigidBody>,
    gravity: Vec3,
    grid: SpatialHashGrid,
    integrator: Integrator,
    solver: ConstraintSolver,
    contact_model: Box<dyn ContactModel>,
    config: SceneConfig,
    time_accumulated: f32,
    tick_count: u64,
    profile: TickProfile,
    last_contacts: ContactReport,
}

impl Scene {
    pub fn new(config: SceneConfig, bodies: Vec<RigidBody>) -> Result<Self> {
        Self::with_contact_model(config, bodies, Box::new(UnitRestLength::default()))
    }

    pub fn builder() -> SceneBuilder {
        SceneBuilder::new(SceneConfig::default())
    }

    pub fn with_contact_model(
        config: SceneConfig,
        bodies: Vec<RigidBody>,
        contact_model: Box<dyn ContactModel>,
    ) -> Result<Self> {
        Self::from_arena(config, Arena::from(bodies), contact_model)
    }

    fn from_arena(
        config: SceneConfig,
        bodies: Arena<RigidBody>,
        contact_model: Box<dyn ContactModel>,
    ) -> Result<Self> {
        if let Err(err) = config.validate() {
            log::warn!("scene configuration rejected: {err}");
            return Err(err);
        }

        log::debug!(
            "scene created: {} bodies, cell size {}, {} buckets, contact model {}",
            bodies.len(),
            config.cell_size,
            config.bucket_count,
            contact_model.name()
        );

        Ok(Self {
            bodies,
            gravity: config.gravity_vec(),
            grid: SpatialHashGrid::new(config.cell_size, config.bucket_count),
            integrator: Integrator::new(),
            solver: ConstraintSolver::new(),
            contact_model,
            config,
            time_accumulated: 0.0,
            tick_count: 0,
            profile: TickProfile::default(),
            last_contacts: ContactReport::default(),
        })
    }

    /// Runs one tick: gravity, integration, grid rebuild, contact resolution.
    pub fn step(&mut self, dt: f32) -> ContactReport {
        let tick_start = Instant::now();
        let mut profile = TickProfile {
            body_count: self.bodies.len(),
            ..Default::default()
        };

        {
            let _trace = ScopedTimer::new("integrate");
            let _timer = PhaseTimer::new(&mut profile.integrate_time);
            self.integrator.step(&mut self.bodies, self.gravity, dt);
        }
        {
            let _trace = ScopedTimer::new("grid::rebuild");
            let _timer = PhaseTimer::new(&mut profile.grid_rebuild_time);
            self.grid.rebuild(&self.bodies);
        }
        let report = {
            let _trace = ScopedTimer::new("contacts::resolve");
            let _timer = PhaseTimer::new(&mut profile.contact_time);
            self.solver
                .resolve_contacts(&mut self.bodies, &self.grid, self.contact_model.as_ref())
        };

        profile.occupied_cells = self.grid.occupied_cells();
        profile.pairs_tested = report.pairs_tested;
        profile.impulses_applied = report.impulses_applied;
        profile.total_time = tick_start.elapsed();
        warn_if_tick_budget_exceeded(profile.total_time, self.config.tick_budget_ms);

        self.profile = profile;
        self.last_contacts = report;
        self.tick_count += 1;
        report
    }

    /// Feeds frame time into the fixed-timestep accumulator and runs the
    /// ticks it covers. Returns the number of ticks run.
    ///
    /// At most `max_ticks_per_frame` ticks run per call; any backlog beyond
    /// that is dropped, keeping only the sub-tick remainder.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let step = self.config.time_step;
        self.time_accumulated += frame_dt.max(0.0);

        let mut ticks = 0;
        while self.time_accumulated >= step && ticks < self.config.max_ticks_per_frame {
            self.time_accumulated -= step;
            self.step(step);
            ticks += 1;
        }

        if self.time_accumulated >= step {
            log::warn!(
                "dropping {:.3} s of simulation backlog after {ticks} ticks",
                self.time_accumulated - self.time_accumulated % step
            );
            self.time_accumulated %= step;
        }
        ticks
    }

    /// Applies one correction per joint, in order.
    pub fn solve_joints(&mut self, joints: &[DistanceJoint]) -> Result<()> {
        let _trace = ScopedTimer::new("joints::solve");
        self.solver.solve_joints(&mut self.bodies, joints)
    }

    /// Bodies in the 3×3×3 cell block around `handle`, as of the last rebuild.
    pub fn neighbours(&self, handle: BodyHandle) -> Result<Vec<BodyHandle>> {
        let body = self
            .bodies
            .get(handle)
            .ok_or(PhysicsError::BodyNotFound(handle))?;
        Ok(self.grid.query_nearby(handle, body.position))
    }

    /// Bodies whose bounding sphere the segment `start..end` crosses, nearest
    /// first, as of the last rebuild.
    pub fn raycast(&self, start: Vec3, end: Vec3) -> Vec<RayHit> {
        let _trace = ScopedTimer::new("queries::raycast");
        cast_segment(&self.grid, &self.bodies, start, end)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    pub fn bodies(&self) -> &[RigidBody] {
        self.bodies.as_slice()
    }

    pub fn bodies_mut(&mut self) -> &mut [RigidBody] {
        self.bodies.as_mut_slice()
    }

    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> {
        self.bodies.handles()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn grid(&self) -> &SpatialHashGrid {
        &self.grid
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn contact_model(&self) -> &dyn ContactModel {
        self.contact_model.as_ref()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn time_accumulated(&self) -> f32 {
        self.time_accumulated
    }

    pub fn last_profile(&self) -> &TickProfile {
        &self.profile
    }

    pub fn last_contacts(&self) -> ContactReport {
        self.last_contacts
    }
}

/// Collects bodies and settings before the body count is frozen.
#[derive(Debug)]
pub struct SceneBuilder {
    config: SceneConfig,
    bodies: Arena<RigidBody>,
    contact_model: Box<dyn ContactModel>,
}

impl SceneBuilder {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            bodies: Arena::new(),
            contact_model: Box::new(UnitRestLength::default()),
        }
    }

    pub fn gravity(mut self, gravity: Vec3) -> Self {
        self.config.gravity = gravity.to_array();
        self
    }

    pub fn cell_size(mut self, cell_size: f32) -> Self {
        self.config.cell_size = cell_size;
        self
    }

    pub fn bucket_count(mut self, bucket_count: usize) -> Self {
        self.config.bucket_count = bucket_count;
        self
    }

    pub fn time_step(mut self, time_step: f32) -> Self {
        self.config.time_step = time_step;
        self
    }

    pub fn contact_model<M>(mut self, model: M) -> Self
    where
        M: ContactModel + 'static,
    {
        self.contact_model = Box::new(model);
        self
    }

    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        self.bodies.insert(body)
    }

    pub fn with_body(mut self, body: RigidBody) -> Self {
        self.bodies.insert(body);
        self
    }

    pub fn build(self) -> Result<Scene> {
        Scene::from_arena(self.config, self.bodies, self.contact_model)
    }
}
