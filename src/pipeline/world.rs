use crate::bounding_volume::BoundingVolume;
use crate::math::{Isometry, Real, Rotation};
use crate::partitioning::AabbTree;
use crate::pipeline::{
    BroadPhase, Collider, ColliderHandle, ColliderId, ColliderPair, ColliderSet, CollisionManifold,
    DebugDrawFlags, DebugDrawSink, IdAllocator, NarrowPhase, PositionSolver, VelocitySolver,
    WorldSettings,
};

/// A collection of colliders stepped through the collision detection and resolution pipeline.
///
/// Each step runs, in order: the broadphase, the narrowphase (building the contact manifolds),
/// gravity, the velocity solver, integration, the refresh of the contact depths, the position
/// solver, velocity damping, and finally the refit of the broadphase tree.
#[derive(Clone, Debug)]
pub struct CollisionWorld {
    pub(crate) colliders: ColliderSet,
    pub(crate) tree: AabbTree<ColliderHandle>,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    velocity_solver: VelocitySolver,
    position_solver: PositionSolver,
    manifolds: Vec<CollisionManifold>,
    pairs: Vec<ColliderPair>,
    id_allocator: IdAllocator,
    settings: WorldSettings,
    time_accumulator: Real,
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new(WorldSettings::default())
    }
}

impl CollisionWorld {
    /// An empty world.
    pub fn new(settings: WorldSettings) -> Self {
        Self {
            colliders: ColliderSet::new(),
            tree: AabbTree::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            velocity_solver: VelocitySolver::new(),
            position_solver: PositionSolver::new(),
            manifolds: Vec::new(),
            pairs: Vec::new(),
            id_allocator: IdAllocator::new(),
            settings,
            time_accumulator: 0.0,
        }
    }

    /// The parameters of this world.
    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    /// The parameters of this world.
    pub fn settings_mut(&mut self) -> &mut WorldSettings {
        &mut self.settings
    }

    /// Adds a collider to this world.
    ///
    /// The collider gets a fresh id, its inertia is computed, and it is inserted in the
    /// broadphase tree and marked as moved.
    pub fn add_collider(&mut self, collider: impl Into<Collider>) -> ColliderHandle {
        let mut collider = collider.into();
        collider.id = self.id_allocator.allocate();
        collider.update_mass_properties();
        collider.prev_position = collider.position;
        collider.dirty_index = None;

        let aabb = collider
            .compute_aabb()
            .loosened(self.settings.contact_prediction);
        let handle = self.colliders.insert(collider);
        let slot = self.tree.add(aabb, handle);

        if let Some(collider) = self.colliders.get_mut(handle) {
            collider.tree_slot = Some(slot);
        }

        self.broad_phase.mark_dirty(handle, &mut self.colliders);
        handle
    }

    /// Removes a collider from this world, with all its contact manifolds.
    pub fn remove_collider(&mut self, handle: ColliderHandle) -> Option<Collider> {
        self.broad_phase.unmark(handle, &mut self.colliders);
        let mut collider = self.colliders.remove(handle)?;

        if let Some(slot) = collider.tree_slot.take() {
            let _ = self.tree.remove(slot);
            self.tree.update();
        }

        self.manifolds
            .retain(|m| m.collider_a != handle && m.collider_b != handle);
        self.pairs
            .retain(|p| p.first != handle && p.second != handle);
        self.narrow_phase.remove_collider(handle);
        collider.id = ColliderId::INVALID;
        Some(collider)
    }

    /// Notifies the world that a collider moved outside of [`CollisionWorld::step`].
    pub fn mark_as_externally_transformed(&mut self, handle: ColliderHandle) {
        self.broad_phase.mark_dirty(handle, &mut self.colliders);
    }

    /// Teleports a collider and refits its broadphase leaf immediately.
    ///
    /// Returns `false` if the handle is invalid.
    pub fn set_collider_position(&mut self, handle: ColliderHandle, position: Isometry<Real>) -> bool {
        let Some(collider) = self.colliders.get_mut(handle) else {
            return false;
        };

        collider.position = position;
        collider.prev_position = position;

        if let Some(slot) = collider.tree_slot {
            let aabb = collider
                .compute_aabb()
                .loosened(self.settings.contact_prediction);
            self.tree.set_leaf_aabb(slot, aabb);
            self.tree.update();
        }

        self.broad_phase.mark_dirty(handle, &mut self.colliders);
        true
    }

    /// The collider referred to by `handle`.
    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle)
    }

    /// The collider referred to by `handle`.
    ///
    /// Moving it requires [`CollisionWorld::set_collider_position`]; the velocities and
    /// material properties can be changed freely.
    pub fn collider_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.colliders.get_mut(handle)
    }

    /// The colliders of this world.
    pub fn colliders(&self) -> &ColliderSet {
        &self.colliders
    }

    /// The broadphase tree of this world.
    pub fn tree(&self) -> &AabbTree<ColliderHandle> {
        &self.tree
    }

    /// The contact manifolds computed by the last step.
    pub fn manifolds(&self) -> &[CollisionManifold] {
        &self.manifolds
    }

    /// The contact manifolds of the last step involving the given collider.
    pub fn contacts_with(
        &self,
        handle: ColliderHandle,
    ) -> impl Iterator<Item = &CollisionManifold> + '_ {
        self.manifolds
            .iter()
            .filter(move |m| m.collider_a == handle || m.collider_b == handle)
    }

    /// The candidate pairs found by the broadphase during the last step.
    pub fn pairs(&self) -> &[ColliderPair] {
        &self.pairs
    }

    /// Advances the simulation by `dt` seconds.
    pub fn step(&mut self, dt: Real) {
        let settings = self.settings;

        // Broadphase.
        self.pairs.clear();
        self.broad_phase
            .update_tree(&self.colliders, &mut self.tree, settings.contact_prediction);
        self.broad_phase
            .find_pairs(&self.colliders, &self.tree, &mut self.pairs);
        self.broad_phase.clear(&mut self.colliders);

        // Narrowphase.
        self.narrow_phase.update(
            &self.pairs,
            &self.colliders,
            &settings,
            &mut self.manifolds,
        );
        log::trace!(
            "{} candidate pairs, {} manifolds.",
            self.pairs.len(),
            self.manifolds.len()
        );

        // Gravity.
        for (_, collider) in self.colliders.iter_mut() {
            if collider.is_dynamic() {
                collider.linvel += settings.gravity * (collider.gravity_scale * dt);
            }
        }

        // Velocity solver.
        self.velocity_solver
            .init(&mut self.manifolds, &self.colliders, &settings, dt);
        self.velocity_solver
            .warm_start(&self.manifolds, &mut self.colliders);
        self.velocity_solver.solve(
            &mut self.manifolds,
            &mut self.colliders,
            settings.velocity_iterations,
        );

        // Integration.
        self.integrate(dt);

        // Depths after integration.
        for manifold in &mut self.manifolds {
            let (Some(a), Some(b)) = (
                self.colliders.get(manifold.collider_a),
                self.colliders.get(manifold.collider_b),
            ) else {
                continue;
            };
            manifold.refresh(&a.position, &b.position);
        }

        // Position correction.
        self.position_solver
            .solve(&self.manifolds, &mut self.colliders, &settings);

        // Damping.
        let lin_damping = 1.0 / (1.0 + dt * settings.linear_damping);
        let ang_damping = 1.0 / (1.0 + dt * settings.angular_damping);
        for (_, collider) in self.colliders.iter_mut() {
            if collider.is_dynamic() {
                collider.linvel *= lin_damping;
                collider.angvel *= ang_damping;
            }
        }

        // The moved colliders are refit now so queries see their new positions.
        self.broad_phase
            .update_tree(&self.colliders, &mut self.tree, settings.contact_prediction);
    }

    /// Accumulates `elapsed` seconds and runs as many steps of `fixed_dt` as fit, up to
    /// `max_substeps`.
    ///
    /// Returns the number of steps that were run. Time that could not be simulated because of
    /// the step limit is dropped.
    pub fn step_fixed(&mut self, elapsed: Real) -> usize {
        let dt = self.settings.fixed_dt;

        if dt <= 0.0 {
            return 0;
        }

        self.time_accumulator += elapsed.max(0.0);
        let mut steps = 0;

        while self.time_accumulator >= dt && steps < self.settings.max_substeps {
            self.step(dt);
            self.time_accumulator -= dt;
            steps += 1;
        }

        if steps == self.settings.max_substeps {
            self.time_accumulator = self.time_accumulator.min(dt);
        }

        steps
    }

    fn integrate(&mut self, dt: Real) {
        let mut moved = Vec::new();

        for (handle, collider) in self.colliders.iter_mut() {
            if !collider.is_dynamic() {
                continue;
            }

            collider.prev_position = collider.position;
            collider.position.translation.vector += collider.linvel * dt;
            let delta = Rotation::from_scaled_axis(collider.angvel * dt);
            collider.position.rotation =
                Rotation::new_normalize((delta * collider.position.rotation).into_inner());
            moved.push(handle);
        }

        for handle in moved {
            self.broad_phase.mark_dirty(handle, &mut self.colliders);
        }
    }

    /// Sends debug-rendering primitives to `sink`.
    pub fn debug_draw(&self, sink: &mut dyn DebugDrawSink, flags: DebugDrawFlags) {
        if flags.contains(DebugDrawFlags::TREE_NODES) {
            self.tree.for_each_node(|aabb, _, is_leaf| {
                let color = if is_leaf {
                    [0.2, 0.8, 0.2, 1.0]
                } else {
                    [0.5, 0.5, 0.5, 0.5]
                };
                sink.draw_aabb(aabb, color);
            });
        }

        if flags.contains(DebugDrawFlags::COLLIDER_AABBS) {
            for (_, collider) in self.colliders.iter() {
                sink.draw_aabb(&collider.compute_aabb(), [0.9, 0.6, 0.1, 1.0]);
            }
        }

        if flags.contains(DebugDrawFlags::CONTACTS) {
            for manifold in &self.manifolds {
                for pt in &manifold.points {
                    sink.draw_contact(&pt.world_a, &pt.solver_normal(), pt.depth);
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::CollisionWorld;
    use crate::math::{Isometry, Point, Real, Vector};
    use crate::pipeline::{ColliderBuilder, CollisionGroups, WorldSettings};

    #[test]
    fn step_fixed_is_capped() {
        let mut world = CollisionWorld::new(WorldSettings {
            fixed_dt: 0.01,
            max_substeps: 3,
            ..WorldSettings::default()
        });

        assert_eq!(world.step_fixed(0.025), 2);
        assert_eq!(world.step_fixed(0.006), 1);
        assert_eq!(world.step_fixed(1.0), 3);
        assert_eq!(world.step_fixed(0.0), 1);
        assert_eq!(world.step_fixed(-1.0), 0);
    }

    #[test]
    fn removed_colliders_leave_no_trace() {
        let mut world = CollisionWorld::default();
        let ground = world.add_collider(ColliderBuilder::cuboid(5.0, 0.5, 5.0).fixed());
        let ball = world.add_collider(
            ColliderBuilder::ball(0.5).translation(Vector::new(0.0, 0.95, 0.0)),
        );
        world.step(1.0 / 60.0);
        assert_eq!(world.contacts_with(ball).count(), 1);

        let removed = world.remove_collider(ball).unwrap();
        assert_eq!(removed.shape().kind(), crate::shape::ShapeKind::Ball);
        assert!(world.collider(ball).is_none());
        assert!(world.remove_collider(ball).is_none());
        assert_eq!(world.contacts_with(ground).count(), 0);
        assert_eq!(world.tree().leaf_count(), 1);
        world.tree().assert_well_formed();

        world.step(1.0 / 60.0);
        assert!(world.manifolds().is_empty());
    }

    #[test]
    fn teleported_collider_is_visible_to_queries() {
        let mut world = CollisionWorld::default();
        let ball = world.add_collider(ColliderBuilder::ball(0.5).fixed());
        assert!(world.set_collider_position(ball, Isometry::translation(10.0, 0.0, 0.0)));

        let hit = world.ray_test(
            &Point::new(10.0, 5.0, 0.0),
            &Point::new(10.0, -5.0, 0.0),
            CollisionGroups::all(),
        );
        assert!(hit.has_hit);
        assert_eq!(hit.collider, Some(ball));
        assert_relative_eq!(hit.distance, 4.5 as Real, epsilon = 1.0e-4);
    }
}
