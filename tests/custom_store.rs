//! Stepping a store that is not `hecs`: a slot arena keyed by index.

use glam::Vec3;
use rein_physics::{
    BodyState, Collider, ColliderEntry, PhysicsConfig, PhysicsStore, PhysicsWorld, RigidBody,
    Transform,
};

#[derive(Default)]
struct Slot {
    transform: Transform,
    body: Option<RigidBody>,
    collider: Option<Collider>,
}

#[derive(Default)]
struct SlotStore {
    slots: Vec<Option<Slot>>,
}

impl SlotStore {
    fn spawn(&mut self, transform: Transform) -> usize {
        self.slots.push(Some(Slot {
            transform,
            ..Slot::default()
        }));
        self.slots.len() - 1
    }

    fn remove(&mut self, entity: usize) {
        self.slots[entity] = None;
    }

    fn slot(&self, entity: usize) -> Option<&Slot> {
        self.slots.get(entity).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, entity: usize) -> Option<&mut Slot> {
        self.slots.get_mut(entity).and_then(Option::as_mut)
    }
}

impl PhysicsStore for SlotStore {
    type Entity = usize;

    fn contains(&self, entity: usize) -> bool {
        self.slot(entity).is_some()
    }

    fn collect_colliders(&self, out: &mut Vec<ColliderEntry<usize>>) {
        for (entity, slot) in self.slots.iter().enumerate() {
            let Some(slot) = slot else { continue };
            let Some(collider) = &slot.collider else {
                continue;
            };
            out.push(ColliderEntry {
                entity,
                transform: slot.transform,
                collider: collider.clone(),
                body: slot.body.as_ref().map(|rb| BodyState {
                    linear_velocity: rb.linear_velocity,
                    is_kinematic: rb.is_kinematic(),
                }),
            });
        }
    }

    fn for_each_body<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, &mut Transform, &mut RigidBody, Option<&Collider>),
    {
        for (entity, slot) in self.slots.iter_mut().enumerate() {
            let Some(slot) = slot else { continue };
            if let Some(rb) = slot.body.as_mut() {
                f(entity, &mut slot.transform, rb, slot.collider.as_ref());
            }
        }
    }

    fn with_body<R, F>(&mut self, entity: usize, f: F) -> Option<R>
    where
        F: FnOnce(&mut Transform, &mut RigidBody) -> R,
    {
        let slot = self.slot_mut(entity)?;
        let rb = slot.body.as_mut()?;
        Some(f(&mut slot.transform, rb))
    }

    fn transform(&self, entity: usize) -> Option<Transform> {
        self.slot(entity).map(|slot| slot.transform)
    }

    fn rigid_body(&self, entity: usize) -> Option<RigidBody> {
        self.slot(entity)?.body.clone()
    }

    fn insert_rigid_body(&mut self, entity: usize, body: RigidBody) -> bool {
        match self.slot_mut(entity) {
            Some(slot) => {
                slot.body = Some(body);
                true
            }
            None => false,
        }
    }

    fn insert_collider(&mut self, entity: usize, collider: Collider) -> bool {
        match self.slot_mut(entity) {
            Some(slot) => {
                slot.collider = Some(collider);
                true
            }
            None => false,
        }
    }
}

#[test]
fn test_body_lands_on_static_box() {
    let mut store = SlotStore::default();

    let ground = store.spawn(Transform::from_position(Vec3::new(0.0, -0.5, 0.0)));
    assert!(store.insert_collider(ground, Collider::cuboid(Vec3::new(10.0, 1.0, 10.0))));

    let ball = store.spawn(Transform::from_position(Vec3::new(0.0, 0.45, 0.0)));
    assert!(store.insert_rigid_body(ball, RigidBody::new_dynamic(1.0)));
    assert!(store.insert_collider(ball, Collider::sphere(0.5)));
    assert!(store.has_rigid_body(ball));
    assert!(!store.has_rigid_body(ground));

    let mut physics: PhysicsWorld<usize> = PhysicsWorld::new(PhysicsConfig::default());
    physics.fixed_step(&mut store);

    let hit = &physics.collisions()[0];
    assert_eq!((hit.entity_a, hit.entity_b), (ground, ball));
    assert!(hit.normal.y > 0.99);

    // Ground is immovable; the ball is pushed up by positional correction.
    assert_eq!(
        store.transform(ground).unwrap().position,
        Vec3::new(0.0, -0.5, 0.0)
    );
    let rb = store.rigid_body(ball).unwrap();
    let expected = 0.45 + (0.05 - 0.01) * 0.2 * 4.0 + rb.linear_velocity.y / 60.0;
    assert!((store.transform(ball).unwrap().position.y - expected).abs() < 1e-4);
}

#[test]
fn test_removed_entities_are_skipped() {
    let mut store = SlotStore::default();
    let a = store.spawn(Transform::identity());
    store.insert_collider(a, Collider::sphere(0.5));
    let b = store.spawn(Transform::identity());
    store.insert_collider(b, Collider::sphere(0.5));
    store.remove(a);

    assert!(!store.contains(a));
    assert!(!store.insert_collider(a, Collider::sphere(1.0)));

    let mut physics: PhysicsWorld<usize> = PhysicsWorld::new(PhysicsConfig::default());
    assert_eq!(physics.advance(&mut store, 1.0 / 60.0), 1);
    assert!(physics.collisions().is_empty());
}
