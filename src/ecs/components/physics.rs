//! Physics components for ECS entities.

use glam::Vec3;

/// Rigid body type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigidBodyType {
    /// Affected by gravity, forces and collision impulses.
    Dynamic,
    /// Moved only by user code. Still collides, but is never pushed.
    Kinematic,
}

/// Sleep state of a rigid body.
///
/// Carried for scene data compatibility; the solver never transitions it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SleepState {
    #[default]
    Awake,
    Sleeping,
}

/// Rigid body component.
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub body_type: RigidBodyType,
    /// Mass in kilograms. Must be greater than zero.
    pub mass: f32,
    pub linear_velocity: Vec3,
    /// Tracked but not integrated.
    pub angular_velocity: Vec3,
    pub force_accumulator: Vec3,
    pub torque_accumulator: Vec3,
    /// Linear drag coefficient (default: 0.0).
    pub drag: f32,
    /// Angular drag coefficient (default: 0.05).
    pub angular_drag: f32,
    pub use_gravity: bool,
    pub freeze_rotation: bool,
    pub sleep_state: SleepState,
    pub sleep_timer: f32,
}

impl RigidBody {
    /// Create a new dynamic rigid body with the given mass.
    pub fn new_dynamic(mass: f32) -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            mass,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            force_accumulator: Vec3::ZERO,
            torque_accumulator: Vec3::ZERO,
            drag: 0.0,
            angular_drag: 0.05,
            use_gravity: true,
            freeze_rotation: false,
            sleep_state: SleepState::Awake,
            sleep_timer: 0.0,
        }
    }

    /// Create a new kinematic rigid body. Gravity is off; the step never moves it.
    pub fn new_kinematic(mass: f32) -> Self {
        Self {
            body_type: RigidBodyType::Kinematic,
            use_gravity: false,
            ..Self::new_dynamic(mass)
        }
    }

    #[inline]
    pub fn is_kinematic(&self) -> bool {
        self.body_type == RigidBodyType::Kinematic
    }

    /// Inverse mass, or zero for kinematic bodies.
    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        if self.is_kinematic() {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.linear_velocity.length()
    }

    /// Accumulate a force for the next integration step.
    pub fn add_force(&mut self, force: Vec3) {
        self.force_accumulator += force;
    }

    /// Accumulate a torque. Cleared every step, never integrated.
    pub fn add_torque(&mut self, torque: Vec3) {
        self.torque_accumulator += torque;
    }

    /// Apply an instantaneous change of momentum. Ignored for kinematic bodies.
    pub fn add_impulse(&mut self, impulse: Vec3) {
        if !self.is_kinematic() {
            self.linear_velocity += impulse / self.mass;
        }
    }
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new_dynamic(1.0)
    }
}

/// Collider shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ColliderShape {
    /// Box with full local extents `size`.
    Box { size: Vec3 },
    Sphere { radius: f32 },
    /// Declared only; never collides.
    Capsule { radius: f32, height: f32 },
    /// Declared only; never collides.
    Mesh,
    None,
}

/// Field-less tag of a [`ColliderShape`], used to index the narrowphase table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Box = 0,
    Sphere = 1,
    Capsule = 2,
    Mesh = 3,
    None = 4,
}

impl ShapeKind {
    pub const COUNT: usize = 5;

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl ColliderShape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ColliderShape::Box { .. } => ShapeKind::Box,
            ColliderShape::Sphere { .. } => ShapeKind::Sphere,
            ColliderShape::Capsule { .. } => ShapeKind::Capsule,
            ColliderShape::Mesh => ShapeKind::Mesh,
            ColliderShape::None => ShapeKind::None,
        }
    }
}

/// Surface properties of a collider.
///
/// Not consulted by the solver, which uses fixed restitution and no friction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsMaterial {
    pub bounciness: f32,
    pub static_friction: f32,
    pub dynamic_friction: f32,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            bounciness: 0.0,
            static_friction: 0.6,
            dynamic_friction: 0.6,
        }
    }
}

/// Collision detection component.
#[derive(Debug, Clone)]
pub struct Collider {
    pub shape: ColliderShape,
    /// Offset from the entity's transform origin. Not rotated.
    pub offset: Vec3,
    /// If true, reports overlaps but gets no physical response.
    pub is_trigger: bool,
    pub enabled: bool,
    /// Declared; broadphase does not filter on it.
    pub layer_mask: u32,
    pub material: PhysicsMaterial,
}

impl Collider {
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            offset: Vec3::ZERO,
            is_trigger: false,
            enabled: true,
            layer_mask: u32::MAX,
            material: PhysicsMaterial::default(),
        }
    }

    /// Box collider with full extents `size`.
    pub fn cuboid(size: Vec3) -> Self {
        Self::new(ColliderShape::Box { size })
    }

    pub fn sphere(radius: f32) -> Self {
        Self::new(ColliderShape::Sphere { radius })
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self::cuboid(Vec3::ONE)
    }
}
