//! Physics collaborator
//!
//! The game only needs a narrow contract from a physics engine: register
//! bodies tagged with a `Category`, nudge the ball, step, and report
//! contact-begin events. `PhysicsEngine` is that contract. `BuiltinPhysics`
//! is a small deterministic implementation good enough for one dynamic
//! circle rolling over static geometry; hosts with a real engine implement
//! the trait themselves.

use std::collections::BTreeSet;

use glam::Vec2;

use super::collision::{ball_box_collision, ball_segment_collision, bounce_velocity, circles_overlap};
use super::contact::Category;
use super::state::EntityId;
use crate::consts::{BALL_MAX_SPEED, GRAVITY};

/// Tangential velocity lost per second of contact, per unit of combined friction
const FRICTION_DAMPING: f32 = 4.0;
/// Distance within which a resting body still counts as touching
const CONTACT_SLOP: f32 = 0.5;

/// The kind of body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    /// Moves under gravity and impulses
    Dynamic,
    /// Immovable, collides
    Fixed,
    /// Immovable, reports contacts without collision response
    Sensor,
}

/// Shape description for a body.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Box { half_size: Vec2 },
    /// Connected line segments through `points` (relative to the body position)
    EdgeChain { points: Vec<Vec2> },
}

/// Physical material properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub friction: f32,
    pub restitution: f32,
    pub mass: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            friction: 0.2,
            restitution: 0.2,
            mass: 1.0,
        }
    }
}

/// Everything needed to create a body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    pub category: Category,
    pub body_type: BodyType,
    pub shape: Shape,
    pub position: Vec2,
    pub material: Material,
}

impl BodyDesc {
    pub fn dynamic(category: Category, shape: Shape) -> Self {
        Self {
            category,
            body_type: BodyType::Dynamic,
            shape,
            position: Vec2::ZERO,
            material: Material::default(),
        }
    }

    pub fn fixed(category: Category, shape: Shape) -> Self {
        Self {
            body_type: BodyType::Fixed,
            ..Self::dynamic(category, shape)
        }
    }

    pub fn sensor(category: Category, shape: Shape) -> Self {
        Self {
            body_type: BodyType::Sensor,
            ..Self::dynamic(category, shape)
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }
}

/// A contact-begin event between two bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: EntityId,
    pub b: EntityId,
}

/// Host physics contract
pub trait PhysicsEngine {
    /// Remove every body
    fn clear(&mut self);

    /// Register a body under the caller's entity id
    fn create_body(&mut self, id: EntityId, desc: BodyDesc);

    /// Remove a body; false if unknown
    fn remove_body(&mut self, id: EntityId) -> bool;

    /// Instantaneous velocity change of `impulse / mass`; false if unknown or static
    fn apply_impulse(&mut self, id: EntityId, impulse: Vec2) -> bool;

    fn body_position(&self, id: EntityId) -> Option<Vec2>;

    fn body_count(&self) -> usize;

    /// Advance the simulation, appending contacts that began during this step
    fn step(&mut self, dt: f32, contacts: &mut Vec<Contact>);
}

#[derive(Debug, Clone)]
struct Body {
    id: EntityId,
    desc: BodyDesc,
    pos: Vec2,
    vel: Vec2,
}

/// Minimal deterministic engine: dynamic circles against static shapes
///
/// Dynamic bodies do not collide with each other.
#[derive(Debug, Clone)]
pub struct BuiltinPhysics {
    gravity: Vec2,
    /// Sorted by id for deterministic iteration
    bodies: Vec<Body>,
    /// Pairs (low id, high id) touching at the end of the last step
    touching: BTreeSet<(EntityId, EntityId)>,
}

impl Default for BuiltinPhysics {
    fn default() -> Self {
        Self::new(Vec2::new(0.0, GRAVITY))
    }
}

impl BuiltinPhysics {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            bodies: Vec::new(),
            touching: BTreeSet::new(),
        }
    }

    pub fn body_velocity(&self, id: EntityId) -> Option<Vec2> {
        self.find(id).map(|b| b.vel)
    }

    fn find(&self, id: EntityId) -> Option<&Body> {
        self.bodies
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|i| &self.bodies[i])
    }

    fn find_mut(&mut self, id: EntityId) -> Option<&mut Body> {
        self.bodies
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(move |i| &mut self.bodies[i])
    }
}

impl PhysicsEngine for BuiltinPhysics {
    fn clear(&mut self) {
        self.bodies.clear();
        self.touching.clear();
    }

    fn create_body(&mut self, id: EntityId, desc: BodyDesc) {
        let body = Body {
            id,
            pos: desc.position,
            vel: Vec2::ZERO,
            desc,
        };
        match self.bodies.binary_search_by_key(&id, |b| b.id) {
            Ok(i) => {
                log::warn!("Physics body {id} registered twice; replacing");
                self.bodies[i] = body;
            }
            Err(i) => self.bodies.insert(i, body),
        }
    }

    fn remove_body(&mut self, id: EntityId) -> bool {
        match self.bodies.binary_search_by_key(&id, |b| b.id) {
            Ok(i) => {
                self.bodies.remove(i);
                self.touching.retain(|&(a, b)| a != id && b != id);
                true
            }
            Err(_) => false,
        }
    }

    fn apply_impulse(&mut self, id: EntityId, impulse: Vec2) -> bool {
        match self.find_mut(id) {
            Some(body) if body.desc.body_type == BodyType::Dynamic => {
                let mass = body.desc.material.mass.max(0.0001);
                body.vel += impulse / mass;
                true
            }
            _ => false,
        }
    }

    fn body_position(&self, id: EntityId) -> Option<Vec2> {
        self.find(id).map(|b| b.pos)
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn step(&mut self, dt: f32, contacts: &mut Vec<Contact>) {
        let mut now_touching = BTreeSet::new();

        for i in 0..self.bodies.len() {
            if self.bodies[i].desc.body_type != BodyType::Dynamic {
                continue;
            }
            let Shape::Circle { radius } = self.bodies[i].desc.shape else {
                continue; // Only circles move
            };
            let id = self.bodies[i].id;
            let material = self.bodies[i].desc.material;

            // Semi-implicit Euler
            let mut vel = self.bodies[i].vel + self.gravity * dt;
            vel = vel.clamp_length_max(BALL_MAX_SPEED);
            let mut pos = self.bodies[i].pos + vel * dt;

            for other in &self.bodies {
                if other.id == id || other.desc.body_type == BodyType::Dynamic {
                    continue;
                }

                if other.desc.body_type == BodyType::Sensor {
                    if let Shape::Circle { radius: r } = other.desc.shape {
                        if circles_overlap(pos, radius, other.pos, r) {
                            now_touching.insert(ordered(id, other.id));
                        }
                    }
                    continue;
                }

                let friction = material.friction * other.desc.material.friction;
                let friction_loss = friction * FRICTION_DAMPING * dt;
                let mut touched = false;

                match &other.desc.shape {
                    Shape::Box { half_size } => {
                        let hit = ball_box_collision(pos, radius + CONTACT_SLOP, other.pos, *half_size);
                        if hit.hit {
                            touched = true;
                            let penetration = hit.penetration - CONTACT_SLOP;
                            if penetration > 0.0 {
                                pos += hit.normal * penetration;
                                vel = bounce_velocity(vel, hit.normal, material.restitution, friction_loss);
                            }
                        }
                    }
                    Shape::EdgeChain { points } => {
                        for seg in points.windows(2) {
                            let a = other.pos + seg[0];
                            let b = other.pos + seg[1];
                            let hit = ball_segment_collision(pos, radius + CONTACT_SLOP, vel, a, b);
                            if hit.hit {
                                touched = true;
                                let penetration = hit.penetration - CONTACT_SLOP;
                                if penetration > 0.0 {
                                    pos += hit.normal * penetration;
                                    vel = bounce_velocity(vel, hit.normal, material.restitution, friction_loss);
                                }
                            }
                        }
                    }
                    Shape::Circle { radius: r } => {
                        if circles_overlap(pos, radius + CONTACT_SLOP, other.pos, *r) {
                            touched = true;
                            let delta = pos - other.pos;
                            let normal = delta.normalize_or(Vec2::Y);
                            let penetration = radius + r - delta.length();
                            if penetration > 0.0 {
                                pos += normal * penetration;
                                vel = bounce_velocity(vel, normal, material.restitution, friction_loss);
                            }
                        }
                    }
                }

                if touched {
                    now_touching.insert(ordered(id, other.id));
                }
            }

            self.bodies[i].pos = pos;
            self.bodies[i].vel = vel;
        }

        for &(a, b) in now_touching.difference(&self.touching) {
            contacts.push(Contact { a, b });
        }
        self.touching = now_touching;
    }
}

#[inline]
fn ordered(a: EntityId, b: EntityId) -> (EntityId, EntityId) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn ball_desc(pos: Vec2) -> BodyDesc {
        BodyDesc::dynamic(Category::Ball, Shape::Circle { radius: 20.0 })
            .with_position(pos)
            .with_material(Material {
                friction: 0.5,
                restitution: 0.2,
                mass: 4.0,
            })
    }

    fn ground_desc() -> BodyDesc {
        BodyDesc::fixed(
            Category::Ground,
            Shape::Box {
                half_size: Vec2::new(400.0, 10.0),
            },
        )
        .with_position(Vec2::new(400.0, 10.0))
    }

    #[test]
    fn test_ball_falls_and_rests_on_ground() {
        let mut physics = BuiltinPhysics::default();
        physics.create_body(1, ground_desc());
        physics.create_body(2, ball_desc(Vec2::new(400.0, 200.0)));

        let mut contacts = Vec::new();
        for _ in 0..(3.0 / SIM_DT) as usize {
            physics.step(SIM_DT, &mut contacts);
        }

        let pos = physics.body_position(2).unwrap();
        assert!((pos.y - 40.0).abs() < 2.0, "ball should rest on ground, y = {}", pos.y);
        // Bounces may re-touch, but a resting ball is not re-reported each tick
        assert!(!contacts.is_empty());
        assert!(contacts.len() < 10);
        assert!(contacts.iter().all(|c| *c == Contact { a: 1, b: 2 }));
    }

    #[test]
    fn test_ball_rolls_down_edge_chain() {
        let mut physics = BuiltinPhysics::default();
        physics.create_body(
            1,
            BodyDesc::fixed(
                Category::Path,
                Shape::EdgeChain {
                    points: vec![Vec2::new(100.0, 400.0), Vec2::new(300.0, 300.0)],
                },
            ),
        );
        physics.create_body(2, ball_desc(Vec2::new(105.0, 420.0)));

        let mut contacts = Vec::new();
        for _ in 0..(0.3 / SIM_DT) as usize {
            physics.step(SIM_DT, &mut contacts);
        }

        let pos = physics.body_position(2).unwrap();
        assert!(pos.x > 110.0, "ball should roll right, x = {}", pos.x);
        assert!(pos.y < 420.0);
        assert!(pos.y > 300.0, "ball should stay on the path, y = {}", pos.y);
        assert_eq!(contacts.first(), Some(&Contact { a: 1, b: 2 }));
    }

    #[test]
    fn test_sensor_reports_without_response() {
        let mut physics = BuiltinPhysics::new(Vec2::ZERO);
        physics.create_body(
            1,
            BodyDesc::sensor(Category::Collectible, Shape::Circle { radius: 10.0 })
                .with_position(Vec2::new(60.0, 0.0)),
        );
        physics.create_body(2, ball_desc(Vec2::ZERO));
        assert!(physics.apply_impulse(2, Vec2::new(4.0 * 600.0, 0.0)));

        let mut contacts = Vec::new();
        for _ in 0..30 {
            physics.step(SIM_DT, &mut contacts);
        }

        assert_eq!(contacts, vec![Contact { a: 1, b: 2 }]);
        // Passed straight through
        assert!(physics.body_velocity(2).unwrap().x > 599.0);
    }

    #[test]
    fn test_impulse_only_moves_dynamic_bodies() {
        let mut physics = BuiltinPhysics::default();
        physics.create_body(1, ground_desc());
        physics.create_body(2, ball_desc(Vec2::new(400.0, 300.0)));

        assert!(!physics.apply_impulse(1, Vec2::X));
        assert!(!physics.apply_impulse(99, Vec2::X));
        assert!(physics.apply_impulse(2, Vec2::new(500.0, 0.0)));
        assert_eq!(physics.body_velocity(2), Some(Vec2::new(125.0, 0.0)));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut physics = BuiltinPhysics::default();
        physics.create_body(1, ground_desc());
        physics.create_body(2, ball_desc(Vec2::new(400.0, 300.0)));
        assert_eq!(physics.body_count(), 2);

        assert!(physics.remove_body(2));
        assert!(!physics.remove_body(2));
        assert_eq!(physics.body_count(), 1);

        physics.clear();
        assert_eq!(physics.body_count(), 0);
        assert!(physics.body_position(1).is_none());
    }
}
