//! Collision detection and response for circles against static geometry
//!
//! The ball is the only moving body. Everything it can hit is static: the
//! drawn path (a chain of line segments), the ground box and collectible
//! circles (overlap only, no response).

use glam::Vec2;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal at collision (pointing toward ball center, for reflection)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Closest point to `p` on the segment `a`-`b`
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let line_vec = b - a;
    let line_len_sq = line_vec.length_squared();
    if line_len_sq < 0.0001 {
        return a; // Degenerate segment
    }
    let t = ((p - a).dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    a + line_vec * t
}

/// Check collision between a ball and a single edge segment
///
/// `vel` picks the side when the ball center lies exactly on the segment:
/// the normal then opposes the direction of travel.
pub fn ball_segment_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    vel: Vec2,
    a: Vec2,
    b: Vec2,
) -> CollisionResult {
    let closest = closest_point_on_segment(ball_pos, a, b);
    let delta = ball_pos - closest;
    let dist = delta.length();

    if dist >= ball_radius {
        return CollisionResult::miss();
    }

    let normal = if dist > 0.0001 {
        delta / dist
    } else {
        // Ball center is on the line - use perpendicular facing against motion
        let perp = (b - a).perp().normalize_or(Vec2::Y);
        if perp.dot(vel) > 0.0 { -perp } else { perp }
    };

    CollisionResult {
        hit: true,
        normal,
        penetration: ball_radius - dist,
    }
}

/// Check collision between a ball and an axis-aligned box
pub fn ball_box_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    center: Vec2,
    half_size: Vec2,
) -> CollisionResult {
    let closest = ball_pos.clamp(center - half_size, center + half_size);
    let delta = ball_pos - closest;
    let dist = delta.length();

    if dist >= ball_radius {
        return CollisionResult::miss();
    }

    if dist > 0.0001 {
        return CollisionResult {
            hit: true,
            normal: delta / dist,
            penetration: ball_radius - dist,
        };
    }

    // Center inside the box: push out through the top face
    let top = center.y + half_size.y;
    CollisionResult {
        hit: true,
        normal: Vec2::Y,
        penetration: top - ball_pos.y + ball_radius,
    }
}

/// Whether two circles overlap (used for sensor bodies)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance_squared(b) <= (ra + rb) * (ra + rb)
}

/// Resolve velocity against a surface with restitution and friction
///
/// Only the approaching normal component bounces. The tangential component
/// is damped by `friction_loss` (0 = frictionless, 1 = stops dead).
pub fn bounce_velocity(velocity: Vec2, normal: Vec2, restitution: f32, friction_loss: f32) -> Vec2 {
    let vn = velocity.dot(normal);
    if vn >= 0.0 {
        return velocity; // Separating already
    }
    let normal_part = normal * vn;
    let tangent_part = velocity - normal_part;
    tangent_part * (1.0 - friction_loss.clamp(0.0, 1.0)) - normal_part * restitution
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_point_clamps_to_endpoints() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(100.0, 0.0);
        assert_eq!(closest_point_on_segment(Vec2::new(50.0, 30.0), a, b), Vec2::new(50.0, 0.0));
        assert_eq!(closest_point_on_segment(Vec2::new(-20.0, 5.0), a, b), a);
        assert_eq!(closest_point_on_segment(Vec2::new(150.0, 5.0), a, b), b);
    }

    #[test]
    fn test_ball_segment_collision_from_above() {
        let a = Vec2::new(0.0, 100.0);
        let b = Vec2::new(200.0, 100.0);

        let result = ball_segment_collision(Vec2::new(100.0, 115.0), 20.0, Vec2::ZERO, a, b);
        assert!(result.hit);
        assert!((result.normal - Vec2::Y).length() < 0.001);
        assert!((result.penetration - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_ball_segment_miss() {
        let a = Vec2::new(0.0, 100.0);
        let b = Vec2::new(200.0, 100.0);

        let result = ball_segment_collision(Vec2::new(100.0, 125.0), 20.0, Vec2::ZERO, a, b);
        assert!(!result.hit);
    }

    #[test]
    fn test_ball_on_segment_opposes_motion() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(100.0, 0.0);

        // Falling onto the line: normal must point up
        let result =
            ball_segment_collision(Vec2::new(50.0, 0.0), 10.0, Vec2::new(0.0, -100.0), a, b);
        assert!(result.hit);
        assert!(result.normal.y > 0.99);
    }

    #[test]
    fn test_ball_box_collision() {
        let center = Vec2::new(400.0, 10.0);
        let half = Vec2::new(400.0, 10.0);

        assert!(!ball_box_collision(Vec2::new(300.0, 50.0), 20.0, center, half).hit);

        let result = ball_box_collision(Vec2::new(300.0, 35.0), 20.0, center, half);
        assert!(result.hit);
        assert!((result.normal - Vec2::Y).length() < 0.001);

        // Sunk into the box
        let result = ball_box_collision(Vec2::new(300.0, 10.0), 20.0, center, half);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::Y);
        assert!((result.penetration - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_bounce_velocity_keeps_separating() {
        let vel = Vec2::new(10.0, 50.0);
        assert_eq!(bounce_velocity(vel, Vec2::Y, 0.2, 0.5), vel);

        let bounced = bounce_velocity(Vec2::new(10.0, -100.0), Vec2::Y, 0.2, 0.5);
        assert!((bounced.y - 20.0).abs() < 0.001);
        assert!((bounced.x - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 20.0, Vec2::new(29.0, 0.0), 10.0));
        assert!(!circles_overlap(Vec2::ZERO, 20.0, Vec2::new(31.0, 0.0), 10.0));
    }
}
