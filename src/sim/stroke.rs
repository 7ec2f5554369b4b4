//! Freehand path capture
//!
//! One pointer gesture becomes one `PathStroke`. While the finger is down
//! the stroke is only a preview; on release it is frozen into a static edge
//! chain registered with the physics engine, and the first such chain also
//! spawns the ball.

use glam::Vec2;

use super::physics::PhysicsEngine;
use super::state::{Ball, EntityId, EntityIds, GameEvent, PathBoundary, World};
use crate::bounding_box;
use crate::consts::{BALL_RADIUS, BALL_SPAWN_INSET};

/// Points sampled during one continuous gesture
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathStroke {
    points: Vec<Vec2>,
}

impl PathStroke {
    pub fn new(start: Vec2) -> Self {
        Self {
            points: vec![start],
        }
    }

    /// Append a point, skipping exact repeats of the last one
    pub fn push(&mut self, point: Vec2) {
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Whether the stroke has at least one segment
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }
}

/// Result of a finalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalizedStroke {
    /// Boundary registered for the stroke; `None` for a single-point tap
    pub path_id: Option<EntityId>,
    /// Set when this stroke spawned the ball
    pub ball_id: Option<EntityId>,
}

/// Stroke-to-boundary pipeline state
#[derive(Debug, Clone, Default)]
pub struct PathCapture {
    stroke: Option<PathStroke>,
    drawing_disabled: bool,
}

impl PathCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawing_enabled(&self) -> bool {
        !self.drawing_disabled
    }

    pub fn is_capturing(&self) -> bool {
        self.stroke.is_some()
    }

    /// In-progress stroke for live rendering
    pub fn preview(&self) -> Option<&[Vec2]> {
        self.stroke.as_ref().map(PathStroke::points)
    }

    /// Start a stroke. No-op while drawing is disabled or a stroke is active.
    pub fn begin_stroke(&mut self, point: Vec2) -> bool {
        if self.drawing_disabled || self.stroke.is_some() {
            return false;
        }
        self.stroke = Some(PathStroke::new(point));
        true
    }

    /// Extend the active stroke. No-op without one.
    pub fn extend_stroke(&mut self, point: Vec2) -> bool {
        match &mut self.stroke {
            Some(stroke) => {
                stroke.push(point);
                true
            }
            None => false,
        }
    }

    /// Freeze the active stroke into a static boundary
    ///
    /// Spawns the ball above the stroke when none exists yet and disables
    /// further drawing. A tap (one distinct point) has no segment to collide
    /// with, so it registers no boundary but still drops the ball.
    pub fn finalize_stroke(
        &mut self,
        world: &mut World,
        physics: &mut dyn PhysicsEngine,
        ids: &mut EntityIds,
        events: &mut Vec<GameEvent>,
    ) -> Option<FinalizedStroke> {
        let stroke = self.stroke.take()?;
        let spawn = ball_spawn_point(stroke.points());

        let path_id = if stroke.is_drawable() {
            let path = PathBoundary {
                id: ids.next_id(),
                points: stroke.points,
            };
            physics.create_body(path.id, path.body_desc());
            events.push(GameEvent::StrokeFinalized {
                path_id: path.id,
                points: path.points.len(),
            });
            let id = path.id;
            world.paths.push(path);
            Some(id)
        } else {
            log::debug!("Single-point stroke: no boundary registered");
            events.push(GameEvent::StrokeDiscarded);
            None
        };

        let mut ball_id = None;
        if world.ball.is_none() {
            if let Some(pos) = spawn {
                let ball = Ball::new(ids.next_id(), pos);
                physics.create_body(ball.id, ball.body_desc());
                log::info!("Ball spawned at ({:.0}, {:.0})", pos.x, pos.y);
                events.push(GameEvent::BallSpawned { id: ball.id, pos });
                ball_id = Some(ball.id);
                world.ball = Some(ball);
                self.drawing_disabled = true;
            }
        }

        Some(FinalizedStroke { path_id, ball_id })
    }
}

/// Spawn point resting just above a stroke: near its left edge, one ball
/// radius above its highest point
pub fn ball_spawn_point(points: &[Vec2]) -> Option<Vec2> {
    let (min, max) = bounding_box(points)?;
    Some(Vec2::new(min.x + BALL_SPAWN_INSET, max.y + BALL_RADIUS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::physics::BuiltinPhysics;
    use proptest::prelude::*;

    fn fixture() -> (World, BuiltinPhysics, EntityIds, Vec<GameEvent>) {
        let mut ids = EntityIds::new();
        let world = World::menu(Vec2::new(800.0, 600.0), &mut ids);
        (world, BuiltinPhysics::default(), ids, Vec::new())
    }

    #[test]
    fn test_finalize_without_begin_is_noop() {
        let (mut world, mut physics, mut ids, mut events) = fixture();
        let mut capture = PathCapture::new();

        assert!(!capture.extend_stroke(Vec2::new(1.0, 1.0)));
        let result = capture.finalize_stroke(&mut world, &mut physics, &mut ids, &mut events);

        assert!(result.is_none());
        assert_eq!(physics.body_count(), 0);
        assert!(world.ball.is_none());
        assert!(events.is_empty());
    }

    #[test]
    fn test_first_stroke_spawns_ball_and_disables_drawing() {
        let (mut world, mut physics, mut ids, mut events) = fixture();
        let mut capture = PathCapture::new();

        assert!(capture.begin_stroke(Vec2::new(100.0, 400.0)));
        assert!(!capture.begin_stroke(Vec2::new(0.0, 0.0)), "one stroke at a time");
        capture.extend_stroke(Vec2::new(200.0, 350.0));
        capture.extend_stroke(Vec2::new(300.0, 300.0));
        assert_eq!(capture.preview().map(<[Vec2]>::len), Some(3));

        let done = capture
            .finalize_stroke(&mut world, &mut physics, &mut ids, &mut events)
            .unwrap();

        assert!(done.ball_id.is_some());
        assert_eq!(physics.body_count(), 2);
        assert_eq!(world.paths.len(), 1);
        let ball = world.ball.as_ref().unwrap();
        assert_eq!(ball.pos, Vec2::new(105.0, 420.0));
        assert!(!capture.is_drawing_enabled());
        assert!(!capture.is_capturing());
        assert!(!capture.begin_stroke(Vec2::new(500.0, 500.0)));
    }

    #[test]
    fn test_tap_drops_ball_without_boundary() {
        let (mut world, mut physics, mut ids, mut events) = fixture();
        let mut capture = PathCapture::new();

        capture.begin_stroke(Vec2::new(300.0, 400.0));
        capture.extend_stroke(Vec2::new(300.0, 400.0));
        let done = capture
            .finalize_stroke(&mut world, &mut physics, &mut ids, &mut events)
            .unwrap();

        assert_eq!(done.path_id, None);
        assert!(done.ball_id.is_some());
        assert!(world.paths.is_empty());
        assert_eq!(physics.body_count(), 1, "only the ball");
        assert_eq!(world.ball.as_ref().unwrap().pos, Vec2::new(305.0, 420.0));
        assert_eq!(events[0], GameEvent::StrokeDiscarded);
        assert!(!capture.is_drawing_enabled());
    }

    #[test]
    fn test_stroke_with_existing_ball_adds_only_boundary() {
        let (mut world, mut physics, mut ids, mut events) = fixture();
        world.ball = Some(Ball::new(ids.next_id(), Vec2::new(10.0, 10.0)));
        let mut capture = PathCapture::new();

        capture.begin_stroke(Vec2::new(0.0, 0.0));
        capture.extend_stroke(Vec2::new(50.0, 0.0));
        let done = capture
            .finalize_stroke(&mut world, &mut physics, &mut ids, &mut events)
            .unwrap();

        assert_eq!(done.ball_id, None);
        assert_eq!(physics.body_count(), 1);
        assert!(capture.is_drawing_enabled());
    }

    proptest! {
        #[test]
        fn extending_never_registers_a_boundary(
            start in (0.0f32..800.0, 0.0f32..600.0),
            moves in prop::collection::vec((0.0f32..800.0, 0.0f32..600.0), 0..50),
        ) {
            let (world, mut physics, _ids, _events) = fixture();
            let mut capture = PathCapture::new();
            capture.begin_stroke(Vec2::new(start.0, start.1));
            for (x, y) in moves {
                capture.extend_stroke(Vec2::new(x, y));
                physics.step(crate::consts::SIM_DT, &mut Vec::new());
            }
            prop_assert_eq!(physics.body_count(), 0);
            prop_assert!(world.paths.is_empty());
            prop_assert!(capture.is_capturing());
        }
    }
}
