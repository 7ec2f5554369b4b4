//! The play scene
//!
//! Owns the track world, the stroke being drawn, the session score and the
//! pending timers. Input, contacts and timers all funnel through here on
//! the single simulation thread.

use glam::Vec2;

use super::contact::{ContactOutcome, dispatch};
use super::controls::{ControlKind, close_popup_control, hit_test};
use super::physics::Contact;
use super::services::Services;
use super::session::{PlaySession, ResetCause};
use super::state::{EntityId, GameEvent, Popup, Sticker, StickerKind, World};
use super::stroke::PathCapture;
use super::timer::{TimedAction, TimerQueue};
use crate::audio::SoundEffect;
use crate::consts::{MOVE_FORCE, STICKER_LIFETIME};
use crate::scene::Navigation;

pub struct PlayScene {
    world: World,
    capture: PathCapture,
    session: PlaySession,
    timers: TimerQueue,
}

impl PlayScene {
    /// Build a fresh track and register it with the physics engine
    pub fn new(svc: &mut Services) -> Self {
        Self {
            world: Self::build_world(svc),
            capture: PathCapture::new(),
            session: PlaySession::new(),
            timers: TimerQueue::new(),
        }
    }

    fn build_world(svc: &mut Services) -> World {
        let world = World::play(svc.settings.scene_size(), &mut svc.rng, &mut svc.ids);
        world.register_bodies(svc.physics.as_mut());
        world
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn capture(&self) -> &PathCapture {
        &self.capture
    }

    pub fn session(&self) -> &PlaySession {
        &self.session
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    // === Input ===

    /// Controls are hit-tested before a stroke may start
    pub fn pointer_down(&mut self, pos: Vec2, svc: &mut Services) -> Option<Navigation> {
        if let Some(kind) = hit_test(&self.world.controls, pos) {
            log::debug!("Control {} pressed", kind.name());
            return self.activate(kind, svc);
        }
        self.capture.begin_stroke(pos);
        None
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.capture.extend_stroke(pos);
    }

    pub fn pointer_up(&mut self, svc: &mut Services) {
        let Services {
            physics,
            ids,
            events,
            ..
        } = svc;
        self.capture
            .finalize_stroke(&mut self.world, physics.as_mut(), ids, events);
    }

    /// Run a control's action. Only `Back` leaves the scene.
    pub fn activate(&mut self, kind: ControlKind, svc: &mut Services) -> Option<Navigation> {
        match kind {
            ControlKind::Back => return Some(Navigation::Menu),
            ControlKind::Left => self.nudge(-1.0, svc),
            ControlKind::Right => self.nudge(1.0, svc),
            ControlKind::Clear => self.request_clear(svc),
            ControlKind::Help => self.show_help(svc),
            ControlKind::ClosePopup => self.close_help(svc),
            ControlKind::Start => {}
        }
        None
    }

    /// One fixed horizontal impulse; nothing happens without a ball
    pub fn nudge(&mut self, direction: f32, svc: &mut Services) {
        let Some(ball) = &self.world.ball else {
            return;
        };
        let impulse = Vec2::new(direction.signum() * MOVE_FORCE, 0.0);
        if svc.physics.apply_impulse(ball.id, impulse) {
            svc.emit(GameEvent::Nudged { impulse });
        }
    }

    pub fn request_clear(&mut self, svc: &mut Services) {
        self.schedule_reset(ResetCause::Clear, svc);
    }

    pub fn show_help(&mut self, svc: &mut Services) {
        if self.world.popup.is_none() {
            self.show_popup(Popup::Help, svc);
        }
    }

    pub fn close_help(&mut self, svc: &mut Services) {
        if self.world.popup == Some(Popup::Help) {
            self.world.popup = None;
            self.world.controls.retain(|c| c.kind != ControlKind::ClosePopup);
            svc.emit(GameEvent::PopupClosed);
        }
    }

    fn show_popup(&mut self, popup: Popup, svc: &mut Services) {
        self.world.controls.retain(|c| c.kind != ControlKind::ClosePopup);
        if popup == Popup::Help {
            let close = close_popup_control(self.world.size, &mut svc.ids);
            self.world.controls.push(close);
        }
        self.world.popup = Some(popup);
        svc.emit(GameEvent::PopupShown(popup));
    }

    // === Contacts ===

    pub fn on_contact(&mut self, contact: Contact, svc: &mut Services) {
        let (Some(cat_a), Some(cat_b)) = (
            self.world.category_of(contact.a),
            self.world.category_of(contact.b),
        ) else {
            log::debug!("Ignoring contact {} / {}: unknown body", contact.a, contact.b);
            return;
        };
        log::debug!("Collision detected: {cat_a:?} with {cat_b:?}");

        match dispatch((contact.a, cat_a), (contact.b, cat_b)) {
            ContactOutcome::Collect(id) => self.on_collectible_contact(id, svc),
            ContactOutcome::Fall => self.on_ground_contact(svc),
            ContactOutcome::Ignored => {}
        }
    }

    /// Consume a collectible and credit the score
    pub fn on_collectible_contact(&mut self, id: EntityId, svc: &mut Services) {
        let Some(collectible) = self.world.take_collectible(id) else {
            return;
        };
        svc.physics.remove_body(id);

        let score = self.session.credit_collectible();
        svc.emit(GameEvent::CollectibleConsumed {
            id,
            pos: collectible.pos,
        });
        svc.emit(GameEvent::ScoreChanged { score });
        svc.play_sound(SoundEffect::Collect);
        self.show_sticker(StickerKind::Penguin, collectible.pos, svc);

        self.evaluate_win(svc);
    }

    /// The ball hit the ground: cue, then reset unless one is pending
    pub fn on_ground_contact(&mut self, svc: &mut Services) {
        let Some(ball) = &self.world.ball else {
            return;
        };
        let ground = self.world.ground.as_ref().map_or(ball.pos, |g| g.center);
        let pos = (ball.pos + ground) / 2.0;

        log::info!("Ball fell at ({:.0}, {:.0})", pos.x, pos.y);
        svc.emit(GameEvent::Fell { pos });
        svc.play_sound(SoundEffect::Fall);
        self.show_sticker(StickerKind::Monke, pos, svc);
        self.schedule_reset(ResetCause::Fall, svc);
    }

    /// Returns true when this call won the round
    pub fn evaluate_win(&mut self, svc: &mut Services) -> bool {
        if self.session.is_cleared() || !self.session.is_won(self.world.remaining_collectibles()) {
            return false;
        }

        let score = self.session.score();
        log::info!("Round won with score {score}");
        self.show_popup(Popup::Win, svc);
        svc.emit(GameEvent::Won { score });
        self.schedule_reset(ResetCause::Win, svc)
    }

    fn schedule_reset(&mut self, cause: ResetCause, svc: &mut Services) -> bool {
        let Some(delay) = self.session.begin_clear(cause) else {
            log::debug!("{cause:?} ignored: reset already pending");
            return false;
        };
        self.timers
            .schedule_after(svc.clock, delay, TimedAction::ResetTrack);
        log::info!("Track reset in {delay:.1}s ({cause:?})");
        svc.emit(GameEvent::ResetScheduled { cause, delay });
        true
    }

    fn show_sticker(&mut self, kind: StickerKind, pos: Vec2, svc: &mut Services) {
        if !svc.settings.effective_stickers() {
            return;
        }
        if let Err(e) = svc.assets.resolve(kind.image()) {
            log::warn!("Skipping {kind:?} sticker: {e}");
            return;
        }

        let id = svc.ids.next_id();
        self.world.stickers.push(Sticker { id, kind, pos });
        self.timers
            .schedule_after(svc.clock, STICKER_LIFETIME, TimedAction::RemoveSticker(id));
        svc.emit(GameEvent::StickerShown { id, kind, pos });
    }

    // === Lifecycle ===

    /// Throw the track away and build a new one
    pub fn reset(&mut self, svc: &mut Services) {
        svc.physics.clear();
        self.world = Self::build_world(svc);
        self.capture = PathCapture::new();
        self.session.reset();

        log::info!("Track reset");
        svc.emit(GameEvent::TrackReset);
        svc.emit(GameEvent::ScoreChanged { score: 0 });
    }

    /// Step physics and dispatch the contacts it reports
    pub fn step(&mut self, dt: f32, svc: &mut Services) {
        let mut contacts = Vec::new();
        svc.physics.step(dt, &mut contacts);

        if let Some(ball) = &mut self.world.ball {
            if let Some(pos) = svc.physics.body_position(ball.id) {
                ball.pos = pos;
            }
        }

        for contact in contacts {
            self.on_contact(contact, svc);
        }
    }

    /// Fire every timer due at the current clock
    pub fn run_timers(&mut self, svc: &mut Services) {
        while let Some(action) = self.timers.pop_due(svc.clock) {
            match action {
                TimedAction::ResetTrack => self.reset(svc),
                TimedAction::RemoveSticker(id) => {
                    if self.world.remove_sticker(id) {
                        svc.emit(GameEvent::StickerRemoved { id });
                    }
                }
            }
        }
    }
}
