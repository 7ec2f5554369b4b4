//! Path Roller entry point
//!
//! The native build runs a scripted headless session and prints every game
//! event as a JSON line. Usage: `path-roller [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use glam::Vec2;
    use path_roller::sim::{FixedStep, PointerEvent};
    use path_roller::{Game, Settings};

    env_logger::init();
    log::info!("Path Roller (native) starting...");

    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(path.as_deref());
    let size = settings.scene_size();
    let mut game = Game::new(settings);
    let mut step = FixedStep::new();

    // Tap start, then draw a ramp from the upper left down toward the middle
    let start = Vec2::new(size.x / 2.0, size.y * 0.45);
    step.push(PointerEvent::Down(start));
    step.push(PointerEvent::Up(start));
    step.advance(&mut game, 1.0 / 60.0);

    let from = Vec2::new(size.x / 8.0, size.y * 0.67);
    let to = Vec2::new(size.x * 0.375, size.y / 2.0);
    step.push(PointerEvent::Down(from));
    for i in 1..=10 {
        step.push(PointerEvent::Move(from.lerp(to, i as f32 / 10.0)));
    }
    step.push(PointerEvent::Up(to));

    // Six seconds at 60 fps covers the fall and the reset that follows
    for _ in 0..360 {
        step.advance(&mut game, 1.0 / 60.0);
        for event in game.drain_events() {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(e) => log::error!("Failed to encode event: {e}"),
            }
        }
    }

    log::info!(
        "Finished at {:.2}s with score {}",
        game.clock(),
        game.score().unwrap_or(0)
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on the web
}
