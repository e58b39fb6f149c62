//! Click Order entry point
//!
//! Native builds play a single round headless with autoplay switched on and
//! print every event; the browser build is driven from `click_order::web`.
//!
//! Usage: `click-order [COUNT] [--instant]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{Duration, Instant};

    use click_order::{Controller, GameEvent, GameStatus, Settings};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Click Order (native) starting...");

    let mut count = String::from("5");
    let mut instant = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--instant" => instant = true,
            _ => count = arg,
        }
    }

    let settings = Settings::load();
    let mut ui = Controller::from_settings(&settings);
    ui.game_mut().subscribe(|event, game| match event {
        GameEvent::Ticked { .. } => {}
        other => println!("[{:>6.1}s] {:?}", game.elapsed(), other),
    });

    ui.set_target_count(&count);
    if ui.requested_count() == 0 {
        eprintln!(
            "Target count must be a whole number from 1 to {}",
            ui.game().config().max_target_count
        );
        std::process::exit(2);
    }
    ui.request_start();
    ui.request_autoplay_toggle();

    if instant {
        // Simulated time: step at the tick cadence without sleeping
        let step = ui.game().config().tick_interval;
        while ui.game().status() == GameStatus::Playing {
            ui.update(step);
        }
    } else {
        let frame = Duration::from_millis(16);
        let mut last = Instant::now();
        while ui.game().status() == GameStatus::Playing {
            std::thread::sleep(frame);
            let now = Instant::now();
            ui.update(now.saturating_duration_since(last));
            last = now;
        }
    }

    let hud = ui.hud();
    println!("{} ({})", hud.title, hud.time_label);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is click_order::web::start, this is just to satisfy the compiler
}
