//! Tick at ~60 Hz and print key edges and clicks until Ctrl-C.

use pollhook::{Hook, MouseButton};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

fn main() {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || r.store(false, Ordering::SeqCst))
        .expect("failed to set Ctrl-C handler");

    let mut hook = Hook::new();
    hook.start_hook();
    println!(
        "watching input on the '{}' backend; press Ctrl-C to quit",
        hook.backend()
    );

    // The just-window spans more than one 60 Hz tick; remember what was
    // already reported so each edge prints once.
    let mut reported_down: HashSet<&'static str> = HashSet::new();
    let mut reported_up: HashSet<&'static str> = HashSet::new();
    let mut click_seen = false;

    while running.load(Ordering::SeqCst) {
        hook.render_tick();

        let down = hook.keys_just_pressed_detailed();
        for name in down.keys().copied() {
            if reported_down.insert(name) {
                println!("down: {name}");
            }
        }
        reported_down.retain(|name| down.contains_key(name));

        let up = hook.keys_just_released_detailed();
        for name in up.keys().copied() {
            if reported_up.insert(name) {
                println!("up:   {name}");
            }
        }
        reported_up.retain(|name| up.contains_key(name));

        if hook.is_mouse_just_pressed(MouseButton::Left) {
            if !click_seen {
                let pos = hook.mouse_position();
                println!("click at ({:.0}, {:.0})", pos.x, pos.y);
            }
            click_seen = true;
        } else {
            click_seen = false;
        }

        std::thread::sleep(Duration::from_millis(16));
    }

    hook.stop_hook();
}
