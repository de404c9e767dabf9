//! Terminal output helpers.
//!
//! Status lines go to stderr so stdout stays clean for `--json` manifests.

mod messages;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub use messages::{error, info, success, warning};

static COLORS_DISABLED: AtomicBool = AtomicBool::new(false);

/// Whether colored output is wanted, from `NO_COLOR`, `FORCE_COLOR` and
/// terminal detection.
pub fn should_use_color() -> bool {
    if COLORS_DISABLED.load(Ordering::Relaxed) {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

/// Apply `--no-color` for the rest of the process.
pub fn init_colors(no_color: bool) {
    if no_color {
        COLORS_DISABLED.store(true, Ordering::Relaxed);
    }
    let enabled = should_use_color();
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}

pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{millis}ms")
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}
