//! Cross-platform notification support
//! Currently only implements macOS notifications

use crate::domain::TimerMode;

#[cfg(target_os = "macos")]
use std::process::Command;

/// Title and body for the end of a timer phase
pub fn phase_message(finished: TimerMode) -> (&'static str, &'static str) {
    match finished {
        TimerMode::Focus => ("Flowspace - Focus Complete", "Time for a short break"),
        TimerMode::Break => ("Flowspace - Break Over", "Back to deep work"),
    }
}

/// Send a notification when a focus or break phase ends
pub fn notify_phase_complete(finished: TimerMode) {
    let (title, body) = phase_message(finished);

    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "{}""#,
            body.replace('"', "\\\""),
            title.replace('"', "\\\"")
        );

        if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
            tracing::warn!("notification command failed: {}", e);
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        tracing::debug!(title, body, "notification skipped on this platform");
    }
}
