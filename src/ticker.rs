use std::sync::mpsc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    Tick,
}

/// Sends a tick every `period` until the receiver is dropped.
pub fn spawn_ticker(period: Duration) -> mpsc::Receiver<TickEvent> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || loop {
        if tx.send(TickEvent::Tick).is_err() {
            break;
        }
        thread::sleep(period);
    });

    rx
}

/// Seconds shown on the countdown, e.g. `0:07`.
pub fn format_countdown(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Running time of a quiz or export, e.g. `3m 05s` or `42s`.
pub fn format_clock(ms: u64) -> String {
    let total_secs = ms.div_ceil(1000);
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
