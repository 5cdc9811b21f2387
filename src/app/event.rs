//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task
//! that forwards them over a channel, interleaved with frame ticks on a
//! fixed cadence so animation keeps its pace under a stream of input.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// The terminal changed size; the next draw re-measures.
    Resize,
    /// One frame period has elapsed.
    Frame,
}

/// Frame period for a target rate, at least 1 ms.
pub fn frame_period(fps: u32) -> Duration {
    Duration::from_micros(1_000_000 / u64::from(fps.max(1))).max(Duration::from_millis(1))
}

/// Spawns a background task that polls the terminal for events and sends
/// them, plus a [`AppEvent::Frame`] every `period`, through the returned
/// channel.
pub fn spawn_event_reader(period: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        let mut next_frame = Instant::now() + period;
        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(ev) = event::read() {
                    let app_event = match ev {
                        CtEvent::Key(k) => AppEvent::Key(k),
                        CtEvent::Mouse(m) => AppEvent::Mouse(m),
                        CtEvent::Resize(..) => AppEvent::Resize,
                        _ => continue,
                    };
                    if tx.send(app_event).is_err() {
                        break; // receiver dropped
                    }
                }
            }
            if Instant::now() >= next_frame {
                next_frame += period;
                // Fell behind (suspended terminal, slow draw): skip ahead
                // instead of bursting frames.
                if next_frame < Instant::now() {
                    next_frame = Instant::now() + period;
                }
                if tx.send(AppEvent::Frame).is_err() {
                    break;
                }
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_period_from_rate() {
        assert_eq!(frame_period(60), Duration::from_micros(16_666));
        assert_eq!(frame_period(0), Duration::from_secs(1));
        assert_eq!(frame_period(5_000), Duration::from_millis(1));
    }
}
