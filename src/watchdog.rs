//! Stall detection for the UI loop.
//!
//! Frame pulls and page loads run on the UI loop. Every poll and frame tick
//! records a heartbeat; a background thread logs when ticks stop arriving.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Heartbeat gap that is reported as slow.
const WARN_AFTER_MS: u64 = 2_000;
/// Heartbeat gap that is reported as a stall.
const STALL_AFTER_MS: u64 = 5_000;

pub struct Watchdog {
    origin: Instant,
    last_heartbeat: Arc<AtomicU64>,
}

impl Watchdog {
    /// Spawn the monitoring thread.
    pub fn spawn() -> io::Result<Self> {
        let origin = Instant::now();
        let last_heartbeat = Arc::new(AtomicU64::new(0));
        let heartbeat_clone = last_heartbeat.clone();

        thread::Builder::new()
            .name("ui-watchdog".to_string())
            .spawn(move || {
                log::debug!("Watchdog thread started");

                loop {
                    thread::sleep(Duration::from_secs(1));

                    let last = heartbeat_clone.load(Ordering::Relaxed);
                    let elapsed = millis_since(origin).saturating_sub(last);

                    match classify(elapsed) {
                        Health::Stalled => log::error!(
                            "UI loop stalled: no poll tick for {}ms",
                            elapsed
                        ),
                        Health::Slow => log::warn!(
                            "UI loop slow: {}ms since last tick (warning threshold: {}ms)",
                            elapsed,
                            WARN_AFTER_MS
                        ),
                        Health::Ok => log::trace!("Watchdog heartbeat OK ({}ms)", elapsed),
                    }
                }
            })?;

        log::info!("Watchdog initialized");

        Ok(Watchdog {
            origin,
            last_heartbeat,
        })
    }

    /// Signal that the UI loop is alive
    pub fn heartbeat(&self) {
        self.last_heartbeat
            .store(millis_since(self.origin), Ordering::Relaxed);
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Health {
    Ok,
    Slow,
    Stalled,
}

fn classify(elapsed_ms: u64) -> Health {
    if elapsed_ms > STALL_AFTER_MS {
        Health::Stalled
    } else if elapsed_ms > WARN_AFTER_MS {
        Health::Slow
    } else {
        Health::Ok
    }
}

fn millis_since(origin: Instant) -> u64 {
    origin.elapsed().as_millis() as u64
}
