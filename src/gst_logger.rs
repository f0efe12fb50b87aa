//! Timing instrumentation for video streams.
//!
//! Frames are pulled on the UI loop, so a slow pull or open stalls the whole
//! interface. These helpers log every stream operation with its duration.

use std::path::Path;
use std::time::{Duration, Instant};

/// Log categories for filtering
enum LogCategory {
    Open,
    Frame,
    Release,
}

impl LogCategory {
    fn as_str(&self) -> &'static str {
        match self {
            LogCategory::Open => "STREAM_OPEN",
            LogCategory::Frame => "FRAME_PULL",
            LogCategory::Release => "STREAM_RELEASE",
        }
    }
}

/// Log the start of a stream open
pub fn log_stream_open_start(path: &Path, width: u32, height: u32) -> Instant {
    log::info!(
        "[{}] {} START: target={}x{}",
        LogCategory::Open.as_str(),
        path.display(),
        width,
        height
    );
    Instant::now()
}

/// Log a completed stream open
pub fn log_stream_open_complete(path: &Path, start: Instant) {
    let elapsed_ms = start.elapsed().as_millis();
    if elapsed_ms > 1000 {
        log::warn!(
            "[{}] {} SLOW: {}ms",
            LogCategory::Open.as_str(),
            path.display(),
            elapsed_ms
        );
    } else {
        log::info!(
            "[{}] {} COMPLETE: {}ms",
            LogCategory::Open.as_str(),
            path.display(),
            elapsed_ms
        );
    }
}

pub fn log_frame_pull_start(filename: &str, frame: u64) -> Instant {
    log::trace!(
        "[{}] {} frame {} START",
        LogCategory::Frame.as_str(),
        filename,
        frame
    );
    Instant::now()
}

/// Log a finished frame pull, warning when it blocked the UI loop
pub fn log_frame_pull_complete(filename: &str, frame: u64, start: Instant) {
    let elapsed_ms = start.elapsed().as_millis();
    if elapsed_ms > 50 {
        log::warn!(
            "[{}] {} frame {} SLOW: {}ms",
            LogCategory::Frame.as_str(),
            filename,
            frame,
            elapsed_ms
        );
    } else {
        log::trace!(
            "[{}] {} frame {}: {}ms",
            LogCategory::Frame.as_str(),
            filename,
            frame,
            elapsed_ms
        );
    }
}

pub fn log_stream_released(filename: &str, frames: u64, played: Duration) {
    let secs = played.as_secs_f64();
    let fps = if secs > 0.0 { frames as f64 / secs } else { 0.0 };
    log::info!(
        "[{}] {} after {} frames in {:.1}s ({:.1} fps)",
        LogCategory::Release.as_str(),
        filename,
        frames,
        secs,
        fps
    );
}
