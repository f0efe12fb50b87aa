//! Full-screen playback of a single video.
//!
//! A `Playback` exclusively owns its open stream. Frames are pumped one per
//! tick from the update loop, so an exit request is only observed between
//! frames. Dropping (or finishing) the playback releases the stream.

use anyhow::Result;
use iced::widget::image::Handle;
use std::path::Path;
use std::time::Instant;

/// One decoded, resized RGBA frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Result of asking a stream for its next frame.
#[derive(Debug, PartialEq, Eq)]
pub enum FramePoll {
    Frame(Frame),
    /// Nothing decoded yet; try again next tick.
    Pending,
    /// The stream is exhausted.
    Finished,
}

pub trait FrameSource {
    fn next_frame(&mut self) -> Result<FramePoll>;
}

/// Opens a video file as a stream scaled to `width` x `height`.
pub trait StreamOpener {
    fn open(&self, path: &Path, width: u32, height: u32) -> Result<Box<dyn FrameSource>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Rendered,
    Waiting,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndOfStream,
    ExitPressed,
}

/// What a finished playback reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSummary {
    pub filename: String,
    pub frames: u64,
    pub reason: StopReason,
}

pub struct Playback {
    filename: String,
    source: Box<dyn FrameSource>,
    frame: Option<Handle>,
    frames: u64,
    started: Instant,
}

impl Playback {
    pub fn start(filename: impl Into<String>, source: Box<dyn FrameSource>) -> Self {
        let filename = filename.into();
        log::info!("Playback started: {}", filename);
        Playback {
            filename,
            source,
            frame: None,
            frames: 0,
            started: Instant::now(),
        }
    }

    /// Pull at most one frame and make it the displayed one.
    pub fn advance(&mut self) -> Result<Step> {
        let start = crate::gst_logger::log_frame_pull_start(&self.filename, self.frames);
        let polled = self.source.next_frame()?;
        crate::gst_logger::log_frame_pull_complete(&self.filename, self.frames, start);

        match polled {
            FramePoll::Frame(frame) => {
                self.frame = Some(Handle::from_rgba(frame.width, frame.height, frame.rgba));
                self.frames += 1;
                Ok(Step::Rendered)
            }
            FramePoll::Pending => Ok(Step::Waiting),
            FramePoll::Finished => Ok(Step::Finished),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The most recently rendered frame, if any.
    pub fn frame(&self) -> Option<&Handle> {
        self.frame.as_ref()
    }

    /// Stop playback, releasing the stream.
    pub fn finish(self, reason: StopReason) -> PlaybackSummary {
        let Playback {
            filename,
            source,
            frames,
            started,
            ..
        } = self;
        drop(source);
        crate::gst_logger::log_stream_released(&filename, frames, started.elapsed());
        PlaybackSummary {
            filename,
            frames,
            reason,
        }
    }
}
