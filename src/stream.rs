//! GStreamer-backed frame source.
//!
//! The pipeline decodes the file, scales it to the requested resolution and
//! converts it to RGBA before handing samples to an appsink. The application
//! pulls from the sink without blocking.

use anyhow::{Context, Result, anyhow, bail};
use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use std::path::Path;

use crate::playback::{Frame, FramePoll, FrameSource, StreamOpener};

/// Opens files through GStreamer. `gstreamer::init` must have run.
#[derive(Debug, Default, Clone, Copy)]
pub struct GstOpener;

impl StreamOpener for GstOpener {
    fn open(&self, path: &Path, width: u32, height: u32) -> Result<Box<dyn FrameSource>> {
        Ok(Box::new(GstStream::open(path, width, height)?))
    }
}

pub struct GstStream {
    pipeline: gst::Pipeline,
    sink: AppSink,
    name: String,
}

impl GstStream {
    pub fn open(path: &Path, width: u32, height: u32) -> Result<Self> {
        let start = crate::gst_logger::log_stream_open_start(path, width, height);

        let absolute = path
            .canonicalize()
            .with_context(|| format!("Video file not found: {}", path.display()))?;
        let uri = url::Url::from_file_path(&absolute)
            .map_err(|_| anyhow!("Invalid video path: {}", absolute.display()))?;

        let description = pipeline_description(uri.as_str(), width, height);
        log::debug!("Pipeline: {}", description);

        let pipeline = gst::parse::launch(&description)
            .context("Failed to build decode pipeline")?
            .downcast::<gst::Pipeline>()
            .map_err(|_| anyhow!("Decode pipeline is not a gst::Pipeline"))?;
        let sink = pipeline
            .by_name("sink")
            .ok_or_else(|| anyhow!("Decode pipeline has no appsink"))?
            .downcast::<AppSink>()
            .map_err(|_| anyhow!("Pipeline element 'sink' is not an appsink"))?;

        pipeline
            .set_state(gst::State::Playing)
            .with_context(|| format!("Failed to start playback of {}", path.display()))?;

        crate::gst_logger::log_stream_open_complete(path, start);

        Ok(GstStream {
            pipeline,
            sink,
            name: path.display().to_string(),
        })
    }

    /// Surface pipeline errors; warnings are only logged.
    fn check_bus(&self) -> Result<()> {
        let Some(bus) = self.pipeline.bus() else {
            return Ok(());
        };
        while let Some(msg) = bus.timed_pop(gst::ClockTime::ZERO) {
            use gst::MessageView;

            match msg.view() {
                MessageView::Error(err) => {
                    bail!(
                        "GStreamer error on {}: {} (debug: {:?})",
                        self.name,
                        err.error(),
                        err.debug()
                    );
                }
                MessageView::Warning(warn) => {
                    log::warn!(
                        "GStreamer warning on {}: {} (debug: {:?})",
                        self.name,
                        warn.error(),
                        warn.debug()
                    );
                }
                MessageView::Eos(_) => {
                    log::debug!("GStreamer EOS on {}", self.name);
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl FrameSource for GstStream {
    fn next_frame(&mut self) -> Result<FramePoll> {
        self.check_bus()?;

        let Some(sample) = self.sink.try_pull_sample(gst::ClockTime::ZERO) else {
            return Ok(if self.sink.is_eos() {
                FramePoll::Finished
            } else {
                FramePoll::Pending
            });
        };

        let caps = sample.caps().ok_or_else(|| anyhow!("Sample without caps"))?;
        let structure = caps
            .structure(0)
            .ok_or_else(|| anyhow!("Sample caps are empty"))?;
        let width = structure
            .get::<i32>("width")
            .map_err(|e| anyhow!("Caps missing width: {e}"))?;
        let height = structure
            .get::<i32>("height")
            .map_err(|e| anyhow!("Caps missing height: {e}"))?;

        let buffer = sample.buffer().ok_or_else(|| anyhow!("Sample without buffer"))?;
        let map = buffer
            .map_readable()
            .map_err(|e| anyhow!("Failed to map frame buffer: {e}"))?;

        let (width, height) = (width.max(0) as u32, height.max(0) as u32);
        let rgba = pack_rows(map.as_slice(), width, height)?;

        Ok(FramePoll::Frame(Frame {
            width,
            height,
            rgba,
        }))
    }
}

impl Drop for GstStream {
    fn drop(&mut self) {
        if let Err(e) = self.pipeline.set_state(gst::State::Null) {
            log::warn!("Failed to release stream {}: {}", self.name, e);
        }
    }
}

/// Decode, stretch to `width` x `height`, convert to RGBA.
fn pipeline_description(uri: &str, width: u32, height: u32) -> String {
    format!(
        "uridecodebin uri={uri} ! videoconvert ! videoscale add-borders=false ! \
         video/x-raw,format=RGBA,width={width},height={height},pixel-aspect-ratio=1/1 ! \
         appsink name=sink sync=true max-buffers=2 drop=true"
    )
}

/// Strip per-row padding so the frame is tightly packed RGBA.
fn pack_rows(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let row = width as usize * 4;
    let rows = height as usize;
    if rows == 0 || row == 0 {
        bail!("Empty frame");
    }
    let stride = data.len() / rows;
    if stride < row {
        bail!(
            "Frame buffer too small: {} bytes for {}x{}",
            data.len(),
            width,
            height
        );
    }
    if stride == row {
        return Ok(data[..row * rows].to_vec());
    }
    let mut packed = Vec::with_capacity(row * rows);
    for line in data.chunks(stride).take(rows) {
        packed.extend_from_slice(&line[..row]);
    }
    Ok(packed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_targets_rgba_at_screen_size() {
        let desc = pipeline_description("file:///videos/a%20b.mp4", 1280, 720);
        assert!(desc.starts_with("uridecodebin uri=file:///videos/a%20b.mp4 "));
        assert!(desc.contains("format=RGBA,width=1280,height=720"));
        assert!(desc.contains("appsink name=sink"));
    }

    #[test]
    fn test_pack_rows_tight_buffer() {
        let data: Vec<u8> = (0..16).collect();
        assert_eq!(pack_rows(&data, 2, 2).unwrap(), data);
    }

    #[test]
    fn test_pack_rows_strips_padding() {
        // 1x2 frame with 4 bytes of padding per row.
        let data = vec![1, 2, 3, 4, 0, 0, 0, 0, 5, 6, 7, 8, 0, 0, 0, 0];
        assert_eq!(pack_rows(&data, 1, 2).unwrap(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_pack_rows_rejects_short_buffer() {
        assert!(pack_rows(&[0; 7], 1, 2).is_err());
        assert!(pack_rows(&[], 0, 0).is_err());
    }
}
