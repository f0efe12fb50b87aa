use anyhow::{Context, Result};
use iced::widget::image::Handle;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const THUMBNAIL_EXTENSION: &str = "png";

/// A playable file and its preview image.
#[derive(Debug, Clone)]
pub struct VideoEntry {
    pub filename: String,
    pub thumbnail: Handle,
    pub thumbnail_size: (u32, u32),
}

/// All videos available at startup, sorted by filename.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    videos_dir: PathBuf,
    entries: Vec<VideoEntry>,
}

impl Catalog {
    /// Scan `videos_dir` and load the matching thumbnail for each video.
    ///
    /// Thumbnails are shrunk to fit one grid column of a `screen_width` wide
    /// window. A missing or undecodable thumbnail fails the whole load.
    pub fn load(
        videos_dir: &Path,
        thumbnails_dir: &Path,
        screen_width: u32,
        cols: usize,
    ) -> Result<Self> {
        let start = Instant::now();
        let filenames = list_videos(videos_dir)?;

        let mut entries = Vec::with_capacity(filenames.len());
        for filename in filenames {
            let thumb_path = thumbnail_path(thumbnails_dir, &filename);
            let img = image::open(&thumb_path)
                .with_context(|| format!("Failed to load thumbnail {}", thumb_path.display()))?;

            let bound = thumbnail_bound(screen_width, cols, img.width(), img.height());
            let img = if img.width() > bound || img.height() > bound {
                img.resize(bound, bound, FilterType::Lanczos3)
            } else {
                img
            };

            let rgba = img.into_rgba8();
            let (width, height) = rgba.dimensions();
            let entry = VideoEntry {
                filename,
                thumbnail: Handle::from_rgba(width, height, rgba.into_raw()),
                thumbnail_size: (width, height),
            };
            log::debug!(
                "Thumbnail loaded: {} -> {}x{}",
                entry.filename,
                entry.thumbnail_size.0,
                entry.thumbnail_size.1
            );
            entries.push(entry);
        }

        log::info!(
            "Catalog loaded: {} videos from {} in {:.2}s",
            entries.len(),
            videos_dir.display(),
            start.elapsed().as_secs_f64()
        );

        Ok(Catalog {
            videos_dir: videos_dir.to_path_buf(),
            entries,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_entries(videos_dir: &Path, entries: Vec<VideoEntry>) -> Self {
        Catalog {
            videos_dir: videos_dir.to_path_buf(),
            entries,
        }
    }

    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.filename.as_str())
    }

    pub fn get(&self, filename: &str) -> Option<&VideoEntry> {
        self.entries.iter().find(|e| e.filename == filename)
    }

    pub fn video_path(&self, filename: &str) -> PathBuf {
        self.videos_dir.join(filename)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Non-hidden files in `dir` (symlinks followed), sorted by name.
fn list_videos(dir: &Path) -> Result<Vec<String>> {
    let read_dir = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read video directory {}", dir.display()))?;

    let mut names = Vec::new();
    for entry in read_dir {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        let metadata = std::fs::metadata(&path)
            .with_context(|| format!("Failed to stat {}", path.display()))?;
        if !metadata.is_file() {
            continue;
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}

/// `<thumbnails_dir>/<name up to the first dot>.png`
pub fn thumbnail_path(thumbnails_dir: &Path, video_filename: &str) -> PathBuf {
    let stem = video_filename.split('.').next().unwrap_or(video_filename);
    thumbnails_dir.join(format!("{stem}.{THUMBNAIL_EXTENSION}"))
}

/// Square bound a thumbnail must fit inside: one column wide, or taller if
/// the image is portrait at that width.
pub fn thumbnail_bound(screen_width: u32, cols: usize, width: u32, height: u32) -> u32 {
    let column_width = screen_width / cols.max(1) as u32;
    let scaled_height = if width == 0 {
        0
    } else {
        (u64::from(column_width) * u64::from(height) / u64::from(width)) as u32
    };
    column_width.max(scaled_height).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use tempfile::TempDir;

    fn fixture(videos: &[&str], thumbs: &[(&str, u32, u32)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("videos")).unwrap();
        std::fs::create_dir(dir.path().join("thumbnails")).unwrap();
        for v in videos {
            std::fs::write(dir.path().join("videos").join(v), b"").unwrap();
        }
        for (name, w, h) in thumbs {
            RgbaImage::new(*w, *h)
                .save(dir.path().join("thumbnails").join(name))
                .unwrap();
        }
        dir
    }

    #[test]
    fn test_thumbnail_bound_landscape() {
        // 1920 / 3 = 640 wide; a 16:9 image is shorter than it is wide.
        assert_eq!(thumbnail_bound(1920, 3, 1600, 900), 640);
    }

    #[test]
    fn test_thumbnail_bound_portrait() {
        assert_eq!(thumbnail_bound(1920, 3, 500, 1000), 1280);
    }

    #[test]
    fn test_thumbnail_path_uses_stem() {
        let path = thumbnail_path(Path::new("thumbs"), "sunrise.mp4");
        assert_eq!(path, Path::new("thumbs").join("sunrise.png"));
    }

    #[test]
    fn test_thumbnail_path_cuts_at_first_dot() {
        let path = thumbnail_path(Path::new("thumbs"), "breath.take2.mp4");
        assert_eq!(path, Path::new("thumbs").join("breath.png"));
    }

    #[test]
    fn test_multi_dot_video_loads_first_dot_thumbnail() {
        let dir = fixture(&["breath.take2.mp4"], &[("breath.png", 10, 10)]);
        let catalog = Catalog::load(
            &dir.path().join("videos"),
            &dir.path().join("thumbnails"),
            1920,
            3,
        )
        .unwrap();
        assert_eq!(catalog.filenames().collect::<Vec<_>>(), vec!["breath.take2.mp4"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_video_is_listed() {
        let dir = fixture(&[], &[("linked.png", 10, 10)]);
        let real = dir.path().join("real.mp4");
        std::fs::write(&real, b"").unwrap();
        std::os::unix::fs::symlink(&real, dir.path().join("videos").join("linked.mp4")).unwrap();
        let catalog = Catalog::load(
            &dir.path().join("videos"),
            &dir.path().join("thumbnails"),
            1920,
            3,
        )
        .unwrap();
        assert_eq!(catalog.filenames().collect::<Vec<_>>(), vec!["linked.mp4"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_link_error_names_entry() {
        let dir = fixture(&[], &[]);
        let videos = dir.path().join("videos");
        std::os::unix::fs::symlink(dir.path().join("gone.mp4"), videos.join("broken.mp4")).unwrap();
        let err = Catalog::load(&videos, &dir.path().join("thumbnails"), 1920, 3).unwrap_err();
        assert!(err.to_string().contains("broken.mp4"));

        // Hidden entries are skipped before they are looked at.
        std::fs::remove_file(videos.join("broken.mp4")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.mp4"), videos.join(".broken.mp4")).unwrap();
        let catalog = Catalog::load(&videos, &dir.path().join("thumbnails"), 1920, 3).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_sorts_and_skips_hidden_files() {
        let dir = fixture(
            &["b.mp4", "a.mov", ".DS_Store"],
            &[("a.png", 10, 10), ("b.png", 10, 10)],
        );
        std::fs::create_dir(dir.path().join("videos").join("nested")).unwrap();

        let catalog = Catalog::load(
            &dir.path().join("videos"),
            &dir.path().join("thumbnails"),
            1920,
            3,
        )
        .unwrap();

        assert_eq!(catalog.filenames().collect::<Vec<_>>(), vec!["a.mov", "b.mp4"]);
        assert_eq!(
            catalog.video_path("a.mov"),
            dir.path().join("videos").join("a.mov")
        );
    }

    #[test]
    fn test_large_thumbnail_is_shrunk() {
        let dir = fixture(&["wide.mp4"], &[("wide.png", 800, 400)]);
        let catalog = Catalog::load(
            &dir.path().join("videos"),
            &dir.path().join("thumbnails"),
            900,
            3,
        )
        .unwrap();

        // Bound is 300, aspect ratio is kept.
        assert_eq!(catalog.get("wide.mp4").unwrap().thumbnail_size, (300, 150));
    }

    #[test]
    fn test_small_thumbnail_is_not_enlarged() {
        let dir = fixture(&["tiny.mp4"], &[("tiny.png", 40, 30)]);
        let catalog = Catalog::load(
            &dir.path().join("videos"),
            &dir.path().join("thumbnails"),
            1920,
            3,
        )
        .unwrap();
        assert_eq!(catalog.get("tiny.mp4").unwrap().thumbnail_size, (40, 30));
    }

    #[test]
    fn test_missing_thumbnail_fails() {
        let dir = fixture(&["orphan.mp4"], &[]);
        let err = Catalog::load(
            &dir.path().join("videos"),
            &dir.path().join("thumbnails"),
            1920,
            3,
        )
        .unwrap_err();
        assert!(err.to_string().contains("orphan.png"));
    }

    #[test]
    fn test_missing_video_dir_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Catalog::load(&dir.path().join("nope"), dir.path(), 1920, 3).is_err());
    }
}
