//! Grid pagination for the selection screen.
//!
//! Videos are laid out row-major into pages of `rows * cols` cells. Page
//! numbers are 1-based and the current page never leaves `1..=page_count`.

use crate::config::GridSize;

/// One occupied grid position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub video: String,
}

/// A grid-sized slice of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub cells: Vec<Cell>,
}

impl Page {
    pub fn video_at(&self, row: usize, col: usize) -> Option<&str> {
        self.cells
            .iter()
            .find(|c| c.row == row && c.col == col)
            .map(|c| c.video.as_str())
    }
}

/// Visibility of the page navigation buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavButtons {
    pub previous: bool,
    pub next: bool,
}

#[derive(Debug)]
pub struct Pager {
    grid: GridSize,
    pages: Vec<Page>,
    current: usize,
    visible: Option<usize>,
}

impl Pager {
    /// Partition `videos` into pages in a single pass.
    pub fn new<I, S>(videos: I, grid: GridSize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let per_page = grid.cells();
        let mut pages: Vec<Page> = Vec::new();

        for (index, video) in videos.into_iter().enumerate() {
            let slot = index % per_page;
            if slot == 0 {
                pages.push(Page {
                    number: pages.len() + 1,
                    cells: Vec::with_capacity(per_page),
                });
            }
            if let Some(page) = pages.last_mut() {
                page.cells.push(Cell {
                    row: slot / grid.cols,
                    col: slot % grid.cols,
                    video: video.into(),
                });
            }
        }

        log::debug!(
            "Paginated {} videos into {} pages of {}x{}",
            pages.iter().map(|p| p.cells.len()).sum::<usize>(),
            pages.len(),
            grid.rows,
            grid.cols
        );

        Pager {
            grid,
            pages,
            current: 1,
            visible: None,
        }
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// 1-based index of the current page.
    pub fn current(&self) -> usize {
        self.current
    }

    /// The page currently shown, if any has been loaded yet.
    pub fn visible_page(&self) -> Option<&Page> {
        self.pages.get(self.visible?.checked_sub(1)?)
    }

    /// Show page `n`. Returns `false` and changes nothing when `n` is out of range.
    pub fn load_page(&mut self, n: usize) -> bool {
        if n < 1 || n > self.pages.len() {
            log::debug!("Ignoring page {} (have {})", n, self.pages.len());
            return false;
        }
        if let Some(previous) = self.visible.replace(n) {
            log::debug!("Hiding page {}", previous);
        }
        self.current = n;
        if let Some(page) = self.visible_page() {
            log::info!(
                "Showing page {}/{} ({} videos)",
                page.number,
                self.pages.len(),
                page.cells.len()
            );
        }
        true
    }

    /// Hide the visible page without changing the current index.
    pub fn hide(&mut self) {
        self.visible = None;
    }

    pub fn next_page(&mut self) -> bool {
        self.load_page(self.current + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(n) => self.load_page(n),
            None => false,
        }
    }

    /// Navigation buttons are only drawn when there is more than one page.
    pub fn nav(&self) -> NavButtons {
        if self.pages.len() <= 1 {
            return NavButtons::default();
        }
        NavButtons {
            previous: self.current > 1,
            next: self.current < self.pages.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn videos(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("clip{i:02}.mp4")).collect()
    }

    fn grid(rows: usize, cols: usize) -> GridSize {
        GridSize { rows, cols }
    }

    #[test]
    fn test_seven_videos_fit_one_page() {
        let mut pager = Pager::new(videos(7), grid(3, 3));
        assert_eq!(pager.page_count(), 1);
        assert!(pager.load_page(1));
        assert_eq!(pager.nav(), NavButtons { previous: false, next: false });
    }

    #[test]
    fn test_twelve_videos_make_two_pages() {
        let mut pager = Pager::new(videos(12), grid(3, 3));
        assert_eq!(pager.page_count(), 2);
        assert_eq!(pager.pages[0].cells.len(), 9);
        assert_eq!(pager.pages[1].cells.len(), 3);

        pager.load_page(1);
        assert_eq!(pager.nav(), NavButtons { previous: false, next: true });

        pager.load_page(2);
        assert_eq!(pager.nav(), NavButtons { previous: true, next: false });
    }

    #[test]
    fn test_middle_page_shows_both_buttons() {
        let mut pager = Pager::new(videos(25), grid(3, 3));
        assert_eq!(pager.page_count(), 3);
        pager.load_page(2);
        assert_eq!(pager.nav(), NavButtons { previous: true, next: true });
    }

    #[test]
    fn test_partition_preserves_every_video() {
        for rows in 1..=4 {
            for cols in 1..=4 {
                for n in 0..40 {
                    let pager = Pager::new(videos(n), grid(rows, cols));
                    let per_page = rows * cols;
                    assert_eq!(pager.page_count(), n.div_ceil(per_page));
                    assert!(pager.pages.iter().all(|p| p.cells.len() <= per_page));

                    let placed: Vec<&str> = pager
                        .pages
                        .iter()
                        .flat_map(|p| p.cells.iter().map(|c| c.video.as_str()))
                        .collect();
                    let expected = videos(n);
                    assert_eq!(placed, expected.iter().map(String::as_str).collect::<Vec<_>>());
                }
            }
        }
    }

    #[test]
    fn test_cells_are_row_major() {
        let pager = Pager::new(videos(5), grid(2, 3));
        let page = &pager.pages[0];
        let coords: Vec<(usize, usize)> = page.cells.iter().map(|c| (c.row, c.col)).collect();
        assert_eq!(coords, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1)]);
        assert_eq!(page.video_at(1, 1), Some("clip04.mp4"));
        assert_eq!(page.video_at(1, 2), None);
    }

    #[test]
    fn test_load_page_out_of_range_is_noop() {
        for n in 0..30 {
            let mut pager = Pager::new(videos(n), grid(2, 2));
            pager.load_page(1);
            let before = (pager.current(), pager.visible_page().map(|p| p.number));
            assert!(!pager.load_page(0));
            assert!(!pager.load_page(pager.page_count() + 1));
            assert_eq!(before, (pager.current(), pager.visible_page().map(|p| p.number)));
        }
    }

    #[test]
    fn test_next_and_previous_stop_at_edges() {
        let mut pager = Pager::new(videos(10), grid(2, 2));
        pager.load_page(1);
        assert!(!pager.previous_page());
        assert!(pager.next_page());
        assert!(pager.next_page());
        assert_eq!(pager.current(), 3);
        assert!(!pager.next_page());
        assert_eq!(pager.current(), 3);
        assert!(pager.previous_page());
        assert_eq!(pager.current(), 2);
    }

    #[test]
    fn test_load_page_swaps_visible_page() {
        let mut pager = Pager::new(videos(10), grid(2, 2));
        assert!(pager.visible_page().is_none());
        pager.load_page(2);
        assert_eq!(pager.visible_page().map(|p| p.number), Some(2));
        pager.hide();
        assert!(pager.visible_page().is_none());
        assert_eq!(pager.current(), 2);
    }

    #[test]
    fn test_empty_catalog_has_no_pages() {
        let mut pager = Pager::new(Vec::<String>::new(), grid(3, 3));
        assert_eq!(pager.page_count(), 0);
        assert_eq!(pager.current(), 1);
        assert!(pager.visible_page().is_none());
        assert!(!pager.load_page(1));
        assert_eq!(pager.nav(), NavButtons::default());
    }
}
