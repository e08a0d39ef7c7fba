//! Page-size policy. The catalog page size follows the viewport and is
//! recomputed on every resize.

/// Viewport size in whatever unit the front-end measures (pixels, cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub item_width: u16,
    pub item_height: u16,
    /// Fixed number of rows per page; `None` fills the viewport height.
    pub max_rows: Option<u16>,
    /// Viewports at or below this width use `compact_page_size`.
    pub compact_width: u16,
    pub compact_page_size: usize,
}

impl GridLayout {
    /// Card grid: 260px cards, two rows, 10 items on narrow screens.
    pub fn browser() -> Self {
        Self {
            item_width: 260,
            item_height: 1,
            max_rows: Some(2),
            compact_width: 1024,
            compact_page_size: 10,
        }
    }

    /// Single-column list, one row per show, as many rows as fit.
    pub fn list_rows() -> Self {
        Self {
            item_width: u16::MAX,
            item_height: 1,
            max_rows: None,
            compact_width: 0,
            compact_page_size: 1,
        }
    }

    pub fn page_size(&self, viewport: Viewport) -> usize {
        if viewport.width <= self.compact_width {
            return self.compact_page_size.max(1);
        }
        let columns = (viewport.width / self.item_width.max(1)).max(1) as usize;
        let rows = match self.max_rows {
            Some(rows) => rows.max(1) as usize,
            None => (viewport.height / self.item_height.max(1)).max(1) as usize,
        };
        columns * rows
    }
}
