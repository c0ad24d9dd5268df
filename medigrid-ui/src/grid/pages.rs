//! Page arithmetic and the visible page-number window.

/// One entry in the rendered page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    /// A concrete, clickable page number.
    Number(u64),
    /// A gap between the edge pages and the window around the current
    /// page.
    Ellipsis,
}

/// A selectable page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSizeOption {
    /// A fixed number of rows per page.
    Size(u64),
    /// Every record on one page. Resolved against the record total at
    /// the moment it is chosen, not re-resolved afterwards.
    All,
}

/// The stock page-size menu.
pub const DEFAULT_PAGE_SIZES: [PageSizeOption; 3] = [
    PageSizeOption::Size(50),
    PageSizeOption::Size(100),
    PageSizeOption::All,
];

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Default width of the page-number window.
pub const DEFAULT_MAX_VISIBLE_PAGES: u64 = 3;

/// Inserts a custom size into an option list, keeping numeric sizes
/// sorted and `All` last. A size already present is not duplicated.
pub fn insert_page_size(options: &mut Vec<PageSizeOption>, size: u64) {
    if options.contains(&PageSizeOption::Size(size)) {
        return;
    }
    let insert_at = options
        .iter()
        .position(|option| match option {
            PageSizeOption::Size(existing) => *existing > size,
            PageSizeOption::All => true,
        })
        .unwrap_or(options.len());
    options.insert(insert_at, PageSizeOption::Size(size));
}

/// Computes the visible page-number strip.
///
/// With `total <= max_visible` every page is listed. Otherwise the strip
/// is the first page, an ellipsis when the current page has moved past 2,
/// a window of up to one page either side of the current page (clamped to
/// the interior), an ellipsis when the window has not reached the end,
/// and the last page.
pub fn page_window(current: u64, total: u64, max_visible: u64) -> Vec<PageEntry> {
    let mut entries = Vec::new();
    if total == 0 {
        return entries;
    }

    if total <= max_visible {
        entries.extend((1..=total).map(PageEntry::Number));
        return entries;
    }

    entries.push(PageEntry::Number(1));
    if current > 2 {
        entries.push(PageEntry::Ellipsis);
    }

    let window_start = current.saturating_sub(1).max(2);
    let window_end = (current + 1).min(total - 1);
    for page in window_start..=window_end {
        entries.push(PageEntry::Number(page));
    }

    if current < total - 1 {
        entries.push(PageEntry::Ellipsis);
    }
    entries.push(PageEntry::Number(total));

    entries
}

/// Derived pagination state for one grid.
#[derive(Debug, Clone)]
pub struct PageState {
    /// Current page, 1-based.
    pub current_page: u64,
    /// Rows per page, always positive.
    pub page_size: u64,
    /// Total records across all pages.
    pub total_records: u64,
    /// Total pages, at least 1.
    pub total_pages: u64,
    /// 1-based ordinal of the first row on this page.
    pub start_item: u64,
    /// 1-based ordinal of the last row on this page.
    pub end_item: u64,
    /// The rendered page-number strip.
    pub pages: Vec<PageEntry>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_records: 0,
            total_pages: 1,
            start_item: 0,
            end_item: 0,
            pages: Vec::new(),
        }
    }
}

impl PageState {
    /// Clamps the current page into `[1, total_pages]` for the current
    /// totals.
    pub fn clamp_page(&mut self) {
        self.total_pages = self.total_records.div_ceil(self.page_size).max(1);
        self.current_page = self.current_page.clamp(1, self.total_pages);
    }

    /// Recomputes the derived fields after any page, size or total
    /// change.
    pub fn recompute(&mut self, max_visible: u64) {
        self.clamp_page();
        if self.total_records == 0 {
            self.start_item = 0;
            self.end_item = 0;
        } else {
            self.start_item = (self.current_page - 1) * self.page_size + 1;
            self.end_item = (self.current_page * self.page_size).min(self.total_records);
        }
        self.pages = page_window(self.current_page, self.total_pages, max_visible);
    }

    /// Rows to skip for the current page.
    pub fn skip(&self) -> u64 {
        (self.current_page - 1) * self.page_size
    }
}
