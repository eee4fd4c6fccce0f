//! Pager
//!
//! Slices a View into fixed-size, 1-based pages.

use crate::record::Record;

/// One page of a View plus its range metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    /// Records on this page
    pub items: &'a [Record],

    /// 1-based position of the first record on this page
    pub range_start: usize,

    /// 1-based position of the last record on this page (capped at `total`)
    pub range_end: usize,

    /// Length of the whole View
    pub total: usize,
}

impl Page<'_> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Slice `view` into page `page_number` (1-based; 0 is treated as 1)
///
/// Pages past the end are empty rather than an error.
pub fn page(view: &[Record], page_number: usize, page_size: usize) -> Page<'_> {
    let page_number = page_number.max(1);
    let total = view.len();

    let offset = (page_number - 1).saturating_mul(page_size);
    let range_start = offset.saturating_add(1);
    let range_end = (offset.saturating_add(page_size)).min(total);

    let items = if offset >= total {
        &view[..0]
    } else {
        &view[offset..range_end]
    };

    Page {
        items,
        range_start,
        range_end,
        total,
    }
}

/// Number of pages needed for `total` records
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}
