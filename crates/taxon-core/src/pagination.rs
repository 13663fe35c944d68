//! Page arithmetic shared by term lists and term pages.
//!
//! `page_count = ceil(total / per_page)`. Page 1 always exists, even for an
//! empty listing; any page past `page_count` (when there is at least one
//! page) is not found.

use serde::{Deserialize, Serialize};

use crate::models::Lookup;

/// Bounds of one valid page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub page: usize,
    pub page_count: usize,
    pub per_page: usize,
    pub total: usize,
}

impl PageWindow {
    /// Resolve `page` (1-based) against `total` items, `per_page` at a time.
    ///
    /// Pages below 1 clamp to 1. A `per_page` of 0 is treated as 1.
    pub fn resolve(total: usize, per_page: usize, page: usize) -> Lookup<PageWindow> {
        let per_page = per_page.max(1);
        let page = page.max(1);
        let page_count = page_count(total, per_page);
        if page_count > 0 && page > page_count {
            return Lookup::NotFound;
        }
        Lookup::Found(PageWindow {
            page,
            page_count,
            per_page,
            total,
        })
    }

    /// Index of the first item on this page.
    ///
    /// Saturates: an empty listing accepts any page number.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Copy this page's slice out of the full listing.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .skip(self.offset())
            .take(self.per_page)
            .cloned()
            .collect()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

/// `ceil(total / per_page)`, with `per_page` of 0 treated as 1.
pub fn page_count(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1))
}

/// Parse a raw `page` query value.
///
/// Missing means page 1. Anything that is not a non-negative integer is not
/// found rather than silently mapped to some other page.
pub fn parse_page_param(raw: Option<&str>) -> Lookup<usize> {
    match raw.map(str::trim) {
        None | Some("") => Lookup::Found(1),
        Some(value) => value.parse::<usize>().ok().into(),
    }
}
