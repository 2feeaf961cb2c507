//! Pagination for list queries.

use serde::{Deserialize, Serialize};

use crate::config::Settings;

/// Which slice of a result set to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 0-based page index.
    pub page: u32,
    /// Items per page, always at least 1.
    pub size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None, &Settings::default())
    }
}

impl PageRequest {
    pub fn new(page: Option<u32>, size: Option<u32>, settings: &Settings) -> Self {
        Self {
            page: page.unwrap_or(0),
            size: size
                .unwrap_or(settings.default_page_size)
                .clamp(1, settings.max_page_size.max(1)),
        }
    }

    pub fn offset(&self) -> usize {
        self.page as usize * self.size as usize
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    /// Total number of matches across all pages.
    pub total: u64,
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Cut `request`'s slice out of the complete, ordered result set.
    pub fn slice(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len();
        let items: Vec<T> = all
            .into_iter()
            .skip(request.offset())
            .take(request.size as usize)
            .collect();
        let has_more = request.offset() + items.len() < total;
        Self {
            items,
            page: request.page,
            size: request.size,
            total: total as u64,
            has_more,
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self::slice(Vec::new(), request)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total: self.total,
            has_more: self.has_more,
        }
    }
}
