//! Pagination primitives
//!
//! [`PageRequest`] is built from untrusted query input and never fails:
//! unusable values fall back to defaults. [`Page`] carries one slice of
//! results together with the totals needed to render a pager.

use serde::Serialize;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Validated page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Build from numeric input.
    ///
    /// `page` below 1 is clamped to 1. `page_size` outside
    /// `1..=MAX_PAGE_SIZE` falls back to [`DEFAULT_PAGE_SIZE`].
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page = match page {
            Some(p) if p >= 1 => u32::try_from(p).unwrap_or(u32::MAX),
            _ => DEFAULT_PAGE,
        };

        let page_size = match page_size {
            Some(s) if (1..=i64::from(MAX_PAGE_SIZE)).contains(&s) => s as u32,
            _ => DEFAULT_PAGE_SIZE,
        };

        Self { page, page_size }
    }

    /// Build from raw query-string values. Non-numeric input behaves as absent.
    pub fn from_query(page: Option<&str>, page_size: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|s| s.trim().parse::<i64>().ok());
        Self::new(parse(page), parse(page_size))
    }

    #[inline]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[inline]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of records to skip
    #[inline]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    #[inline]
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub records: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(records: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            records,
            total,
            page: request.page(),
            page_size: request.page_size(),
            total_pages: total.div_ceil(request.limit()),
        }
    }

    /// Convert every record, keeping the totals
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            records: self.records.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}
