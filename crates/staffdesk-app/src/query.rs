// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::ops::Range;

use crate::Record;

pub const PAGE_SIZES: [usize; 3] = [5, 10, 25];
pub const DEFAULT_PAGE_SIZE: usize = PAGE_SIZES[0];

/// Records whose search fields contain `query`, ignoring case, in their
/// original order. A blank query keeps everything; otherwise the query is
/// matched as typed, surrounding spaces included.
pub fn filter_records<R: Record>(records: &[R], query: &str) -> Vec<R> {
    if query.trim().is_empty() {
        return records.to_vec();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| record.matches(&needle))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    /// Sizes outside `PAGE_SIZES` fall back to the default.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: normalize_page_size(page_size),
        }
    }

    pub const fn page(self) -> usize {
        self.page
    }

    pub const fn page_size(self) -> usize {
        self.page_size
    }

    pub fn page_count(self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = normalize_page_size(page_size);
        self.page = 0;
    }

    pub fn cycle_page_size(&mut self) {
        let position = PAGE_SIZES
            .iter()
            .position(|size| *size == self.page_size)
            .unwrap_or(0);
        self.set_page_size(PAGE_SIZES[(position + 1) % PAGE_SIZES.len()]);
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    pub fn next_page(&mut self, total: usize) -> bool {
        if self.page + 1 >= self.page_count(total) {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page == 0 {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Pulls the page back inside the data after rows disappear.
    pub fn clamp(&mut self, total: usize) {
        self.page = self.page.min(self.page_count(total) - 1);
    }

    /// Index range of the visible rows; empty when `page * size >= total`.
    pub fn range(self, total: usize) -> Range<usize> {
        let start = self.page.saturating_mul(self.page_size);
        if start >= total {
            return total..total;
        }
        start..(start + self.page_size).min(total)
    }

    pub fn slice<T>(self, rows: &[T]) -> &[T] {
        &rows[self.range(rows.len())]
    }

    /// Footer text, e.g. `rows 6-10 of 23 · page 2/5 · 5 per page`.
    pub fn footer(self, total: usize) -> String {
        let range = self.range(total);
        let rows = if range.is_empty() {
            format!("rows 0 of {total}")
        } else {
            format!("rows {}-{} of {total}", range.start + 1, range.end)
        };
        format!(
            "{rows} · page {}/{} · {} per page",
            self.page + 1,
            self.page_count(total),
            self.page_size
        )
    }
}

fn normalize_page_size(page_size: usize) -> usize {
    if PAGE_SIZES.contains(&page_size) {
        page_size
    } else {
        DEFAULT_PAGE_SIZE
    }
}
