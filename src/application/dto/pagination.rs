use crate::domain::common::ListWindow;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

/// Requested `limit`/`offset` before defaults and bounds are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl PageRequest {
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self { limit, offset }
    }

    /// Zero or missing limits fall back to `default_limit`; larger ones are capped.
    pub fn window(self, default_limit: u32) -> ListWindow {
        let limit = match self.limit {
            None | Some(0) => default_limit,
            Some(limit) => limit.min(MAX_LIMIT),
        };
        ListWindow::new(limit, self.offset.unwrap_or(0))
    }
}

/// One window of a listing. `next_offset` is present when more rows follow.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourcePage<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<u32>,
    pub has_more: bool,
}

impl<T> ResourcePage<T> {
    /// Build a page from rows fetched with one extra probe row.
    pub fn from_probe(mut items: Vec<T>, limit: u32, offset: u32) -> Self {
        let has_more = items.len() > limit as usize;
        if has_more {
            items.truncate(limit as usize);
        }
        Self {
            items,
            next_offset: has_more.then(|| offset + limit),
            has_more,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ResourcePage<U> {
        ResourcePage {
            items: self.items.into_iter().map(f).collect(),
            next_offset: self.next_offset,
            has_more: self.has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_row_marks_more_results() {
        let page = ResourcePage::from_probe(vec![1, 2, 3], 2, 4);
        assert_eq!(page.items, vec![1, 2]);
        assert!(page.has_more);
        assert_eq!(page.next_offset, Some(6));
    }

    #[test]
    fn page_request_applies_defaults_and_cap() {
        assert_eq!(PageRequest::default().window(DEFAULT_LIMIT), ListWindow::new(20, 0));
        assert_eq!(PageRequest::new(Some(0), Some(5)).window(30), ListWindow::new(30, 5));
        assert_eq!(PageRequest::new(Some(500), None).window(20), ListWindow::new(MAX_LIMIT, 0));
    }

    #[test]
    fn short_page_has_no_next_offset() {
        let page = ResourcePage::from_probe(vec![1], 2, 0);
        assert!(!page.has_more);
        assert_eq!(page.next_offset, None);
    }
}
