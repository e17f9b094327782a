//! Paginated query façade.
//!
//! List endpoints take `page`/`limit` (movements additionally a `type`
//! filter) and may answer with either a paginated envelope or a legacy bare
//! array. Both shapes normalize here, in one place, into [`Page`].

use stocklink_shared::{ListData, MovementType};

/// Parameters of a paginated list request. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
    /// Movement-type filter; only meaningful on movement endpoints.
    pub movement_type: Option<MovementType>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            movement_type: None,
        }
    }
}

impl PageQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            movement_type: None,
        }
    }

    pub fn with_type(mut self, movement_type: MovementType) -> Self {
        self.movement_type = Some(movement_type);
        self
    }

    /// Render as a query string, `page=2&limit=10&type=STOCK_IN`.
    pub fn to_query(&self) -> String {
        let mut q = format!("page={}&limit={}", self.page, self.limit);
        if let Some(t) = self.movement_type {
            q.push_str("&type=");
            q.push_str(t.as_str());
        }
        q
    }
}

/// Normalized list result every consumer can rely on, regardless of which
/// shape the server answered with.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub total_pages: u32,
    pub page: u32,
    pub limit: u32,
}

impl<T> From<ListData<T>> for Page<T> {
    fn from(data: ListData<T>) -> Self {
        match data {
            ListData::Paginated(env) => Page {
                items: env.items,
                total: env.total,
                total_pages: env.total_pages,
                page: env.page,
                limit: env.limit,
            },
            // Legacy unpaginated shape: everything fits on one page.
            ListData::Plain(items) => {
                let total = items.len() as u64;
                let limit = items.len() as u32;
                Page {
                    items,
                    total,
                    total_pages: 1,
                    page: 1,
                    limit,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_array_normalizes_to_single_page() {
        let data: ListData<i32> = serde_json::from_str("[10,20,30]").unwrap();
        let page = Page::from(data);
        assert_eq!(page.items, vec![10, 20, 30]);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn envelope_passes_through() {
        let data: ListData<i32> = serde_json::from_str(
            r#"{"page":3,"limit":2,"total":7,"totalPages":4,"items":[6,7]}"#,
        )
        .unwrap();
        let page = Page::from(data);
        assert_eq!(page.items, vec![6, 7]);
        assert_eq!(page.total, 7);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.page, 3);
        assert_eq!(page.limit, 2);
    }

    #[test]
    fn empty_bare_array_still_reports_one_page() {
        let data: ListData<i32> = serde_json::from_str("[]").unwrap();
        let page = Page::from(data);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn query_string_includes_type_filter() {
        let q = PageQuery::new(2, 25).with_type(MovementType::Transfer);
        assert_eq!(q.to_query(), "page=2&limit=25&type=TRANSFER");
        assert_eq!(PageQuery::default().to_query(), "page=1&limit=10");
    }
}
