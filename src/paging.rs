//! Offset/limit paging: `limit` is clamped into `[1, page_max_limit]` and
//! falls back to a configured default rather than being merely
//! validated-and-rejected.

use crate::config::Config;

#[derive(Debug, Clone, Copy)]
pub struct Paging {
    pub offset: i64,
    pub limit: i64,
}

impl Paging {
    /// Builds a paging window from caller-supplied, possibly absent,
    /// offset/limit, clamping `limit` into `[1, page_max_limit]` and
    /// falling back to `default_page_limit` when unset.
    pub fn clamp(offset: Option<i64>, limit: Option<i64>, config: &Config) -> Self {
        let offset = offset.unwrap_or(0).max(0);
        let limit = limit
            .unwrap_or(config.default_page_limit)
            .clamp(1, config.page_max_limit);
        Self { offset, limit }
    }
}

/// A page of results plus the total row count matching the query.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, paging: Paging) -> Self {
        Self {
            items,
            total,
            offset: paging.offset,
            limit: paging.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            database_url: "postgres://localhost/test".to_string(),
            page_max_limit: 100,
            default_page_limit: 10,
            default_currency: "USD".to_string(),
        }
    }

    #[test]
    fn missing_limit_falls_back_to_default() {
        let p = Paging::clamp(None, None, &config());
        assert_eq!(p.limit, 10);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn limit_above_max_is_clamped_down() {
        let p = Paging::clamp(Some(5), Some(1_000), &config());
        assert_eq!(p.limit, 100);
        assert_eq!(p.offset, 5);
    }

    #[test]
    fn zero_limit_is_clamped_up_to_one() {
        let p = Paging::clamp(None, Some(0), &config());
        assert_eq!(p.limit, 1);
    }
}
