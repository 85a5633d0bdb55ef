/// 1-based page window over a single rover photo result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Pagination {
    pub const MAX_LIMIT: u32 = 100;

    /// Builds a window from raw query values. Unparseable or zero values
    /// fall back to page 1 and `default_limit`; the limit is capped at
    /// [`Self::MAX_LIMIT`].
    #[must_use]
    pub fn from_params(page: Option<&str>, limit: Option<&str>, default_limit: u32) -> Self {
        let page = parse_positive(page).unwrap_or(1);
        let limit = parse_positive(limit)
            .unwrap_or(default_limit)
            .clamp(1, Self::MAX_LIMIT);
        Self { page, limit }
    }

    #[must_use]
    pub fn start_index(&self) -> usize {
        (self.page as usize)
            .saturating_sub(1)
            .saturating_mul(self.limit as usize)
    }

    /// Returns the slice for this page, or `None` when the page starts past
    /// the end of `items`.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> Option<&'a [T]> {
        let start = self.start_index();
        if start >= items.len() {
            return None;
        }
        let end = start.saturating_add(self.limit as usize).min(items.len());
        Some(&items[start..end])
    }
}

fn parse_positive(value: Option<&str>) -> Option<u32> {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
}
