use serde::{Deserialize, Serialize};

/// `?page=` as sent by the dashboard. The leading integer is read and any
/// trailing text ignored (`2abc` is page 2). Anything without a leading
/// integer >= 1 (missing, empty, `abc`, `0`, `-3`) means the first page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_lenient_page")]
    pub page: Option<u64>,
}

fn deserialize_lenient_page<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.as_deref().and_then(parse_page))
}

fn parse_page(raw: &str) -> Option<u64> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() || negative {
        return None;
    }
    // Too many digits for u64 still names a page far past the end.
    let page = digits.parse::<u64>().unwrap_or(u64::MAX);
    (page >= 1).then_some(page)
}

impl PageQuery {
    pub fn get_page(&self) -> u64 {
        self.page.unwrap_or(1)
    }
}

/// Offset/limit for one page. Pages past the end are not clamped; they
/// simply select nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub page_size: u64,
}

impl PageWindow {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size,
        }
    }

    /// Capped at `i64::MAX`, the largest offset the database accepts.
    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.page_size)
            .min(i64::MAX as u64)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

pub fn total_pages(total_items: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

#[derive(Debug, Serialize)]
pub struct PaginationInfo {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: u64,
}

#[derive(Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationInfo,
}

impl PaginationInfo {
    pub fn new(current_page: u64, total_items: u64, items_per_page: u64) -> Self {
        Self {
            current_page,
            total_pages: total_pages(total_items, items_per_page),
            total_items,
            items_per_page,
        }
    }

    /// The pager is only worth showing when there is somewhere to go.
    pub fn has_multiple_pages(&self) -> bool {
        self.total_pages > 1
    }
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, pagination: PaginationInfo) -> Self {
        Self { data, pagination }
    }
}
