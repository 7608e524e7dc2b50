//! Query parameters and pagination utilities

use serde::{Deserialize, Serialize};

/// Records per page when the client sends nothing usable
pub const DEFAULT_RECORDS_PER_PAGE: usize = 10;

/// Page number when the client sends nothing usable
pub const DEFAULT_PAGE: usize = 1;

/// Raw pagination parameters taken from the query string
///
/// Values are kept as strings and parsed leniently: anything absent,
/// unparsable or below 1 falls back to its default instead of rejecting
/// the request.
///
/// # Example
/// ```rust,ignore
/// // GET /foods?recordsPerPage=2&page=3
/// // GET /foods?recordsPerPage=5&startIndex=12
/// pub async fn list_foods(Query(params): Query<PageParams>) { ... }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    /// Number of items per page
    pub records_per_page: Option<String>,

    /// Page number (starts at 1)
    pub page: Option<String>,

    /// Explicit offset overriding the one derived from `page`
    pub start_index: Option<String>,
}

impl PageParams {
    /// Records per page, defaulting to 10
    pub fn records_per_page(&self) -> usize {
        parse_positive(self.records_per_page.as_deref()).unwrap_or(DEFAULT_RECORDS_PER_PAGE)
    }

    /// Page number, defaulting to 1
    pub fn page(&self) -> usize {
        parse_positive(self.page.as_deref()).unwrap_or(DEFAULT_PAGE)
    }

    /// Explicit start index, when it parses as an integer
    ///
    /// A negative index counts back from the end of the collection.
    pub fn start_index(&self) -> Option<i64> {
        self.start_index
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
    }

    /// Resolve the parameters into the slice to return
    pub fn window(&self) -> PageWindow {
        let records_per_page = self.records_per_page();
        let start_index = self.start_index().unwrap_or_else(|| {
            let offset = (self.page() - 1).saturating_mul(records_per_page);
            i64::try_from(offset).unwrap_or(i64::MAX)
        });

        PageWindow {
            start_index,
            records_per_page,
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n >= 1)
        .and_then(|n| usize::try_from(n).ok())
}

/// Resolved slice of a collection: `records_per_page` items from `start_index`
///
/// Same semantics as MongoDB's `$slice` with a position: a negative
/// `start_index` counts from the end and stops at the first record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub start_index: i64,
    pub records_per_page: usize,
}

impl PageWindow {
    pub fn new(start_index: i64, records_per_page: usize) -> Self {
        Self {
            start_index,
            records_per_page,
        }
    }

    /// First position of the window in a collection of `len` records
    pub fn offset(&self, len: usize) -> usize {
        match usize::try_from(self.start_index) {
            Ok(start) => start,
            Err(_) => {
                let back = usize::try_from(self.start_index.unsigned_abs()).unwrap_or(usize::MAX);
                len.saturating_sub(back)
            }
        }
    }

    /// Apply the window to an already materialised list
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let offset = self.offset(items.len());
        items
            .into_iter()
            .skip(offset)
            .take(self.records_per_page)
            .collect()
    }
}

/// One page of records plus the size of the whole collection
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Count of all records, regardless of the window
    pub total_count: u64,

    /// Records inside the window
    pub items: Vec<T>,
}
