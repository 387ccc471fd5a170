//! Search-string classification and page links for the application listing.

use url::form_urlencoded;

pub const DEFAULT_OFFSET: u32 = 0;
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationFilter {
    All,
    /// Exact match on the owning employee's id.
    EmployeeId(i64),
    /// Case-insensitive substring of the employee's first or last name.
    Name(String),
}

impl ApplicationFilter {
    pub fn from_search(search: &str) -> Self {
        if search.is_empty() {
            return ApplicationFilter::All;
        }

        if search.bytes().all(|b| b.is_ascii_digit()) {
            // digits past i64::MAX fall back to a name search
            if let Ok(id) = search.parse() {
                return ApplicationFilter::EmployeeId(id);
            }
        }

        ApplicationFilter::Name(search.to_string())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct PageLinks {
    pub next: String,
    pub prev: String,
}

/// `next`/`prev` are query strings carrying the same search and limit, or
/// empty when there is no such page. A zero limit never advances, so it gets
/// no `next`.
pub fn page_links(search: &str, offset: u32, limit: u32, count: i64) -> PageLinks {
    let next = if limit > 0 && i64::from(offset) + i64::from(limit) < count {
        query_string(search, offset.saturating_add(limit), limit)
    } else {
        String::new()
    };

    let prev = if offset > 0 {
        query_string(search, offset.saturating_sub(limit), limit)
    } else {
        String::new()
    };

    PageLinks { next, prev }
}

fn query_string(search: &str, offset: u32, limit: u32) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("search", search)
        .append_pair("offset", &offset.to_string())
        .append_pair("limit", &limit.to_string())
        .finish()
}
