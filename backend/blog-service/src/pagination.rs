/// Limit/offset pagination that only engages when the client asks for it
///
/// Without a `limit` query parameter a list endpoint returns a plain JSON
/// array. With `limit=N` it returns `{count, next, previous, results}` where
/// `next`/`previous` are absolute URLs built from the current request.
use actix_web::HttpRequest;
use serde::{Deserialize, Serialize};
use url::Url;

/// Raw pagination query parameters, parsed leniently
#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Requested result window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub limit: i64,
    pub offset: i64,
}

impl Window {
    /// `None` unless `limit` is a positive integer. A malformed or negative
    /// `offset` falls back to 0. `max_limit` caps the page size.
    pub fn from_query(query: &PaginationQuery, max_limit: Option<i64>) -> Option<Self> {
        let limit = query
            .limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|limit| *limit > 0)?;

        let limit = match max_limit {
            Some(max) if max > 0 => limit.min(max),
            _ => limit,
        };

        let offset = query
            .offset
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|offset| *offset >= 0)
            .unwrap_or(0);

        Some(Self { limit, offset })
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// List response: a bare array or a page, depending on the request
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Listing<T> {
    All(Vec<T>),
    Page(Page<T>),
}

impl<T> Page<T> {
    pub fn new(request_url: &str, window: Window, count: i64, results: Vec<T>) -> Self {
        Self {
            count,
            next: next_link(request_url, window, count),
            previous: previous_link(request_url, window),
            results,
        }
    }
}

/// Absolute URL of the current request, including its query string
pub fn request_url(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}{}", info.scheme(), info.host(), req.uri())
}

fn next_link(url: &str, window: Window, count: i64) -> Option<String> {
    let next_offset = window
        .offset
        .checked_add(window.limit)
        .filter(|end| *end < count)?;
    let url = replace_query_param(url, "limit", &window.limit.to_string());
    Some(replace_query_param(&url, "offset", &next_offset.to_string()))
}

fn previous_link(url: &str, window: Window) -> Option<String> {
    if window.offset <= 0 {
        return None;
    }
    let url = replace_query_param(url, "limit", &window.limit.to_string());
    if window.offset <= window.limit {
        return Some(remove_query_param(&url, "offset"));
    }
    Some(replace_query_param(
        &url,
        "offset",
        &(window.offset - window.limit).to_string(),
    ))
}

/// Rebuild the query string with every `key` pair dropped and, when `value`
/// is given, a single `key=value` added. Keys are compared decoded and the
/// result is re-encoded, sorted by key.
fn rewrite_query(url: &str, key: &str, value: Option<&str>) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };

    let mut pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(k, _)| k.as_ref() != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if let Some(value) = value {
        pairs.push((key.to_string(), value.to_string()));
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    if pairs.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().clear().extend_pairs(pairs);
    }
    parsed.into()
}

/// Set `key=value` in the URL's query string, replacing existing values.
pub fn replace_query_param(url: &str, key: &str, value: &str) -> String {
    rewrite_query(url, key, Some(value))
}

/// Drop every occurrence of `key` from the URL's query string.
pub fn remove_query_param(url: &str, key: &str) -> String {
    rewrite_query(url, key, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://testserver/api/v1/posts/";

    fn query(limit: Option<&str>, offset: Option<&str>) -> PaginationQuery {
        PaginationQuery {
            limit: limit.map(str::to_owned),
            offset: offset.map(str::to_owned),
        }
    }

    #[test]
    fn test_no_limit_means_unpaginated() {
        assert_eq!(Window::from_query(&query(None, Some("5")), None), None);
        assert_eq!(Window::from_query(&query(Some("abc"), None), None), None);
        assert_eq!(Window::from_query(&query(Some("0"), None), None), None);
        assert_eq!(Window::from_query(&query(Some("-3"), None), None), None);
    }

    #[test]
    fn test_offset_defaults_and_cap() {
        let window = Window::from_query(&query(Some("10"), Some("oops")), None).unwrap();
        assert_eq!(window, Window { limit: 10, offset: 0 });

        let window = Window::from_query(&query(Some("10"), Some("-4")), None).unwrap();
        assert_eq!(window.offset, 0);

        let window = Window::from_query(&query(Some("500"), Some("20")), Some(100)).unwrap();
        assert_eq!(window, Window { limit: 100, offset: 20 });
    }

    #[test]
    fn test_first_page_links() {
        let url = format!("{}?limit=2", URL);
        let page = Page::new(&url, Window { limit: 2, offset: 0 }, 5, vec![1, 2]);

        assert_eq!(page.count, 5);
        assert_eq!(page.next.as_deref(), Some("http://testserver/api/v1/posts/?limit=2&offset=2"));
        assert_eq!(page.previous, None);
    }

    #[test]
    fn test_middle_page_links() {
        let url = format!("{}?limit=2&offset=2", URL);
        let page = Page::new(&url, Window { limit: 2, offset: 2 }, 5, vec![3, 4]);

        assert_eq!(page.next.as_deref(), Some("http://testserver/api/v1/posts/?limit=2&offset=4"));
        assert_eq!(page.previous.as_deref(), Some("http://testserver/api/v1/posts/?limit=2"));
    }

    #[test]
    fn test_last_page_links() {
        let url = format!("{}?offset=4&limit=1&group=3", URL);
        let page = Page::new(&url, Window { limit: 1, offset: 4 }, 5, vec![5]);

        assert_eq!(page.next, None);
        assert_eq!(
            page.previous.as_deref(),
            Some("http://testserver/api/v1/posts/?group=3&limit=1&offset=3")
        );
    }

    #[test]
    fn test_offset_past_end() {
        let url = format!("{}?limit=10&offset=50", URL);
        let page: Page<i32> = Page::new(&url, Window { limit: 10, offset: 50 }, 3, vec![]);

        assert_eq!(page.next, None);
        assert_eq!(
            page.previous.as_deref(),
            Some("http://testserver/api/v1/posts/?limit=10&offset=40")
        );
    }

    #[test]
    fn test_listing_serializes_untagged() {
        let all: Listing<i32> = Listing::All(vec![1, 2]);
        assert_eq!(serde_json::to_value(&all).unwrap(), serde_json::json!([1, 2]));

        let page = Listing::Page(Page::new(URL, Window { limit: 1, offset: 0 }, 1, vec![1]));
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["count"], 1);
        assert!(json["next"].is_null());
        assert!(json["previous"].is_null());
        assert_eq!(json["results"], serde_json::json!([1]));
    }

    #[test]
    fn test_huge_limit_has_no_next_page() {
        let window =
            Window::from_query(&query(Some("9223372036854775807"), Some("1")), None).unwrap();
        let url = format!("{}?limit=9223372036854775807&offset=1", URL);
        let page: Page<i32> = Page::new(&url, window, 3, vec![]);

        assert_eq!(page.next, None);
        assert_eq!(
            page.previous.as_deref(),
            Some("http://testserver/api/v1/posts/?limit=9223372036854775807")
        );
    }

    #[test]
    fn test_encoded_and_repeated_keys_are_replaced() {
        let url = format!("{}?lim%69t=5&limit=7&search=a+b&offset=1", URL);

        assert_eq!(
            replace_query_param(&url, "limit", "2"),
            "http://testserver/api/v1/posts/?limit=2&offset=1&search=a+b"
        );
        assert_eq!(
            remove_query_param(&format!("{}?offset=3&of%66set=4", URL), "offset"),
            URL
        );
    }
}
