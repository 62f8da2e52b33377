//! Offset-based pagination.
//!
//! Every Zephyr Scale list endpoint takes `startAt`/`maxResults` and answers
//! with a [`Page`]. Whether more pages exist is signalled by `next` alone; a
//! short or empty page says nothing about it.

use std::future::Future;

use serde::{Deserialize, Deserializer, Serialize};

/// Largest `maxResults` the API accepts on a single call.
pub const MAX_RESULTS_LIMIT: u32 = 1000;

/// Page size used when walking every page of a listing.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub struct Page<T> {
    #[serde(default)]
    pub values: Vec<T>,
    #[serde(default)]
    pub start_at: Option<u32>,
    #[serde(default)]
    pub max_results: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub is_last: Option<bool>,
    /// The API sends the URL of the next page (or `null`); it is kept as a flag.
    #[serde(rename = "next", default, deserialize_with = "deserialize_next")]
    pub has_next: bool,
}

impl<T> Page<T> {
    /// A page holding `values` with the given has-next flag.
    pub fn new(values: Vec<T>, has_next: bool) -> Self {
        Self {
            values,
            start_at: None,
            max_results: None,
            total: None,
            is_last: None,
            has_next,
        }
    }
}

fn deserialize_next<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => false,
        Some(serde_json::Value::Bool(b)) => b,
        Some(serde_json::Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    })
}

/// Walk every page of a listing and return the concatenation of all values.
///
/// `fetch_page` receives `(start_at, max_results)`. The walk starts at 0,
/// advances by `page_size` after every page, and stops only when a page
/// reports no next page. The first failing page aborts the walk.
pub async fn fetch_all<T, E, F, Fut>(page_size: u32, mut fetch_page: F) -> Result<Vec<T>, E>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let page_size = page_size.clamp(1, MAX_RESULTS_LIMIT);
    let mut all = Vec::new();
    let mut start_at = 0;
    loop {
        let page = fetch_page(start_at, page_size).await?;
        all.extend(page.values);
        if !page.has_next {
            break;
        }
        start_at += page_size;
    }
    Ok(all)
}

/// Collect at most `limit` values from a listing.
///
/// Returns the values and whether the server indicated more results past the
/// cutoff. Each request asks only for what is still missing, so the result
/// never exceeds `limit`.
pub async fn fetch_up_to<T, E, F, Fut>(
    limit: u32,
    page_size: u32,
    mut fetch_page: F,
) -> Result<(Vec<T>, bool), E>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let page_size = page_size.clamp(1, MAX_RESULTS_LIMIT);
    let limit = limit as usize;
    let mut collected: Vec<T> = Vec::new();
    let mut start_at = 0;
    while collected.len() < limit {
        let remaining = (limit - collected.len()) as u32;
        let request = remaining.min(page_size);
        let page = fetch_page(start_at, request).await?;
        let received = page.values.len();
        collected.extend(page.values);
        if collected.len() > limit {
            collected.truncate(limit);
            return Ok((collected, true));
        }
        if !page.has_next {
            return Ok((collected, false));
        }
        if collected.len() == limit {
            return Ok((collected, true));
        }
        start_at += (received as u32).max(request);
    }
    Ok((collected, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn scripted(pages: Vec<Page<u32>>) -> RefCell<std::vec::IntoIter<Page<u32>>> {
        RefCell::new(pages.into_iter())
    }

    #[test]
    fn next_url_means_more_pages() {
        let page: Page<u32> = serde_json::from_value(serde_json::json!({
            "values": [1, 2],
            "startAt": 0,
            "maxResults": 2,
            "next": "https://api.zephyrscale.smartbear.com/v2/folders?startAt=2",
            "isLast": false
        }))
        .unwrap();
        assert!(page.has_next);
        assert_eq!(page.values, vec![1, 2]);
        assert_eq!(page.is_last, Some(false));
    }

    #[test]
    fn null_or_missing_next_means_last_page() {
        let page: Page<u32> =
            serde_json::from_value(serde_json::json!({ "values": [], "next": null })).unwrap();
        assert!(!page.has_next);
        let page: Page<u32> = serde_json::from_value(serde_json::json!({ "values": [3] })).unwrap();
        assert!(!page.has_next);
        let page: Page<u32> =
            serde_json::from_value(serde_json::json!({ "values": [3], "next": "" })).unwrap();
        assert!(!page.has_next);
    }

    #[test]
    fn boolean_next_is_accepted() {
        let page: Page<u32> =
            serde_json::from_value(serde_json::json!({ "values": [1], "next": true })).unwrap();
        assert!(page.has_next);
    }

    #[tokio::test]
    async fn fetch_all_follows_next_flag_not_page_size() {
        // A full last page and an empty middle page must not change where the walk stops.
        let pages = scripted(vec![
            Page::new(vec![1, 2], true),
            Page::new(vec![], true),
            Page::new(vec![3, 4], false),
        ]);
        let starts = RefCell::new(Vec::new());
        let all: Vec<u32> = fetch_all(2, |start, max| {
            starts.borrow_mut().push((start, max));
            let page = pages.borrow_mut().next().expect("fetched past the last page");
            async move { Ok::<_, String>(page) }
        })
        .await
        .unwrap();
        assert_eq!(all, vec![1, 2, 3, 4]);
        assert_eq!(*starts.borrow(), vec![(0, 2), (2, 2), (4, 2)]);
    }

    #[tokio::test]
    async fn fetch_all_aborts_on_first_error() {
        let calls = RefCell::new(0);
        let result: Result<Vec<u32>, String> = fetch_all(10, |_, _| {
            *calls.borrow_mut() += 1;
            let n = *calls.borrow();
            async move {
                if n == 2 {
                    Err("boom".to_string())
                } else {
                    Ok(Page::new(vec![n], true))
                }
            }
        })
        .await;
        assert_eq!(result.unwrap_err(), "boom");
        assert_eq!(*calls.borrow(), 2);
    }

    #[tokio::test]
    async fn fetch_up_to_stops_at_limit_and_reports_more() {
        let requested = RefCell::new(Vec::new());
        let (values, more) = fetch_up_to(3, 2, |start, max| {
            requested.borrow_mut().push((start, max));
            let values: Vec<u32> = (start..start + max).collect();
            async move { Ok::<_, String>(Page::new(values, true)) }
        })
        .await
        .unwrap();
        assert_eq!(values, vec![0, 1, 2]);
        assert!(more);
        assert_eq!(*requested.borrow(), vec![(0, 2), (2, 1)]);
    }

    #[tokio::test]
    async fn fetch_up_to_exact_fit_without_next_has_no_more() {
        let (values, more) = fetch_up_to(2, 100, |_, _| async {
            Ok::<_, String>(Page::new(vec![7, 8], false))
        })
        .await
        .unwrap();
        assert_eq!(values, vec![7, 8]);
        assert!(!more);
    }

    #[tokio::test]
    async fn fetch_up_to_truncates_oversized_page() {
        let (values, more) = fetch_up_to(2, 100, |_, _| async {
            Ok::<_, String>(Page::new(vec![1, 2, 3], false))
        })
        .await
        .unwrap();
        assert_eq!(values, vec![1, 2]);
        assert!(more);
    }
}
