//! Lazy paginated listing
//!
//! List operations return one [`Page`] per call. [`paginate`] turns a page
//! fetcher into a stream that requests the next page only when the previous
//! one is exhausted and stops once no continuation token is returned. Tests
//! feed it a finite page sequence from a mock.

use anyhow::Result;
use futures::stream::{self, Stream, TryStreamExt};
use std::future::Future;

/// One page of a list operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// A final page (no continuation token)
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }

    /// A page followed by more results
    pub fn more(items: Vec<T>, next_token: impl Into<String>) -> Self {
        Self {
            items,
            next_token: Some(next_token.into()),
        }
    }
}

enum Cursor {
    Start,
    Next(String),
    Done,
}

/// Stream every item of a paginated listing.
///
/// `fetch` is called with `None` for the first page and with the previous
/// page's token afterwards. An empty token counts as the end of the listing.
pub fn paginate<T, F, Fut>(fetch: F) -> impl Stream<Item = Result<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    stream::try_unfold((fetch, Cursor::Start), |(mut fetch, cursor)| async move {
        let token = match cursor {
            Cursor::Done => return Ok::<_, anyhow::Error>(None),
            Cursor::Start => None,
            Cursor::Next(token) => Some(token),
        };
        let page = fetch(token).await?;
        let cursor = match page.next_token {
            Some(token) if !token.is_empty() => Cursor::Next(token),
            _ => Cursor::Done,
        };
        let items = stream::iter(page.items.into_iter().map(Ok::<T, anyhow::Error>));
        Ok::<_, anyhow::Error>(Some((items, (fetch, cursor))))
    })
    .try_flatten()
}

/// Collect every item of a paginated listing.
pub async fn collect_all<T, F, Fut>(fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    paginate(fetch).try_collect().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_collects_until_no_token() {
        let calls = Mutex::new(Vec::new());
        let items = collect_all(|token: Option<String>| {
            calls.lock().unwrap().push(token.clone());
            async move {
                Ok(match token.as_deref() {
                    None => Page::more(vec![1, 2], "a"),
                    Some("a") => Page::more(vec![3], "b"),
                    _ => Page::last(vec![4]),
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4]);
        assert_eq!(
            *calls.lock().unwrap(),
            vec![None, Some("a".to_string()), Some("b".to_string())]
        );
    }

    #[tokio::test]
    async fn test_empty_token_ends_listing() {
        let items = collect_all(|token: Option<String>| async move {
            assert!(token.is_none(), "should not request a second page");
            Ok(Page {
                items: vec!["x"],
                next_token: Some(String::new()),
            })
        })
        .await
        .unwrap();
        assert_eq!(items, vec!["x"]);
    }

    #[tokio::test]
    async fn test_error_stops_listing() {
        let result: Result<Vec<u8>> = collect_all(|token: Option<String>| async move {
            match token {
                None => Ok(Page::more(vec![1], "next")),
                Some(_) => Err(anyhow::anyhow!("page 2 failed")),
            }
        })
        .await;
        assert!(result.unwrap_err().to_string().contains("page 2 failed"));
    }

    #[tokio::test]
    async fn test_pages_fetched_lazily() {
        let calls = Mutex::new(0u32);
        let stream = paginate(|_token: Option<String>| {
            *calls.lock().unwrap() += 1;
            async { Ok(Page::more(vec![0u8; 2], "forever")) }
        });
        let first: Vec<_> = stream.take(3).collect().await;
        assert_eq!(first.len(), 3);
        assert_eq!(*calls.lock().unwrap(), 2);
    }
}
