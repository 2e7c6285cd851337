use serde::{de::DeserializeOwned, Deserialize};

use crate::{
    error::Result,
    spotify::{RequestDescriptor, Transport},
};

/// One page of a paginated collection.
#[derive(Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

/// Follows `next` links until the collection is exhausted and returns every
/// item in page order.
///
/// Follow-up requests go to the `next` URL verbatim with the original headers.
/// The first failing page aborts the whole call and drops whatever was
/// collected so far.
pub async fn fetch_all<T, C>(transport: &C, request: RequestDescriptor) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    C: Transport + ?Sized,
{
    let headers = request.headers.clone();
    let mut items = Vec::new();
    let mut next_request = Some(request);
    let mut pages_fetched = 0usize;

    while let Some(request) = next_request {
        let body = transport.request(&request).await?;
        let page: Page<T> = serde_json::from_value(body)?;

        pages_fetched += 1;
        log::debug!(
            "page {} of {}: {} items",
            pages_fetched,
            request.url,
            page.items.len()
        );

        items.extend(page.items);
        next_request = page
            .next
            .map(|url| RequestDescriptor::get(url, headers.clone()));
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Error,
        spotify::{headers_for, transport::MockTransport},
    };
    use mockall::{predicate::function, Sequence};
    use reqwest::{header::CONTENT_TYPE, Method};
    use serde_json::json;

    const FIRST: &str = "https://api.test/v1/things";

    fn first_request() -> RequestDescriptor {
        RequestDescriptor::get(FIRST, headers_for(None)).query("limit", 2)
    }

    #[tokio::test]
    async fn collects_every_page_in_order() {
        let mut transport = MockTransport::new();
        let mut seq = Sequence::new();

        transport
            .expect_request()
            .with(function(|r: &RequestDescriptor| {
                r.url == FIRST && r.query == vec![("limit".to_string(), "2".to_string())]
            }))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(json!({ "items": [1, 2], "next": "https://api.test/page2" })));
        transport
            .expect_request()
            .with(function(|r: &RequestDescriptor| {
                r.url == "https://api.test/page2"
                    && r.method == Method::GET
                    && r.query.is_empty()
                    && r.headers.contains_key(CONTENT_TYPE)
            }))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(json!({ "items": [3, 4], "next": "https://api.test/page3" })));
        transport
            .expect_request()
            .with(function(|r: &RequestDescriptor| r.url == "https://api.test/page3"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(json!({ "items": [5], "next": null })));

        let items: Vec<u32> = fetch_all(&transport, first_request()).await.unwrap();
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn missing_next_means_single_page() {
        let mut transport = MockTransport::new();
        transport
            .expect_request()
            .times(1)
            .returning(|_| Ok(json!({ "items": [] })));

        let items: Vec<u32> = fetch_all(&transport, first_request()).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn failing_page_discards_everything_collected() {
        let mut transport = MockTransport::new();
        let mut seq = Sequence::new();

        transport
            .expect_request()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(json!({ "items": [1, 2], "next": "https://api.test/page2" })));
        transport
            .expect_request()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(Error::Status {
                    status: reqwest::StatusCode::BAD_GATEWAY,
                    body: "upstream".to_string(),
                })
            });

        let result: Result<Vec<u32>> = fetch_all(&transport, first_request()).await;
        match result {
            Err(Error::Status { status, .. }) => {
                assert_eq!(status, reqwest::StatusCode::BAD_GATEWAY)
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn many_pages_do_not_grow_the_stack() {
        const PAGES: usize = 5_000;
        let mut transport = MockTransport::new();
        let calls = std::sync::atomic::AtomicUsize::new(0);

        transport.expect_request().times(PAGES).returning(move |_| {
            let n = calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst) + 1;
            let next = (n < PAGES).then(|| format!("https://api.test/page{}", n + 1));
            Ok(json!({ "items": [n], "next": next }))
        });

        let items: Vec<usize> = fetch_all(&transport, first_request()).await.unwrap();
        assert_eq!(items.len(), PAGES);
        assert_eq!(items.last(), Some(&PAGES));
    }
}
