use std::sync::Mutex;

use async_trait::async_trait;
use linkmeta_common::{FetchError, FetchRequest, FetchResult};

use crate::fetch::Fetch;

/// Canned reply for a URL prefix.
#[derive(Clone)]
pub enum StubReply {
    Page(u16, String),
    Fail,
}

/// A [`Fetch`] that answers from a prefix table and records every request.
#[derive(Default)]
pub struct StubFetcher {
    routes: Vec<(String, StubReply)>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `status`/`body` for URLs starting with `prefix`.
    pub fn page(mut self, prefix: &str, status: u16, body: &str) -> Self {
        self.routes
            .push((prefix.to_string(), StubReply::Page(status, body.to_string())));
        self
    }

    /// Fail with a transport error for URLs starting with `prefix`.
    pub fn fail(mut self, prefix: &str) -> Self {
        self.routes.push((prefix.to_string(), StubReply::Fail));
        self
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.url.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl Fetch for StubFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResult, FetchError> {
        self.requests.lock().unwrap().push(request.clone());

        let reply = self
            .routes
            .iter()
            .find(|(prefix, _)| request.url.starts_with(prefix.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or(StubReply::Fail);

        match reply {
            StubReply::Page(status, body) => Ok(FetchResult {
                status,
                body,
                final_url: request.url.clone(),
                content_type: Some("text/html".to_string()),
            }),
            StubReply::Fail => Err(FetchError::transport(
                &request.url,
                request.max_attempts(),
                "connection refused",
            )),
        }
    }
}

pub const ARTICLE_URL: &str = "https://ex.com/a/b";
pub const SERVICE_PREFIX: &str = "https://r.jina.ai/";

/// A paragraph comfortably over the fifty character floor.
pub fn long_paragraph(n: u32) -> String {
    format!("Paragraph number {n} carries enough words to pass the minimum length check.")
}

pub fn article_html(head: &str, paragraphs: &[String]) -> String {
    let body: String = paragraphs.iter().map(|p| format!("<p>{p}</p>")).collect();
    format!("<html><head>{head}</head><body>{body}</body></html>")
}
