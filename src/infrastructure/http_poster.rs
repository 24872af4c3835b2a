use crate::domain::ports::{FormPoster, PostStatus};
use async_trait::async_trait;
use std::io;
use std::time::Duration;

/// Best-effort HTTP poster for the lead-form stubs.
///
/// Posts JSON to `base_url + path` and reports only whether the server
/// accepted it. Transport failures surface as errors for the caller to
/// swallow; this type does not interpret them.
pub struct HttpFormPoster {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFormPoster {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl FormPoster for HttpFormPoster {
    async fn post(&self, path: &str, body: &serde_json::Value) -> io::Result<PostStatus> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        match self.client.post(&url).json(body).send().await {
            Ok(response) if response.status().is_success() => Ok(PostStatus::Accepted),
            Ok(response) => {
                tracing::debug!(%url, status = %response.status(), "form endpoint rejected post");
                Ok(PostStatus::Rejected)
            }
            Err(error) => Err(io::Error::other(error)),
        }
    }
}
