use std::future::Future;
use std::time::Duration;

use degen_protocol::*;

use crate::proxy::check_status;
use crate::*;

pub const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(8);

/// Anything that can come up with a comment for a lost game. Implementations never fail, they fall back instead.
pub trait CommentarySource: Send + Sync + 'static {
    fn comment(&self, request: CommentaryRequest) -> impl Future<Output = String> + Send;
}

/// Game-side client of the commentary proxy endpoint.
#[derive(Debug, Clone)]
pub struct CommentaryClient {
    http: reqwest::Client,
    url: String,
}

impl CommentaryClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn try_fetch(&self, request: &CommentaryRequest) -> Result<String> {
        let response = self.http.post(&self.url).json(request).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        check_status(status, &body)?;

        match serde_json::from_slice::<ProxyBody>(&body)? {
            ProxyBody::Comment(CommentaryResponse { response }) if !response.trim().is_empty() => {
                Ok(response.trim().to_owned())
            }
            ProxyBody::Comment(_) => Err(CommentaryError::Empty),
            ProxyBody::Error(ErrorResponse { error }) => Err(CommentaryError::Status {
                status,
                message: error,
            }),
        }
    }

    /// Fetches a comment, substituting [`FALLBACK_COMMENT`] for any failure.
    pub async fn fetch(&self, request: &CommentaryRequest) -> String {
        self.try_fetch(request).await.unwrap_or_else(|err| {
            log::warn!("Commentary unavailable from {}: {}", self.url, err);
            FALLBACK_COMMENT.to_owned()
        })
    }
}

impl CommentarySource for CommentaryClient {
    async fn comment(&self, request: CommentaryRequest) -> String {
        self.fetch(&request).await
    }
}

/// Talks to the model API directly, for setups without a separate proxy.
impl CommentarySource for CommentaryProxy {
    async fn comment(&self, request: CommentaryRequest) -> String {
        self.request_comment(&request).await.unwrap_or_else(|err| {
            log::warn!("Commentary unavailable: {}", err);
            FALLBACK_COMMENT.to_owned()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_proxy_falls_back() {
        let client =
            CommentaryClient::new("http://127.0.0.1:9/api/degen-response", DEFAULT_CLIENT_TIMEOUT)
                .unwrap();

        assert!(matches!(
            client.try_fetch(&CommentaryRequest::default()).await,
            Err(CommentaryError::Http(_))
        ));
        assert_eq!(
            client.fetch(&CommentaryRequest::default()).await,
            FALLBACK_COMMENT
        );
    }

    #[tokio::test]
    async fn proxy_without_key_falls_back_as_a_source() {
        let proxy = CommentaryProxy::new(ProxyConfig::default()).unwrap();

        let text = CommentarySource::comment(&proxy, CommentaryRequest::default()).await;

        assert_eq!(text, FALLBACK_COMMENT);
    }
}
