//! Downloading the remote photo shown by the Image example.
//!
//! Only the response metadata survives: the terminal cannot draw pixels, so
//! the preview reports what arrived instead of decoding it.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

const TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid image URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered {status}")]
    Status { url: String, status: u16 },

    #[error("{url} is not an image ({content_type})")]
    NotAnImage { url: String, content_type: String },
}

/// What a successful download looked like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub content_type: String,
    pub bytes: usize,
}

impl Fetched {
    /// e.g. `image/jpeg, 98 KB`
    pub fn summary(&self) -> String {
        if self.bytes < 1024 {
            format!("{}, {} B", self.content_type, self.bytes)
        } else {
            format!("{}, {} KB", self.content_type, self.bytes / 1024)
        }
    }
}

/// Shared HTTP client, cheap to clone into spawned commands.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(TIMEOUT)
            .user_agent(concat!("widget-explorer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }

    /// Download `raw` and check that it is an image.
    pub async fn fetch(&self, raw: &str) -> Result<Fetched, FetchError> {
        let url = Url::parse(raw).map_err(|source| FetchError::InvalidUrl {
            url: raw.to_string(),
            source,
        })?;
        let request_failed = |source: reqwest::Error| FetchError::Request {
            url: raw.to_string(),
            source,
        };

        tracing::debug!(url = %url, "fetching image");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(request_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: raw.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        if !content_type.starts_with("image/") {
            return Err(FetchError::NotAnImage {
                url: raw.to_string(),
                content_type,
            });
        }

        let body = response.bytes().await.map_err(request_failed)?;
        tracing::debug!(bytes = body.len(), %content_type, "image fetched");
        Ok(Fetched {
            content_type,
            bytes: body.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn local_fetcher() -> Fetcher {
        Fetcher {
            client: Client::builder().no_proxy().timeout(TIMEOUT).build().unwrap(),
        }
    }

    /// Serve a single canned HTTP response on a local port.
    async fn serve_once(
        status: &'static str,
        content_type: &'static str,
        body: &'static str,
    ) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await.unwrap();
            let response = format!(
                "HTTP/1.1 {status}\r\n\
                 Content-Type: {content_type}\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{addr}/photo")
    }

    #[test]
    fn summary_scales_units() {
        let small = Fetched {
            content_type: "image/png".into(),
            bytes: 512,
        };
        assert_eq!(small.summary(), "image/png, 512 B");
        let large = Fetched {
            content_type: "image/jpeg".into(),
            bytes: 100_000,
        };
        assert_eq!(large.summary(), "image/jpeg, 97 KB");
    }

    #[test]
    fn client_builds() {
        assert!(Fetcher::new().is_ok());
    }

    #[tokio::test]
    async fn image_response_is_measured() {
        let url = serve_once("200 OK", "image/png", "abcd").await;
        let fetched = local_fetcher().fetch(&url).await.unwrap();
        assert_eq!(
            fetched,
            Fetched {
                content_type: "image/png".into(),
                bytes: 4,
            }
        );
    }

    #[tokio::test]
    async fn non_image_is_rejected() {
        let url = serve_once("200 OK", "text/html", "<html></html>").await;
        let err = local_fetcher().fetch(&url).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::NotAnImage { ref content_type, .. } if content_type == "text/html"
        ));
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let url = serve_once("404 Not Found", "text/plain", "gone").await;
        let err = local_fetcher().fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn malformed_url_is_rejected() {
        let err = local_fetcher().fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }
}
