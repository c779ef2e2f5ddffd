//! Opening reference links in the user's browser.
//!
//! Links are validated with the `url` crate before anything is spawned, and
//! only `http`/`https` are handed to the opener program.

use std::io;
use std::process::{ExitStatus, Stdio};

use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("invalid link {link:?}: {source}")]
    Invalid {
        link: String,
        #[source]
        source: url::ParseError,
    },

    #[error("refusing to open {scheme}: link {link:?}")]
    UnsupportedScheme { scheme: String, link: String },

    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

/// Parse `raw` and accept it only if it is a web link.
pub fn parse(raw: &str) -> Result<Url, LinkError> {
    let url = Url::parse(raw.trim()).map_err(|source| LinkError::Invalid {
        link: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(LinkError::UnsupportedScheme {
            scheme: scheme.to_string(),
            link: raw.to_string(),
        }),
    }
}

/// External program that opens a URL, invoked as `<program> <url>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opener {
    program: String,
}

impl Opener {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// `open` on macOS, `xdg-open` elsewhere.
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("open")
        } else {
            Self::new("xdg-open")
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the opener and wait for it to exit.
    ///
    /// The child never inherits the terminal: the UI owns stdin/stdout while
    /// this runs.
    pub async fn open(&self, url: &Url) -> Result<(), LinkError> {
        tracing::info!(program = %self.program, url = %url, "opening link");
        let status = tokio::process::Command::new(&self.program)
            .arg(url.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|source| LinkError::Launch {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(LinkError::Failed {
                program: self.program.clone(),
                status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_web_links() {
        let url = parse("https://developer.apple.com/documentation/swiftui/slider").unwrap();
        assert_eq!(url.host_str(), Some("developer.apple.com"));
        assert!(parse("http://example.com").is_ok());
        assert!(parse("  https://example.com  ").is_ok());
    }

    #[test]
    fn rejects_malformed_links() {
        assert!(matches!(parse("not a url"), Err(LinkError::Invalid { .. })));
        assert!(matches!(parse(""), Err(LinkError::Invalid { .. })));
    }

    #[test]
    fn rejects_other_schemes() {
        match parse("file:///etc/passwd") {
            Err(LinkError::UnsupportedScheme { scheme, .. }) => assert_eq!(scheme, "file"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(parse("javascript:alert(1)").is_err());
    }

    #[test]
    fn platform_default_is_known_program() {
        let program = Opener::platform_default().program().to_string();
        assert!(program == "open" || program == "xdg-open");
    }

    #[tokio::test]
    async fn missing_program_reports_launch_error() {
        let opener = Opener::new("explorer-test-no-such-opener");
        let url = parse("https://example.com").unwrap();
        let err = opener.open(&url).await.unwrap_err();
        assert!(matches!(err, LinkError::Launch { .. }));
        assert!(err.to_string().contains("explorer-test-no-such-opener"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exit_status_is_checked() {
        let url = parse("https://example.com").unwrap();
        assert!(Opener::new("true").open(&url).await.is_ok());
        assert!(matches!(
            Opener::new("false").open(&url).await,
            Err(LinkError::Failed { .. })
        ));
    }
}
