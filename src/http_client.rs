//! Blocking HTTP agent shared by the support endpoints.

use std::io::{self, Read};
use std::sync::OnceLock;
use std::time::Duration;

const USER_AGENT: &str = concat!("support-widget/", env!("CARGO_PKG_VERSION"));

/// Why a response body could not be taken.
#[derive(Debug, thiserror::Error)]
pub(crate) enum BodyError {
    #[error("Response of {declared} bytes exceeds the {limit} byte limit")]
    DeclaredTooLarge { declared: u64, limit: usize },
    #[error("Response exceeded the {limit} byte limit")]
    TooLarge { limit: usize },
    #[error("Failed to read response: {0}")]
    Read(#[from] io::Error),
    #[error("Response is not UTF-8: {0}")]
    NotUtf8(#[from] std::string::FromUtf8Error),
}

/// Agent with 10 s connect and 30 s read/write timeouts.
pub(crate) fn agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .timeout_read(Duration::from_secs(30))
            .timeout_write(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
    })
}

/// Read the whole body as text, refusing anything over `limit` bytes.
pub(crate) fn read_body(response: ureq::Response, limit: usize) -> Result<String, BodyError> {
    let declared = response
        .header("Content-Length")
        .and_then(|value| value.trim().parse::<u64>().ok());
    if let Some(declared) = declared.filter(|declared| *declared > limit as u64) {
        return Err(BodyError::DeclaredTooLarge { declared, limit });
    }
    let mut bytes = Vec::with_capacity(declared.map_or(0, |len| len as usize));
    response
        .into_reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut bytes)?;
    if bytes.len() > limit {
        return Err(BodyError::TooLarge { limit });
    }
    Ok(String::from_utf8(bytes)?)
}
