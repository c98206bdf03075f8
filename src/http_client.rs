//! Shared blocking HTTP agent and size-capped body reading.

use std::io::Read;
use std::sync::OnceLock;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
// `wait_for_model` can hold a request open while a cold model loads.
const READ_TIMEOUT: Duration = Duration::from_secs(180);
const WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Problems reading a response body.
#[derive(Debug, thiserror::Error)]
pub(crate) enum BodyError {
    #[error("response body exceeds {limit} bytes")]
    TooLarge { limit: usize },
    #[error("failed to read response body: {0}")]
    Io(#[from] std::io::Error),
    #[error("response body is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Process-wide agent so connections and TLS config are shared.
pub(crate) fn agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        ureq::AgentBuilder::new()
            .user_agent(concat!("zeroshot/", env!("CARGO_PKG_VERSION")))
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .timeout_write(WRITE_TIMEOUT)
            .build()
    })
}

/// Read a response body as text, failing once it grows past `limit` bytes.
pub(crate) fn read_body_text(response: ureq::Response, limit: usize) -> Result<String, BodyError> {
    let declared = response
        .header("Content-Length")
        .and_then(|value| value.trim().parse::<usize>().ok());
    if declared.is_some_and(|length| length > limit) {
        return Err(BodyError::TooLarge { limit });
    }
    let mut bytes = Vec::with_capacity(declared.unwrap_or(0));
    response
        .into_reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut bytes)?;
    if bytes.len() > limit {
        return Err(BodyError::TooLarge { limit });
    }
    Ok(String::from_utf8(bytes)?)
}
