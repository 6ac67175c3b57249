//! Blocking HTTP agent for the prediction service and bounded body reads.

use std::io::Read;
use std::sync::OnceLock;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
// Hosted inference instances can take a while to wake up.
const READ_TIMEOUT: Duration = Duration::from_secs(60);
const WRITE_TIMEOUT: Duration = Duration::from_secs(60);
const USER_AGENT: &str = concat!("damagecheck/", env!("CARGO_PKG_VERSION"));

/// Largest response body accepted from the service.
pub(crate) const MAX_BODY_BYTES: usize = 256 * 1024;

#[derive(Debug, thiserror::Error)]
pub(crate) enum BodyError {
    #[error("Response declares {declared} bytes, over the {limit} byte limit")]
    DeclaredTooLarge { declared: u64, limit: usize },
    #[error("Response exceeded the {limit} byte limit")]
    TooLarge { limit: usize },
    #[error("Failed to read response body: {0}")]
    Read(#[from] std::io::Error),
    #[error("Response body is not UTF-8")]
    NotUtf8,
}

/// Shared agent; every service call goes through it.
pub(crate) fn agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        ureq::AgentBuilder::new()
            .user_agent(USER_AGENT)
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .timeout_write(WRITE_TIMEOUT)
            .build()
    })
}

/// Read a success body as UTF-8 text of at most `limit` bytes.
pub(crate) fn read_body(response: ureq::Response, limit: usize) -> Result<String, BodyError> {
    let bytes = read_limited(response, limit)?;
    String::from_utf8(bytes).map_err(|_| BodyError::NotUtf8)
}

/// Read an error body for diagnostics; invalid UTF-8 is replaced, never fatal.
pub(crate) fn read_error_body(response: ureq::Response, limit: usize) -> String {
    match read_limited(response, limit) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(err) => err.to_string(),
    }
}

fn read_limited(response: ureq::Response, limit: usize) -> Result<Vec<u8>, BodyError> {
    if let Some(declared) = response
        .header("Content-Length")
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|declared| *declared > limit as u64)
    {
        return Err(BodyError::DeclaredTooLarge { declared, limit });
    }
    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut bytes)?;
    if bytes.len() > limit {
        return Err(BodyError::TooLarge { limit });
    }
    Ok(bytes)
}
