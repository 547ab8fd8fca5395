use crate::model::ScraperError;
use std::thread;
use std::time::Duration;
use tracing::warn;

pub const HTTP_OK: u16 = 200;

/// How often a page is re-requested while the upstream answers non-200.
///
/// The default never gives up and never sleeps: the storefront is expected to
/// come back eventually and the run just keeps asking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: Option<u32>,
    pub delay: Option<Duration>,
}

impl RetryPolicy {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn bounded(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Calls `attempt` until it reports status 200 and returns that body.
    /// Transport errors from `attempt` are returned immediately.
    pub fn run<F>(&self, url: &str, mut attempt: F) -> Result<String, ScraperError>
    where
        F: FnMut() -> Result<(u16, String), ScraperError>,
    {
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let (status, body) = attempt()?;
            if status == HTTP_OK {
                return Ok(body);
            }

            warn!("Сервис временно недоступен: {} answered {} (attempt {})", url, status, attempts);

            if let Some(max) = self.max_attempts {
                if attempts >= max {
                    return Err(ScraperError::RetriesExhausted {
                        url: url.to_string(),
                        attempts,
                        last_status: status,
                    });
                }
            }
            if let Some(delay) = self.delay {
                thread::sleep(delay);
            }
        }
    }
}
