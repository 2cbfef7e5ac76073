//! The page object protocol.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::{PageError, PageResult};

use super::session::BrowserSession;

/// How long [`PageObject::wait_for_page`] polls before giving up.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Pause between readiness probes while waiting for a page.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// A page of the platform UI, addressed through a [`BrowserSession`].
///
/// Implementations provide the page's identity: where it lives
/// ([`url`](Self::url)) and how to recognize it
/// ([`is_browser_on_page`](Self::is_browser_on_page)). Navigation and
/// readiness polling are provided on top of those.
#[async_trait]
pub trait PageObject: Send + Sync {
    /// The browser session this page reads from.
    fn session(&self) -> &dyn BrowserSession;

    /// The URL this page lives at, when it can be visited directly.
    ///
    /// Pages only reachable through UI interaction return `None`.
    fn url(&self) -> Option<String>;

    /// Whether the browser is currently showing this page.
    ///
    /// Must be cheap and side-effect free: the waiting loop calls it
    /// repeatedly.
    async fn is_browser_on_page(&self) -> PageResult<bool>;

    /// Navigate to the page and wait for it to be ready.
    ///
    /// # Errors
    ///
    /// [`PageError::NotVisitable`] when the page has no URL, otherwise
    /// whatever [`wait_for_page`](Self::wait_for_page) reports.
    async fn visit(&self) -> PageResult<()> {
        self.visit_with_timeout(DEFAULT_WAIT_TIMEOUT).await
    }

    /// Navigate to the page and wait for it, up to `timeout`.
    async fn visit_with_timeout(&self, timeout: Duration) -> PageResult<()> {
        let url = self.url().ok_or(PageError::NotVisitable)?;
        self.session().goto(&url).await?;
        self.wait_for_page_with(timeout).await
    }

    /// Wait for the page to report itself ready, up to the default
    /// timeout.
    async fn wait_for_page(&self) -> PageResult<()> {
        self.wait_for_page_with(DEFAULT_WAIT_TIMEOUT).await
    }

    /// Wait for the page to report itself ready, up to `timeout`.
    ///
    /// Readiness is probed at least once, so a zero timeout still
    /// succeeds on a page that is already there. Session errors during
    /// a probe abort the wait.
    async fn wait_for_page_with(&self, timeout: Duration) -> PageResult<()> {
        let deadline = Instant::now() + timeout;

        loop {
            if self.is_browser_on_page().await? {
                return Ok(());
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(PageError::ReadinessTimeout { timeout });
            }
            // Next probe at the poll interval or the deadline, whichever
            // comes first.
            tokio::time::sleep(WAIT_POLL_INTERVAL.min(deadline - now)).await;
        }
    }
}
