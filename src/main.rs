//! OpenLearn Testkit probe - Main entry point
//!
//! This executable checks a running OpenLearn deployment: it reports
//! whether rate limiting is currently enforced, and, when a WebDriver
//! endpoint is configured, lists the courses visible on the course
//! discovery page.

use anyhow::Result;
use openlearn_testkit::client::{AsyncPlatformClient, AsyncPlatformClientImpl};
use openlearn_testkit::pages::{BrowserSession, FindCoursesPage, PageObject, WebDriverSession};
use openlearn_testkit::throttle::{
    CachedRateLimitConfigStore, HttpRateLimitConfigStore, RateLimitConfigStore, RateLimitingState,
};
use openlearn_testkit::{Config, PlatformClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging (stderr only so stdout stays scriptable)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!("Probing OpenLearn deployment at {}", config.base_url);

    // Wire the configuration store: HTTP-backed, with a read-through cache
    let sync_client = PlatformClient::new(&config);
    let client =
        Arc::new(AsyncPlatformClientImpl::new(sync_client)) as Arc<dyn AsyncPlatformClient>;
    let http_store = Arc::new(HttpRateLimitConfigStore::new(client));
    let store = CachedRateLimitConfigStore::new(http_store, config.rate_limit_cache_ttl);

    let current = store.current().await?;
    match &current {
        Some(record) => info!(
            "Current rate-limit record: enabled={}, changed {} by {}",
            record.enabled,
            record.change_date,
            record.changed_by.as_deref().unwrap_or("unknown")
        ),
        None => info!("No rate-limit record persisted, defaults apply"),
    }

    match RateLimitingState::from_config(current.as_ref()) {
        RateLimitingState::Active => info!("Rate limiting is ACTIVE"),
        RateLimitingState::Suspended => warn!("Rate limiting is SUSPENDED"),
    }

    // Browser check, when a WebDriver endpoint is configured
    if let Some(webdriver_url) = config.webdriver_url.as_deref() {
        info!("Checking course discovery page via {}", webdriver_url);

        let session = Arc::new(WebDriverSession::connect(webdriver_url).await?);
        let timeout = Duration::from_secs(config.page_load_timeout);
        let result = list_courses(session.clone(), &config.base_url, timeout).await;

        // Always close the browser, even when the page check failed
        if let Ok(session) = Arc::try_unwrap(session) {
            session.quit().await?;
        }

        let course_ids = result?;
        info!("Found {} course(s) on the discovery page", course_ids.len());
        for course_id in &course_ids {
            info!("  {}", course_id);
        }
    } else {
        info!("WEBDRIVER_URL not set, skipping browser checks");
    }

    Ok(())
}

/// Visit the course discovery page and collect the course IDs on it.
async fn list_courses(
    session: Arc<dyn BrowserSession>,
    base_url: &str,
    timeout: Duration,
) -> Result<Vec<String>> {
    let page = FindCoursesPage::new(session, base_url);
    page.visit_with_timeout(timeout).await?;
    Ok(page.course_id_list().await?)
}
