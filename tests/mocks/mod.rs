//! Shared test doubles.

pub mod mock_browser_session;
pub mod mock_config_store;

pub use mock_browser_session::MockBrowserSession;
pub use mock_config_store::MockRateLimitConfigStore;
