use crate::error::PageResult;
use async_trait::async_trait;

/// The slice of a browser session that page objects are allowed to use.
///
/// Provides abstraction over browser automation, enabling different
/// implementations (live WebDriver, scripted fakes in tests). Page
/// objects never hold a raw driver handle; everything they learn about
/// the document goes through this trait.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigate the browser to the given URL.
    async fn goto(&self, url: &str) -> PageResult<()>;

    /// Title of the document the browser is currently showing.
    async fn title(&self) -> PageResult<String>;

    /// Value of `attribute` for every element matching the CSS
    /// selector, in document order.
    ///
    /// Elements that lack the attribute yield `None` at their position.
    /// No matching elements yields an empty vec, not an error.
    async fn attr_values(&self, css: &str, attribute: &str) -> PageResult<Vec<Option<String>>>;
}
