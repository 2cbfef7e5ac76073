//! Page object for the course discovery page.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::PageResult;

use super::page_object::PageObject;
use super::session::BrowserSession;

/// Marker every platform page carries in its title.
const BRAND_MARKER: &str = "OpenLearn";

/// CSS selector matching one course card.
const COURSE_CARD_SELECTOR: &str = "article.course";

/// The course discovery page: the platform landing page listing every
/// published course as a card.
pub struct FindCoursesPage {
    session: Arc<dyn BrowserSession>,
    base_url: String,
}

impl FindCoursesPage {
    /// Create the page object against a session and the platform's
    /// base URL.
    pub fn new(session: Arc<dyn BrowserSession>, base_url: impl Into<String>) -> Self {
        Self {
            session,
            base_url: base_url.into(),
        }
    }

    /// IDs of the course cards on the page, in document order.
    ///
    /// Cards without an `id` attribute are skipped; a page with no
    /// cards yields an empty list.
    pub async fn course_id_list(&self) -> PageResult<Vec<String>> {
        let values = self
            .session
            .attr_values(COURSE_CARD_SELECTOR, "id")
            .await?;
        Ok(values.into_iter().flatten().collect())
    }
}

#[async_trait]
impl PageObject for FindCoursesPage {
    fn session(&self) -> &dyn BrowserSession {
        self.session.as_ref()
    }

    fn url(&self) -> Option<String> {
        Some(self.base_url.clone())
    }

    async fn is_browser_on_page(&self) -> PageResult<bool> {
        let title = self.session.title().await?;
        Ok(title.contains(BRAND_MARKER))
    }
}
