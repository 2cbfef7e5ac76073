//! Live browser session over the WebDriver protocol.

use async_trait::async_trait;
use thirtyfour::prelude::*;

use crate::error::{PageError, PageResult};

use super::session::BrowserSession;

/// Browser session driven by a real browser through [`thirtyfour`].
///
/// Connects to a WebDriver endpoint (chromedriver, or a Selenium grid)
/// and exposes the narrow [`BrowserSession`] surface to page objects.
/// Driver errors are carried through as [`PageError::Driver`] with
/// their original message.
pub struct WebDriverSession {
    driver: WebDriver,
}

impl WebDriverSession {
    /// Connect to a WebDriver endpoint and start a Chrome session.
    pub async fn connect(webdriver_url: &str) -> PageResult<Self> {
        let caps = DesiredCapabilities::chrome();
        let driver = WebDriver::new(webdriver_url, caps)
            .await
            .map_err(|e| PageError::Driver(e.to_string()))?;
        Ok(Self { driver })
    }

    /// Close the browser and end the session.
    ///
    /// Always call this when done; dropping the session leaves the
    /// browser process running.
    pub async fn quit(self) -> PageResult<()> {
        self.driver
            .quit()
            .await
            .map_err(|e| PageError::Driver(e.to_string()))
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    async fn goto(&self, url: &str) -> PageResult<()> {
        self.driver
            .goto(url)
            .await
            .map_err(|e| PageError::Driver(e.to_string()))
    }

    async fn title(&self) -> PageResult<String> {
        self.driver
            .title()
            .await
            .map_err(|e| PageError::Driver(e.to_string()))
    }

    async fn attr_values(&self, css: &str, attribute: &str) -> PageResult<Vec<Option<String>>> {
        let elements = self
            .driver
            .find_all(By::Css(css))
            .await
            .map_err(|e| PageError::Driver(e.to_string()))?;

        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            let value = element
                .attr(attribute)
                .await
                .map_err(|e| PageError::Driver(e.to_string()))?;
            values.push(value);
        }
        Ok(values)
    }
}
