//! Page objects for browser-level acceptance checks.
//!
//! A [`PageObject`] wraps one page of the platform UI behind a typed
//! API; tests ask the page object questions instead of poking at the
//! DOM. Pages reach the browser only through the [`BrowserSession`]
//! trait, so every page object can be exercised against a scripted
//! fake as well as a live WebDriver browser.

pub mod find_courses;
pub mod page_object;
pub mod session;
pub mod webdriver;

pub use find_courses::FindCoursesPage;
pub use page_object::{PageObject, DEFAULT_WAIT_TIMEOUT};
pub use session::BrowserSession;
pub use webdriver::WebDriverSession;
