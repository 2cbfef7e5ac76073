use async_trait::async_trait;
use openlearn_testkit::error::{PageError, PageResult};
use openlearn_testkit::pages::BrowserSession;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One scripted element on the fake page.
#[derive(Clone)]
struct MockElement {
    selector: String,
    attrs: HashMap<String, String>,
}

/// Mock browser session for testing page objects without a browser.
///
/// The "page" is a scripted set of elements plus a title. Elements are
/// reported in the order they were added, which stands in for document
/// order. The session tracks navigation and method calls for
/// verification and can be told to fail like a lost browser.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockBrowserSession {
    title: Arc<Mutex<String>>,
    title_after_goto: Arc<Mutex<Option<String>>>,
    elements: Arc<Mutex<Vec<MockElement>>>,
    visited: Arc<Mutex<Vec<String>>>,
    unavailable: Arc<Mutex<bool>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockBrowserSession {
    /// Create a session showing an empty, untitled page.
    pub fn new() -> Self {
        Self {
            title: Arc::new(Mutex::new(String::new())),
            title_after_goto: Arc::new(Mutex::new(None)),
            elements: Arc::new(Mutex::new(Vec::new())),
            visited: Arc::new(Mutex::new(Vec::new())),
            unavailable: Arc::new(Mutex::new(false)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Set the current document title.
    pub fn set_title(&self, title: &str) {
        *self.title.lock().unwrap() = title.to_string();
    }

    /// Script the title the document will have after the next `goto`.
    ///
    /// Lets tests model a page that only becomes recognizable once the
    /// browser has actually navigated to it.
    pub fn set_title_after_goto(&self, title: &str) {
        *self.title_after_goto.lock().unwrap() = Some(title.to_string());
    }

    /// Append an element with the given attributes to the fake page.
    pub fn add_element(&self, selector: &str, attrs: &[(&str, &str)]) {
        let mut elements = self.elements.lock().unwrap();
        elements.push(MockElement {
            selector: selector.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
    }

    /// URLs passed to `goto`, in order.
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }

    /// When set, every call fails like a lost browser session.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn check_available(&self) -> PageResult<()> {
        if *self.unavailable.lock().unwrap() {
            Err(PageError::Driver("session deleted".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Default for MockBrowserSession {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BrowserSession for MockBrowserSession {
    async fn goto(&self, url: &str) -> PageResult<()> {
        self.track_call("goto");
        self.check_available()?;

        self.visited.lock().unwrap().push(url.to_string());
        if let Some(title) = self.title_after_goto.lock().unwrap().take() {
            *self.title.lock().unwrap() = title;
        }
        Ok(())
    }

    async fn title(&self) -> PageResult<String> {
        self.track_call("title");
        self.check_available()?;

        Ok(self.title.lock().unwrap().clone())
    }

    async fn attr_values(&self, css: &str, attribute: &str) -> PageResult<Vec<Option<String>>> {
        self.track_call("attr_values");
        self.check_available()?;

        let elements = self.elements.lock().unwrap();
        Ok(elements
            .iter()
            .filter(|element| element.selector == css)
            .map(|element| element.attrs.get(attribute).cloned())
            .collect())
    }
}
