//! Page navigation and user-visible notices

/// Side effects the session manager performs on the host page
pub trait Navigator: Send + Sync {
    /// Leave the current page for `location`
    fn redirect(&self, location: &str);

    /// Show a blocking notice to the user
    fn notify(&self, message: &str);
}

/// `window.location` and `window.alert`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

#[cfg(target_arch = "wasm32")]
impl Navigator for BrowserNavigator {
    fn redirect(&self, location: &str) {
        let Some(window) = web_sys::window() else {
            tracing::error!(location, "No window object, cannot redirect");
            return;
        };
        if let Err(e) = window.location().set_href(location) {
            tracing::error!(location, error = ?e, "Redirect failed");
        }
    }

    fn notify(&self, message: &str) {
        if let Some(window) = web_sys::window()
            && let Err(e) = window.alert_with_message(message)
        {
            tracing::warn!(error = ?e, "Failed to show notice");
        }
    }
}
