//! Alert components for flash messages after a form action.

use maud::{html, Markup, Render};

/// Alert variant types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertVariant {
    Success,
    Error,
    Warning,
}

impl AlertVariant {
    /// Get the CSS class for the alert article element.
    #[must_use]
    pub const fn article_class(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// An alert message component.
///
/// Renders as a styled article element with success/error/warning styling.
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub variant: AlertVariant,
    pub message: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new alert with the given variant and message.
    #[must_use]
    pub const fn new(variant: AlertVariant, message: &'a str) -> Self {
        Self { variant, message }
    }
}

impl Render for Alert<'_> {
    fn render(&self) -> Markup {
        html! {
            article class=(self.variant.article_class()) {
                (self.message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_success() {
        let html = Alert::new(AlertVariant::Success, "Post scheduled")
            .render()
            .into_string();
        assert!(html.contains(r#"<article class="success">"#));
        assert!(html.contains("Post scheduled"));
    }

    #[test]
    fn test_alert_warning() {
        let html = Alert::new(AlertVariant::Warning, "Saved locally only")
            .render()
            .into_string();
        assert!(html.contains(r#"class="warning""#));
    }
}
