//! Button component for the web UI.
//!
//! Submit buttons can override the enclosing form's action with
//! `formaction`, which lets one candidate form offer both "schedule" and
//! "post now".

use maud::{html, Markup, Render};

/// Button style variants matching CSS classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Primary button (default) - `.btn-primary`
    #[default]
    Primary,
    /// Outline button - `.btn.outline`
    Outline,
    /// Danger button - `.btn-danger`
    Danger,
}

impl ButtonVariant {
    /// Get the CSS class for this variant.
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn btn-primary",
            ButtonVariant::Outline => "btn outline",
            ButtonVariant::Danger => "btn btn-danger",
        }
    }
}

/// A submit or plain button.
#[derive(Debug, Clone)]
pub struct Button<'a> {
    pub label: &'a str,
    pub variant: ButtonVariant,
    pub r#type: &'a str,
    pub formaction: Option<&'a str>,
}

impl<'a> Button<'a> {
    /// Create a new submit button.
    #[must_use]
    pub fn new(label: &'a str, variant: ButtonVariant) -> Self {
        Self {
            label,
            variant,
            r#type: "submit",
            formaction: None,
        }
    }

    #[must_use]
    pub fn primary(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Primary)
    }

    #[must_use]
    pub fn outline(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Outline)
    }

    #[must_use]
    pub fn danger(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Danger)
    }

    /// Submit to `action` instead of the form's own action.
    #[must_use]
    pub fn formaction(mut self, action: &'a str) -> Self {
        self.formaction = Some(action);
        self
    }
}

impl Render for Button<'_> {
    fn render(&self) -> Markup {
        html! {
            button class=(self.variant.class()) type=(self.r#type) formaction=[self.formaction] {
                (self.label)
            }
        }
    }
}
