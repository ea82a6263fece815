//! Form components for maud templates.
//!
//! This module provides reusable form components that match the styles
//! defined in `static/css/style.css`.

use maud::{html, Markup, Render};

/// A form container element.
#[derive(Debug)]
pub struct Form<'a> {
    /// Form action URL
    pub action: &'a str,
    /// HTTP method ("get" or "post")
    pub method: &'a str,
    /// Form content (inputs, buttons, etc.)
    pub content: Markup,
    /// Optional CSS class
    pub class: Option<&'a str>,
}

impl<'a> Form<'a> {
    /// Create a new form with the given action and method.
    #[must_use]
    pub fn new(action: &'a str, method: &'a str, content: Markup) -> Self {
        Self {
            action,
            method,
            content,
            class: None,
        }
    }

    /// Create a POST form.
    #[must_use]
    pub fn post(action: &'a str, content: Markup) -> Self {
        Self::new(action, "post", content)
    }

    /// Set the CSS class.
    #[must_use]
    pub fn class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }
}

impl Render for Form<'_> {
    fn render(&self) -> Markup {
        html! {
            form action=(self.action) method=(self.method) class=[self.class] {
                (self.content)
            }
        }
    }
}

/// An input element.
#[derive(Debug, Clone)]
pub struct Input<'a> {
    /// Input name attribute
    pub name: &'a str,
    /// Input type ("text", "hidden", "datetime-local", etc.)
    pub r#type: &'a str,
    /// Current value
    pub value: Option<&'a str>,
    /// Placeholder text
    pub placeholder: Option<&'a str>,
    /// Whether the field is required
    pub required: bool,
    /// Optional ID attribute
    pub id: Option<&'a str>,
}

impl<'a> Input<'a> {
    /// Create a new input with the given name and type.
    #[must_use]
    pub fn new(name: &'a str, r#type: &'a str) -> Self {
        Self {
            name,
            r#type,
            value: None,
            placeholder: None,
            required: false,
            id: None,
        }
    }

    /// Create a text input.
    #[must_use]
    pub fn text(name: &'a str) -> Self {
        Self::new(name, "text")
    }

    /// Create a hidden input with a value.
    #[must_use]
    pub fn hidden(name: &'a str, value: &'a str) -> Self {
        Self::new(name, "hidden").value(value)
    }

    /// Create a `datetime-local` input.
    #[must_use]
    pub fn datetime(name: &'a str) -> Self {
        Self::new(name, "datetime-local")
    }

    /// Set the value.
    #[must_use]
    pub fn value(mut self, value: &'a str) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Mark as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the ID.
    #[must_use]
    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }
}

impl Render for Input<'_> {
    fn render(&self) -> Markup {
        html! {
            input
                type=(self.r#type)
                name=(self.name)
                value=[self.value]
                placeholder=[self.placeholder]
                required[self.required]
                id=[self.id];
        }
    }
}

/// A select dropdown element.
#[derive(Debug)]
pub struct Select<'a> {
    /// Select name attribute
    pub name: &'a str,
    /// Available options
    pub options: Vec<SelectOption<'a>>,
    /// Currently selected value
    pub selected: Option<&'a str>,
    /// Optional ID attribute
    pub id: Option<&'a str>,
}

impl<'a> Select<'a> {
    /// Create a new select with the given name.
    #[must_use]
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            options: Vec::new(),
            selected: None,
            id: None,
        }
    }

    /// Add a single option.
    #[must_use]
    pub fn option(mut self, value: &'a str, label: &'a str) -> Self {
        self.options.push(SelectOption { value, label });
        self
    }

    /// Set the selected value.
    #[must_use]
    pub fn selected(mut self, selected: &'a str) -> Self {
        self.selected = Some(selected);
        self
    }

    /// Set the ID.
    #[must_use]
    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }
}

impl Render for Select<'_> {
    fn render(&self) -> Markup {
        html! {
            select name=(self.name) id=[self.id] {
                @for opt in &self.options {
                    option value=(opt.value) selected[self.selected == Some(opt.value)] {
                        (opt.label)
                    }
                }
            }
        }
    }
}

/// An option for a select element.
#[derive(Debug, Clone)]
pub struct SelectOption<'a> {
    /// Option value
    pub value: &'a str,
    /// Option display label
    pub label: &'a str,
}

/// A labelled form field with optional help text.
#[derive(Debug)]
pub struct FormGroup<'a> {
    /// Label text
    pub label: &'a str,
    /// ID of the wrapped input
    pub id: &'a str,
    /// The input markup
    pub input: Markup,
    /// Help text rendered beneath the input
    pub help: Option<&'a str>,
}

impl<'a> FormGroup<'a> {
    /// Create a new form group.
    #[must_use]
    pub fn new(label: &'a str, id: &'a str, input: Markup) -> Self {
        Self {
            label,
            id,
            input,
            help: None,
        }
    }

    /// Set the help text.
    #[must_use]
    pub fn help(mut self, help: &'a str) -> Self {
        self.help = Some(help);
        self
    }
}

impl Render for FormGroup<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="form-group" {
                label for=(self.id) { (self.label) }
                (self.input)
                @if let Some(help) = self.help {
                    small { (help) }
                }
            }
        }
    }
}

/// A radio button wrapped in its label.
#[derive(Debug)]
pub struct Radio<'a> {
    /// Group name
    pub name: &'a str,
    /// Submitted value
    pub value: &'a str,
    /// Whether the radio starts checked
    pub checked: bool,
    /// Label content
    pub label: Markup,
}

impl<'a> Radio<'a> {
    /// Create a new radio button.
    #[must_use]
    pub fn new(name: &'a str, value: &'a str, label: Markup) -> Self {
        Self {
            name,
            value,
            checked: false,
            label,
        }
    }

    /// Set whether the radio is checked.
    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

impl Render for Radio<'_> {
    fn render(&self) -> Markup {
        html! {
            label class="radio" {
                input type="radio" name=(self.name) value=(self.value) checked[self.checked];
                " "
                (self.label)
            }
        }
    }
}
