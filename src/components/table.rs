//! Table component for maud templates.

use maud::{html, Markup, Render};

/// A table element with headers and pre-rendered rows.
#[derive(Debug)]
pub struct Table<'a> {
    /// Column headers
    pub headers: Vec<&'a str>,
    /// Pre-rendered row content
    pub rows: Vec<Markup>,
    /// Optional CSS class
    pub class: Option<&'a str>,
}

impl<'a> Table<'a> {
    /// Create a new table with the given headers.
    #[must_use]
    pub fn new(headers: Vec<&'a str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
            class: None,
        }
    }

    /// Replace the rows.
    #[must_use]
    pub fn rows(mut self, rows: Vec<Markup>) -> Self {
        self.rows = rows;
        self
    }

    /// Add a CSS class.
    #[must_use]
    pub fn class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }
}

impl Render for Table<'_> {
    fn render(&self) -> Markup {
        html! {
            table class=[self.class] {
                @if !self.headers.is_empty() {
                    thead {
                        tr {
                            @for header in &self.headers {
                                th { (header) }
                            }
                        }
                    }
                }
                tbody {
                    @for row in &self.rows {
                        (row)
                    }
                }
            }
        }
    }
}
