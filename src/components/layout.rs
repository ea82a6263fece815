//! Base layout components for the web UI.
//!
//! This module provides the main page layout structure including
//! the HTML skeleton, header and footer.

use maud::{html, Markup, DOCTYPE};

/// Base page layout builder.
///
/// # Example
///
/// ```ignore
/// use maud::html;
/// use crate::components::layout::BaseLayout;
///
/// let content = html! { h1 { "Hello World" } };
/// let page = BaseLayout::new("My Page").render(content);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    title: &'a str,
}

impl<'a> BaseLayout<'a> {
    /// Create a new base layout with the given page title.
    #[must_use]
    pub fn new(title: &'a str) -> Self {
        Self { title }
    }

    /// Render the complete HTML page with the given content.
    ///
    /// The content will be placed inside the `<main class="container">` element.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    meta name="robots" content="noindex";
                    title { (self.title) " - Niche Poster" }
                    link rel="stylesheet" href="/static/css/style.css";
                }
                body {
                    header class="container" {
                        nav {
                            a href="/" class="brand" { "Niche Poster" }
                        }
                    }
                    main class="container" {
                        (content)
                    }
                    footer class="container" {
                        small { "Posts are capped at 280 characters. Times are UTC." }
                    }
                }
            }
        }
    }
}
