//! HTML format implementation
//!
//! Export only. Renders the document through [`HtmlRenderer`], the same
//! markup an editing surface shows, wrapped in a single `<div>`.
//!
//! # Element Mapping Table
//!
//! | Node               | HTML                                   |
//! |--------------------|----------------------------------------|
//! | paragraph          | `<p>`                                  |
//! | heading-one..six   | `<h1>`..`<h6>`                         |
//! | block-quote        | `<blockquote>`                         |
//! | bulleted-list      | `<ul>`                                 |
//! | list-item          | `<li>`                                 |
//! | code-block         | `<pre>`                                |
//! | `*-container`      | `<span data-type="…-container">`       |
//! | link               | `<a href="…">`                         |
//! | code               | `<code>`                               |
//! | bold, italic       | `<strong>`, `<em>`                     |
//! | strike             | `<del>`                                |
//! | unknown types      | `<div data-type>` / `<span data-type>` |
//!
//! # Parameters
//!
//! - `class`: class of the wrapper div (default `editor`)
//! - `fragment`: `true` to leave the wrapper out

mod renderer;

pub use renderer::HtmlRenderer;

use crate::error::FormatError;
use crate::format::{bool_option, check_known_options, Format};
use crate::model::Document;
use crate::render::render_document;
use renderer::escape;
use std::collections::HashMap;

/// Options for HTML serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Class of the wrapper element
    pub wrapper_class: String,
    /// Emit the rendered nodes without the wrapper
    pub fragment: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        HtmlOptions {
            wrapper_class: "editor".to_string(),
            fragment: false,
        }
    }
}

/// Format implementation for HTML
#[derive(Default)]
pub struct HtmlFormat {
    options: HtmlOptions,
}

impl HtmlFormat {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }

    /// HTML format whose wrapper div carries `class`.
    pub fn with_wrapper_class(class: impl Into<String>) -> Self {
        Self::new(HtmlOptions {
            wrapper_class: class.into(),
            ..HtmlOptions::default()
        })
    }
}

/// Render `doc` to HTML markup.
pub fn serialize_to_html(doc: &Document, options: &HtmlOptions) -> String {
    let body = render_document(&HtmlRenderer, doc).concat();
    if options.fragment {
        body
    } else {
        format!(
            "<div class=\"{}\">{body}</div>",
            escape(&options.wrapper_class)
        )
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML markup export"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serialize_to_html(doc, &self.options))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        check_known_options(self.name(), options, &["class", "fragment"])?;
        let mut html_options = self.options.clone();
        if let Some(class) = options.get("class") {
            html_options.wrapper_class = class.clone();
        }
        if let Some(fragment) = bool_option(options, "fragment")? {
            html_options.fragment = fragment;
        }
        Ok(serialize_to_html(doc, &html_options))
    }
}
