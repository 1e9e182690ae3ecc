//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the document tree and text representations.

pub mod html;
pub mod icons;
pub mod json;
pub mod markdown;
pub mod treeviz;

pub use html::{HtmlFormat, HtmlOptions, HtmlRenderer};
pub use json::JsonFormat;
pub use markdown::{MarkdownFormat, Target};
pub use treeviz::TreevizFormat;
