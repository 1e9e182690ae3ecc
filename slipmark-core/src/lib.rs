//! Markdown autoformatting for rich-text editors
//!
//!     This crate turns markdown shortcuts typed into a structured rich-text document into
//!     formatted nodes, and serializes document trees back to markdown and other formats.
//!
//!     It is a pure lib: the editing surface (or the slipmark cli) owns input, output and
//!     configuration files. Nothing here prints, reads env vars or touches the filesystem.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── model                   # Document tree: nodes, types, content helpers
//!     ├── editing                 # Value snapshots, selections, changes, keys, the Editor
//!     ├── pattern.rs              # Shortcut grammar (regex table)
//!     ├── autoformat              # Inline and block prefix plugins
//!     ├── render.rs               # Renderer hook
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     └── formats
//!         ├── markdown            # Tree → markdown text
//!         ├── html                # Tree → HTML markup
//!         ├── json                # Lossless tree encoding
//!         └── treeviz             # Visual tree dump
//!
//! Autoformatting
//!
//!     The editor dispatches every key to its plugins in order; the first one answering with a
//!     change wins, otherwise the default key behaviour applies. A change is applied to a clone
//!     of the current value, so a failed change leaves the editor untouched.
//!
//!     - Inline shortcuts (`**bold**`, `` `code` ``, `[label](href)`, ...) fire on the closing
//!       delimiter, on space or on enter. The new inline lands in a container block, and the
//!       cursor moves to a fresh paragraph after it.
//!     - Block prefixes (`#`..`######`, `>`, `+`, a fence) fire on space (or enter for fences)
//!       and retype the current block.
//!     - Backspace right after a conversion restores the literal text that was typed.
//!
//! Formats
//!
//!     Formats implement the Format trait and are discovered through the FormatRegistry. The
//!     JSON format is the only one that parses; markdown, html and treeviz are export only.
//!
//! Testing
//!     tests
//!     ├── autoformat              # Key scripts driven through the Editor
//!     ├── markdown                # Serializer scenarios
//!     └── properties.rs           # Convert / revert properties
//!
//!     Note that rust does not by default discover tests in subdirectories, so these are
//!     included from tests/lib.rs.

pub mod autoformat;
pub mod editing;
pub mod error;
pub mod format;
pub mod formats;
pub mod model;
pub mod pattern;
pub mod registry;
pub mod render;

pub use autoformat::{default_plugins, AutoformatPlugin, BlockPrefixPlugin, InlinePlugin};
pub use editing::{Change, Editor, Key, KeyEvent, KeyOutcome, Selection, Value};
pub use error::{FormatError, GrammarError, KeyScriptError, ModelError, TransformError};
pub use format::Format;
pub use model::{Document, Node};
pub use pattern::{AutoformatOptions, Grammar};
pub use registry::FormatRegistry;
