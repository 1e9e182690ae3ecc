//! Markdown format tests
//!
//! Tree → markdown export through the serializer and the format.

mod export;
