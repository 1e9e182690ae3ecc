//! Shared icon mapping for tree visualization
//!
//! Keyed by the serialized type name of a node (`paragraph`, `bold`, ...),
//! plus the pseudo types `document` and `text`.

/// Get the Unicode icon for a given node type
///
/// Heading levels share one icon, as do all containers. Unknown types get a
/// hollow circle so the tree stays aligned.
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "document" => "⧉",
        "paragraph" => "¶",
        "block-quote" => "❝",
        "bulleted-list" => "☰",
        "list-item" => "•",
        "code-block" => "𝒱",
        "text" => "◦",
        "link" => "⊕",
        "code" => "ƒ",
        "bold" | "bold_underscore" => "𝐁",
        "italic" | "underline" => "𝐼",
        "strike" => "≁",
        t if t.starts_with("heading-") => "§",
        t if t.ends_with("-container") => "▣",
        _ => "○",
    }
}
