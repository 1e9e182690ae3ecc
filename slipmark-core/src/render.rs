//! Renderer hook
//!
//! A renderer turns each node into some output given the already rendered
//! output of its children. The walk is bottom-up and exhaustive over node
//! kinds; what a type looks like is entirely up to the renderer.

use crate::model::{Block, Document, Inline, Node, Text};

pub trait Renderer {
    type Output;

    fn block(&self, block: &Block, children: Vec<Self::Output>) -> Self::Output;

    fn inline(&self, inline: &Inline, children: Vec<Self::Output>) -> Self::Output;

    fn text(&self, text: &Text) -> Self::Output;
}

/// Render `node` and its subtree.
pub fn render<R: Renderer + ?Sized>(renderer: &R, node: &Node) -> R::Output {
    match node {
        Node::Block(block) => {
            let children = block.nodes.iter().map(|n| render(renderer, n)).collect();
            renderer.block(block, children)
        }
        Node::Inline(inline) => {
            let children = inline.nodes.iter().map(|n| render(renderer, n)).collect();
            renderer.inline(inline, children)
        }
        Node::Text(text) => renderer.text(text),
    }
}

/// Render every top-level node of `doc`, in order.
pub fn render_document<R: Renderer + ?Sized>(renderer: &R, doc: &Document) -> Vec<R::Output> {
    doc.nodes.iter().map(|node| render(renderer, node)).collect()
}
