use crate::{ast::*, helpers, state::State};

/// Layout verdict for one element: whether its open tag, its content and its
/// close tag may render on a single line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LayoutDecision {
    pub(crate) open_tag_inline: bool,
    pub(crate) content_inline: bool,
    pub(crate) close_tag_inline: bool,
}

impl LayoutDecision {
    pub(crate) fn fully_inline(&self) -> bool {
        self.open_tag_inline && self.content_inline && self.close_tag_inline
    }
}

/// Classify an element. Pure, deterministic, never fails.
///
/// The decision does not consider the configured print width: a body that is
/// inline-capable stays inline even when the rendered line overflows. The
/// width only drives attribute wrapping inside open tags.
pub(crate) fn analyze(element: &Element, source: &str, state: &State) -> LayoutDecision {
    if helpers::is_content_preserving(element.tag_name) {
        return LayoutDecision {
            open_tag_inline: false,
            content_inline: false,
            close_tag_inline: false,
        };
    }

    if element.void_element || element.self_closing {
        return LayoutDecision {
            open_tag_inline: true,
            content_inline: true,
            close_tag_inline: true,
        };
    }

    let open_tag_inline = !state.in_conditional_open_tag
        && !element.attrs.iter().any(|attr| {
            matches!(attr.kind, AttrKind::Flow(_)) && attr.span.is_multiline(source)
        });

    let content_inline = open_tag_inline && is_content_inline(element, source, state);

    LayoutDecision {
        open_tag_inline,
        content_inline,
        close_tag_inline: content_inline,
    }
}

fn is_content_inline(element: &Element, source: &str, state: &State) -> bool {
    // A body with nothing but whitespace collapses like an empty one.
    if element.children.iter().all(|child| {
        matches!(&child.kind, NodeKind::Text(text_node) if text_node
            .raw
            .bytes()
            .all(|byte| byte.is_ascii_whitespace()))
    }) {
        return true;
    }

    // Any embedded line break in the body, including the whitespace between
    // children, is taken as block intent and keeps blank lines preservable.
    if element.children.iter().any(|child| {
        matches!(&child.kind, NodeKind::Text(text_node) if text_node.line_breaks > 0)
    }) {
        return false;
    }

    element
        .children
        .iter()
        .all(|child| is_inline_capable(child, source, state))
}

fn is_inline_capable(node: &Node, source: &str, state: &State) -> bool {
    match &node.kind {
        NodeKind::Text(_) | NodeKind::ErbOutput(_) => true,
        NodeKind::ErbComment(erb_comment) => {
            !helpers::is_directive_comment(erb_comment.content)
        }
        NodeKind::Element(element) => {
            helpers::is_inline_element(element.tag_name)
                && analyze(element, source, state).fully_inline()
        }
        NodeKind::Comment(_)
        | NodeKind::Doctype(_)
        | NodeKind::ErbExecution(_)
        | NodeKind::ErbFlow(_) => false,
    }
}
