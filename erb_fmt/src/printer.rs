use crate::{
    analyzer,
    ast::*,
    config::Quotes,
    ctx::Ctx,
    helpers::{self, CommentDirective},
    state::State,
    textflow::TextFlowBuilder,
};
use itertools::Itertools;
use std::borrow::Cow;

/// Class values shorter than this are never wrapped by the width rule.
const CLASS_WRAP_MIN_LEN: usize = 60;
/// Columns taken by `class=""` plus the separating space before it.
const CLASS_ATTR_OVERHEAD: usize = "class=\"\"".len() + 1;

pub(crate) trait Format<'s> {
    fn format(&self, ctx: &mut Ctx<'_, 's>, state: &State);
}

impl<'s> Format<'s> for Attribute<'s> {
    fn format(&self, ctx: &mut Ctx<'_, 's>, state: &State) {
        match &self.kind {
            AttrKind::Comment(erb_comment) => {
                ctx.write(&erb_tag_text(
                    erb_comment.open_delim,
                    erb_comment.content,
                    erb_comment.close_delim,
                ));
            }
            AttrKind::Execution(erb_execution) => {
                ctx.write(&erb_tag_text(
                    erb_execution.open_delim,
                    erb_execution.content,
                    erb_execution.close_delim,
                ));
            }
            AttrKind::Flow(attr_flow) => format_attr_flow_inline(attr_flow, ctx, state),
            AttrKind::Native(native_attribute) => native_attribute.format(ctx, state),
            AttrKind::Output(erb_output) => {
                ctx.write(&erb_tag_text(
                    erb_output.open_delim,
                    erb_output.content,
                    erb_output.close_delim,
                ));
            }
        }
    }
}

impl<'s> Format<'s> for Comment<'s> {
    fn format(&self, ctx: &mut Ctx<'_, 's>, _: &State) {
        if ctx.options.format_comments {
            let collapsed = self.raw.split_ascii_whitespace().join(" ");
            if collapsed.is_empty() {
                ctx.write("<!-- -->");
            } else {
                ctx.write("<!-- ");
                ctx.write(&collapsed);
                ctx.write(" -->");
            }
        } else {
            ctx.write("<!--");
            ctx.write(self.raw);
            ctx.write("-->");
        }
    }
}

impl<'s> Format<'s> for Doctype<'s> {
    fn format(&self, ctx: &mut Ctx<'_, 's>, _: &State) {
        let mut words = self.raw.split_ascii_whitespace();
        let is_html5 = words
            .next()
            .is_some_and(|word| word.eq_ignore_ascii_case("doctype"))
            && words
                .next()
                .is_some_and(|word| word.eq_ignore_ascii_case("html"))
            && words.next().is_none();
        if is_html5 {
            ctx.write("<!DOCTYPE html>");
        } else {
            ctx.write("<!");
            ctx.write(self.raw);
            ctx.write(">");
        }
    }
}

impl<'s> Format<'s> for Element<'s> {
    fn format(&self, ctx: &mut Ctx<'_, 's>, state: &State) {
        let decision = analyzer::analyze(self, ctx.source, state);
        let tag_name: Cow<str> = if helpers::is_html_tag(self.tag_name) {
            Cow::from(self.tag_name.to_ascii_lowercase())
        } else {
            Cow::from(self.tag_name)
        };

        // A content-preserving element blocks its body and close tag, but its
        // open tag still follows normal tag normalization.
        let mut open_tag_rendered_inline = false;
        if decision.open_tag_inline
            || self.attrs.is_empty()
            || helpers::is_content_preserving(self.tag_name)
        {
            let inline = ctx.capture(|ctx| {
                ctx.write("<");
                ctx.write(&tag_name);
                for attr in &self.attrs {
                    ctx.write(" ");
                    attr.format(ctx, state);
                }
            });
            let bracket_len = if self.self_closing { 3 } else { 1 };
            if self.attrs.is_empty()
                || inline.contains('\n')
                || ctx.col() + inline.chars().count() + bracket_len <= ctx.print_width
            {
                ctx.write(&inline);
                ctx.write(if self.self_closing { " />" } else { ">" });
                open_tag_rendered_inline = true;
            }
        }
        if !open_tag_rendered_inline {
            format_open_tag_multiline(self, &tag_name, ctx, state);
        }

        if self.void_element || self.self_closing {
            return;
        }

        if helpers::is_content_preserving(self.tag_name) {
            for child in &self.children {
                if let NodeKind::Text(text_node) = &child.kind {
                    ctx.write(text_node.raw);
                }
            }
            ctx.write("</");
            ctx.write(&tag_name);
            ctx.write(">");
            return;
        }

        let content_inline = decision.content_inline && open_tag_rendered_inline;
        if content_inline {
            format_children_inline(&self.children, ctx, state);
        } else if has_significant_content(&self.children) {
            ctx.indent_level += 1;
            format_children_block(&self.children, ctx, state, true);
            ctx.indent_level -= 1;
            ctx.break_line();
        } else {
            // empty body under a multi-line open tag
            ctx.break_line();
        }
        ctx.write("</");
        ctx.write(&tag_name);
        ctx.write(">");
    }
}

impl<'s> Format<'s> for ErbComment<'s> {
    fn format(&self, ctx: &mut Ctx<'_, 's>, _: &State) {
        ctx.write(&erb_tag_text(self.open_delim, self.content, self.close_delim));
    }
}

impl<'s> Format<'s> for ErbExecution<'s> {
    fn format(&self, ctx: &mut Ctx<'_, 's>, _: &State) {
        ctx.write(&erb_tag_text(self.open_delim, self.content, self.close_delim));
    }
}

impl<'s> Format<'s> for ErbFlow<'s> {
    fn format(&self, ctx: &mut Ctx<'_, 's>, state: &State) {
        let mut first = true;
        for part in &self.body {
            match part {
                ErbFlowPart::Tag(flow_tag) => {
                    if !first {
                        ctx.break_line();
                    }
                    ctx.write(&erb_tag_text(
                        flow_tag.open_delim,
                        flow_tag.content,
                        flow_tag.close_delim,
                    ));
                    first = false;
                }
                ErbFlowPart::Children(children) => {
                    if has_significant_content(children) {
                        ctx.indent_level += 1;
                        format_children_block(children, ctx, state, true);
                        ctx.indent_level -= 1;
                    }
                }
            }
        }
    }
}

impl<'s> Format<'s> for ErbOutput<'s> {
    fn format(&self, ctx: &mut Ctx<'_, 's>, _: &State) {
        ctx.write(&erb_tag_text(self.open_delim, self.content, self.close_delim));
    }
}

impl<'s> Format<'s> for NativeAttribute<'s> {
    fn format(&self, ctx: &mut Ctx<'_, 's>, _: &State) {
        let Some(value) = self.value else {
            // boolean attribute
            ctx.write(self.name);
            return;
        };
        ctx.write(self.name);
        ctx.write("=");
        if self.name.eq_ignore_ascii_case("class") && format_class_value(value, ctx) {
            return;
        }
        write_attr_value(value, ctx);
    }
}

impl<'s> Format<'s> for Node<'s> {
    fn format(&self, ctx: &mut Ctx<'_, 's>, state: &State) {
        match &self.kind {
            NodeKind::Comment(comment) => comment.format(ctx, state),
            NodeKind::Doctype(doctype) => doctype.format(ctx, state),
            NodeKind::Element(element) => element.format(ctx, state),
            NodeKind::ErbComment(erb_comment) => erb_comment.format(ctx, state),
            NodeKind::ErbExecution(erb_execution) => erb_execution.format(ctx, state),
            NodeKind::ErbFlow(erb_flow) => erb_flow.format(ctx, state),
            NodeKind::ErbOutput(erb_output) => erb_output.format(ctx, state),
            NodeKind::Text(text_node) => text_node.format(ctx, state),
        }
    }
}

impl<'s> Format<'s> for Root<'s> {
    fn format(&self, ctx: &mut Ctx<'_, 's>, state: &State) {
        format_children_block(&self.children, ctx, state, false);
    }
}

impl<'s> Format<'s> for TextNode<'s> {
    fn format(&self, ctx: &mut Ctx<'_, 's>, _: &State) {
        let mut builder = TextFlowBuilder::new();
        builder.add_text(self.raw);
        builder.print(ctx);
    }
}

/// Normalize ERB tag spacing: one space after the open delimiter and one
/// before the close delimiter. A boundary starting or ending with a line
/// break (or a heredoc opener) is reproduced untouched, and close delimiters
/// carrying a trim marker normalize to `-%>`.
fn erb_tag_text(open_delim: &str, content: &str, close_delim: &str) -> String {
    let close = if close_delim.contains('-') { "-%>" } else { "%>" };
    if content.trim().is_empty() {
        return format!("{open_delim} {close}");
    }

    let raw_lead = content.starts_with(['\n', '\r']) || content.starts_with("<<");
    let raw_trail = content.trim_end_matches([' ', '\t']).ends_with('\n');

    let mut out = String::with_capacity(open_delim.len() + content.len() + close.len() + 2);
    out.push_str(open_delim);
    let body = if raw_lead {
        content
    } else {
        out.push(' ');
        content.trim_start()
    };
    if raw_trail {
        out.push_str(body);
    } else {
        out.push_str(body.trim_end());
        out.push(' ');
    }
    out.push_str(close);
    out
}

fn write_attr_value(value: &str, ctx: &mut Ctx) {
    // Flipping quotes must not corrupt a value that contains the preferred
    // quote character itself.
    let quote = if value.contains('"') {
        "'"
    } else if value.contains('\'') {
        "\""
    } else if let Quotes::Double = ctx.options.quotes {
        "\""
    } else {
        "'"
    };
    ctx.write(quote);
    ctx.write(value);
    ctx.write(quote);
}

/// The `class` attribute wrapping algorithm. Returns `false` when the value
/// must take the ordinary attribute path instead (embedded ERB or quotes).
fn format_class_value(value: &str, ctx: &mut Ctx) -> bool {
    if value.contains("<%") || value.contains('"') {
        return false;
    }

    let normalized = value.split_ascii_whitespace().join(" ");
    let len = normalized.chars().count();

    // A single token is never wrapped regardless of length, and the two wrap
    // conditions below are independent checks, not one unified rule.
    let splittable = normalized.contains(' ');
    let wrap_from_source = splittable && value.contains('\n') && len > ctx.print_width;
    let wrap_by_width = splittable
        && len > CLASS_WRAP_MIN_LEN
        && ctx.indent_columns() + len + CLASS_ATTR_OVERHEAD > ctx.print_width;

    if !wrap_from_source && !wrap_by_width {
        ctx.write("\"");
        ctx.write(&normalized);
        ctx.write("\"");
        return true;
    }

    let lines = if wrap_from_source {
        value
            .split('\n')
            .map(|line| line.split_ascii_whitespace().join(" "))
            .filter(|line| !line.is_empty())
            .collect()
    } else {
        let indent_columns = (ctx.indent_level + 1) * ctx.indent_width;
        greedy_fill(normalized.split(' '), indent_columns, ctx.print_width)
    };

    ctx.write("\"");
    ctx.indent_level += 1;
    for line in &lines {
        ctx.break_line();
        ctx.write(line);
    }
    ctx.indent_level -= 1;
    ctx.break_line();
    ctx.write("\"");
    true
}

fn greedy_fill<'a>(
    tokens: impl Iterator<Item = &'a str>,
    indent_columns: usize,
    width: usize,
) -> Vec<String> {
    let mut lines = vec![];
    let mut current = String::new();
    let mut current_len = 0;
    for token in tokens {
        let token_len = token.chars().count();
        if current_len > 0 && indent_columns + current_len + 1 + token_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(token);
        current_len += token_len;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn format_attr_flow_inline<'s>(attr_flow: &AttrFlow<'s>, ctx: &mut Ctx<'_, 's>, state: &State) {
    let mut first = true;
    for part in &attr_flow.body {
        match part {
            AttrFlowPart::Tag(flow_tag) => {
                if !first {
                    ctx.write(" ");
                }
                ctx.write(&erb_tag_text(
                    flow_tag.open_delim,
                    flow_tag.content,
                    flow_tag.close_delim,
                ));
                first = false;
            }
            AttrFlowPart::Attrs(attrs) => {
                for attr in attrs {
                    if !first {
                        ctx.write(" ");
                    }
                    attr.format(ctx, state);
                    first = false;
                }
            }
        }
    }
}

/// One keyword or gated attribute per line at the attribute indent; the
/// final `end` drops back to the element's base indent.
fn format_attr_flow_multiline<'s>(
    attr_flow: &AttrFlow<'s>,
    ctx: &mut Ctx<'_, 's>,
    state: &State,
) {
    for part in &attr_flow.body {
        match part {
            AttrFlowPart::Tag(flow_tag) => {
                if flow_tag.kind == FlowKind::End {
                    ctx.indent_level -= 1;
                    ctx.break_line();
                    ctx.indent_level += 1;
                } else {
                    ctx.break_line();
                }
                ctx.write(&erb_tag_text(
                    flow_tag.open_delim,
                    flow_tag.content,
                    flow_tag.close_delim,
                ));
            }
            AttrFlowPart::Attrs(attrs) => {
                for attr in attrs {
                    ctx.break_line();
                    attr.format(ctx, state);
                }
            }
        }
    }
}

fn format_open_tag_multiline<'s>(
    element: &Element<'s>,
    tag_name: &str,
    ctx: &mut Ctx<'_, 's>,
    state: &State,
) {
    ctx.write("<");
    ctx.write(tag_name);

    // Trailing comments inside an open tag stay on the tag-name line.
    for attr in &element.attrs {
        if let AttrKind::Comment(erb_comment) = &attr.kind {
            ctx.write(" ");
            ctx.write(&erb_tag_text(
                erb_comment.open_delim,
                erb_comment.content,
                erb_comment.close_delim,
            ));
        }
    }

    let state = State {
        in_conditional_open_tag: state.in_conditional_open_tag
            || element
                .attrs
                .iter()
                .any(|attr| matches!(attr.kind, AttrKind::Flow(_))),
    };

    ctx.indent_level += 1;
    for attr in &element.attrs {
        match &attr.kind {
            AttrKind::Comment(_) => {}
            AttrKind::Flow(attr_flow) => format_attr_flow_multiline(attr_flow, ctx, &state),
            _ => {
                ctx.break_line();
                attr.format(ctx, &state);
            }
        }
    }
    ctx.indent_level -= 1;

    if ctx.options.closing_bracket_same_line {
        ctx.write(if element.self_closing { " />" } else { ">" });
    } else {
        ctx.break_line();
        ctx.write(if element.self_closing { "/>" } else { ">" });
    }
}

fn is_all_ascii_whitespace(s: &str) -> bool {
    s.as_bytes().iter().all(|byte| byte.is_ascii_whitespace())
}

fn has_significant_content(children: &[Node]) -> bool {
    children.iter().any(|child| {
        !matches!(&child.kind, NodeKind::Text(text_node) if is_all_ascii_whitespace(text_node.raw))
    })
}

fn node_directive(node: &Node, ctx: &Ctx) -> Option<CommentDirective> {
    match &node.kind {
        NodeKind::Comment(comment) => helpers::comment_directive(comment.raw, ctx.options),
        NodeKind::ErbComment(erb_comment) => {
            helpers::comment_directive(erb_comment.content, ctx.options)
        }
        _ => None,
    }
}

fn is_flow_unit<'s>(node: &Node<'s>, ctx: &Ctx<'_, 's>, state: &State) -> bool {
    match &node.kind {
        NodeKind::Text(_) | NodeKind::ErbOutput(_) | NodeKind::ErbComment(_) => true,
        NodeKind::Element(element) => {
            helpers::is_inline_element(element.tag_name)
                && analyzer::analyze(element, ctx.source, state).fully_inline()
        }
        _ => false,
    }
}

fn add_flow_unit<'s>(
    node: &Node<'s>,
    builder: &mut TextFlowBuilder,
    ctx: &mut Ctx<'_, 's>,
    state: &State,
) {
    match &node.kind {
        NodeKind::Text(text_node) => builder.add_text(text_node.raw),
        NodeKind::ErbOutput(erb_output) => builder.add_atomic(
            erb_tag_text(
                erb_output.open_delim,
                erb_output.content,
                erb_output.close_delim,
            ),
            false,
        ),
        NodeKind::ErbComment(erb_comment) => builder.add_atomic(
            erb_tag_text(
                erb_comment.open_delim,
                erb_comment.content,
                erb_comment.close_delim,
            ),
            helpers::is_directive_comment(erb_comment.content),
        ),
        _ => {
            let rendered = ctx.capture(|ctx| node.format(ctx, state));
            builder.add_atomic(rendered, false);
        }
    }
}

fn format_children_inline<'s>(children: &[Node<'s>], ctx: &mut Ctx<'_, 's>, state: &State) {
    let mut builder = TextFlowBuilder::new();
    for child in children {
        add_flow_unit(child, &mut builder, ctx, state);
    }
    builder.print_inline(ctx);
}

/// Format children as block content: every child (or run of text-flow
/// children) on its own line(s), with blank lines preserved from the
/// original whitespace and off/on directive regions reproduced verbatim.
fn format_children_block<'s>(
    children: &[Node<'s>],
    ctx: &mut Ctx<'_, 's>,
    state: &State,
    break_first: bool,
) {
    let source = ctx.source;
    let mut first = true;
    let mut pending_blank = false;
    let mut i = 0;
    while i < children.len() {
        let child = &children[i];

        if let NodeKind::Text(text_node) = &child.kind {
            if is_all_ascii_whitespace(text_node.raw) {
                if text_node.line_breaks > 1 {
                    pending_blank = true;
                }
                i += 1;
                continue;
            }
        }

        if matches!(node_directive(child, ctx), Some(CommentDirective::Off)) {
            emit_separator(ctx, &mut first, &mut pending_blank, break_first);
            let close = children[i + 1..]
                .iter()
                .position(|c| matches!(node_directive(c, ctx), Some(CommentDirective::On)));
            let (end, next) = match close {
                Some(offset) => (children[i + 1 + offset].span.end, i + offset + 2),
                None => (
                    children.last().map(|c| c.span.end).unwrap_or(child.span.end),
                    children.len(),
                ),
            };
            ctx.write(&source[child.span.start..end]);
            i = next;
            continue;
        }

        if is_flow_unit(child, ctx, state) {
            emit_separator(ctx, &mut first, &mut pending_blank, break_first);
            let mut builder = TextFlowBuilder::new();
            while i < children.len() {
                let child = &children[i];
                if let NodeKind::Text(text_node) = &child.kind {
                    if is_all_ascii_whitespace(text_node.raw) {
                        // Consume separating whitespace only when the run
                        // continues; otherwise leave it to the outer loop.
                        let continues = children[i + 1..]
                            .iter()
                            .find(|c| {
                                !matches!(&c.kind, NodeKind::Text(t) if is_all_ascii_whitespace(t.raw))
                            })
                            .is_some_and(|c| {
                                is_flow_unit(c, ctx, state)
                                    && !matches!(
                                        node_directive(c, ctx),
                                        Some(CommentDirective::Off)
                                    )
                            });
                        if !continues {
                            break;
                        }
                        builder.add_text(text_node.raw);
                        i += 1;
                        continue;
                    }
                }
                if is_flow_unit(child, ctx, state)
                    && !matches!(node_directive(child, ctx), Some(CommentDirective::Off))
                {
                    add_flow_unit(child, &mut builder, ctx, state);
                    i += 1;
                } else {
                    break;
                }
            }
            builder.print(ctx);
            continue;
        }

        emit_separator(ctx, &mut first, &mut pending_blank, break_first);
        child.format(ctx, state);
        i += 1;
    }
}

fn emit_separator(ctx: &mut Ctx, first: &mut bool, pending_blank: &mut bool, break_first: bool) {
    if *first {
        if break_first {
            ctx.break_line();
        }
        *first = false;
    } else if *pending_blank {
        ctx.blank_line();
    } else {
        ctx.break_line();
    }
    *pending_blank = false;
}
