use crate::{ast::FlowKind, config::LanguageOptions};

static VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr", "param",
];

pub(crate) fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case(name))
}

static INLINE_ELEMENTS: [&str; 31] = [
    "a", "abbr", "b", "bdi", "bdo", "br", "button", "cite", "code", "data", "dfn", "em", "i",
    "kbd", "label", "mark", "output", "q", "rp", "rt", "ruby", "s", "samp", "small", "span",
    "strong", "sub", "sup", "time", "u", "var",
];

pub(crate) fn is_inline_element(name: &str) -> bool {
    INLINE_ELEMENTS
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case(name))
}

/// Elements whose body is reproduced byte-for-byte.
pub(crate) fn is_content_preserving(name: &str) -> bool {
    name.eq_ignore_ascii_case("pre")
        || name.eq_ignore_ascii_case("textarea")
        || name.eq_ignore_ascii_case("script")
        || name.eq_ignore_ascii_case("style")
}

pub(crate) fn is_html_tag(name: &str) -> bool {
    css_dataset::tags::STANDARD_HTML_TAGS
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case(name))
        || css_dataset::tags::NON_STANDARD_HTML_TAGS
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(name))
}

/// Classify the content of an ERB execution tag as a control flow keyword.
///
/// Only the leading keyword decides; `x = 1 if y` is a plain statement
/// because its first word is not a keyword. A trailing `do`/`do |x|` opens
/// an iterator block closed by `end`.
pub(crate) fn flow_kind(content: &str) -> Option<FlowKind> {
    let trimmed = content.trim();
    let first = trimmed
        .split(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .next()
        .unwrap_or_default();
    match first {
        "case" => Some(FlowKind::Case),
        "else" => Some(FlowKind::Else),
        "elsif" => Some(FlowKind::Elsif),
        "end" => Some(FlowKind::End),
        "for" => Some(FlowKind::For),
        "if" => Some(FlowKind::If),
        "in" => Some(FlowKind::In),
        "unless" => Some(FlowKind::Unless),
        "when" => Some(FlowKind::When),
        "while" => Some(FlowKind::While),
        _ if ends_with_block_opener(trimmed) => Some(FlowKind::Block),
        _ => None,
    }
}

fn ends_with_block_opener(content: &str) -> bool {
    let content = if content.ends_with('|') {
        match content[..content.len() - 1].rfind('|') {
            Some(i) => content[..i].trim_end(),
            None => return false,
        }
    } else {
        content
    };
    content == "do" || content.ends_with(" do")
}

pub(crate) enum CommentDirective {
    Off,
    On,
}

pub(crate) fn comment_directive(
    content: &str,
    options: &LanguageOptions,
) -> Option<CommentDirective> {
    let trimmed = content.trim();
    if !options.format_off_comment_directive.is_empty()
        && trimmed == options.format_off_comment_directive
    {
        Some(CommentDirective::Off)
    } else if !options.format_on_comment_directive.is_empty()
        && trimmed == options.format_on_comment_directive
    {
        Some(CommentDirective::On)
    } else {
        None
    }
}

/// Comments that carry formatter/linter directives are atomic in text flow
/// and stick to the unit they follow.
pub(crate) fn is_directive_comment(content: &str) -> bool {
    content.trim().starts_with("erb-fmt")
}
