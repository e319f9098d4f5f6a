use erb_fmt::{
    ast::{NodeKind, Position, Root},
    config::{FormatOptions, LayoutOptions},
    format_text, format_text_with_rewriters, RewritePhase, Rewriter,
};

fn assert_format(input: &str, expected: &str) {
    assert_format_with(input, expected, &FormatOptions::default());
}

fn assert_format_with(input: &str, expected: &str, options: &FormatOptions) {
    let output = format_text(input, options).unwrap();
    similar_asserts::assert_eq!(expected, output);

    // formatting already-formatted output must be byte-identical
    let reformatted = format_text(&output, options).unwrap();
    similar_asserts::assert_eq!(output, reformatted, "format is unstable");
}

fn narrow(print_width: usize) -> FormatOptions {
    FormatOptions {
        layout: LayoutOptions {
            print_width,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn block_when_child_element_present() {
    assert_format("<div><p>Hello</p></div>", "<div>\n  <p>Hello</p>\n</div>\n");
}

#[test]
fn fully_inline_element() {
    assert_format(
        "<div><span>Hello</span></div>",
        "<div><span>Hello</span></div>\n",
    );
}

#[test]
fn erb_output_spacing_normalized() {
    assert_format("<%=@user.name%>", "<%= @user.name %>\n");
}

#[test]
fn erb_comment_spacing_normalized() {
    assert_format("<%#comment%>", "<%# comment %>\n");
}

#[test]
fn erb_whitespace_only_collapses() {
    assert_format("<%  %>", "<% %>\n");
}

#[test]
fn erb_trim_markers_kept_canonical() {
    assert_format("<%- x -%>", "<%- x -%>\n");
    assert_format("<% x -%>", "<% x -%>\n");
}

#[test]
fn erb_multiline_body_boundaries_untouched() {
    assert_format("<%\n  x = 1\n  y = 2\n%>\n", "<%\n  x = 1\n  y = 2\n%>\n");
}

#[test]
fn single_quoted_attr_becomes_double_quoted() {
    assert_format("<div class='foo'></div>", "<div class=\"foo\"></div>\n");
}

#[test]
fn quote_flip_never_corrupts_value() {
    assert_format(
        "<div title='say \"hello\"'></div>",
        "<div title='say \"hello\"'></div>\n",
    );
}

#[test]
fn boolean_attr_renders_bare() {
    assert_format(
        "<input   type=\"text\"   disabled>",
        "<input type=\"text\" disabled>\n",
    );
}

#[test]
fn void_and_self_closing_tags() {
    assert_format("<br>", "<br>\n");
    assert_format("<br/>", "<br />\n");
    assert_format("<img src=\"a.png\">", "<img src=\"a.png\">\n");
}

#[test]
fn attrs_wrap_one_per_line_when_over_width() {
    assert_format_with(
        "<button type=\"submit\" class=\"btn\" disabled></button>",
        "<button\n  type=\"submit\"\n  class=\"btn\"\n  disabled\n>\n</button>\n",
        &narrow(30),
    );
}

#[test]
fn single_class_token_never_wraps() {
    let token = "abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyzabcdefghijklm";
    assert_eq!(token.len(), 65);

    // fits in the default width, stays fully inline
    assert_format(
        &format!("<div class=\"{token}\"></div>"),
        &format!("<div class=\"{token}\"></div>\n"),
    );

    // over a narrow width the attribute moves to its own line,
    // but the value itself is still not wrapped
    assert_format_with(
        &format!("<div class=\"{token}\"></div>"),
        &format!("<div\n  class=\"{token}\"\n>\n</div>\n"),
        &narrow(30),
    );
}

#[test]
fn long_class_value_wraps_greedily() {
    assert_format_with(
        "<div class=\"alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo\">x</div>",
        "<div class=\"\n  alpha bravo charlie delta echo foxtrot\n  golf hotel india juliet kilo\n\">x</div>\n",
        &narrow(40),
    );
}

#[test]
fn class_value_whitespace_collapses_inline() {
    assert_format(
        "<div class=\"a    b\n   c\"></div>",
        "<div class=\"a b c\"></div>\n",
    );
}

#[test]
fn class_value_with_erb_is_never_rewrapped() {
    assert_format(
        "<div class=\"btn <%= variant %>\">x</div>",
        "<div class=\"btn <%= variant %>\">x</div>\n",
    );
}

#[test]
fn text_flow_wraps_at_width() {
    assert_format_with(
        "<p>\n  The quick brown fox jumps over the lazy dog\n</p>\n",
        "<p>\n  The quick brown fox jumps\n  over the lazy dog\n</p>\n",
        &narrow(30),
    );
}

#[test]
fn inline_single_text_run_is_not_width_wrapped() {
    // a single text run without a line break renders inline even when the
    // resulting line overflows the configured width
    assert_format_with(
        "<p>The quick brown fox jumps over the lazy dog</p>",
        "<p>The quick brown fox jumps over the lazy dog</p>\n",
        &narrow(30),
    );
}

#[test]
fn directive_comment_attaches_to_preceding_unit() {
    assert_format_with(
        "<p>\n  aaaa bbbb cccc <%# erb-fmt-x %>\n</p>\n",
        "<p>\n  aaaa bbbb cccc <%# erb-fmt-x %>\n</p>\n",
        &narrow(20),
    );
}

#[test]
fn blank_lines_collapse_to_one() {
    assert_format(
        "<section>\n  <p>a</p>\n\n  <p>b</p>\n\n\n\n  <p>c</p>\n</section>\n",
        "<section>\n  <p>a</p>\n\n  <p>b</p>\n\n  <p>c</p>\n</section>\n",
    );
}

#[test]
fn erb_flow_indents_children() {
    assert_format(
        "<% if admin %><p>Hi</p><% end %>",
        "<% if admin %>\n  <p>Hi</p>\n<% end %>\n",
    );
}

#[test]
fn erb_flow_branches_stay_aligned() {
    let formatted = "<% if a %>\n  <p>1</p>\n<% elsif b %>\n  <p>2</p>\n<% else %>\n  <p>3</p>\n<% end %>\n";
    assert_format(formatted, formatted);
}

#[test]
fn iterator_block_opens_flow() {
    let formatted =
        "<ul>\n  <% @items.each do |item| %>\n    <li><%= item %></li>\n  <% end %>\n</ul>\n";
    assert_format(formatted, formatted);
}

#[test]
fn trailing_if_modifier_is_not_flow() {
    assert_format("<% x = 1 if y %>", "<% x = 1 if y %>\n");
}

#[test]
fn single_line_conditional_attr_stays_inline() {
    assert_format(
        "<div <% if active %>class=\"on\"<% end %>>x</div>",
        "<div <% if active %> class=\"on\" <% end %>>x</div>\n",
    );
}

#[test]
fn multi_line_conditional_attr_forces_block_open_tag() {
    assert_format(
        "<div\n  <% if active %>\n    class=\"on\"\n  <% end %>\n>\n  x\n</div>\n",
        "<div\n  <% if active %>\n  class=\"on\"\n<% end %>\n>\n  x\n</div>\n",
    );
}

#[test]
fn pre_content_is_reproduced_verbatim() {
    let formatted = "<pre>\n  foo    bar\n     baz\n</pre>\n";
    assert_format(formatted, formatted);
}

#[test]
fn script_and_style_bodies_are_reproduced_verbatim() {
    let formatted = "<script>\n  const a = 1;\n</script>\n";
    assert_format(formatted, formatted);

    let formatted = "<style>\n  button { outline: none; }\n</style>\n";
    assert_format(formatted, formatted);
}

#[test]
fn doctype_is_canonicalized() {
    assert_format("<!doctype html>", "<!DOCTYPE html>\n");
}

#[test]
fn whole_document_round_trips() {
    let formatted = "<!DOCTYPE html>\n<html>\n  <head>\n    <title>x</title>\n  </head>\n  <body>\n    <p>hi</p>\n  </body>\n</html>\n";
    assert_format(formatted, formatted);
}

#[test]
fn ignore_file_directive_returns_input_unchanged() {
    let input = "<!-- erb-fmt-ignore-file -->\n<div   >   <p>x</p></div>";
    assert_format(input, input);

    let options = FormatOptions {
        force: true,
        ..Default::default()
    };
    assert_format_with(
        input,
        "<!-- erb-fmt-ignore-file -->\n<div>\n  <p>x</p>\n</div>\n",
        &options,
    );
}

#[test]
fn off_on_directives_preserve_region_verbatim() {
    let formatted = "<div>\n  <!-- erb-fmt-off -->\n  <p   >weird   spacing</p>\n  <!-- erb-fmt-on -->\n  <p>b</p>\n</div>\n";
    assert_format(formatted, formatted);
}

#[test]
fn unmatched_off_preserves_to_end_of_file() {
    assert_format(
        "<p>a</p>\n<!-- erb-fmt-off -->\n<p>   b   </p>",
        "<p>a</p>\n<!-- erb-fmt-off -->\n<p>   b   </p>\n",
    );
}

#[test]
fn redundant_on_directive_is_a_plain_comment() {
    assert_format(
        "<p>a</p>\n<!-- erb-fmt-on -->\n",
        "<p>a</p>\n<!-- erb-fmt-on -->\n",
    );
}

#[test]
fn syntax_errors_are_refused_by_default() {
    assert!(format_text("<div><p>unclosed", &FormatOptions::default()).is_err());
    assert!(format_text("<% end %>", &FormatOptions::default()).is_err());
}

#[test]
fn tolerant_mode_formats_malformed_input() {
    let options = FormatOptions {
        ignore_errors: true,
        ..Default::default()
    };
    assert_format_with(
        "<div><p>unclosed",
        "<div>\n  <p>unclosed</p>\n</div>\n",
        &options,
    );
    assert_format_with("<% end %>", "<% end %>\n", &options);
}

#[test]
fn positions_are_line_and_column() {
    assert_eq!(Position::of("<div>\n  x", 8), Position { line: 2, column: 3 });
    assert_eq!(Position::of("abc", 0), Position { line: 1, column: 1 });
}

struct StripComments;

impl Rewriter for StripComments {
    fn name(&self) -> &str {
        "strip-comments"
    }

    fn phase(&self) -> RewritePhase {
        RewritePhase::Pre
    }

    fn rewrite<'s>(&self, ast: Root<'s>) -> Root<'s> {
        Root {
            children: ast
                .children
                .into_iter()
                .filter(|child| !matches!(child.kind, NodeKind::Comment(_)))
                .collect(),
        }
    }
}

#[test]
fn pre_rewriters_transform_the_tree_before_layout() {
    let output = format_text_with_rewriters(
        "<!-- note -->\n<p>hi</p>",
        &FormatOptions::default(),
        &[&StripComments],
    )
    .unwrap();
    similar_asserts::assert_eq!(output, "<p>hi</p>\n");
}
