#![doc = include_str!("../README.md")]

mod analyzer;
pub mod ast;
pub mod config;
mod ctx;
mod error;
mod helpers;
mod parser;
mod printer;
mod rewrite;
mod state;
mod textflow;

use crate::{
    ast::Root, config::FormatOptions, ctx::Ctx, parser::Parser, printer::Format, state::State,
};
pub use crate::{
    error::*,
    rewrite::{RewritePhase, Rewriter},
};

/// Format the given source code.
///
/// A file that contains the configured ignore directive is returned
/// unchanged unless [`FormatOptions::force`] is set. Sources with syntax
/// errors are refused unless [`FormatOptions::ignore_errors`] is set, in
/// which case malformed parts are formatted best-effort.
///
/// ```
/// use erb_fmt::format_text;
///
/// let formatted = format_text("<%=@user.name%>", &Default::default()).unwrap();
/// assert_eq!(formatted, "<%= @user.name %>\n");
/// ```
pub fn format_text(code: &str, options: &FormatOptions) -> Result<String, FormatError> {
    if !options.force && has_ignore_directive(code, options) {
        return Ok(code.into());
    }

    let mut parser = Parser::new(code, options.ignore_errors);
    let ast = parser.parse_root().map_err(FormatError::Syntax)?;

    Ok(format_tree(&ast, code, options))
}

/// Format an already parsed tree.
///
/// This is the layout engine entry for callers that hold an AST, for
/// example after running pre-phase rewriters. `source` must be the text the
/// tree was parsed from; verbatim regions are reproduced from it.
pub fn format_tree<'s>(ast: &Root<'s>, source: &'s str, options: &FormatOptions) -> String {
    let mut ctx = Ctx::new(source, options);
    ast.format(
        &mut ctx,
        &State {
            in_conditional_open_tag: false,
        },
    );
    ctx.finish()
}

/// Format the given source code, running rewriters around the layout pass.
///
/// Pre-phase rewriters transform the parsed tree before layout. Post-phase
/// rewriters transform the re-parsed tree of the formatted output, and their
/// result is printed again.
pub fn format_text_with_rewriters(
    code: &str,
    options: &FormatOptions,
    rewriters: &[&dyn Rewriter],
) -> Result<String, FormatError> {
    if !options.force && has_ignore_directive(code, options) {
        return Ok(code.into());
    }

    let mut parser = Parser::new(code, options.ignore_errors);
    let mut ast = parser.parse_root().map_err(FormatError::Syntax)?;
    for rewriter in rewriters {
        if rewriter.phase() == RewritePhase::Pre {
            ast = rewriter.rewrite(ast);
        }
    }

    let formatted = format_tree(&ast, code, options);

    if rewriters
        .iter()
        .all(|rewriter| rewriter.phase() != RewritePhase::Post)
    {
        return Ok(formatted);
    }

    let mut parser = Parser::new(&formatted, options.ignore_errors);
    let mut ast = parser.parse_root().map_err(FormatError::Syntax)?;
    for rewriter in rewriters {
        if rewriter.phase() == RewritePhase::Post {
            ast = rewriter.rewrite(ast);
        }
    }

    Ok(format_tree(&ast, &formatted, options))
}

fn has_ignore_directive(code: &str, options: &FormatOptions) -> bool {
    let directive = &options.language.ignore_file_comment_directive;
    !directive.is_empty()
        && memchr::memmem::find(code.as_bytes(), directive.as_bytes()).is_some()
}
