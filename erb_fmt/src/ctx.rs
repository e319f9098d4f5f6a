use crate::config::{FormatOptions, LanguageOptions, LineBreak};
use std::mem;

/// Printing context: the output accumulator plus the indentation counter.
///
/// Indentation is an explicit level counter rather than recursion depth,
/// because preserved-content regions and multi-line attribute blocks nest
/// non-uniformly. The level changes only at block-content boundaries and
/// never underflows.
pub(crate) struct Ctx<'b, 's> {
    pub(crate) source: &'s str,
    pub(crate) indent_width: usize,
    pub(crate) print_width: usize,
    pub(crate) options: &'b LanguageOptions,
    pub(crate) indent_level: usize,
    use_tabs: bool,
    line_break: &'static str,
    out: String,
}

impl<'b, 's> Ctx<'b, 's> {
    pub(crate) fn new(source: &'s str, options: &'b FormatOptions) -> Self {
        Self {
            source,
            indent_width: options.layout.indent_width,
            print_width: options.layout.print_width,
            options: &options.language,
            indent_level: 0,
            use_tabs: options.layout.use_tabs,
            line_break: match options.layout.line_break {
                LineBreak::Lf => "\n",
                LineBreak::Crlf => "\r\n",
            },
            out: String::new(),
        }
    }

    pub(crate) fn write(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Start a new line at the current indentation level.
    pub(crate) fn break_line(&mut self) {
        self.out.push_str(self.line_break);
        if self.use_tabs {
            for _ in 0..self.indent_level {
                self.out.push('\t');
            }
        } else {
            for _ in 0..self.indent_level * self.indent_width {
                self.out.push(' ');
            }
        }
    }

    /// Emit one empty line, then start a new indented line.
    pub(crate) fn blank_line(&mut self) {
        self.out.push_str(self.line_break);
        self.break_line();
    }

    /// Column (in characters) of the current line end.
    pub(crate) fn col(&self) -> usize {
        let line_start = memchr::memrchr(b'\n', self.out.as_bytes())
            .map(|i| i + 1)
            .unwrap_or(0);
        self.out[line_start..].chars().count()
    }

    pub(crate) fn indent_columns(&self) -> usize {
        self.indent_level * self.indent_width
    }

    /// Render into a detached buffer, leaving the real output untouched.
    pub(crate) fn capture(&mut self, f: impl FnOnce(&mut Self)) -> String {
        let saved = mem::take(&mut self.out);
        f(self);
        mem::replace(&mut self.out, saved)
    }

    pub(crate) fn finish(mut self) -> String {
        if !self.out.ends_with('\n') {
            self.out.push_str(self.line_break);
        }
        self.out
    }
}
