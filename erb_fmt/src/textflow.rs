use crate::ctx::Ctx;

/// Whitespace separating two flow units, derived from the original
/// inter-node whitespace. A single line break collapses to normal adjacency;
/// two or more become exactly one blank output line.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Sep {
    Glue,
    Space,
    BlankLine,
}

struct FlowUnit {
    text: String,
    sep: Sep,
    /// Attached units are never chosen as a wrap point; they stick to the
    /// line of the unit they follow even when that overflows the width.
    attached: bool,
}

/// Greedy line-fill for a sequence of words and atomic units.
///
/// Words come from literal text runs and may wrap at the whitespace
/// boundaries between them. Atomic units (rendered inline subtrees, output
/// expressions, directive comments) are never split.
pub(crate) struct TextFlowBuilder {
    units: Vec<FlowUnit>,
    next_sep: Sep,
}

impl TextFlowBuilder {
    pub(crate) fn new() -> Self {
        Self {
            units: vec![],
            next_sep: Sep::Glue,
        }
    }

    /// Add a literal text run. Internal whitespace runs become separators;
    /// leading and trailing whitespace carries over to the adjacent units.
    pub(crate) fn add_text(&mut self, raw: &str) {
        let mut rest = raw;
        loop {
            let trimmed = rest.trim_start_matches(|c: char| c.is_ascii_whitespace());
            let ws = &rest[..rest.len() - trimmed.len()];
            if !ws.is_empty() {
                let sep = if ws.bytes().filter(|b| *b == b'\n').count() > 1 {
                    Sep::BlankLine
                } else {
                    Sep::Space
                };
                self.next_sep = self.next_sep.max(sep);
            }
            if trimmed.is_empty() {
                return;
            }
            let word_end = trimmed
                .find(|c: char| c.is_ascii_whitespace())
                .unwrap_or(trimmed.len());
            self.push_unit(trimmed[..word_end].to_owned(), false);
            rest = &trimmed[word_end..];
        }
    }

    pub(crate) fn add_atomic(&mut self, text: String, attached: bool) {
        self.push_unit(text, attached);
    }

    fn push_unit(&mut self, text: String, attached: bool) {
        let sep = std::mem::replace(&mut self.next_sep, Sep::Glue);
        if sep == Sep::Glue {
            if let Some(last) = self.units.last_mut() {
                last.text.push_str(&text);
                return;
            }
        }
        self.units.push(FlowUnit {
            text,
            sep,
            attached,
        });
    }

    /// Fill width-bounded lines at the current indentation.
    pub(crate) fn print(self, ctx: &mut Ctx) {
        for (i, unit) in self.units.iter().enumerate() {
            if i > 0 {
                match unit.sep {
                    Sep::BlankLine => ctx.blank_line(),
                    Sep::Space => {
                        let width = unit.text.chars().count();
                        if !unit.attached && ctx.col() + 1 + width > ctx.print_width {
                            ctx.break_line();
                        } else {
                            ctx.write(" ");
                        }
                    }
                    Sep::Glue => {}
                }
            }
            ctx.write(&unit.text);
        }
    }

    /// Concatenate on the current line without wrapping.
    pub(crate) fn print_inline(self, ctx: &mut Ctx) {
        for (i, unit) in self.units.iter().enumerate() {
            if i > 0 && unit.sep != Sep::Glue {
                ctx.write(" ");
            }
            ctx.write(&unit.text);
        }
    }
}
