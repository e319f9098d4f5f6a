//! Types about configuration.

#[cfg(feature = "config_serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "config_serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config_serde", serde(rename_all = "camelCase", default))]
/// The whole configuration of erb_fmt.
pub struct FormatOptions {
    #[cfg_attr(feature = "config_serde", serde(flatten))]
    pub layout: LayoutOptions,
    #[cfg_attr(feature = "config_serde", serde(flatten))]
    pub language: LanguageOptions,
    /// Format the file even if it contains the file-level ignore directive.
    pub force: bool,
    /// Recover from syntax errors and format malformed templates best-effort
    /// instead of refusing them.
    pub ignore_errors: bool,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "config_serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config_serde", serde(rename_all = "camelCase", default))]
/// Configuration related to layout, such as indentation or print width.
pub struct LayoutOptions {
    /// Preferred maximum line width.
    pub print_width: usize,
    /// Use tabs instead of spaces for indentation.
    pub use_tabs: bool,
    /// Number of columns per indentation level.
    pub indent_width: usize,
    /// Line break character sequence of the output.
    pub line_break: LineBreak,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            print_width: 80,
            use_tabs: false,
            indent_width: 2,
            line_break: LineBreak::Lf,
        }
    }
}

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "config_serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config_serde", serde(rename_all = "camelCase"))]
pub enum LineBreak {
    #[default]
    Lf,
    Crlf,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "config_serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config_serde", serde(rename_all = "camelCase", default))]
/// Configuration related to syntax.
pub struct LanguageOptions {
    /// Preferred quotes around attribute values.
    pub quotes: Quotes,

    /// Reflow the content of HTML comments instead of reproducing it.
    pub format_comments: bool,

    /// Put the `>` of a multi-line open tag on the same line as the last
    /// attribute instead of on its own line.
    pub closing_bracket_same_line: bool,

    /// Text of the comment directive that excludes a whole file from
    /// formatting.
    pub ignore_file_comment_directive: String,

    /// Text of the comment directive that suspends formatting until the
    /// matching "on" directive.
    pub format_off_comment_directive: String,

    /// Text of the comment directive that resumes formatting after an "off"
    /// directive.
    pub format_on_comment_directive: String,
}

impl Default for LanguageOptions {
    fn default() -> Self {
        Self {
            quotes: Quotes::default(),
            format_comments: false,
            closing_bracket_same_line: false,
            ignore_file_comment_directive: "erb-fmt-ignore-file".into(),
            format_off_comment_directive: "erb-fmt-off".into(),
            format_on_comment_directive: "erb-fmt-on".into(),
        }
    }
}

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "config_serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config_serde", serde(rename_all = "camelCase"))]
pub enum Quotes {
    #[default]
    Double,
    Single,
}
