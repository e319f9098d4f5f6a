use std::{error::Error, fmt};

#[derive(Clone, Debug)]
/// Syntax error when parsing tags or embedded ERB.
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub pos: usize,
}

#[derive(Clone, Debug)]
pub enum SyntaxErrorKind {
    ExpectAttrName,
    ExpectAttrValue,
    ExpectCloseTag,
    ExpectComment,
    ExpectDoctype,
    ExpectElement,
    ExpectErbClose,
    ExpectErbFlowEnd,
    ExpectErbTag,
    ExpectSelfCloseTag,
    ExpectTagName,
    ExpectTextNode,
    UnexpectedCloseTag,
    UnexpectedErbFlowTag,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.kind {
            SyntaxErrorKind::ExpectAttrName => "expect attribute name",
            SyntaxErrorKind::ExpectAttrValue => "expect attribute value",
            SyntaxErrorKind::ExpectCloseTag => "expect close tag",
            SyntaxErrorKind::ExpectComment => "expect comment",
            SyntaxErrorKind::ExpectDoctype => "expect HTML doctype",
            SyntaxErrorKind::ExpectElement => "expect element",
            SyntaxErrorKind::ExpectErbClose => "expect ERB tag close delimiter",
            SyntaxErrorKind::ExpectErbFlowEnd => "expect ERB `end` tag",
            SyntaxErrorKind::ExpectErbTag => "expect ERB tag",
            SyntaxErrorKind::ExpectSelfCloseTag => "expect self close tag",
            SyntaxErrorKind::ExpectTagName => "expect tag name",
            SyntaxErrorKind::ExpectTextNode => "expect text node",
            SyntaxErrorKind::UnexpectedCloseTag => "unexpected close tag",
            SyntaxErrorKind::UnexpectedErbFlowTag => "unexpected ERB control flow tag",
        };

        write!(f, "syntax error '{reason}' at position {}", self.pos)
    }
}

impl Error for SyntaxError {}

#[derive(Debug)]
/// The error type for erb_fmt.
pub enum FormatError {
    /// Syntax error when parsing the template.
    Syntax(SyntaxError),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Syntax(e) => e.fmt(f),
        }
    }
}

impl Error for FormatError {}

impl From<SyntaxError> for FormatError {
    fn from(error: SyntaxError) -> Self {
        FormatError::Syntax(error)
    }
}
