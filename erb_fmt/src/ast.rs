pub struct AttrFlow<'s> {
    pub body: Vec<AttrFlowPart<'s>>,
}

pub enum AttrFlowPart<'s> {
    Attrs(Vec<Attribute<'s>>),
    Tag(FlowTag<'s>),
}

pub struct Attribute<'s> {
    pub kind: AttrKind<'s>,
    pub span: Span,
}

pub enum AttrKind<'s> {
    Comment(ErbComment<'s>),
    Execution(ErbExecution<'s>),
    Flow(AttrFlow<'s>),
    Native(NativeAttribute<'s>),
    Output(ErbOutput<'s>),
}

pub struct Comment<'s> {
    pub raw: &'s str,
}

pub struct Doctype<'s> {
    pub raw: &'s str,
}

pub struct Element<'s> {
    pub tag_name: &'s str,
    pub attrs: Vec<Attribute<'s>>,
    pub children: Vec<Node<'s>>,
    pub self_closing: bool,
    pub void_element: bool,
}

pub struct ErbComment<'s> {
    pub open_delim: &'s str,
    pub content: &'s str,
    pub close_delim: &'s str,
}

pub struct ErbExecution<'s> {
    pub open_delim: &'s str,
    pub content: &'s str,
    pub close_delim: &'s str,
}

pub struct ErbFlow<'s> {
    pub body: Vec<ErbFlowPart<'s>>,
}

pub enum ErbFlowPart<'s> {
    Children(Vec<Node<'s>>),
    Tag(FlowTag<'s>),
}

pub struct ErbOutput<'s> {
    pub open_delim: &'s str,
    pub content: &'s str,
    pub close_delim: &'s str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowKind {
    Block,
    Case,
    Else,
    Elsif,
    End,
    For,
    If,
    In,
    Unless,
    When,
    While,
}

impl FlowKind {
    pub fn is_opener(&self) -> bool {
        matches!(
            self,
            FlowKind::Block
                | FlowKind::Case
                | FlowKind::For
                | FlowKind::If
                | FlowKind::Unless
                | FlowKind::While
        )
    }

    pub fn is_continuation(&self) -> bool {
        matches!(
            self,
            FlowKind::Else | FlowKind::Elsif | FlowKind::In | FlowKind::When
        )
    }
}

pub struct FlowTag<'s> {
    pub kind: FlowKind,
    pub open_delim: &'s str,
    pub content: &'s str,
    pub close_delim: &'s str,
    pub span: Span,
}

pub struct NativeAttribute<'s> {
    pub name: &'s str,
    pub value: Option<&'s str>,
    pub quote: QuoteStyle,
}

pub struct Node<'s> {
    pub kind: NodeKind<'s>,
    pub span: Span,
}

pub enum NodeKind<'s> {
    Comment(Comment<'s>),
    Doctype(Doctype<'s>),
    Element(Element<'s>),
    ErbComment(ErbComment<'s>),
    ErbExecution(ErbExecution<'s>),
    ErbFlow(ErbFlow<'s>),
    ErbOutput(ErbOutput<'s>),
    Text(TextNode<'s>),
}

/// 1-based line/column location, computed from a byte offset on demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn of(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source.as_bytes()[..offset];
        let line = memchr::memchr_iter(b'\n', before).count() + 1;
        let line_start = memchr::memrchr(b'\n', before).map(|i| i + 1).unwrap_or(0);
        let column = source[line_start..offset].chars().count() + 1;
        Self { line, column }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteStyle {
    Double,
    Single,
    Unquoted,
}

pub struct Root<'s> {
    pub children: Vec<Node<'s>>,
}

/// Half-open byte range into the original source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn slice<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start..self.end.min(source.len())]
    }

    pub fn is_multiline(&self, source: &str) -> bool {
        memchr::memchr(b'\n', self.slice(source).as_bytes()).is_some()
    }

    pub fn start_position(&self, source: &str) -> Position {
        Position::of(source, self.start)
    }

    pub fn end_position(&self, source: &str) -> Position {
        Position::of(source, self.end)
    }
}

pub struct TextNode<'s> {
    pub raw: &'s str,
    pub line_breaks: usize,
}
