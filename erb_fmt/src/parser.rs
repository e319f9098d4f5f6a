//! This parser is designed for internal use,
//! not generating general-purpose AST.
//!
//! Also, the parser consumes string then produces AST directly without tokenizing.
//! For a formal parser, it should be:
//! `source -> tokens (produced by lexer/tokenizer) -> AST (produced by parser)`.
//! So, if you're learning or looking for a parser,
//! this is not a good example and you should look for other projects.

use crate::{
    ast::*,
    error::{SyntaxError, SyntaxErrorKind},
    helpers,
};
use std::{iter::Peekable, mem, str::CharIndices};

pub struct Parser<'s> {
    source: &'s str,
    chars: Peekable<CharIndices<'s>>,
    /// Recover from malformed input instead of failing. Unclosed elements
    /// close at end of input, stray close tags and stray flow tags degrade
    /// to text and plain statements.
    tolerant: bool,
}

impl<'s> Parser<'s> {
    pub fn new(source: &'s str, tolerant: bool) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            tolerant,
        }
    }

    fn try_parse<F, R>(&mut self, f: F) -> PResult<R>
    where
        F: FnOnce(&mut Self) -> PResult<R>,
    {
        let chars = self.chars.clone();
        let result = f(self);
        if result.is_err() {
            self.chars = chars;
        }
        result
    }

    fn emit_error(&mut self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError {
            kind,
            pos: self.pos(),
        }
    }

    fn pos(&mut self) -> usize {
        self.chars
            .peek()
            .map(|(pos, _)| *pos)
            .unwrap_or(self.source.len())
    }

    fn skip_ws(&mut self) {
        while self
            .chars
            .next_if(|(_, c)| c.is_ascii_whitespace())
            .is_some()
        {}
    }

    fn at_erb_start(&mut self) -> bool {
        let mut chars = self.chars.clone();
        matches!(chars.next(), Some((_, '<'))) && matches!(chars.next(), Some((_, '%')))
    }

    fn skip_past(&mut self, target: char) {
        for (_, c) in self.chars.by_ref() {
            if c == target {
                break;
            }
        }
    }

    pub fn parse_root(&mut self) -> PResult<Root<'s>> {
        let mut children = vec![];
        while self.chars.peek().is_some() {
            children.push(self.parse_node()?);
        }

        Ok(Root { children })
    }

    fn parse_node(&mut self) -> PResult<Node<'s>> {
        match self.chars.peek() {
            Some((_, '<')) => {
                let mut chars = self.chars.clone();
                chars.next();
                match chars.next() {
                    Some((_, '%')) => self.parse_erb_node(),
                    Some((_, '!')) => self
                        .try_parse(Parser::parse_comment)
                        .or_else(|_| self.try_parse(Parser::parse_doctype))
                        .or_else(|_| self.parse_text_node()),
                    Some((_, '/')) => {
                        if self.tolerant {
                            self.parse_stray_close_tag()
                        } else {
                            Err(self.emit_error(SyntaxErrorKind::UnexpectedCloseTag))
                        }
                    }
                    Some((_, c)) if is_tag_name_char(c) => self.parse_element(),
                    _ => self.parse_text_node(),
                }
            }
            Some(..) => self.parse_text_node(),
            None => Err(self.emit_error(SyntaxErrorKind::ExpectElement)),
        }
    }

    fn parse_element(&mut self) -> PResult<Node<'s>> {
        let start = self.pos();
        let Some(..) = self.chars.next_if(|(_, c)| *c == '<') else {
            return Err(self.emit_error(SyntaxErrorKind::ExpectElement));
        };
        let tag_name = self.parse_tag_name()?;
        let void_element = helpers::is_void_element(tag_name);

        let mut attrs = vec![];
        loop {
            self.skip_ws();
            match self.chars.peek() {
                Some((_, '/')) => {
                    self.chars.next();
                    if self.chars.next_if(|(_, c)| *c == '>').is_some() {
                        let end = self.pos();
                        return Ok(Node {
                            kind: NodeKind::Element(Element {
                                tag_name,
                                attrs,
                                children: vec![],
                                self_closing: true,
                                void_element,
                            }),
                            span: Span { start, end },
                        });
                    } else if self.tolerant {
                        continue;
                    } else {
                        return Err(self.emit_error(SyntaxErrorKind::ExpectSelfCloseTag));
                    }
                }
                Some((_, '>')) => {
                    self.chars.next();
                    break;
                }
                Some(..) => {
                    attrs.push(self.parse_attr()?);
                }
                None => {
                    if self.tolerant {
                        break;
                    } else {
                        return Err(self.emit_error(SyntaxErrorKind::ExpectCloseTag));
                    }
                }
            }
        }

        if void_element {
            let end = self.pos();
            return Ok(Node {
                kind: NodeKind::Element(Element {
                    tag_name,
                    attrs,
                    children: vec![],
                    self_closing: false,
                    void_element,
                }),
                span: Span { start, end },
            });
        }

        let mut children = vec![];
        if helpers::is_content_preserving(tag_name) {
            let text_node = self.parse_raw_text_node(tag_name);
            if !matches!(&text_node.kind, NodeKind::Text(t) if t.raw.is_empty()) {
                children.push(text_node);
            }
        }

        loop {
            match self.chars.peek() {
                Some((_, '<')) => {
                    let checkpoint = self.chars.clone();
                    self.chars.next();
                    if let Some((pos, _)) = self.chars.next_if(|(_, c)| *c == '/') {
                        match self.parse_tag_name() {
                            Ok(close_tag_name)
                                if close_tag_name.eq_ignore_ascii_case(tag_name) =>
                            {
                                self.skip_ws();
                                if self.chars.next_if(|(_, c)| *c == '>').is_some()
                                    || self.tolerant
                                {
                                    break;
                                } else {
                                    return Err(
                                        self.emit_error(SyntaxErrorKind::ExpectCloseTag)
                                    );
                                }
                            }
                            Ok(_) if self.tolerant => {
                                // Mismatched close tag closes this element
                                // implicitly and is left for an ancestor.
                                self.chars = checkpoint;
                                break;
                            }
                            Ok(_) => {
                                return Err(SyntaxError {
                                    kind: SyntaxErrorKind::ExpectCloseTag,
                                    pos,
                                });
                            }
                            Err(error) => {
                                if self.tolerant {
                                    self.skip_past('>');
                                } else {
                                    return Err(error);
                                }
                            }
                        }
                    } else {
                        self.chars = checkpoint;
                        children.push(self.parse_node()?);
                    }
                }
                Some(..) => {
                    children.push(if helpers::is_content_preserving(tag_name) {
                        self.parse_raw_text_node(tag_name)
                    } else {
                        self.parse_node()?
                    });
                }
                None => {
                    if self.tolerant {
                        break;
                    } else {
                        return Err(self.emit_error(SyntaxErrorKind::ExpectCloseTag));
                    }
                }
            }
        }

        let end = self.pos();
        Ok(Node {
            kind: NodeKind::Element(Element {
                tag_name,
                attrs,
                children,
                self_closing: false,
                void_element,
            }),
            span: Span { start, end },
        })
    }

    fn parse_attr(&mut self) -> PResult<Attribute<'s>> {
        if self.at_erb_start() {
            self.parse_erb_attr()
        } else {
            let start = self.pos();
            let native = self.parse_native_attr()?;
            let end = self.pos();
            Ok(Attribute {
                kind: AttrKind::Native(native),
                span: Span { start, end },
            })
        }
    }

    fn parse_erb_attr(&mut self) -> PResult<Attribute<'s>> {
        let tag = self.parse_erb_tag()?;
        let span = tag.span;
        match tag.role() {
            ErbRole::Comment => Ok(Attribute {
                kind: AttrKind::Comment(tag.into_comment()),
                span,
            }),
            ErbRole::Output => Ok(Attribute {
                kind: AttrKind::Output(tag.into_output()),
                span,
            }),
            ErbRole::Execution(Some(kind)) if kind.is_opener() => {
                self.parse_attr_flow(tag.into_flow_tag(kind))
            }
            ErbRole::Execution(Some(_)) if !self.tolerant => Err(SyntaxError {
                kind: SyntaxErrorKind::UnexpectedErbFlowTag,
                pos: span.start,
            }),
            ErbRole::Execution(_) => Ok(Attribute {
                kind: AttrKind::Execution(tag.into_execution()),
                span,
            }),
        }
    }

    fn parse_attr_flow(&mut self, open_tag: FlowTag<'s>) -> PResult<Attribute<'s>> {
        let start = open_tag.span.start;
        let mut body = vec![AttrFlowPart::Tag(open_tag)];
        let mut attrs = vec![];
        loop {
            self.skip_ws();
            if self.at_erb_start() {
                let tag = self.parse_erb_tag()?;
                let span = tag.span;
                match tag.role() {
                    ErbRole::Comment => attrs.push(Attribute {
                        kind: AttrKind::Comment(tag.into_comment()),
                        span,
                    }),
                    ErbRole::Output => attrs.push(Attribute {
                        kind: AttrKind::Output(tag.into_output()),
                        span,
                    }),
                    ErbRole::Execution(Some(FlowKind::End)) => {
                        body.push(AttrFlowPart::Attrs(mem::take(&mut attrs)));
                        body.push(AttrFlowPart::Tag(tag.into_flow_tag(FlowKind::End)));
                        let end = self.pos();
                        return Ok(Attribute {
                            kind: AttrKind::Flow(AttrFlow { body }),
                            span: Span { start, end },
                        });
                    }
                    ErbRole::Execution(Some(kind)) if kind.is_continuation() => {
                        body.push(AttrFlowPart::Attrs(mem::take(&mut attrs)));
                        body.push(AttrFlowPart::Tag(tag.into_flow_tag(kind)));
                    }
                    ErbRole::Execution(Some(kind)) => {
                        attrs.push(self.parse_attr_flow(tag.into_flow_tag(kind))?);
                    }
                    ErbRole::Execution(None) => attrs.push(Attribute {
                        kind: AttrKind::Execution(tag.into_execution()),
                        span,
                    }),
                }
            } else {
                match self.chars.peek() {
                    Some((_, '>' | '/')) | None => {
                        if self.tolerant {
                            body.push(AttrFlowPart::Attrs(mem::take(&mut attrs)));
                            let end = self.pos();
                            return Ok(Attribute {
                                kind: AttrKind::Flow(AttrFlow { body }),
                                span: Span { start, end },
                            });
                        }
                        return Err(self.emit_error(SyntaxErrorKind::ExpectErbFlowEnd));
                    }
                    _ => {
                        let attr_start = self.pos();
                        let native = self.parse_native_attr()?;
                        let attr_end = self.pos();
                        attrs.push(Attribute {
                            kind: AttrKind::Native(native),
                            span: Span {
                                start: attr_start,
                                end: attr_end,
                            },
                        });
                    }
                }
            }
        }
    }

    fn parse_native_attr(&mut self) -> PResult<NativeAttribute<'s>> {
        let name = self.parse_attr_name()?;
        self.skip_ws();
        if self.chars.next_if(|(_, c)| *c == '=').is_some() {
            self.skip_ws();
            let (value, quote) = self.parse_attr_value()?;
            Ok(NativeAttribute {
                name,
                value: Some(value),
                quote,
            })
        } else {
            Ok(NativeAttribute {
                name,
                value: None,
                quote: QuoteStyle::Unquoted,
            })
        }
    }

    fn parse_attr_name(&mut self) -> PResult<&'s str> {
        let Some((start, first)) = self.chars.next_if(|(_, c)| is_attr_name_char(*c)) else {
            return Err(self.emit_error(SyntaxErrorKind::ExpectAttrName));
        };
        let mut end = start + first.len_utf8();

        while let Some((i, c)) = self.chars.next_if(|(_, c)| is_attr_name_char(*c)) {
            end = i + c.len_utf8();
        }

        unsafe { Ok(self.source.get_unchecked(start..end)) }
    }

    fn parse_attr_value(&mut self) -> PResult<(&'s str, QuoteStyle)> {
        let quote = self.chars.next_if(|(_, c)| *c == '"' || *c == '\'');

        if let Some((start, quote)) = quote {
            let style = if quote == '"' {
                QuoteStyle::Double
            } else {
                QuoteStyle::Single
            };
            let start = start + 1;
            let mut end = self.source.len();
            loop {
                match self.chars.next() {
                    Some((i, c)) if c == quote => {
                        end = i;
                        break;
                    }
                    Some(..) => continue,
                    None => break,
                }
            }
            Ok((unsafe { self.source.get_unchecked(start..end) }, style))
        } else if self.at_erb_start() {
            let tag = self.parse_erb_tag()?;
            Ok((tag.span.slice(self.source), QuoteStyle::Unquoted))
        } else {
            fn is_unquoted_attr_value_char(c: char) -> bool {
                !c.is_ascii_whitespace() && !matches!(c, '"' | '\'' | '=' | '<' | '>' | '`')
            }

            let Some((start, first)) = self.chars.next_if(|(_, c)| is_unquoted_attr_value_char(*c))
            else {
                return Err(self.emit_error(SyntaxErrorKind::ExpectAttrValue));
            };
            let mut end = start + first.len_utf8();

            while let Some((i, c)) = self.chars.next_if(|(_, c)| is_unquoted_attr_value_char(*c)) {
                end = i + c.len_utf8();
            }

            unsafe { Ok((self.source.get_unchecked(start..end), QuoteStyle::Unquoted)) }
        }
    }

    fn parse_erb_node(&mut self) -> PResult<Node<'s>> {
        let tag = self.parse_erb_tag()?;
        let span = tag.span;
        match tag.role() {
            ErbRole::Comment => Ok(Node {
                kind: NodeKind::ErbComment(tag.into_comment()),
                span,
            }),
            ErbRole::Output => Ok(Node {
                kind: NodeKind::ErbOutput(tag.into_output()),
                span,
            }),
            ErbRole::Execution(Some(kind)) if kind.is_opener() => {
                self.parse_erb_flow(tag.into_flow_tag(kind))
            }
            ErbRole::Execution(Some(_)) if !self.tolerant => Err(SyntaxError {
                kind: SyntaxErrorKind::UnexpectedErbFlowTag,
                pos: span.start,
            }),
            ErbRole::Execution(_) => Ok(Node {
                kind: NodeKind::ErbExecution(tag.into_execution()),
                span,
            }),
        }
    }

    fn parse_erb_flow(&mut self, open_tag: FlowTag<'s>) -> PResult<Node<'s>> {
        let start = open_tag.span.start;
        let mut body = vec![ErbFlowPart::Tag(open_tag)];
        let mut children = vec![];
        loop {
            if self.at_erb_start() {
                let tag = self.parse_erb_tag()?;
                let span = tag.span;
                match tag.role() {
                    ErbRole::Comment => children.push(Node {
                        kind: NodeKind::ErbComment(tag.into_comment()),
                        span,
                    }),
                    ErbRole::Output => children.push(Node {
                        kind: NodeKind::ErbOutput(tag.into_output()),
                        span,
                    }),
                    ErbRole::Execution(Some(FlowKind::End)) => {
                        body.push(ErbFlowPart::Children(mem::take(&mut children)));
                        body.push(ErbFlowPart::Tag(tag.into_flow_tag(FlowKind::End)));
                        let end = self.pos();
                        return Ok(Node {
                            kind: NodeKind::ErbFlow(ErbFlow { body }),
                            span: Span { start, end },
                        });
                    }
                    ErbRole::Execution(Some(kind)) if kind.is_continuation() => {
                        body.push(ErbFlowPart::Children(mem::take(&mut children)));
                        body.push(ErbFlowPart::Tag(tag.into_flow_tag(kind)));
                    }
                    ErbRole::Execution(Some(kind)) => {
                        children.push(self.parse_erb_flow(tag.into_flow_tag(kind))?);
                    }
                    ErbRole::Execution(None) => children.push(Node {
                        kind: NodeKind::ErbExecution(tag.into_execution()),
                        span,
                    }),
                }
            } else {
                match self.chars.peek() {
                    Some((_, '<')) => {
                        let mut chars = self.chars.clone();
                        chars.next();
                        if matches!(chars.next(), Some((_, '/'))) {
                            // The enclosing element closes before this flow
                            // construct ended.
                            if self.tolerant {
                                body.push(ErbFlowPart::Children(mem::take(&mut children)));
                                let end = self.pos();
                                return Ok(Node {
                                    kind: NodeKind::ErbFlow(ErbFlow { body }),
                                    span: Span { start, end },
                                });
                            }
                            return Err(self.emit_error(SyntaxErrorKind::ExpectErbFlowEnd));
                        }
                        children.push(self.parse_node()?);
                    }
                    Some(..) => children.push(self.parse_node()?),
                    None => {
                        if self.tolerant {
                            body.push(ErbFlowPart::Children(mem::take(&mut children)));
                            let end = self.pos();
                            return Ok(Node {
                                kind: NodeKind::ErbFlow(ErbFlow { body }),
                                span: Span { start, end },
                            });
                        }
                        return Err(self.emit_error(SyntaxErrorKind::ExpectErbFlowEnd));
                    }
                }
            }
        }
    }

    fn parse_erb_tag(&mut self) -> PResult<RawErbTag<'s>> {
        let Some((start, _)) = self.chars.next_if(|(_, c)| *c == '<') else {
            return Err(self.emit_error(SyntaxErrorKind::ExpectErbTag));
        };
        if self.chars.next_if(|(_, c)| *c == '%').is_none() {
            return Err(self.emit_error(SyntaxErrorKind::ExpectErbTag));
        }

        let mut open_end = start + 2;
        if let Some((i, c)) = self.chars.next_if(|(_, c)| matches!(c, '=' | '#' | '-')) {
            open_end = i + c.len_utf8();
            if c == '=' {
                if let Some((i, _)) = self.chars.next_if(|(_, c)| *c == '=') {
                    open_end = i + 1;
                }
            }
        }
        let open_delim = &self.source[start..open_end];

        loop {
            match self.chars.next() {
                Some((i, '%')) => {
                    if self.chars.next_if(|(_, c)| *c == '>').is_some() {
                        let end = i + 2;
                        let close_start =
                            if i > open_end && self.source.as_bytes()[i - 1] == b'-' {
                                i - 1
                            } else {
                                i
                            };
                        return Ok(RawErbTag {
                            open_delim,
                            content: &self.source[open_end..close_start],
                            close_delim: &self.source[close_start..end],
                            span: Span { start, end },
                        });
                    }
                }
                Some(..) => continue,
                None => {
                    if self.tolerant {
                        let end = self.source.len();
                        return Ok(RawErbTag {
                            open_delim,
                            content: &self.source[open_end..end],
                            close_delim: "",
                            span: Span { start, end },
                        });
                    }
                    return Err(self.emit_error(SyntaxErrorKind::ExpectErbClose));
                }
            }
        }
    }

    fn parse_comment(&mut self) -> PResult<Node<'s>> {
        let start = self.pos();
        if self
            .chars
            .next_if(|(_, c)| *c == '<')
            .and_then(|_| self.chars.next_if(|(_, c)| *c == '!'))
            .and_then(|_| self.chars.next_if(|(_, c)| *c == '-'))
            .and_then(|_| self.chars.next_if(|(_, c)| *c == '-'))
            .is_none()
        {
            return Err(self.emit_error(SyntaxErrorKind::ExpectComment));
        }
        let raw_start = start + 4;

        let mut raw_end = self.source.len();
        let mut end = self.source.len();
        loop {
            match self.chars.next() {
                Some((i, '-')) => {
                    let mut chars = self.chars.clone();
                    if chars
                        .next_if(|(_, c)| *c == '-')
                        .and_then(|_| chars.next_if(|(_, c)| *c == '>'))
                        .is_some()
                    {
                        raw_end = i;
                        end = i + 3;
                        self.chars = chars;
                        break;
                    }
                }
                Some(..) => continue,
                None => break,
            }
        }

        Ok(Node {
            kind: NodeKind::Comment(Comment {
                raw: &self.source[raw_start..raw_end],
            }),
            span: Span { start, end },
        })
    }

    fn parse_doctype(&mut self) -> PResult<Node<'s>> {
        let start = self.pos();
        if self
            .chars
            .next_if(|(_, c)| *c == '<')
            .and_then(|_| self.chars.next_if(|(_, c)| *c == '!'))
            .and_then(|_| self.chars.next_if(|(_, c)| c.eq_ignore_ascii_case(&'d')))
            .and_then(|_| self.chars.next_if(|(_, c)| c.eq_ignore_ascii_case(&'o')))
            .and_then(|_| self.chars.next_if(|(_, c)| c.eq_ignore_ascii_case(&'c')))
            .and_then(|_| self.chars.next_if(|(_, c)| c.eq_ignore_ascii_case(&'t')))
            .and_then(|_| self.chars.next_if(|(_, c)| c.eq_ignore_ascii_case(&'y')))
            .and_then(|_| self.chars.next_if(|(_, c)| c.eq_ignore_ascii_case(&'p')))
            .and_then(|_| self.chars.next_if(|(_, c)| c.eq_ignore_ascii_case(&'e')))
            .is_none()
        {
            return Err(self.emit_error(SyntaxErrorKind::ExpectDoctype));
        }

        let raw_start = start + 2;
        let mut raw_end = self.source.len();
        let mut end = self.source.len();
        loop {
            match self.chars.next() {
                Some((i, '>')) => {
                    raw_end = i;
                    end = i + 1;
                    break;
                }
                Some(..) => continue,
                None => {
                    if !self.tolerant {
                        return Err(self.emit_error(SyntaxErrorKind::ExpectDoctype));
                    }
                    break;
                }
            }
        }

        Ok(Node {
            kind: NodeKind::Doctype(Doctype {
                raw: &self.source[raw_start..raw_end],
            }),
            span: Span { start, end },
        })
    }

    fn parse_raw_text_node(&mut self, tag_name: &str) -> Node<'s> {
        let start = self.pos();

        let mut line_breaks = 0;
        let end;
        loop {
            match self.chars.peek() {
                Some((i, '<')) => {
                    let i = *i;
                    let mut chars = self.chars.clone();
                    chars.next();
                    if chars
                        .next_if(|(_, c)| *c == '/')
                        .map(|_| {
                            chars
                                .zip(tag_name.chars())
                                .all(|((_, a), b)| a.eq_ignore_ascii_case(&b))
                        })
                        .unwrap_or_default()
                    {
                        end = i;
                        break;
                    } else {
                        self.chars.next();
                    }
                }
                Some((_, c)) => {
                    if *c == '\n' {
                        line_breaks += 1;
                    }
                    self.chars.next();
                }
                None => {
                    end = self.source.len();
                    break;
                }
            }
        }

        Node {
            kind: NodeKind::Text(TextNode {
                raw: unsafe { self.source.get_unchecked(start..end) },
                line_breaks,
            }),
            span: Span { start, end },
        }
    }

    fn parse_text_node(&mut self) -> PResult<Node<'s>> {
        let Some((start, first_char)) = self.chars.next() else {
            return Err(self.emit_error(SyntaxErrorKind::ExpectTextNode));
        };

        let mut line_breaks = if first_char == '\n' { 1 } else { 0 };
        let end;
        loop {
            match self.chars.peek() {
                Some((i, '<')) => {
                    let i = *i;
                    let mut chars = self.chars.clone();
                    chars.next();
                    match chars.next() {
                        Some((_, c)) if is_tag_name_char(c) || matches!(c, '/' | '!' | '%') => {
                            end = i;
                            break;
                        }
                        _ => {
                            self.chars.next();
                        }
                    }
                }
                Some((_, c)) => {
                    if *c == '\n' {
                        line_breaks += 1;
                    }
                    self.chars.next();
                }
                None => {
                    end = self.source.len();
                    break;
                }
            }
        }

        Ok(Node {
            kind: NodeKind::Text(TextNode {
                raw: unsafe { self.source.get_unchecked(start..end) },
                line_breaks,
            }),
            span: Span { start, end },
        })
    }

    /// A close tag with no matching open tag degrades to text in tolerant
    /// mode.
    fn parse_stray_close_tag(&mut self) -> PResult<Node<'s>> {
        let start = self.pos();
        let mut line_breaks = 0;
        let end;
        loop {
            match self.chars.next() {
                Some((i, '>')) => {
                    end = i + 1;
                    break;
                }
                Some((_, c)) => {
                    if c == '\n' {
                        line_breaks += 1;
                    }
                }
                None => {
                    end = self.source.len();
                    break;
                }
            }
        }

        Ok(Node {
            kind: NodeKind::Text(TextNode {
                raw: &self.source[start..end],
                line_breaks,
            }),
            span: Span { start, end },
        })
    }

    fn parse_tag_name(&mut self) -> PResult<&'s str> {
        let Some((start, first)) = self.chars.next_if(|(_, c)| is_tag_name_char(*c)) else {
            return Err(self.emit_error(SyntaxErrorKind::ExpectTagName));
        };
        let mut end = start + first.len_utf8();

        while let Some((i, c)) = self.chars.next_if(|(_, c)| is_tag_name_char(*c)) {
            end = i + c.len_utf8();
        }

        unsafe { Ok(self.source.get_unchecked(start..end)) }
    }
}

struct RawErbTag<'s> {
    open_delim: &'s str,
    content: &'s str,
    close_delim: &'s str,
    span: Span,
}

enum ErbRole {
    Comment,
    Execution(Option<FlowKind>),
    Output,
}

impl<'s> RawErbTag<'s> {
    fn role(&self) -> ErbRole {
        if self.open_delim.starts_with("<%#") {
            ErbRole::Comment
        } else if self.open_delim.contains('=') {
            ErbRole::Output
        } else {
            ErbRole::Execution(helpers::flow_kind(self.content))
        }
    }

    fn into_comment(self) -> ErbComment<'s> {
        ErbComment {
            open_delim: self.open_delim,
            content: self.content,
            close_delim: self.close_delim,
        }
    }

    fn into_execution(self) -> ErbExecution<'s> {
        ErbExecution {
            open_delim: self.open_delim,
            content: self.content,
            close_delim: self.close_delim,
        }
    }

    fn into_output(self) -> ErbOutput<'s> {
        ErbOutput {
            open_delim: self.open_delim,
            content: self.content,
            close_delim: self.close_delim,
        }
    }

    fn into_flow_tag(self, kind: FlowKind) -> FlowTag<'s> {
        FlowTag {
            kind,
            open_delim: self.open_delim,
            content: self.content,
            close_delim: self.close_delim,
            span: self.span,
        }
    }
}

fn is_tag_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' || c == ':' || !c.is_ascii()
}

fn is_attr_name_char(c: char) -> bool {
    !matches!(c, '"' | '\'' | '>' | '/' | '=') && !c.is_ascii_whitespace()
}

pub type PResult<T> = Result<T, SyntaxError>;
