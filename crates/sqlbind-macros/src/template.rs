//! Template string parsing for `sql!`.

use proc_macro2::Span;
use std::iter::Peekable;
use syn::{Error, Expr, Result};

type Chars<'a> = Peekable<std::str::Chars<'a>>;

/// Which argument a slot refers to.
pub(crate) enum SlotArg {
    /// `{}`: the next positional argument.
    Next,
    /// `{N}`: positional argument `N`.
    Index(usize),
    /// `{expr}`: an inline expression.
    Inline(Box<Expr>),
}

pub(crate) enum Segment {
    Literal(String),
    Slot { arg: SlotArg, literal: bool },
}

/// Split a template into literal text and `{...}` slots.
///
/// Consecutive literal text (including `{{`/`}}` escapes) is merged into one
/// segment. Slot bodies may nest balanced braces.
pub(crate) fn parse_template(template: &str, span: Span) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                text.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                text.push('}');
            }
            '}' => {
                return Err(Error::new(
                    span,
                    "unmatched `}` in sql template (use `}}` for a literal brace)",
                ));
            }
            '{' => {
                let mut body = String::new();
                let mut depth = 0usize;
                loop {
                    match chars.next() {
                        None => {
                            return Err(Error::new(
                                span,
                                "unterminated `{` in sql template (use `{{` for a literal brace)",
                            ));
                        }
                        Some('{') => {
                            depth += 1;
                            body.push('{');
                        }
                        Some('}') if depth == 0 => break,
                        Some('}') => {
                            depth -= 1;
                            body.push('}');
                        }
                        Some('"') => {
                            body.push('"');
                            copy_quoted(&mut chars, &mut body, '"', span)?;
                        }
                        Some('\'') => {
                            body.push('\'');
                            if is_char_literal(&chars) {
                                copy_quoted(&mut chars, &mut body, '\'', span)?;
                            }
                        }
                        Some(ch) => body.push(ch),
                    }
                }
                if !text.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut text)));
                }
                segments.push(parse_slot(&body, span)?);
            }
            _ => text.push(c),
        }
    }

    if !text.is_empty() {
        segments.push(Segment::Literal(text));
    }
    Ok(segments)
}

/// Copy a string or char literal body up to and including the closing `quote`,
/// so braces inside it are not counted.
fn copy_quoted(chars: &mut Chars<'_>, body: &mut String, quote: char, span: Span) -> Result<()> {
    while let Some(ch) = chars.next() {
        body.push(ch);
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                body.push(escaped);
            }
        } else if ch == quote {
            return Ok(());
        }
    }
    Err(Error::new(span, "unterminated literal in sql template slot"))
}

/// After a `'`: `'x'` and `'\n'` are char literals, anything else is a
/// lifetime or label.
fn is_char_literal(chars: &Chars<'_>) -> bool {
    let mut ahead = chars.clone();
    match ahead.next() {
        Some('\\') => true,
        Some(_) => ahead.next() == Some('\''),
        None => false,
    }
}

fn parse_slot(body: &str, span: Span) -> Result<Segment> {
    let (arg, format) = split_format(body);
    let literal = match format {
        None | Some("") => false,
        Some("l") => true,
        Some(other) => {
            return Err(Error::new(
                span,
                format!("unsupported format `{other}` in sql template (expected `l` or nothing)"),
            ));
        }
    };

    let arg = arg.trim();
    let arg = if arg.is_empty() {
        SlotArg::Next
    } else if arg.bytes().all(|b| b.is_ascii_digit()) {
        let idx = arg
            .parse()
            .map_err(|_| Error::new(span, format!("invalid argument index `{arg}`")))?;
        SlotArg::Index(idx)
    } else {
        let expr = syn::parse_str::<Expr>(arg).map_err(|e| {
            Error::new(span, format!("invalid expression `{arg}` in sql template: {e}"))
        })?;
        SlotArg::Inline(Box::new(expr))
    };
    Ok(Segment::Slot { arg, literal })
}

/// Split `expr:fmt` into `("expr", Some("fmt"))`.
///
/// Only a single `:` followed by an alphanumeric tag counts, so paths such as
/// `a::b` stay intact.
fn split_format(body: &str) -> (&str, Option<&str>) {
    let Some(pos) = body.rfind(':') else {
        return (body, None);
    };
    let (head, tail) = (&body[..pos], &body[pos + 1..]);
    let tag = tail.trim();
    if head.ends_with(':') || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
        return (body, None);
    }
    (head, Some(tag))
}
