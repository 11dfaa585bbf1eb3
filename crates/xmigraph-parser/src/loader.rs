//! Markup reader that builds the [`Element`] tree.
//!
//! The loader drives a `quick_xml` event reader and keeps a stack of open
//! elements. Structural problems (syntax errors, bad nesting, several
//! roots) abort immediately; malformed attributes are collected so that
//! every offending element is reported in one pass. Stray text outside the
//! root element is ignored with a warning.

use std::borrow::Cow;

use log::{debug, trace, warn};
use quick_xml::{
    Reader,
    errors::{Error as XmlError, IllFormedError},
    events::{BytesStart, Event},
};

use crate::{
    element::Element,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

/// Parse `source` into its root [`Element`] and any warnings raised.
pub(crate) fn load(source: &str) -> Result<(Element, Vec<Diagnostic>), ParseError> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().check_end_names = true;

    let mut collector = DiagnosticCollector::new();
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let start = offset(&reader, source);
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => {
                let span = Span::new(start..offset(&reader, source).max(start));
                return Err(collector.abort(reader_diagnostic(err, span, open.last())));
            }
        };
        let span = Span::new(start..offset(&reader, source));

        match event {
            Event::Start(tag) => {
                if open.is_empty() {
                    ensure_single_root(root.as_ref(), span, &mut collector)?;
                }
                let element = open_element(&tag, span, &mut collector);
                trace!(tag = element.tag(), depth = open.len(); "Opened element");
                open.push(element);
            }
            Event::Empty(tag) => {
                if open.is_empty() {
                    ensure_single_root(root.as_ref(), span, &mut collector)?;
                }
                let element = open_element(&tag, span, &mut collector);
                attach(element, &mut open, &mut root);
            }
            Event::End(_) => {
                let Some(mut element) = open.pop() else {
                    return Err(collector.abort(
                        Diagnostic::error("end tag without a matching start tag")
                            .with_code(ErrorCode::E007)
                            .with_label(span, "no element is open here"),
                    ));
                };
                element.extend_span(span);
                trace!(tag = element.tag(), depth = open.len(); "Closed element");
                attach(element, &mut open, &mut root);
            }
            Event::Text(text) if open.is_empty() && !is_blank(&text) => {
                collector.emit(
                    Diagnostic::warning("text outside the root element is ignored")
                        .with_label(span, "stray text")
                        .with_help("move the text into an attribute of an element"),
                );
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        let eof = Span::new(source.len()..source.len());
        return Err(collector.abort(
            Diagnostic::error(format!("element `{}` is never closed", unclosed.tag()))
                .with_code(ErrorCode::E003)
                .with_label(eof, "document ends here")
                .with_secondary_label(unclosed.span(), "element opened here")
                .with_help(format!(
                    "add `</{}>` before the end of the document",
                    unclosed.tag()
                )),
        ));
    }

    let warnings = collector.finish()?;
    for warning in &warnings {
        warn!(diagnostic:% = warning; "Ignored content while loading");
    }

    let root = root.ok_or_else(|| {
        ParseError::from(
            Diagnostic::error("document has no root element")
                .with_code(ErrorCode::E005)
                .with_label(Span::new(0..source.len()), "no element found")
                .with_help("wrap the model in a single top-level element"),
        )
    })?;

    debug!(
        tag = root.tag(),
        elements = root.descendants().count(),
        warnings = warnings.len();
        "Document loaded"
    );
    Ok((root, warnings))
}

/// Current reader position clamped to the source length.
fn offset(reader: &Reader<&[u8]>, source: &str) -> usize {
    usize::try_from(reader.buffer_position())
        .unwrap_or(usize::MAX)
        .min(source.len())
}

fn ensure_single_root(
    root: Option<&Element>,
    span: Span,
    collector: &mut DiagnosticCollector,
) -> Result<(), ParseError> {
    let Some(root) = root else {
        return Ok(());
    };
    let diagnostic = Diagnostic::error("document has more than one root element")
        .with_code(ErrorCode::E004)
        .with_label(span, "second root element")
        .with_secondary_label(root.span(), "first root element")
        .with_help("wrap the elements in a single top-level element");
    Err(std::mem::take(collector).abort(diagnostic))
}

fn is_blank(text: &[u8]) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}

/// Build an element from a start tag, collecting attribute problems.
fn open_element(tag: &BytesStart<'_>, span: Span, collector: &mut DiagnosticCollector) -> Element {
    let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
    let mut element = Element::new(name).with_span(span);

    for attribute in tag.attributes() {
        let attribute = match attribute {
            Ok(attribute) => attribute,
            Err(err) => {
                collector.emit(attribute_diagnostic(element.tag(), err.to_string(), span));
                continue;
            }
        };
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        match attribute.unescape_value() {
            Ok(value) => element = element.with_attribute(key, value.into_owned()),
            Err(err) => {
                collector.emit(attribute_diagnostic(
                    element.tag(),
                    format!("attribute `{key}`: {err}"),
                    span,
                ));
            }
        }
    }

    element
}

fn attribute_diagnostic(tag: &str, reason: impl Into<Cow<'static, str>>, span: Span) -> Diagnostic {
    Diagnostic::error(format!(
        "malformed attribute on `{tag}`: {}",
        reason.into()
    ))
    .with_code(ErrorCode::E006)
    .with_label(span, "in this start tag")
}

/// Attach a finished element to its parent, or make it the root.
fn attach(element: Element, open: &mut [Element], root: &mut Option<Element>) {
    match open.last_mut() {
        Some(parent) => parent.push_child(element),
        None => *root = Some(element),
    }
}

/// Translate a reader error into a diagnostic.
fn reader_diagnostic(err: XmlError, span: Span, innermost: Option<&Element>) -> Diagnostic {
    match err {
        XmlError::IllFormed(IllFormedError::MismatchedEndTag { expected, found }) => {
            let mut diagnostic =
                Diagnostic::error(format!("expected `</{expected}>`, found `</{found}>`"))
                    .with_code(ErrorCode::E002)
                    .with_label(span, "mismatched end tag");
            if let Some(element) = innermost {
                diagnostic = diagnostic.with_secondary_label(element.span(), "element opened here");
            }
            diagnostic.with_help("close elements in the reverse order they were opened")
        }
        XmlError::IllFormed(IllFormedError::UnmatchedEndTag(name)) => {
            Diagnostic::error(format!("end tag `</{name}>` without a matching start tag"))
                .with_code(ErrorCode::E007)
                .with_label(span, "no element is open here")
        }
        other => Diagnostic::error(format!("malformed markup: {other}"))
            .with_code(ErrorCode::E001)
            .with_label(span, "here"),
    }
}
