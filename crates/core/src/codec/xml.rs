//! XML codec with the platform's CDATA and repeated-element conventions
//!
//! Encoding is plain string building: the wire format is flat enough that a
//! writer abstraction buys nothing. Decoding streams `quick-xml` events and
//! rebuilds nested [`Document`]s, promoting repeated sibling tags to arrays.

use std::collections::HashSet;

use paybridge_domain::constants::{XML_HEADER, XML_ROOT};
use paybridge_domain::{float_text, Document, DocumentValue, PayBridgeError, Result};
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, warn};

/// Encoder and decoder knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlOptions {
    /// Emit an empty sibling after a single-entry array so the receiver sees
    /// a repeated tag.
    pub pad_single_element_arrays: bool,
    /// Dotted element paths (root excluded) decoded as arrays from their
    /// first occurrence.
    pub always_array: HashSet<String>,
    /// Cast leaf text to integer, float or boolean on decode. When off, every
    /// leaf stays the exact string received.
    pub cast_scalars: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            pad_single_element_arrays: cfg!(feature = "legacy-array-padding"),
            always_array: HashSet::new(),
            cast_scalars: true,
        }
    }
}

impl XmlOptions {
    #[must_use]
    pub fn with_padding(mut self, enabled: bool) -> Self {
        self.pad_single_element_arrays = enabled;
        self
    }

    #[must_use]
    pub fn with_casting(mut self, enabled: bool) -> Self {
        self.cast_scalars = enabled;
        self
    }

    #[must_use]
    pub fn with_array_path(mut self, path: impl Into<String>) -> Self {
        self.always_array.insert(path.into());
        self
    }
}

/// A field that could not be encoded and was left out of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedField {
    /// Dotted path of the field
    pub path: String,
    pub reason: String,
}

/// Encoder output: the bytes plus any field-local failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlEncoding {
    pub bytes: Vec<u8>,
    pub skipped: Vec<SkippedField>,
}

impl XmlEncoding {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct XmlCodec {
    options: XmlOptions,
}

impl XmlCodec {
    #[must_use]
    pub const fn new(options: XmlOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &XmlOptions {
        &self.options
    }

    /// Serialize `doc` under the fixed header and `<xml>` root.
    ///
    /// Never fails as a whole. Fields that cannot be represented are skipped,
    /// reported in [`XmlEncoding::skipped`] and logged.
    #[must_use]
    pub fn encode(&self, doc: &Document) -> XmlEncoding {
        let mut out = String::with_capacity(64 + doc.len() * 32);
        let mut skipped = Vec::new();

        out.push_str(XML_HEADER);
        out.push('<');
        out.push_str(XML_ROOT);
        out.push('>');
        self.encode_document(&mut out, doc, "", &mut skipped);
        out.push_str("</");
        out.push_str(XML_ROOT);
        out.push('>');

        for field in &skipped {
            warn!(field = %field.path, reason = %field.reason, "Skipped field while encoding XML");
        }

        XmlEncoding { bytes: out.into_bytes(), skipped }
    }

    fn encode_document(&self, out: &mut String, doc: &Document, prefix: &str, skipped: &mut Vec<SkippedField>) {
        for (key, value) in doc.iter() {
            let path = join_path(prefix, key);
            if !is_valid_name(key) {
                skipped.push(SkippedField { path, reason: "invalid element name".to_string() });
                continue;
            }
            self.encode_field(out, key, value, &path, skipped);
        }
    }

    fn encode_field(
        &self,
        out: &mut String,
        tag: &str,
        value: &DocumentValue,
        path: &str,
        skipped: &mut Vec<SkippedField>,
    ) {
        match value {
            DocumentValue::String(s) => {
                if s.parse::<i64>().is_ok() {
                    write_element(out, tag, &escape(s.as_str()));
                } else {
                    write_element(out, tag, &cdata(s));
                }
            }
            DocumentValue::Integer(i) => write_element(out, tag, &i.to_string()),
            DocumentValue::Float(f) => match float_text(*f) {
                Some(text) => write_element(out, tag, &text),
                None => skipped.push(SkippedField {
                    path: path.to_string(),
                    reason: format!("non-finite float {f}"),
                }),
            },
            DocumentValue::Bool(b) => write_element(out, tag, if *b { "true" } else { "false" }),
            DocumentValue::Document(inner) => {
                open_tag(out, tag);
                self.encode_document(out, inner, path, skipped);
                close_tag(out, tag);
            }
            DocumentValue::Array(items) => {
                for item in items {
                    self.encode_field(out, tag, item, path, skipped);
                }
                if items.len() == 1 && self.options.pad_single_element_arrays {
                    write_element(out, tag, &cdata(""));
                }
            }
            DocumentValue::Null => skipped.push(SkippedField {
                path: path.to_string(),
                reason: "null has no XML representation".to_string(),
            }),
        }
    }

    /// Parse XML bytes into a [`Document`], skipping the outermost element.
    ///
    /// # Errors
    /// Returns [`PayBridgeError::Encoding`] for malformed XML, unbalanced
    /// tags, non-UTF-8 content or an input without a root element.
    pub fn decode(&self, bytes: &[u8]) -> Result<Document> {
        let mut reader = Reader::from_reader(bytes);
        let mut stack: Vec<Frame> = Vec::new();
        let mut root: Option<Document> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                PayBridgeError::Encoding(format!(
                    "malformed XML at byte {}: {e}",
                    reader.buffer_position()
                ))
            })?;

            match event {
                Event::Start(start) => {
                    ensure_single_root(root.as_ref())?;
                    stack.push(open_frame(&stack, &start)?);
                }
                Event::Empty(start) => {
                    ensure_single_root(root.as_ref())?;
                    let frame = open_frame(&stack, &start)?;
                    if let Some(done) = self.close_frame(&mut stack, frame) {
                        root = Some(done);
                    }
                }
                Event::End(_) => {
                    let frame = stack
                        .pop()
                        .ok_or_else(|| PayBridgeError::Encoding("unexpected closing tag".to_string()))?;
                    if let Some(done) = self.close_frame(&mut stack, frame) {
                        root = Some(done);
                    }
                }
                Event::Text(text) => {
                    if let Some(frame) = stack.last_mut() {
                        let unescaped = text
                            .unescape()
                            .map_err(|e| PayBridgeError::Encoding(format!("invalid XML text: {e}")))?;
                        frame.text.push_str(&unescaped);
                    }
                }
                Event::CData(data) => {
                    if let Some(frame) = stack.last_mut() {
                        let raw = data.into_inner();
                        let text = std::str::from_utf8(&raw)
                            .map_err(|e| PayBridgeError::Encoding(format!("invalid UTF-8 in CDATA: {e}")))?;
                        frame.text.push_str(text);
                    }
                }
                Event::Eof => break,
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            }
        }

        if !stack.is_empty() {
            return Err(PayBridgeError::Encoding(format!(
                "unexpected end of input inside <{}>",
                stack.last().map(|f| f.name.as_str()).unwrap_or_default()
            )));
        }

        root.ok_or_else(|| PayBridgeError::Encoding("document has no root element".to_string()))
    }

    /// Fold a finished element into its parent. Returns the root document
    /// once the outermost element closes.
    fn close_frame(&self, stack: &mut [Frame], frame: Frame) -> Option<Document> {
        let Some(parent) = stack.last_mut() else {
            return Some(frame.doc);
        };

        let Frame { name, path, doc, text, has_children, .. } = frame;
        let value = if has_children { DocumentValue::Document(doc) } else { self.leaf_value(text) };
        let is_padding = matches!(&value, DocumentValue::String(s) if s.is_empty());

        parent.has_children = true;

        if parent.array_tags.contains(&name) {
            if !is_padding {
                push_array(&mut parent.doc, &name, value);
            }
        } else if parent.last_closed.as_deref() == Some(name.as_str()) && parent.doc.contains_key(&name) {
            debug!(path = %path, "Promoting repeated element to array");
            let previous = parent.doc.remove(&name).unwrap_or_default();
            let mut items = match previous {
                DocumentValue::String(s) if s.is_empty() => Vec::new(),
                other => vec![other],
            };
            if !is_padding {
                items.push(value);
            }
            parent.doc.insert(name.clone(), DocumentValue::Array(items));
            parent.array_tags.insert(name.clone());
        } else if self.options.always_array.contains(&path) {
            let items = if is_padding { Vec::new() } else { vec![value] };
            parent.doc.insert(name.clone(), DocumentValue::Array(items));
            parent.array_tags.insert(name.clone());
        } else {
            parent.doc.insert(name.clone(), value);
        }

        parent.last_closed = Some(name);
        None
    }

    /// Whitespace-only text is empty. Otherwise the cast sees trimmed text
    /// and the string fallback keeps the text as received.
    fn leaf_value(&self, text: String) -> DocumentValue {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return DocumentValue::String(String::new());
        }
        if self.options.cast_scalars {
            if let Some(value) = cast_scalar(trimmed) {
                return value;
            }
        }
        DocumentValue::String(text)
    }
}

/// Per-element decoder state.
#[derive(Debug, Default)]
struct Frame {
    name: String,
    /// Dotted path below the root; empty for the root itself
    path: String,
    doc: Document,
    text: String,
    has_children: bool,
    last_closed: Option<String>,
    array_tags: HashSet<String>,
}

fn open_frame(stack: &[Frame], start: &BytesStart<'_>) -> Result<Frame> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| PayBridgeError::Encoding(format!("invalid UTF-8 in tag name: {e}")))?
        .to_string();
    let path = stack.last().map(|parent| join_path(&parent.path, &name)).unwrap_or_default();
    Ok(Frame { name, path, ..Frame::default() })
}

fn ensure_single_root(root: Option<&Document>) -> Result<()> {
    if root.is_some() {
        return Err(PayBridgeError::Encoding("content after the root element".to_string()));
    }
    Ok(())
}

fn push_array(doc: &mut Document, name: &str, value: DocumentValue) {
    match doc.get_mut(name) {
        Some(DocumentValue::Array(items)) => items.push(value),
        _ => {
            doc.insert(name, DocumentValue::Array(vec![value]));
        }
    }
}

/// Cast element text: integer, then finite float, then boolean. `None`
/// leaves the text a string.
///
/// Digit-only text that overflows i64 stays a string so long identifiers are
/// never rounded.
fn cast_scalar(text: &str) -> Option<DocumentValue> {
    if let Ok(i) = text.parse::<i64>() {
        return Some(DocumentValue::Integer(i));
    }
    if is_digit_run(text) {
        return None;
    }
    if let Ok(f) = text.parse::<f64>() {
        if f.is_finite() {
            return Some(DocumentValue::Float(f));
        }
    }
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(DocumentValue::Bool(true)),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(DocumentValue::Bool(false)),
        _ => None,
    }
}

fn is_digit_run(text: &str) -> bool {
    let digits = text.strip_prefix(&['-', '+'][..]).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn cdata(text: &str) -> String {
    format!("<![CDATA[{}]]>", text.replace("]]>", "]]]]><![CDATA[>"))
}

fn open_tag(out: &mut String, tag: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
}

fn close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn write_element(out: &mut String, tag: &str, body: &str) {
    open_tag(out, tag);
    out.push_str(body);
    close_tag(out, tag);
}
