//! XML document validation and a minimal element tree.
//!
//! The resolver only needs two things from a parsed document: the direct
//! children of the root with a given name, and the text of a child element.
//! [`XmlElement`] provides exactly that on top of `quick-xml`.
//!
//! A failed parse is a value ([`Validation::Invalid`]), not an error. The
//! resolver decides what an invalid document means.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

/// Outcome of validating a payload as XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The payload is a well-formed document with this root element.
    Document(XmlElement),
    /// The payload is not well-formed XML.
    Invalid,
}

impl Validation {
    /// The root element, if the payload parsed.
    pub fn into_root(self) -> Option<XmlElement> {
        match self {
            Self::Document(root) => Some(root),
            Self::Invalid => None,
        }
    }
}

/// An element with its direct text and child elements.
///
/// Names are local names: namespace prefixes are dropped, so `<sm:loc>` and
/// `<loc>` both answer to `"loc"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>) -> Self {
        Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            ..Self::default()
        }
    }

    /// Local name of the element.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Concatenated direct text of the element, untrimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Direct children with the given local name, in document order.
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// First direct child with the given local name.
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Trimmed text of the first direct child with the given local name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|child| child.text.trim())
    }

    /// True if at least one direct child has the given local name.
    pub fn has_child(&self, name: &str) -> bool {
        self.child(name).is_some()
    }
}

/// Validate `text` as XML and build its element tree.
///
/// A document is valid when it has exactly one root element, every element
/// is closed, and no character data appears outside the root.
pub fn parse_document(text: &str) -> Validation {
    match build_tree(text.trim_start_matches('\u{feff}')) {
        Some(root) => Validation::Document(root),
        None => Validation::Invalid,
    }
}

fn build_tree(text: &str) -> Option<XmlElement> {
    let mut reader = Reader::from_str(text);
    let mut open: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                debug!(error = %e, position = reader.buffer_position(), "XML parse failed");
                return None;
            },
        };

        match event {
            Event::Start(start) => {
                if root.is_some() {
                    return None;
                }
                open.push(XmlElement::from_start(&start));
            },
            Event::Empty(start) => attach(&mut open, &mut root, XmlElement::from_start(&start))?,
            Event::End(_) => {
                let element = open.pop()?;
                attach(&mut open, &mut root, element)?;
            },
            Event::Text(raw) => {
                let text = raw.unescape().ok()?;
                append_text(&mut open, &text)?;
            },
            Event::CData(raw) => append_text(&mut open, &String::from_utf8_lossy(&raw))?,
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {},
        }
    }

    if open.is_empty() { root } else { None }
}

fn attach(open: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) -> Option<()> {
    if let Some(parent) = open.last_mut() {
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return None;
    }
    Some(())
}

fn append_text(open: &mut [XmlElement], text: &str) -> Option<()> {
    match open.last_mut() {
        Some(element) => element.text.push_str(text),
        None if text.trim().is_empty() => {},
        None => return None,
    }
    Some(())
}
