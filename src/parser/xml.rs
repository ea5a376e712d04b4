use super::{ParseResult, Parser, decode};
use crate::record::{AddressRecord, Field};
use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;

/// Parser for `<person>` documents
///
/// Each immediate `person` child of the root must carry `name` and an
/// `address` with `street`, `city`, `county`, `state` and `zip`. A single
/// incomplete person fails the whole file.
pub struct XmlParser;

/// Element paths read from each `person`, relative to it
const PERSON_FIELDS: [(Field, &str); 6] = [
    (Field::Name, "name"),
    (Field::Street, "address/street"),
    (Field::City, "address/city"),
    (Field::County, "address/county"),
    (Field::State, "address/state"),
    (Field::Zip, "address/zip"),
];

#[derive(Error, Debug)]
enum MarkupError {
    #[error("{0}")]
    Xml(#[from] quick_xml::Error),

    #[error("junk after document element")]
    JunkAfterRoot,

    #[error("text outside document element")]
    TextOutsideRoot,

    #[error("no document element found")]
    NoRoot,

    #[error("mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedEnd { expected: String, found: String },

    #[error("unexpected end tag </{0}>")]
    UnexpectedEnd(String),

    #[error("unclosed element <{0}>")]
    Unclosed(String),

    #[error("person {index} has no <{path}> element")]
    MissingElement { index: usize, path: &'static str },
}

/// Minimal element tree; `text` is the raw text before the first child
#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn named(name: &[u8]) -> Self {
        Self {
            name: String::from_utf8_lossy(name).into_owned(),
            ..Self::default()
        }
    }

    /// First element matching a slash-separated child path, in document order
    fn find(&self, path: &str) -> Option<&Element> {
        let steps: Vec<&str> = path.split('/').collect();
        self.find_steps(&steps)
    }

    fn find_steps(&self, steps: &[&str]) -> Option<&Element> {
        let (first, rest) = steps.split_first()?;
        self.children
            .iter()
            .filter(|child| child.name == *first)
            .find_map(|child| {
                if rest.is_empty() {
                    Some(child)
                } else {
                    child.find_steps(rest)
                }
            })
    }

    fn push_text(&mut self, text: &str) {
        if self.children.is_empty() {
            self.text.push_str(text);
        }
    }
}

/// Build the document tree, rejecting anything that is not a single
/// well-formed root element
fn read_document(text: &str) -> Result<Element, MarkupError> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(MarkupError::JunkAfterRoot);
                }
                stack.push(Element::named(start.name().as_ref()));
            }
            Event::Empty(start) => {
                if root.is_some() {
                    return Err(MarkupError::JunkAfterRoot);
                }
                close(Element::named(start.name().as_ref()), &mut stack, &mut root);
            }
            Event::End(end) => {
                let found = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                let Some(element) = stack.pop() else {
                    return Err(MarkupError::UnexpectedEnd(found));
                };
                if element.name != found {
                    return Err(MarkupError::MismatchedEnd {
                        expected: element.name,
                        found,
                    });
                }
                close(element, &mut stack, &mut root);
            }
            Event::Text(content) => {
                let content = content.unescape()?;
                match stack.last_mut() {
                    Some(parent) => parent.push_text(&content),
                    None if content.trim().is_empty() => {}
                    None if root.is_some() => return Err(MarkupError::JunkAfterRoot),
                    None => return Err(MarkupError::TextOutsideRoot),
                }
            }
            Event::CData(data) => {
                let data = data.into_inner();
                match stack.last_mut() {
                    Some(parent) => parent.push_text(&String::from_utf8_lossy(&data)),
                    None => return Err(MarkupError::TextOutsideRoot),
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(MarkupError::Unclosed(open.name));
    }
    root.ok_or(MarkupError::NoRoot)
}

/// Attach a finished element to its parent, or make it the root
fn close(element: Element, stack: &mut [Element], root: &mut Option<Element>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn person_record(index: usize, person: &Element) -> Result<AddressRecord, MarkupError> {
    PERSON_FIELDS
        .iter()
        .try_fold(AddressRecord::new(), |record, &(field, path)| {
            let element = person
                .find(path)
                .ok_or(MarkupError::MissingElement { index, path })?;
            Ok(record.with(field, element.text.as_str()))
        })
}

fn read_people(text: &str) -> Result<Vec<AddressRecord>, MarkupError> {
    let root = read_document(text)?;
    root.children
        .iter()
        .filter(|child| child.name == "person")
        .enumerate()
        .map(|(index, person)| person_record(index + 1, person))
        .collect()
}

impl Parser for XmlParser {
    fn format(&self) -> &'static str {
        "XML"
    }

    fn parse(&self, path: &str, bytes: &[u8]) -> ParseResult {
        let text = match decode(self.format(), path, bytes) {
            Ok(text) => text,
            Err(failed) => return failed,
        };

        match read_people(text) {
            Ok(records) => {
                tracing::debug!(path, records = records.len(), "parsed XML file");
                ParseResult {
                    records,
                    diagnostics: Vec::new(),
                }
            }
            Err(e) => ParseResult::failed(self.format(), path, e),
        }
    }
}
