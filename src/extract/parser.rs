//! Tree export XML parser
//!
//! Reads the `Objects/Object` elements of a tree export. Only the first
//! `Objects` container under the root is read, and within each object only
//! the first `Vertices` element and its first `BoneID` child count. Any
//! other element is skipped whole.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::error::{Result, WindError};

/// An object as it appears in the document, before level parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceObject {
    /// `Name` attribute, empty when missing
    pub name: String,
    /// Raw text of `Vertices/BoneID`, if present
    pub bone_ids: Option<String>,
}

/// Parse a tree export document into its objects, in document order.
///
/// # Errors
///
/// Returns `MalformedSource` if the XML is not a well-formed document.
pub fn parse_source_objects(xml: &str) -> Result<Vec<SourceObject>> {
    let mut reader = Reader::from_str(xml);
    parse_document(&mut reader)
}

fn parse_document<R: BufRead>(reader: &mut Reader<R>) -> Result<Vec<SourceObject>> {
    let mut buf = Vec::new();

    let objects = loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let root = e.name().as_ref().to_vec();
                break parse_root(reader, &root)?;
            }
            Event::Empty(_) => break Vec::new(),
            Event::Text(ref t) if !is_blank(t) => {
                return Err(malformed("text before root element"));
            }
            Event::Eof => return Err(malformed("no root element")),
            _ => {}
        }
        buf.clear();
    };
    buf.clear();

    expect_document_end(reader)?;
    Ok(objects)
}

/// Children of the root element; only the first `Objects` is read
fn parse_root<R: BufRead>(reader: &mut Reader<R>, root: &[u8]) -> Result<Vec<SourceObject>> {
    let mut buf = Vec::new();
    let mut objects: Option<Vec<SourceObject>> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let elem_name = e.name().as_ref().to_vec();
                if elem_name == b"Objects" && objects.is_none() {
                    objects = Some(parse_objects(reader)?);
                } else {
                    skip_element(reader, &elem_name)?;
                }
            }
            Event::Empty(ref e) if e.name().as_ref() == b"Objects" && objects.is_none() => {
                objects = Some(Vec::new());
            }
            Event::End(ref e) if e.name().as_ref() == root => break,
            Event::Eof => return Err(unexpected_eof(root)),
            _ => {}
        }
        buf.clear();
    }

    Ok(objects.unwrap_or_default())
}

fn parse_objects<R: BufRead>(reader: &mut Reader<R>) -> Result<Vec<SourceObject>> {
    let mut buf = Vec::new();
    let mut objects = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let elem_name = e.name().as_ref().to_vec();
                if elem_name == b"Object" {
                    let name = name_attribute(e)?;
                    objects.push(parse_object(reader, name)?);
                } else {
                    skip_element(reader, &elem_name)?;
                }
            }
            Event::Empty(ref e) if e.name().as_ref() == b"Object" => {
                objects.push(SourceObject {
                    name: name_attribute(e)?,
                    bone_ids: None,
                });
            }
            Event::End(ref e) if e.name().as_ref() == b"Objects" => break,
            Event::Eof => return Err(unexpected_eof(b"Objects")),
            _ => {}
        }
        buf.clear();
    }

    Ok(objects)
}

fn parse_object<R: BufRead>(reader: &mut Reader<R>, name: String) -> Result<SourceObject> {
    let mut buf = Vec::new();
    let mut vertices_seen = false;
    let mut bone_ids = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let elem_name = e.name().as_ref().to_vec();
                if elem_name == b"Vertices" && !vertices_seen {
                    vertices_seen = true;
                    bone_ids = parse_vertices(reader)?;
                } else {
                    skip_element(reader, &elem_name)?;
                }
            }
            Event::Empty(ref e) if e.name().as_ref() == b"Vertices" => {
                vertices_seen = true;
            }
            Event::End(ref e) if e.name().as_ref() == b"Object" => break,
            Event::Eof => return Err(unexpected_eof(b"Object")),
            _ => {}
        }
        buf.clear();
    }

    Ok(SourceObject { name, bone_ids })
}

/// Text of the first `BoneID` child, if any
fn parse_vertices<R: BufRead>(reader: &mut Reader<R>) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let mut bone_ids_seen = false;
    let mut bone_ids = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let elem_name = e.name().as_ref().to_vec();
                if elem_name == b"BoneID" && !bone_ids_seen {
                    bone_ids_seen = true;
                    bone_ids = Some(read_leading_text(reader, &elem_name)?);
                } else {
                    skip_element(reader, &elem_name)?;
                }
            }
            Event::Empty(ref e) if e.name().as_ref() == b"BoneID" => {
                bone_ids_seen = true;
            }
            Event::End(ref e) if e.name().as_ref() == b"Vertices" => break,
            Event::Eof => return Err(unexpected_eof(b"Vertices")),
            _ => {}
        }
        buf.clear();
    }

    Ok(bone_ids)
}

/// Text content up to the element's first child; children are skipped.
fn read_leading_text<R: BufRead>(reader: &mut Reader<R>, name: &[u8]) -> Result<String> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut child_seen = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(ref t) if !child_seen => text.push_str(&t.unescape()?),
            Event::CData(ref c) if !child_seen => text.push_str(&String::from_utf8_lossy(c)),
            Event::Start(ref e) => {
                child_seen = true;
                let elem_name = e.name().as_ref().to_vec();
                skip_element(reader, &elem_name)?;
            }
            Event::Empty(_) => child_seen = true,
            Event::End(ref e) if e.name().as_ref() == name => break,
            Event::Eof => return Err(unexpected_eof(name)),
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

/// Only whitespace, comments and processing instructions may follow the root
fn expect_document_end<R: BufRead>(reader: &mut Reader<R>) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Eof => return Ok(()),
            Event::Text(ref t) if is_blank(t) => {}
            Event::Comment(_) | Event::PI(_) => {}
            _ => return Err(malformed("junk after document element")),
        }
        buf.clear();
    }
}

/// Skip an element and all its children.
fn skip_element<R: BufRead>(reader: &mut Reader<R>, name: &[u8]) -> Result<()> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.name().as_ref() == name => {
                depth += 1;
            }
            Event::End(ref e) if e.name().as_ref() == name => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => return Err(unexpected_eof(name)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// `Name` attribute, or an empty string when absent
fn name_attribute(e: &BytesStart) -> Result<String> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| malformed(&err.to_string()))?;
        if attr.key.as_ref() == b"Name" {
            return Ok(attr.unescape_value()?.into_owned());
        }
    }
    Ok(String::new())
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

fn malformed(message: &str) -> WindError {
    WindError::MalformedSource(message.to_string())
}

fn unexpected_eof(name: &[u8]) -> WindError {
    WindError::MalformedSource(format!(
        "unexpected EOF in <{}>",
        String::from_utf8_lossy(name)
    ))
}
