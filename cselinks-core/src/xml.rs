// Minimal XML tree for the generated artifacts, serialized with quick-xml

use crate::error::{CoreError, Result};
use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::name::QName;
use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Set an attribute, replacing any previous value for `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Total number of elements in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(XmlElement::count).sum::<usize>()
    }

    /// Pretty-printed serialization with two-space indentation and no XML declaration.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        write_element(&mut writer, self)?;
        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        Ok(bytes)
    }

    pub fn to_xml_string(&self) -> Result<String> {
        let bytes = self.to_bytes()?;
        String::from_utf8(bytes).map_err(|e| {
            CoreError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}

/// Escape an attribute value, keeping line breaks and tabs as character
/// references so readers do not normalize them to spaces.
fn escape_attribute(value: &str) -> String {
    escape(value)
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#9;")
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &XmlElement) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute(Attribute {
            key: QName(key.as_bytes()),
            value: Cow::Owned(escape_attribute(value).into_bytes()),
        });
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
    } else {
        writer.write_event(Event::Start(start))?;
        for child in &element.children {
            write_element(writer, child)?;
        }
        writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    }
    Ok(())
}

/// Serialize `element` and write it to `path`, creating parent directories.
pub fn save_xml(element: &XmlElement, path: &Path) -> Result<()> {
    let bytes = element.to_bytes()?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| CoreError::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(path, bytes).map_err(|e| CoreError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!("Wrote {}", path.display());
    Ok(())
}
