//! Generic walk over a VTK XML document.
//!
//! Collects the file header, dataset and first-piece attributes, and the raw
//! text of every `DataArray` in the first piece, tagged with its parent
//! section (`PointData`, `Points`, `Lines`, ...).

use std::collections::HashMap;

use crate::data_array::{decode_binary, parse_ascii, ByteOrder, DataType, HeaderType};
use crate::{VtkError, VtkResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

pub(crate) type Attributes = HashMap<String, String>;

/// A `DataArray` element with its undecoded content.
#[derive(Debug, Clone)]
pub(crate) struct RawArray {
    pub section: String,
    pub attrs: Attributes,
    pub text: String,
}

impl RawArray {
    pub fn name(&self) -> Option<&str> {
        self.attrs.get("Name").map(String::as_str)
    }

    pub fn components(&self) -> VtkResult<usize> {
        match self.attrs.get("NumberOfComponents") {
            None => Ok(1),
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n >= 1 => Ok(n),
                _ => Err(VtkError::invalid_format(format!(
                    "NumberOfComponents '{raw}' on array {:?}",
                    self.name()
                ))),
            },
        }
    }

    pub fn data_type(&self) -> VtkResult<DataType> {
        self.attrs
            .get("type")
            .ok_or_else(|| VtkError::missing(format!("type attribute on array {:?}", self.name())))?
            .parse()
    }

    /// Decode all values (every component of every tuple).
    pub fn decode(&self, byte_order: ByteOrder, header_type: HeaderType) -> VtkResult<Vec<f64>> {
        let data_type = self.data_type()?;
        match self.attrs.get("format").map(String::as_str).unwrap_or("ascii") {
            "ascii" => parse_ascii(&self.text),
            "binary" => decode_binary(&self.text, data_type, header_type, byte_order),
            "appended" => Err(VtkError::unsupported("appended data arrays")),
            other => Err(VtkError::invalid_format(format!("DataArray format '{other}'"))),
        }
    }
}

/// Parsed skeleton of a VTK XML file.
#[derive(Debug, Default)]
pub(crate) struct VtkDocument {
    /// `type` attribute of `VTKFile` (e.g. `ImageData`, `PolyData`)
    pub file_type: String,
    pub byte_order: ByteOrder,
    pub header_type: HeaderType,
    /// Attributes of the dataset element (`<ImageData ...>`)
    pub dataset: Attributes,
    /// Attributes of the first `Piece`
    pub piece: Attributes,
    /// Attributes of sections directly under the first piece, by element name
    pub sections: HashMap<String, Attributes>,
    pub arrays: Vec<RawArray>,
    pub piece_count: usize,
}

impl VtkDocument {
    pub fn parse(xml: &str) -> VtkResult<Self> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut doc = VtkDocument::default();
        let mut stack: Vec<String> = Vec::new();
        let mut current: Option<RawArray> = None;
        let mut saw_root = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let name = element_name(&e);
                    saw_root |= name == "VTKFile";
                    let opened = doc.open_element(&name, &e, stack.last().map(String::as_str))?;
                    if opened.is_some() {
                        current = opened;
                    }
                    stack.push(name);
                }
                Ok(Event::Empty(e)) => {
                    let name = element_name(&e);
                    saw_root |= name == "VTKFile";
                    if let Some(array) =
                        doc.open_element(&name, &e, stack.last().map(String::as_str))?
                    {
                        doc.arrays.push(array);
                    }
                }
                // Only direct text of a DataArray; skips nested InformationKey values.
                Ok(Event::Text(t)) if is_capturing(&stack) => {
                    if let Some(array) = current.as_mut() {
                        array.text.push_str(&t.unescape()?);
                    }
                }
                Ok(Event::CData(t)) if is_capturing(&stack) => {
                    if let Some(array) = current.as_mut() {
                        array.text.push_str(&String::from_utf8_lossy(&t));
                    }
                }
                Ok(Event::End(e)) => {
                    if e.name().as_ref() == b"DataArray" {
                        if let Some(array) = current.take() {
                            doc.arrays.push(array);
                        }
                    }
                    stack.pop();
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(VtkError::Xml(format!(
                        "XML parsing error at position {}: {:?}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {}
            }
        }

        if !saw_root {
            return Err(VtkError::missing("VTKFile root element"));
        }
        if doc.piece_count > 1 {
            tracing::warn!(pieces = doc.piece_count, "Only the first piece is read");
        }

        Ok(doc)
    }

    /// Record an opening element. Returns the array to capture for `DataArray`.
    fn open_element(
        &mut self,
        name: &str,
        element: &BytesStart,
        parent: Option<&str>,
    ) -> VtkResult<Option<RawArray>> {
        match name {
            "VTKFile" => {
                let attrs = attributes(element)?;
                self.file_type = attrs
                    .get("type")
                    .cloned()
                    .ok_or_else(|| VtkError::missing("type attribute on VTKFile"))?;
                if let Some(order) = attrs.get("byte_order") {
                    self.byte_order = order.parse()?;
                }
                if let Some(header) = attrs.get("header_type") {
                    self.header_type = header.parse()?;
                }
                if let Some(compressor) = attrs.get("compressor").filter(|c| !c.is_empty()) {
                    return Err(VtkError::unsupported(format!("compressed data ({compressor})")));
                }
                Ok(None)
            }
            "AppendedData" => Err(VtkError::unsupported("appended data section")),
            "Piece" => {
                self.piece_count += 1;
                if self.piece_count == 1 {
                    self.piece = attributes(element)?;
                }
                Ok(None)
            }
            "DataArray" => {
                if self.piece_count > 1 {
                    return Ok(None);
                }
                Ok(Some(RawArray {
                    section: parent.unwrap_or_default().to_string(),
                    attrs: attributes(element)?,
                    text: String::new(),
                }))
            }
            _ => {
                match parent {
                    Some("VTKFile") => self.dataset = attributes(element)?,
                    Some("Piece") if self.piece_count == 1 => {
                        self.sections.insert(name.to_string(), attributes(element)?);
                    }
                    _ => {}
                }
                Ok(None)
            }
        }
    }

    /// Arrays found directly under `section`.
    pub fn arrays_in<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'a RawArray> + 'a {
        self.arrays.iter().filter(move |a| a.section == section)
    }

    /// Named array in `section`.
    pub fn array(&self, section: &str, name: &str) -> Option<&RawArray> {
        self.arrays
            .iter()
            .find(|a| a.section == section && a.name() == Some(name))
    }
}

fn is_capturing(stack: &[String]) -> bool {
    stack.last().map(String::as_str) == Some("DataArray")
}

fn element_name(element: &BytesStart) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}

fn attributes(element: &BytesStart) -> VtkResult<Attributes> {
    let mut map = HashMap::new();
    for attr in element.attributes() {
        let attr = attr.map_err(|e| VtkError::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        map.insert(key, value);
    }
    Ok(map)
}
