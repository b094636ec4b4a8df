//! VTK XML PolyData (`.vtp`) writer and line reader.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::data_array::{encode_f64, encode_i64, HeaderType};
use crate::document::VtkDocument;
use crate::{VtkError, VtkResult};
use contour_common::{ContourMesh, LineCell, Position};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Data array encoding used when writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Whitespace-separated text
    Ascii,
    /// Inline base64 with a `UInt64` byte-count header
    #[default]
    Binary,
}

impl Encoding {
    fn format_attr(&self) -> &'static str {
        match self {
            Encoding::Ascii => "ascii",
            Encoding::Binary => "binary",
        }
    }
}

impl FromStr for Encoding {
    type Err = VtkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ascii" => Ok(Encoding::Ascii),
            "binary" => Ok(Encoding::Binary),
            other => Err(VtkError::unsupported(format!(
                "encoding '{other}' (expected ascii or binary)"
            ))),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.format_attr())
    }
}

/// Writes a [`ContourMesh`] as a single-piece PolyData file with line cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolyDataWriter {
    encoding: Encoding,
}

impl PolyDataWriter {
    pub fn new(encoding: Encoding) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Write the mesh to `path`, replacing any existing file.
    pub fn write_file<P: AsRef<Path>>(&self, mesh: &ContourMesh, path: P) -> VtkResult<()> {
        let path = path.as_ref();
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(mesh, &mut out)?;
        out.flush()?;

        debug!(
            path = %path.display(),
            points = mesh.point_count(),
            lines = mesh.line_count(),
            encoding = %self.encoding,
            "Wrote PolyData file"
        );
        Ok(())
    }

    /// Serialize the mesh into a string.
    pub fn write_to_string(&self, mesh: &ContourMesh) -> VtkResult<String> {
        let mut buf = Vec::new();
        self.write_to(mesh, &mut buf)?;
        String::from_utf8(buf).map_err(|e| VtkError::Xml(e.to_string()))
    }

    /// Serialize the mesh into any writer.
    pub fn write_to<W: Write>(&self, mesh: &ContourMesh, out: W) -> VtkResult<()> {
        let mut writer = Writer::new_with_indent(out, b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
        writer.write_event(Event::Start(BytesStart::new("VTKFile").with_attributes([
            ("type", "PolyData"),
            ("version", "1.0"),
            ("byte_order", "LittleEndian"),
            ("header_type", HeaderType::UInt64.vtk_name()),
        ])))?;
        writer.write_event(Event::Start(BytesStart::new("PolyData")))?;

        let n_points = mesh.point_count().to_string();
        let n_lines = mesh.line_count().to_string();
        writer.write_event(Event::Start(BytesStart::new("Piece").with_attributes([
            ("NumberOfPoints", n_points.as_str()),
            ("NumberOfVerts", "0"),
            ("NumberOfLines", n_lines.as_str()),
            ("NumberOfStrips", "0"),
            ("NumberOfPolys", "0"),
        ])))?;

        // Points
        writer.write_event(Event::Start(BytesStart::new("Points")))?;
        let coords: Vec<f64> = mesh.points().iter().flat_map(|p| p.to_array()).collect();
        let text = match self.encoding {
            Encoding::Ascii => join_ascii(&coords),
            Encoding::Binary => encode_f64(&coords),
        };
        self.write_array(&mut writer, "Float64", "Points", 3, &text)?;
        writer.write_event(Event::End(BytesEnd::new("Points")))?;

        // Lines
        writer.write_event(Event::Start(BytesStart::new("Lines")))?;
        let connectivity: Vec<i64> = mesh.lines().iter().flatten().map(|&i| i as i64).collect();
        let offsets: Vec<i64> = (1..=mesh.line_count()).map(|k| 2 * k as i64).collect();
        for (name, values) in [("connectivity", &connectivity), ("offsets", &offsets)] {
            let text = match self.encoding {
                Encoding::Ascii => join_ascii(values),
                Encoding::Binary => encode_i64(values),
            };
            self.write_array(&mut writer, "Int64", name, 1, &text)?;
        }
        writer.write_event(Event::End(BytesEnd::new("Lines")))?;

        writer.write_event(Event::End(BytesEnd::new("Piece")))?;
        writer.write_event(Event::End(BytesEnd::new("PolyData")))?;
        writer.write_event(Event::End(BytesEnd::new("VTKFile")))?;
        writer.get_mut().write_all(b"\n")?;
        Ok(())
    }

    fn write_array<W: Write>(
        &self,
        writer: &mut Writer<W>,
        data_type: &str,
        name: &str,
        components: usize,
        text: &str,
    ) -> VtkResult<()> {
        let components = components.to_string();
        writer.write_event(Event::Start(BytesStart::new("DataArray").with_attributes([
            ("type", data_type),
            ("Name", name),
            ("NumberOfComponents", components.as_str()),
            ("format", self.encoding.format_attr()),
        ])))?;
        if !text.is_empty() {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        writer.write_event(Event::End(BytesEnd::new("DataArray")))?;
        Ok(())
    }
}

fn join_ascii<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Read points and line cells from a `.vtp` file.
pub fn read_poly_data<P: AsRef<Path>>(path: P) -> VtkResult<ContourMesh> {
    let xml = std::fs::read_to_string(path)?;
    parse_poly_data(&xml)
}

/// Parse points and line cells of an in-memory `.vtp` document.
///
/// Polylines with more than two points are split into consecutive 2-point
/// cells. Vertices, strips and polygons are ignored.
pub fn parse_poly_data(xml: &str) -> VtkResult<ContourMesh> {
    let doc = VtkDocument::parse(xml)?;
    if doc.file_type != "PolyData" {
        return Err(VtkError::invalid_format(format!(
            "expected PolyData file, found {}",
            doc.file_type
        )));
    }

    let points = match doc.arrays_in("Points").next() {
        None => Vec::new(),
        Some(array) => {
            if array.components()? != 3 {
                return Err(VtkError::invalid_format("Points array must have 3 components"));
            }
            let coords = array.decode(doc.byte_order, doc.header_type)?;
            if coords.len() % 3 != 0 {
                return Err(VtkError::invalid_format("Points array length is not a multiple of 3"));
            }
            coords
                .chunks_exact(3)
                .map(|c| Position::new(c[0], c[1], c[2]))
                .collect()
        }
    };

    let mut lines: Vec<LineCell> = Vec::new();
    if let (Some(conn), Some(offs)) = (
        doc.array("Lines", "connectivity"),
        doc.array("Lines", "offsets"),
    ) {
        let connectivity = to_indices(&conn.decode(doc.byte_order, doc.header_type)?)?;
        let offsets = to_indices(&offs.decode(doc.byte_order, doc.header_type)?)?;

        let mut start = 0;
        for &end in &offsets {
            if end < start || end > connectivity.len() {
                return Err(VtkError::invalid_format(format!(
                    "line offset {end} out of order or past connectivity length {}",
                    connectivity.len()
                )));
            }
            for pair in connectivity[start..end].windows(2) {
                lines.push([pair[0], pair[1]]);
            }
            start = end;
        }
    }

    if let Some(bad) = lines.iter().flatten().find(|&&i| i >= points.len()) {
        return Err(VtkError::invalid_format(format!(
            "line references point {bad} but file has {} points",
            points.len()
        )));
    }

    Ok(ContourMesh::new(points, lines))
}

fn to_indices(values: &[f64]) -> VtkResult<Vec<usize>> {
    values
        .iter()
        .map(|&v| {
            if v >= 0.0 && v.fract() == 0.0 {
                Ok(v as usize)
            } else {
                Err(VtkError::invalid_format(format!("invalid index {v}")))
            }
        })
        .collect()
}
