//! Encoding and decoding of VTK `DataArray` payloads.
//!
//! Binary arrays are stored inline as base64: a byte-count header
//! (`UInt32` or `UInt64`) followed by the raw values. VTK encodes the header
//! and the values as two separate base64 blocks; a single joint block is
//! accepted as well.

use crate::{VtkError, VtkResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::str::FromStr;

/// Element type of a data array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
}

impl DataType {
    /// Size of one element in bytes.
    pub fn size(&self) -> usize {
        match self {
            DataType::Int8 | DataType::UInt8 => 1,
            DataType::Int16 | DataType::UInt16 => 2,
            DataType::Int32 | DataType::UInt32 | DataType::Float32 => 4,
            DataType::Int64 | DataType::UInt64 | DataType::Float64 => 8,
        }
    }

    /// Name used in the `type` attribute.
    pub fn vtk_name(&self) -> &'static str {
        match self {
            DataType::Int8 => "Int8",
            DataType::UInt8 => "UInt8",
            DataType::Int16 => "Int16",
            DataType::UInt16 => "UInt16",
            DataType::Int32 => "Int32",
            DataType::UInt32 => "UInt32",
            DataType::Int64 => "Int64",
            DataType::UInt64 => "UInt64",
            DataType::Float32 => "Float32",
            DataType::Float64 => "Float64",
        }
    }
}

impl FromStr for DataType {
    type Err = VtkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Legacy names from older VTK writers map onto the sized types.
        match s {
            "Int8" | "Char" => Ok(DataType::Int8),
            "UInt8" | "UnsignedChar" => Ok(DataType::UInt8),
            "Int16" | "Short" => Ok(DataType::Int16),
            "UInt16" | "UnsignedShort" => Ok(DataType::UInt16),
            "Int32" | "Int" => Ok(DataType::Int32),
            "UInt32" | "UnsignedInt" => Ok(DataType::UInt32),
            "Int64" | "Long" => Ok(DataType::Int64),
            "UInt64" | "UnsignedLong" => Ok(DataType::UInt64),
            "Float32" | "Float" => Ok(DataType::Float32),
            "Float64" | "Double" => Ok(DataType::Float64),
            other => Err(VtkError::unsupported(format!("data array type '{other}'"))),
        }
    }
}

/// Byte order of binary payloads (`byte_order` attribute).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    LittleEndian,
    BigEndian,
}

impl FromStr for ByteOrder {
    type Err = VtkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LittleEndian" => Ok(ByteOrder::LittleEndian),
            "BigEndian" => Ok(ByteOrder::BigEndian),
            other => Err(VtkError::invalid_format(format!("byte_order '{other}'"))),
        }
    }
}

/// Integer type of the binary block header (`header_type` attribute).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderType {
    #[default]
    UInt32,
    UInt64,
}

impl HeaderType {
    pub fn size(&self) -> usize {
        match self {
            HeaderType::UInt32 => 4,
            HeaderType::UInt64 => 8,
        }
    }

    pub fn vtk_name(&self) -> &'static str {
        match self {
            HeaderType::UInt32 => "UInt32",
            HeaderType::UInt64 => "UInt64",
        }
    }

    /// Read the byte count from the first `size()` bytes of `bytes`.
    fn read(&self, bytes: &[u8], order: ByteOrder) -> usize {
        match self {
            HeaderType::UInt32 => {
                let mut raw = [0u8; 4];
                raw.copy_from_slice(&bytes[..4]);
                match order {
                    ByteOrder::LittleEndian => u32::from_le_bytes(raw) as usize,
                    ByteOrder::BigEndian => u32::from_be_bytes(raw) as usize,
                }
            }
            HeaderType::UInt64 => {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(&bytes[..8]);
                match order {
                    ByteOrder::LittleEndian => u64::from_le_bytes(raw) as usize,
                    ByteOrder::BigEndian => u64::from_be_bytes(raw) as usize,
                }
            }
        }
    }
}

impl FromStr for HeaderType {
    type Err = VtkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UInt32" => Ok(HeaderType::UInt32),
            "UInt64" => Ok(HeaderType::UInt64),
            other => Err(VtkError::invalid_format(format!("header_type '{other}'"))),
        }
    }
}

/// Parse a whitespace-separated ascii array.
pub fn parse_ascii(text: &str) -> VtkResult<Vec<f64>> {
    text.split_ascii_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| VtkError::invalid_format(format!("bad ascii value '{token}'")))
        })
        .collect()
}

/// Decode a base64 `binary` array into values.
pub fn decode_binary(
    text: &str,
    data_type: DataType,
    header: HeaderType,
    order: ByteOrder,
) -> VtkResult<Vec<f64>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if !compact.is_ascii() {
        return Err(VtkError::Base64("non-ASCII characters in binary array".to_string()));
    }

    let payload = decode_payload(&compact, header, order)?;
    if payload.len() % data_type.size() != 0 {
        return Err(VtkError::invalid_format(format!(
            "binary payload of {} bytes is not a multiple of {} ({})",
            payload.len(),
            data_type.size(),
            data_type.vtk_name()
        )));
    }

    Ok(bytes_to_values(&payload, data_type, order))
}

fn decode_payload(compact: &str, header: HeaderType, order: ByteOrder) -> VtkResult<Vec<u8>> {
    let header_size = header.size();

    // Separate header block first.
    let header_chars = header_size.div_ceil(3) * 4;
    if compact.len() >= header_chars {
        if let Ok(head) = STANDARD.decode(&compact[..header_chars]) {
            if head.len() == header_size {
                let declared = header.read(&head, order);
                if let Ok(mut body) = STANDARD.decode(&compact[header_chars..]) {
                    if body.len() >= declared {
                        body.truncate(declared);
                        return Ok(body);
                    }
                }
            }
        }
    }

    let all = STANDARD.decode(compact)?;
    if all.len() < header_size {
        return Err(VtkError::missing("binary array header"));
    }
    let declared = header.read(&all, order);
    let body = &all[header_size..];
    if body.len() < declared {
        return Err(VtkError::missing(format!(
            "binary array declares {declared} bytes but holds {}",
            body.len()
        )));
    }
    Ok(body[..declared].to_vec())
}

fn bytes_to_values(bytes: &[u8], data_type: DataType, order: ByteOrder) -> Vec<f64> {
    macro_rules! read_as {
        ($t:ty) => {{
            const N: usize = std::mem::size_of::<$t>();
            bytes
                .chunks_exact(N)
                .map(|chunk| {
                    let mut raw = [0u8; N];
                    raw.copy_from_slice(chunk);
                    let value = match order {
                        ByteOrder::LittleEndian => <$t>::from_le_bytes(raw),
                        ByteOrder::BigEndian => <$t>::from_be_bytes(raw),
                    };
                    value as f64
                })
                .collect()
        }};
    }

    match data_type {
        DataType::Int8 => read_as!(i8),
        DataType::UInt8 => read_as!(u8),
        DataType::Int16 => read_as!(i16),
        DataType::UInt16 => read_as!(u16),
        DataType::Int32 => read_as!(i32),
        DataType::UInt32 => read_as!(u32),
        DataType::Int64 => read_as!(i64),
        DataType::UInt64 => read_as!(u64),
        DataType::Float32 => read_as!(f32),
        DataType::Float64 => read_as!(f64),
    }
}

/// Encode raw little-endian bytes as a VTK binary array with a `UInt64` header.
fn encode_payload(bytes: &[u8]) -> String {
    let header = (bytes.len() as u64).to_le_bytes();
    let mut out = STANDARD.encode(header);
    out.push_str(&STANDARD.encode(bytes));
    out
}

/// Encode `Float64` values for a `binary` array (little-endian, `UInt64` header).
pub fn encode_f64(values: &[f64]) -> String {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    encode_payload(&bytes)
}

/// Encode `Int64` values for a `binary` array (little-endian, `UInt64` header).
pub fn encode_i64(values: &[i64]) -> String {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    encode_payload(&bytes)
}
