//! GLB container - binary framing for glTF 2.0
//!
//! ```text
//! [Header: 12 bytes]
//!   Magic: 'glTF' (0x46546C67)
//!   Version: 2
//!   Length: total file size in bytes
//!
//! [Chunk 0: JSON]   length u32 | type 0x4E4F534A | data padded with 0x20
//! [Chunk 1: BIN]    length u32 | type 0x004E4942 | data padded with 0x00 (optional)
//! ```
//!
//! All integers are little-endian and every chunk is 4-byte aligned.

use super::SceneError;

pub mod constants {
    /// Magic number: 'glTF' in ASCII
    pub const MAGIC: u32 = 0x4654_6C67;

    /// Container version
    pub const VERSION: u32 = 2;

    /// Header size in bytes
    pub const HEADER_SIZE: usize = 12;

    /// Chunk header size in bytes (length + type)
    pub const CHUNK_HEADER_SIZE: usize = 8;

    pub const CHUNK_JSON: u32 = 0x4E4F_534A;
    pub const CHUNK_BIN: u32 = 0x004E_4942;

    pub const JSON_PADDING: u8 = b' ';
    pub const BIN_PADDING: u8 = 0;
}

use constants::*;

/// Borrowed view of the chunks of a GLB file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glb<'a> {
    pub json: &'a [u8],
    pub bin: Option<&'a [u8]>,
}

/// Returns true if the data starts with the GLB magic
pub fn is_glb(data: &[u8]) -> bool {
    data.len() >= 4 && data[0..4] == MAGIC.to_le_bytes()
}

struct GlbReader<'a> {
    data: &'a [u8],
}

impl<'a> GlbReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    #[inline]
    fn read_u32_le(&self, offset: usize) -> Result<u32, SceneError> {
        let bytes = self.slice(offset, 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    #[inline]
    fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8], SceneError> {
        let end = offset.checked_add(len).unwrap_or(usize::MAX);
        if end > self.data.len() {
            return Err(SceneError::Truncated {
                expected: end,
                available: self.data.len(),
            });
        }
        Ok(&self.data[offset..end])
    }

    /// Returns (length, type, data) and the offset of the next chunk
    fn read_chunk(&self, offset: usize) -> Result<((u32, &'a [u8]), usize), SceneError> {
        let length = self.read_u32_le(offset)? as usize;
        let chunk_type = self.read_u32_le(offset + 4)?;
        let data = self.slice(offset + CHUNK_HEADER_SIZE, length)?;
        Ok(((chunk_type, data), offset + CHUNK_HEADER_SIZE + length))
    }
}

/// Split a GLB file into its JSON and BIN chunks
///
/// Chunks after the first BIN chunk, or of unknown type, are ignored.
pub fn parse_glb(data: &[u8]) -> Result<Glb<'_>, SceneError> {
    let reader = GlbReader::new(data);

    let magic = reader.read_u32_le(0)?;
    if magic != MAGIC {
        return Err(SceneError::InvalidMagic { found: magic });
    }
    let version = reader.read_u32_le(4)?;
    if version != VERSION {
        return Err(SceneError::UnsupportedVersion { found: version });
    }
    let declared = reader.read_u32_le(8)? as usize;
    if declared != data.len() {
        return Err(SceneError::LengthMismatch {
            declared,
            actual: data.len(),
        });
    }

    let ((chunk_type, json), mut offset) = reader.read_chunk(HEADER_SIZE)?;
    if chunk_type != CHUNK_JSON {
        return Err(SceneError::MissingJsonChunk { found: chunk_type });
    }

    let mut bin = None;
    while offset < data.len() {
        let ((chunk_type, chunk), next) = reader.read_chunk(offset)?;
        if chunk_type == CHUNK_BIN && bin.is_none() {
            bin = Some(chunk);
        }
        offset = next;
    }

    Ok(Glb { json, bin })
}

/// Frame a JSON chunk and an optional BIN chunk as a GLB file
pub fn write_glb(json: &[u8], bin: Option<&[u8]>) -> Result<Vec<u8>, SceneError> {
    let json_len = padded_len(json.len());
    let bin_len = bin.map(|b| padded_len(b.len()));
    let total = HEADER_SIZE
        + CHUNK_HEADER_SIZE
        + json_len
        + bin_len.map_or(0, |len| CHUNK_HEADER_SIZE + len);
    let total_u32 = u32::try_from(total).map_err(|_| SceneError::TooLarge { size: total })?;

    let mut buffer = Vec::with_capacity(total);
    buffer.extend_from_slice(&MAGIC.to_le_bytes());
    buffer.extend_from_slice(&VERSION.to_le_bytes());
    buffer.extend_from_slice(&total_u32.to_le_bytes());

    write_chunk(&mut buffer, CHUNK_JSON, json, json_len, JSON_PADDING);
    if let (Some(bin), Some(bin_len)) = (bin, bin_len) {
        write_chunk(&mut buffer, CHUNK_BIN, bin, bin_len, BIN_PADDING);
    }

    debug_assert_eq!(buffer.len(), total);
    Ok(buffer)
}

fn write_chunk(buffer: &mut Vec<u8>, chunk_type: u32, data: &[u8], padded: usize, pad: u8) {
    // padded <= total, which was checked against u32::MAX
    buffer.extend_from_slice(&(padded as u32).to_le_bytes());
    buffer.extend_from_slice(&chunk_type.to_le_bytes());
    buffer.extend_from_slice(data);
    buffer.resize(buffer.len() + (padded - data.len()), pad);
}

#[inline]
fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}
