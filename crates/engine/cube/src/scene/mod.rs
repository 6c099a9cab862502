//! glTF 2.0 scene documents
//!
//! Only the parts the cube engine touches are typed: the node list, the
//! material list and the document-level extension declarations. Everything
//! else (accessors, meshes, buffers, scenes, ...) is carried through verbatim.
//! A GLB binary chunk is loaded once and shared between copies.

pub mod glb;

use glam::Quat;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, fs, io, path::Path, str::FromStr, sync::Arc};
use thiserror::Error;

/// Name of the unlit material extension
pub const EXT_UNLIT: &str = "KHR_materials_unlit";

/// Errors from reading or writing scene documents
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid GLB magic: 0x{found:08X}")]
    InvalidMagic { found: u32 },
    #[error("unsupported GLB version: {found}")]
    UnsupportedVersion { found: u32 },
    #[error("truncated GLB: expected {expected} bytes, only {available} available")]
    Truncated { expected: usize, available: usize },
    #[error("GLB length mismatch: header declares {declared} bytes, got {actual}")]
    LengthMismatch { declared: usize, actual: usize },
    #[error("first GLB chunk must be JSON, found type 0x{found:08X}")]
    MissingJsonChunk { found: u32 },
    #[error("GLB output of {size} bytes exceeds the 4 GiB container limit")]
    TooLarge { size: usize },
}

/// Serialized variant of a scene document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// JSON text (`.gltf`)
    #[default]
    Gltf,
    /// Binary container (`.glb`)
    Glb,
}

impl OutputFormat {
    pub fn is_binary(self) -> bool {
        matches!(self, OutputFormat::Glb)
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Gltf => "gltf",
            OutputFormat::Glb => "glb",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Gltf => "model/gltf+json",
            OutputFormat::Glb => "model/gltf-binary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported format: {0:?}")]
pub struct UnsupportedFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnsupportedFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gltf" => Ok(OutputFormat::Gltf),
            "glb" => Ok(OutputFormat::Glb),
            other => Err(UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A glTF node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<[f32; 3]>,
    /// Unit quaternion stored as `[x, y, z, w]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f32; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<[f32; 3]>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Node {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Rotation as a quaternion; a node without one is unrotated
    pub fn orientation(&self) -> Quat {
        self.rotation.map_or(Quat::IDENTITY, Quat::from_array)
    }

    pub fn set_orientation(&mut self, orientation: Quat) {
        self.rotation = Some(orientation.to_array());
    }
}

/// A glTF material
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Material {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extensions: Map<String, Value>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Material {
    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }
}

/// A glTF 2.0 document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions_used: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions_required: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<Material>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
    #[serde(skip)]
    bin: Option<Arc<[u8]>>,
}

impl Document {
    /// Decode either a GLB container or glTF JSON
    pub fn from_slice(data: &[u8]) -> Result<Self, SceneError> {
        if glb::is_glb(data) {
            let container = glb::parse_glb(data)?;
            let mut document: Document = serde_json::from_slice(container.json)?;
            document.bin = container.bin.map(Arc::from);
            Ok(document)
        } else {
            Ok(serde_json::from_slice(data)?)
        }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let data = fs::read(path)?;
        Self::from_slice(&data)
    }

    /// GLB binary chunk, if the document was loaded from a container
    pub fn binary_chunk(&self) -> Option<&[u8]> {
        self.bin.as_deref()
    }

    pub fn with_binary_chunk(mut self, bin: impl Into<Arc<[u8]>>) -> Self {
        self.bin = Some(bin.into());
        self
    }

    /// Compact glTF JSON
    pub fn to_json(&self) -> Result<Vec<u8>, SceneError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// GLB container carrying the JSON and the binary chunk
    pub fn to_glb(&self) -> Result<Vec<u8>, SceneError> {
        let json = self.to_json()?;
        glb::write_glb(&json, self.binary_chunk())
    }

    pub fn encode(&self, format: OutputFormat) -> Result<Vec<u8>, SceneError> {
        match format {
            OutputFormat::Gltf => self.to_json(),
            OutputFormat::Glb => self.to_glb(),
        }
    }

    /// Declare the unlit extension as used and required, and tag every
    /// material with an empty unlit marker
    pub fn mark_unlit(&mut self) {
        self.extensions_used = vec![EXT_UNLIT.to_string()];
        self.extensions_required = vec![EXT_UNLIT.to_string()];
        self.materials = self
            .materials
            .iter()
            .cloned()
            .map(|mut material| {
                material
                    .extensions
                    .insert(EXT_UNLIT.to_string(), Value::Object(Map::new()));
                material
            })
            .collect();
    }
}
