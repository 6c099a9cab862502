//! Scene assembly: template + moves -> encoded glTF.

use crate::definition::CubeDefinition;
use crate::error::{CubeError, Result};
use crate::moves::Move;
use crate::scene::{Document, OutputFormat};
use std::path::Path;
use std::sync::OnceLock;

/// A template document together with the cube definition read from it
#[derive(Debug, Clone)]
pub struct Template {
    document: Document,
    definition: CubeDefinition,
}

impl Template {
    pub fn new(document: Document) -> Result<Self> {
        let definition = CubeDefinition::from_document(&document)?;
        Ok(Self {
            document,
            definition,
        })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let document = Document::open(path).map_err(|source| CubeError::Template {
            path: path.to_path_buf(),
            source,
        })?;
        let template = Self::new(document)?;
        tracing::debug!(
            path = %path.display(),
            materials = template.document.materials.len(),
            binary_chunk = template.document.binary_chunk().map_or(0, <[u8]>::len),
            "loaded cube template"
        );
        Ok(template)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn definition(&self) -> &CubeDefinition {
        &self.definition
    }
}

/// The two templates: one for text output, one for binary output
#[derive(Debug, Clone)]
pub struct CubeModels {
    text: Template,
    binary: Template,
}

impl CubeModels {
    pub fn new(text: Template, binary: Template) -> Self {
        Self { text, binary }
    }

    /// Load and validate both template files
    pub fn load(text_path: impl AsRef<Path>, binary_path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(
            Template::open(text_path)?,
            Template::open(binary_path)?,
        ))
    }

    pub fn template(&self, format: OutputFormat) -> &Template {
        match format {
            OutputFormat::Gltf => &self.text,
            OutputFormat::Glb => &self.binary,
        }
    }
}

/// Publish-once holder of the cube models, shared by all requests
///
/// Requests only ever read the published templates; each generation works on
/// its own copy of the document and definition.
#[derive(Debug, Default)]
pub struct CubeService {
    models: OnceLock<CubeModels>,
}

impl CubeService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Service with models already published
    pub fn with_models(models: CubeModels) -> Self {
        Self {
            models: OnceLock::from(models),
        }
    }

    /// Publish the models. Fails if models were already published.
    pub fn publish(&self, models: CubeModels) -> Result<()> {
        self.models
            .set(models)
            .map_err(|_| CubeError::AlreadyInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.models.get().is_some()
    }

    pub fn models(&self) -> Result<&CubeModels> {
        self.models.get().ok_or(CubeError::NotInitialized)
    }

    /// Apply a parsed algorithm to a copy of the template's definition
    pub fn solve_state(&self, moves: &[Move], format: OutputFormat) -> Result<CubeDefinition> {
        Ok(self
            .models()?
            .template(format)
            .definition()
            .apply_algorithm(moves))
    }

    /// Build the scene document for an algorithm without encoding it
    pub fn assemble<S: AsRef<str>>(
        &self,
        algorithm: &[S],
        format: OutputFormat,
        unlit: bool,
    ) -> Result<Document> {
        let template = self.models()?.template(format);
        let mut document = template.document().clone();

        if unlit {
            document.mark_unlit();
        }

        let moves: Vec<Move> = algorithm.iter().map(|t| Move::parse(t.as_ref())).collect();
        let definition = template.definition().apply_algorithm(&moves);
        document.nodes = definition.into_nodes();

        Ok(document)
    }

    /// Generate the encoded cube for an algorithm
    pub fn generate<S: AsRef<str>>(
        &self,
        algorithm: &[S],
        format: OutputFormat,
        unlit: bool,
    ) -> Result<Vec<u8>> {
        let document = self.assemble(algorithm, format, unlit)?;
        document.encode(format).map_err(CubeError::Encoding)
    }
}
