//! 3x3x3 puzzle cube engine.
//!
//! Templates are glTF documents holding one node per cubie slot (`01_UBL` ..
//! `26_DFR`). A [`CubeDefinition`] binds those nodes to [`CubieSlot`]s, face
//! turns permute and re-orient the nodes of one layer, and [`CubeService`]
//! writes the turned nodes back into a copy of the template and encodes it as
//! glTF JSON or GLB.
//!
//! ```no_run
//! use cube::{CubeModels, CubeService, OutputFormat};
//!
//! let service = CubeService::with_models(CubeModels::load("assets/cube.gltf", "assets/cube.glb")?);
//! let glb = service.generate(&["R", "U", "R'", "U'"], OutputFormat::Glb, false)?;
//! # Ok::<(), cube::CubeError>(())
//! ```

pub mod definition;
pub mod error;
pub mod face;
pub mod moves;
pub mod rotation;
pub mod scene;
pub mod service;
pub mod slot;

pub use definition::CubeDefinition;
pub use error::{CubeError, MoveError, StructureError};
pub use face::Face;
pub use moves::{Move, Turn, NOTATION};
pub use scene::{Document, Material, Node, OutputFormat, SceneError, EXT_UNLIT};
pub use service::{CubeModels, CubeService, Template};
pub use slot::CubieSlot;

// Re-export glam for convenience
pub use glam;
