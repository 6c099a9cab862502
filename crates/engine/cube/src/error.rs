use crate::scene::SceneError;
use crate::slot::CubieSlot;
use std::path::PathBuf;
use thiserror::Error;

/// Template layout problems; fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("template must contain exactly {expected} nodes, found {found}")]
    NodeCount { expected: usize, found: usize },
    #[error("unexpected node name: {0:?}")]
    UnexpectedNodeName(Option<String>),
    #[error("node for slot {0} appears more than once")]
    DuplicateNode(CubieSlot),
}

/// Errors emitted by the cube engine and scene assembler.
#[derive(Debug, Error)]
pub enum CubeError {
    #[error("invalid template structure: {0}")]
    Structure(#[from] StructureError),
    #[error("failed to load template {}: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: SceneError,
    },
    #[error("cube models have not been initialized")]
    NotInitialized,
    #[error("cube models are already initialized")]
    AlreadyInitialized,
    #[error("failed to encode scene: {0}")]
    Encoding(#[source] SceneError),
}

/// Rejected notation token (strict parsing only).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("invalid move notation: {0:?}")]
    InvalidToken(String),
}

pub type Result<T> = std::result::Result<T, CubeError>;
