//! Blendcube HTTP server.
//!
//! Serves `/cube`, `/cube.gltf` and `/cube.glb`: the bundled cube template
//! after a sequence of face turns, as glTF JSON or GLB. Configuration comes
//! from a TOML file with `BLENDCUBE_*` environment overrides.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod routes;
pub mod server;

pub use config::{Config, ConfigError, LogConfig, LogOutput, ModelConfig, ServerConfig};
pub use logging::LogFile;
pub use metrics::ServerMetrics;
pub use routes::{router, ApiError, CubeQuery, CubeRequest, ErrorBody, REQUEST_ID_HEADER};
pub use server::{run, AppState};
