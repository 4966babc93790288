//! Streaming commit-graph rendering engine for terminal repository browsers.

pub mod commit;
pub mod error;
pub mod graph;

pub use error::GraphError;
pub use graph::{Canvas, CanvasSymbol, Engine, Strategy};
