//! # Diagram Formats
//!
//! Readers and writers at the edge of the engine. File I/O stays in the
//! app layer; everything here works on bytes, text and records.

mod interchange;
mod pd_code;
mod planar_code;

pub use interchange::{ConnectionRecord, DiagramRecord, VertexRecord};
pub use pd_code::{from_pd_code, parse_pd_code};
pub use planar_code::{PlanarMap, read_planar_code};
