//! Attribute-preserving mesh decimation
//!
//! Orchestrates the full decimation run: UV seam detection, edge collapse
//! simplification to a target face ratio, correspondence mapping back to
//! the original surface, attribute layer resampling, and shape key
//! reconstruction. The source mesh is never mutated; every run returns a
//! freshly built mesh plus a summary of what happened, or fails atomically
//! with no partial result.
//!
//! # Example
//!
//! ```
//! use shapelod_core::{Point3f, TriangleMesh};
//! use shapelod_pipeline::{decimate, DecimationRequest};
//!
//! let mesh = TriangleMesh::from_vertices_and_faces(
//!     vec![
//!         Point3f::new(0.0, 0.0, 0.0),
//!         Point3f::new(1.0, 0.0, 0.0),
//!         Point3f::new(0.5, 1.0, 0.0),
//!         Point3f::new(0.5, 0.5, 1.0),
//!     ],
//!     vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
//! );
//!
//! let outcome = decimate(&mesh, &DecimationRequest::with_ratio(1.0)).unwrap();
//! assert_eq!(outcome.mesh.face_count(), 4);
//! ```

pub mod pipeline;
pub mod request;
pub mod seams;

pub use pipeline::*;
pub use request::*;
pub use seams::*;
