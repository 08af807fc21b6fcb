//! # routefinder Core
//!
//! Core library for the routefinder graph engine.
//!
//! This crate provides the fundamental data structures and algorithms:
//!
//! - [`Vertex`] - A 2-D coordinate that doubles as an exact, hashable graph key
//! - [`GraphDescription`] - The serialized `"(x, y)" -> [[x, y], ...]` input format
//! - [`GraphStore`] - Undirected adjacency with Euclidean edge weights
//! - [`PathEngine`] - Dijkstra shortest paths and nearest-vertex search
//! - [`Scene`] - Render-ready graph data with a highlighted result
//!
//! ## Example
//!
//! ```rust
//! use routefinder_core::{GraphDescription, GraphStore, PathEngine, Vertex};
//!
//! let description = GraphDescription::from_json_str(
//!     r#"{"(0.0, 0.0)": [[3.0, 0.0]], "(3.0, 0.0)": [[3.0, 4.0]]}"#,
//! ).unwrap();
//! let graph = GraphStore::build(&description).unwrap();
//! let engine = PathEngine::new(&graph);
//!
//! let path = engine
//!     .find_shortest_path_by_key("(0.0, 0.0)", "(3.0, 4.0)")
//!     .unwrap()
//!     .expect("connected");
//! assert_eq!(path.distance, 7.0);
//!
//! let nearest = engine.find_closest_vertex(&Vertex::new(2.5, 0.5).unwrap()).unwrap();
//! assert_eq!(nearest.vertex.key(), "(3.0, 0.0)");
//! ```

pub mod description;
pub mod error;
pub mod graph;
pub mod path;
pub mod scene;
pub mod vertex;

pub use description::GraphDescription;
pub use error::{Error, Result};
pub use graph::GraphStore;
pub use path::{Nearest, PathEngine, ShortestPath};
pub use scene::{Highlight, Scene, SceneEdge, SceneVertex};
pub use vertex::{distance, Vertex};
