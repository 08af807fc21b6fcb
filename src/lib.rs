//! # routefinder
//!
//! Shortest paths and nearest-vertex queries over a graph whose vertices are
//! 2-D coordinates joined by undirected, Euclidean-weighted edges.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! routefinder --graph ./data/graph_example.json --http-port 5000
//! curl -X POST localhost:5000/shortest-path \
//!      -H 'content-type: application/json' \
//!      -d '{"start": "(0.0, 0.0)", "end": "(6.0, 2.0)"}'
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use routefinder::prelude::*;
//!
//! let description = GraphDescription::from_json_str(
//!     r#"{"(0.0, 0.0)": [[3.0, 0.0], [3.0, 4.0]], "(3.0, 0.0)": [[3.0, 4.0]]}"#,
//! ).unwrap();
//! let graph = GraphStore::build(&description).unwrap();
//! let engine = PathEngine::new(&graph);
//!
//! let start = Vertex::new(0.0, 0.0).unwrap();
//! let end = Vertex::new(3.0, 4.0).unwrap();
//! let path = engine.find_shortest_path(&start, &end).unwrap().unwrap();
//! assert_eq!(path.keys(), vec!["(0.0, 0.0)", "(3.0, 4.0)"]);
//! assert_eq!(path.distance, 5.0);
//! ```
//!
//! ## Crate Structure
//!
//! - [`routefinder-core`](https://docs.rs/routefinder-core) - Vertex keys, graph store, path engine, render scene
//! - [`routefinder-api`](https://docs.rs/routefinder-api) - REST API

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// Re-export core types
pub use routefinder_core::{
    distance, Error, GraphDescription, GraphStore, Highlight, Nearest, PathEngine, Result,
    Scene, SceneEdge, SceneVertex, ShortestPath, Vertex,
};

// Re-export API
pub use routefinder_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        load_description, load_graph, Error, GraphDescription, GraphStore, Highlight, Nearest, PathEngine,
        RestApi, Result, Scene, ShortestPath, Vertex,
    };
}

/// Read a graph description from a JSON file and check that it builds.
pub fn load_description<P: AsRef<Path>>(path: P) -> Result<GraphDescription> {
    load_graph(path).map(|(description, _)| description)
}

/// Read a graph description from a JSON file along with the store built from it.
pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<(GraphDescription, GraphStore)> {
    let file = File::open(path.as_ref())?;
    let description = GraphDescription::from_reader(BufReader::new(file))?;
    let graph = GraphStore::build(&description)?;
    Ok((description, graph))
}
