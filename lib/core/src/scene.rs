//! Render-ready snapshot of a graph and a query result.
//!
//! A [`Scene`] carries everything a plotting front-end needs: labelled
//! vertices, each undirected edge once with a two-decimal weight label, and
//! what to highlight. Nothing here touches the filesystem.

use crate::{GraphStore, Nearest, ShortestPath, Vertex};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneVertex {
    pub vertex: Vertex,
    pub x: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneEdge {
    pub from: Vertex,
    pub to: Vertex,
    pub weight: f64,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Highlight {
    #[default]
    None,
    Path {
        vertices: Vec<Vertex>,
    },
    Closest {
        source: Vertex,
        closest: Vertex,
        /// Set only when `source` is a graph vertex adjacent to `closest`.
        edge: Option<(Vertex, Vertex)>,
    },
}

impl Highlight {
    pub fn path(path: &ShortestPath) -> Self {
        Highlight::Path {
            vertices: path.vertices.clone(),
        }
    }

    pub fn closest(graph: &GraphStore, source: Vertex, nearest: &Nearest) -> Self {
        let edge = graph
            .weight(&source, &nearest.vertex)
            .map(|_| (source, nearest.vertex));
        Highlight::Closest {
            source,
            closest: nearest.vertex,
            edge,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub vertices: Vec<SceneVertex>,
    pub edges: Vec<SceneEdge>,
    pub highlight: Highlight,
}

impl Scene {
    pub fn build(graph: &GraphStore, highlight: Highlight) -> Self {
        let vertices = graph
            .vertices()
            .map(|v| SceneVertex {
                vertex: *v,
                x: v.x(),
                y: v.y(),
                label: v.key(),
            })
            .collect();

        let edges = graph
            .edges()
            .map(|(from, to, weight)| SceneEdge {
                from,
                to,
                weight,
                label: format!("{:.2}", weight),
            })
            .collect();

        Self {
            vertices,
            edges,
            highlight,
        }
    }

    pub fn plain(graph: &GraphStore) -> Self {
        Self::build(graph, Highlight::None)
    }
}
