use crate::vertex::distance;
use crate::{Error, GraphDescription, Result, Vertex};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Undirected, Euclidean-weighted graph over coordinate vertices.
///
/// Every edge is stored in both adjacency records with the same weight, and
/// every neighbor is itself a registered vertex. Adjacency is kept in sorted
/// maps so iteration order (and therefore every tie-break) is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphStore {
    adjacency: BTreeMap<Vertex, BTreeMap<Vertex, f64>>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a description.
    ///
    /// All keys and neighbor pairs are validated before anything is
    /// registered, so a malformed description never yields a partial store.
    /// Entries listing a vertex as its own neighbor are skipped.
    pub fn build(description: &GraphDescription) -> Result<Self> {
        let mut parsed: Vec<(Vertex, Vec<Vertex>)> = Vec::with_capacity(description.len());
        for (key, neighbors) in description.entries() {
            let source: Vertex = key.parse()?;
            let neighbors = neighbors
                .iter()
                .map(|&pair| Vertex::from_pair(pair))
                .collect::<Result<Vec<_>>>()?;
            parsed.push((source, neighbors));
        }

        let mut store = Self::new();
        for (source, neighbors) in &parsed {
            store.add_vertex(*source);
            for &neighbor in neighbors {
                store.add_vertex(neighbor);
            }
        }

        for (source, neighbors) in &parsed {
            for neighbor in neighbors {
                if source == neighbor {
                    warn!(vertex = %source, "skipping self-loop in graph description");
                    continue;
                }
                store.add_edge(*source, *neighbor)?;
            }
        }

        debug!(
            vertices = store.vertex_count(),
            edges = store.edge_count(),
            "graph store built"
        );
        Ok(store)
    }

    /// Register a vertex with an empty adjacency record.
    /// Returns `false` if it was already present.
    pub fn add_vertex(&mut self, vertex: Vertex) -> bool {
        if self.adjacency.contains_key(&vertex) {
            return false;
        }
        self.adjacency.insert(vertex, BTreeMap::new());
        true
    }

    /// Insert an undirected edge weighted by the Euclidean distance between
    /// its endpoints. Returns `false` if the edge already existed.
    pub fn add_edge(&mut self, a: Vertex, b: Vertex) -> Result<bool> {
        if a == b {
            return Err(Error::SelfLoop(a.key()));
        }
        for endpoint in [&a, &b] {
            if !self.adjacency.contains_key(endpoint) {
                return Err(Error::VertexNotFound(endpoint.key()));
            }
        }

        let weight = distance(&a, &b);
        let inserted = match self.adjacency.get_mut(&a) {
            Some(record) if !record.contains_key(&b) => {
                record.insert(b, weight);
                true
            }
            _ => false,
        };
        if inserted {
            if let Some(record) = self.adjacency.get_mut(&b) {
                record.insert(a, weight);
            }
        }
        Ok(inserted)
    }

    #[inline]
    pub fn contains(&self, vertex: &Vertex) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Neighbors of `vertex` with edge weights, in vertex order.
    /// Empty for an unregistered vertex.
    pub fn neighbors(&self, vertex: &Vertex) -> impl Iterator<Item = (Vertex, f64)> + '_ {
        self.adjacency
            .get(vertex)
            .into_iter()
            .flat_map(|record| record.iter().map(|(n, w)| (*n, *w)))
    }

    pub fn weight(&self, a: &Vertex, b: &Vertex) -> Option<f64> {
        self.adjacency.get(a).and_then(|record| record.get(b)).copied()
    }

    /// All vertices in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.adjacency.keys()
    }

    /// Every undirected edge once, as `(a, b, weight)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex, f64)> + '_ {
        self.adjacency.iter().flat_map(|(a, record)| {
            record
                .iter()
                .filter(move |(b, _)| a < *b)
                .map(move |(b, w)| (*a, *b, *w))
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|r| r.len()).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Emit the store as a description with canonical keys. Every vertex
    /// lists all of its neighbors, so rebuilding yields an identical store.
    pub fn to_description(&self) -> GraphDescription {
        self.adjacency
            .iter()
            .map(|(vertex, record)| {
                (vertex.key(), record.keys().map(Vertex::coords).collect::<Vec<_>>())
            })
            .collect()
    }
}
