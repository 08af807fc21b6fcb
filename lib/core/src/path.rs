use crate::vertex::distance;
use crate::{Error, GraphStore, Result, Vertex};
use ahash::AHashMap;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tracing::debug;

/// Shortest path from start to end, both inclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPath {
    pub vertices: Vec<Vertex>,
    /// Sum of the edge weights along `vertices`.
    pub distance: f64,
}

impl ShortestPath {
    /// Canonical `"(x, y)"` keys of the path vertices.
    pub fn keys(&self) -> Vec<String> {
        self.vertices.iter().map(Vertex::key).collect()
    }

    /// Consecutive vertex pairs along the path.
    pub fn segments(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.vertices.windows(2).map(|w| (w[0], w[1]))
    }

    #[inline]
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
}

/// Closest vertex to a query point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Nearest {
    pub vertex: Vertex,
    pub distance: f64,
}

/// Read-only query engine over a [`GraphStore`].
pub struct PathEngine<'g> {
    graph: &'g GraphStore,
}

// Min-heap entry. Equal distances pop in ascending vertex order.
type QueueEntry = Reverse<(OrderedFloat<f64>, Vertex)>;

impl<'g> PathEngine<'g> {
    pub fn new(graph: &'g GraphStore) -> Self {
        Self { graph }
    }

    /// Dijkstra from `start` to `end`.
    ///
    /// Returns `Ok(None)` when `end` is unreachable. Fails with
    /// [`Error::InvalidVertex`] if either endpoint is not in the graph.
    /// Superseded queue entries are skipped on pop rather than removed.
    pub fn find_shortest_path(&self, start: &Vertex, end: &Vertex) -> Result<Option<ShortestPath>> {
        for endpoint in [start, end] {
            if !self.graph.contains(endpoint) {
                return Err(Error::InvalidVertex(endpoint.key()));
            }
        }

        let capacity = self.graph.vertex_count();
        // Absent entries stand for +infinity
        let mut dist: AHashMap<Vertex, f64> = AHashMap::with_capacity(capacity);
        let mut previous: AHashMap<Vertex, Vertex> = AHashMap::with_capacity(capacity);
        let mut queue: BinaryHeap<QueueEntry> = BinaryHeap::new();
        let mut settled = 0usize;

        dist.insert(*start, 0.0);
        queue.push(Reverse((OrderedFloat(0.0), *start)));

        while let Some(Reverse((OrderedFloat(current_dist), current))) = queue.pop() {
            if current_dist > tentative(&dist, &current) {
                continue;
            }
            settled += 1;

            if current == *end {
                let vertices = reconstruct(&previous, *start, current);
                debug!(%start, %end, settled, hops = vertices.len() - 1, "shortest path found");
                return Ok(Some(ShortestPath {
                    vertices,
                    distance: current_dist,
                }));
            }

            for (neighbor, weight) in self.graph.neighbors(&current) {
                let candidate = current_dist + weight;
                if candidate < tentative(&dist, &neighbor) {
                    dist.insert(neighbor, candidate);
                    previous.insert(neighbor, current);
                    queue.push(Reverse((OrderedFloat(candidate), neighbor)));
                }
            }
        }

        debug!(%start, %end, settled, "no path");
        Ok(None)
    }

    /// Same as [`find_shortest_path`](Self::find_shortest_path) with endpoints
    /// given as `"(x, y)"` keys.
    pub fn find_shortest_path_by_key(&self, start: &str, end: &str) -> Result<Option<ShortestPath>> {
        let start: Vertex = start.parse()?;
        let end: Vertex = end.parse()?;
        self.find_shortest_path(&start, &end)
    }

    /// Linear scan for the vertex closest to `point`, never returning `point`
    /// itself. Equal distances resolve to the smallest vertex.
    pub fn find_closest_vertex(&self, point: &Vertex) -> Result<Nearest> {
        if self.graph.is_empty() {
            return Err(Error::EmptyGraph);
        }

        let mut best: Option<Nearest> = None;
        for vertex in self.graph.vertices() {
            if vertex == point {
                continue;
            }
            let d = distance(point, vertex);
            if best.map_or(true, |b| d < b.distance) {
                best = Some(Nearest {
                    vertex: *vertex,
                    distance: d,
                });
            }
        }

        best.ok_or_else(|| Error::NoOtherVertex(point.key()))
    }
}

#[inline]
fn tentative(dist: &AHashMap<Vertex, f64>, vertex: &Vertex) -> f64 {
    dist.get(vertex).copied().unwrap_or(f64::INFINITY)
}

/// Walk `previous` pointers back from `end` and reverse.
fn reconstruct(previous: &AHashMap<Vertex, Vertex>, start: Vertex, end: Vertex) -> Vec<Vertex> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        match previous.get(&current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphDescription;

    fn v(x: f64, y: f64) -> Vertex {
        Vertex::new(x, y).unwrap()
    }

    fn graph(json: &str) -> GraphStore {
        GraphStore::build(&GraphDescription::from_json_str(json).unwrap()).unwrap()
    }

    /// n x n lattice with unit spacing, 4-connected, plus one diagonal per cell.
    fn lattice(n: usize) -> GraphStore {
        let mut g = GraphStore::new();
        for i in 0..n {
            for j in 0..n {
                g.add_vertex(v(i as f64, j as f64));
            }
        }
        for i in 0..n {
            for j in 0..n {
                let here = v(i as f64, j as f64);
                if i + 1 < n {
                    g.add_edge(here, v((i + 1) as f64, j as f64)).unwrap();
                }
                if j + 1 < n {
                    g.add_edge(here, v(i as f64, (j + 1) as f64)).unwrap();
                }
                if i + 1 < n && j + 1 < n && (i + j) % 2 == 0 {
                    g.add_edge(here, v((i + 1) as f64, (j + 1) as f64)).unwrap();
                }
            }
        }
        g
    }

    fn path_weight(g: &GraphStore, path: &ShortestPath) -> f64 {
        path.segments()
            .map(|(a, b)| g.weight(&a, &b).expect("path uses a missing edge"))
            .sum()
    }

    #[test]
    fn test_path_avoids_missing_direct_edge() {
        let g = graph(r#"{"(0, 0)": [[3, 0]], "(3, 0)": [[3, 4]]}"#);
        let engine = PathEngine::new(&g);
        let path = engine.find_shortest_path(&v(0.0, 0.0), &v(3.0, 4.0)).unwrap().unwrap();
        assert_eq!(path.vertices, vec![v(0.0, 0.0), v(3.0, 0.0), v(3.0, 4.0)]);
        assert!((path.distance - 7.0).abs() < 1e-9);
        assert_eq!(path.hops(), 2);
    }

    #[test]
    fn test_direct_edge_wins() {
        let g = graph(r#"{"(0, 0)": [[3, 0], [3, 4]], "(3, 0)": [[3, 4]]}"#);
        let engine = PathEngine::new(&g);
        let path = engine.find_shortest_path(&v(0.0, 0.0), &v(3.0, 4.0)).unwrap().unwrap();
        assert_eq!(path.vertices, vec![v(0.0, 0.0), v(3.0, 4.0)]);
        assert!((path.distance - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_large_coordinates_stay_connected() {
        let mut g = GraphStore::new();
        let a = v(0.0, 0.0);
        let b = v(1e200, 0.0);
        g.add_vertex(a);
        g.add_vertex(b);
        g.add_edge(a, b).unwrap();
        assert_eq!(g.weight(&a, &b), Some(1e200));

        let path = PathEngine::new(&g).find_shortest_path(&a, &b).unwrap().unwrap();
        assert_eq!(path.vertices, vec![a, b]);
        assert_eq!(path.distance, 1e200);
    }

    #[test]
    fn test_path_to_self() {
        let g = graph(r#"{"(0, 0)": [[1, 0]]}"#);
        let engine = PathEngine::new(&g);
        let path = engine.find_shortest_path(&v(1.0, 0.0), &v(1.0, 0.0)).unwrap().unwrap();
        assert_eq!(path.vertices, vec![v(1.0, 0.0)]);
        assert_eq!(path.distance, 0.0);
        assert_eq!(path.hops(), 0);
    }

    #[test]
    fn test_disconnected_is_absent_not_error() {
        let g = graph(r#"{"(0, 0)": [[1, 0]], "(5, 5)": [[6, 5]]}"#);
        let engine = PathEngine::new(&g);
        let result = engine.find_shortest_path(&v(0.0, 0.0), &v(6.0, 5.0)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_unknown_endpoint_is_invalid_vertex() {
        let g = graph(r#"{"(0, 0)": [[1, 0]]}"#);
        let engine = PathEngine::new(&g);
        let err = engine.find_shortest_path(&v(0.0, 0.0), &v(9.0, 9.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidVertex(ref k) if k == "(9.0, 9.0)"));
        let err = engine.find_shortest_path(&v(9.0, 9.0), &v(0.0, 0.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidVertex(_)));
    }

    #[test]
    fn test_by_key() {
        let g = graph(r#"{"(0, 0)": [[3, 0]], "(3, 0)": [[3, 4]]}"#);
        let engine = PathEngine::new(&g);
        let path = engine.find_shortest_path_by_key("(0.0, 0.0)", "(3.0, 4.0)").unwrap().unwrap();
        assert_eq!(path.keys(), vec!["(0.0, 0.0)", "(3.0, 0.0)", "(3.0, 4.0)"]);

        assert!(matches!(
            engine.find_shortest_path_by_key("(0.0, 0.0)", "nowhere"),
            Err(Error::MalformedKey(_))
        ));
    }

    #[test]
    fn test_distance_matches_edge_sum_on_lattice() {
        let g = lattice(6);
        let engine = PathEngine::new(&g);
        let start = v(0.0, 0.0);
        for target in g.vertices() {
            let path = engine.find_shortest_path(&start, target).unwrap().unwrap();
            assert_eq!(path.vertices.first(), Some(&start));
            assert_eq!(path.vertices.last(), Some(target));
            assert!((path_weight(&g, &path) - path.distance).abs() < 1e-9);
        }
    }

    #[test]
    fn test_matches_floyd_warshall() {
        let g = lattice(5);
        let vertices: Vec<Vertex> = g.vertices().copied().collect();
        let n = vertices.len();
        let index: AHashMap<Vertex, usize> =
            vertices.iter().enumerate().map(|(i, v)| (*v, i)).collect();

        let mut best = vec![vec![f64::INFINITY; n]; n];
        for i in 0..n {
            best[i][i] = 0.0;
        }
        for (a, b, w) in g.edges() {
            best[index[&a]][index[&b]] = w;
            best[index[&b]][index[&a]] = w;
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    let via = best[i][k] + best[k][j];
                    if via < best[i][j] {
                        best[i][j] = via;
                    }
                }
            }
        }

        let engine = PathEngine::new(&g);
        for (i, a) in vertices.iter().enumerate() {
            for (j, b) in vertices.iter().enumerate() {
                let path = engine.find_shortest_path(a, b).unwrap().unwrap();
                assert!(
                    (path.distance - best[i][j]).abs() < 1e-9,
                    "{} -> {}: dijkstra {} vs floyd {}",
                    a,
                    b,
                    path.distance,
                    best[i][j]
                );
            }
        }
    }

    #[test]
    fn test_closest_skips_query_vertex() {
        let g = graph(r#"{"(0, 0)": [[1, 0]], "(10, 0)": []}"#);
        let engine = PathEngine::new(&g);
        let nearest = engine.find_closest_vertex(&v(0.0, 0.0)).unwrap();
        assert_eq!(nearest.vertex, v(1.0, 0.0));
        assert!((nearest.distance - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_closest_for_off_graph_point() {
        let g = graph(r#"{"(0, 0)": [[1, 0]], "(10, 0)": []}"#);
        let engine = PathEngine::new(&g);
        let nearest = engine.find_closest_vertex(&v(8.0, 0.0)).unwrap();
        assert_eq!(nearest.vertex, v(10.0, 0.0));
        assert!((nearest.distance - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_closest_tie_is_minimum_and_deterministic() {
        let g = graph(r#"{"(0, 0)": [], "(1, 1)": []}"#);
        let engine = PathEngine::new(&g);
        let nearest = engine.find_closest_vertex(&v(0.0, 1.0)).unwrap();
        assert_eq!(nearest.distance, 1.0);
        assert_eq!(nearest.vertex, v(0.0, 0.0));
    }

    #[test]
    fn test_closest_empty_graph() {
        let g = GraphStore::new();
        let engine = PathEngine::new(&g);
        assert!(matches!(engine.find_closest_vertex(&v(0.0, 0.0)), Err(Error::EmptyGraph)));
    }

    #[test]
    fn test_closest_only_self() {
        let g = graph(r#"{"(2, 2)": []}"#);
        let engine = PathEngine::new(&g);
        assert!(matches!(
            engine.find_closest_vertex(&v(2.0, 2.0)),
            Err(Error::NoOtherVertex(_))
        ));
        // A different point still finds the single vertex
        let nearest = engine.find_closest_vertex(&v(2.0, 5.0)).unwrap();
        assert_eq!(nearest.vertex, v(2.0, 2.0));
        assert!((nearest.distance - 3.0).abs() < 1e-12);
    }
}
