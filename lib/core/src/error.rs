use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Vertex does not exist in the graph: {0}")]
    InvalidVertex(String),

    #[error("Vertex not registered: {0}")]
    VertexNotFound(String),

    #[error("Self-loop edge rejected at {0}")]
    SelfLoop(String),

    #[error("Invalid coordinate: {0} is not a finite number")]
    InvalidCoordinate(f64),

    #[error("Malformed vertex key: {0:?}")]
    MalformedKey(String),

    #[error("Graph has no vertices")]
    EmptyGraph,

    #[error("No vertex other than the query point {0}")]
    NoOtherVertex(String),

    #[error("Graph description error: {0}")]
    Description(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
