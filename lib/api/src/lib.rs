//! # routefinder API
//!
//! actix-web REST surface over the routefinder graph engine. The graph
//! description is parsed once and shared read-only; every request builds its
//! own [`GraphStore`](routefinder_core::GraphStore) from it.

pub mod rest;

pub use rest::RestApi;
