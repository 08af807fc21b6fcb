use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use routefinder_core::{Error, GraphDescription, GraphStore, Highlight, PathEngine, Scene, Vertex};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Deserialize)]
struct ShortestPathRequest {
    start: String,
    end: String,
}

#[derive(Deserialize)]
struct ClosestVertexRequest {
    point: String,
}

#[derive(Serialize)]
struct PathResult {
    path: Vec<String>,
    distance: f64,
}

#[derive(Serialize)]
struct ClosestResult {
    vertex: String,
    coordinates: [f64; 2],
    distance: f64,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        description: Arc<GraphDescription>,
        host: String,
        port: u16,
    ) -> std::io::Result<()> {
        info!("Serving {} graph entries on {}:{}", description.len(), host, port);

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(description.clone()))
                .configure(Self::routes)
        })
        .bind((host.as_str(), port))?
        .run()
        .await
    }

    /// Route table. Expects `web::Data<Arc<GraphDescription>>` in app data.
    pub fn routes(cfg: &mut web::ServiceConfig) {
        cfg.route("/health", web::get().to(health))
            .route("/vertices", web::get().to(list_vertices))
            .route("/graph", web::get().to(get_graph))
            .route("/shortest-path", web::post().to(shortest_path))
            .route("/closest-vertex", web::post().to(closest_vertex));
    }
}

fn error_response(err: &Error) -> HttpResponse {
    warn!("Query rejected: {}", err);
    let body = serde_json::json!({ "error": err.to_string() });
    match err {
        Error::InvalidVertex(_)
        | Error::VertexNotFound(_)
        | Error::EmptyGraph
        | Error::NoOtherVertex(_) => HttpResponse::NotFound().json(body),
        Error::MalformedKey(_) | Error::InvalidCoordinate(_) | Error::SelfLoop(_) => {
            HttpResponse::BadRequest().json(body)
        }
        Error::Description(_) | Error::Io(_) => {
            HttpResponse::InternalServerError().json(body)
        }
    }
}

async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })))
}

async fn list_vertices(
    description: web::Data<Arc<GraphDescription>>,
) -> ActixResult<HttpResponse> {
    let graph = match GraphStore::build(&description) {
        Ok(g) => g,
        Err(e) => return Ok(error_response(&e)),
    };

    let keys: Vec<String> = graph.vertices().map(Vertex::key).collect();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": keys
    })))
}

async fn get_graph(
    description: web::Data<Arc<GraphDescription>>,
) -> ActixResult<HttpResponse> {
    let graph = match GraphStore::build(&description) {
        Ok(g) => g,
        Err(e) => return Ok(error_response(&e)),
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": Scene::plain(&graph)
    })))
}

async fn shortest_path(
    description: web::Data<Arc<GraphDescription>>,
    req: web::Json<ShortestPathRequest>,
) -> ActixResult<HttpResponse> {
    let graph = match GraphStore::build(&description) {
        Ok(g) => g,
        Err(e) => return Ok(error_response(&e)),
    };
    let engine = PathEngine::new(&graph);

    match engine.find_shortest_path_by_key(&req.start, &req.end) {
        Ok(Some(path)) => {
            let scene = Scene::build(&graph, Highlight::path(&path));
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "result": PathResult {
                    path: path.keys(),
                    distance: path.distance,
                },
                "scene": scene
            })))
        }
        Ok(None) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": null,
            "scene": Scene::plain(&graph)
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn closest_vertex(
    description: web::Data<Arc<GraphDescription>>,
    req: web::Json<ClosestVertexRequest>,
) -> ActixResult<HttpResponse> {
    let point: Vertex = match req.point.parse() {
        Ok(p) => p,
        Err(e) => return Ok(error_response(&e)),
    };

    let graph = match GraphStore::build(&description) {
        Ok(g) => g,
        Err(e) => return Ok(error_response(&e)),
    };

    match PathEngine::new(&graph).find_closest_vertex(&point) {
        Ok(nearest) => {
            let scene = Scene::build(&graph, Highlight::closest(&graph, point, &nearest));
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "result": ClosestResult {
                    vertex: nearest.vertex.key(),
                    coordinates: nearest.vertex.coords(),
                    distance: nearest.distance,
                },
                "scene": scene
            })))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
