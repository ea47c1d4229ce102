use actix_cors::Cors;
use actix_web::http::{header, StatusCode};
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use catgraph_core::{Error, NodeId, Report};
use catgraph_storage::{AnalyzeError, CatalogStore, ReportExporter, StorageManager};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

#[derive(Deserialize)]
struct CreateCategoryRequest {
    name: String,
}

#[derive(Serialize)]
struct CategoryInfo {
    id: NodeId,
    name: String,
    similar_to: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct SimilarityPair {
    category_a: NodeId,
    category_b: NodeId,
}

#[derive(Deserialize)]
struct ExportQuery {
    download: Option<String>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(storage: Arc<StorageManager>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            let storage = storage.clone();
            App::new()
                .wrap(cors)
                .configure(move |cfg| RestApi::configure(cfg, storage))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }

    /// Register shared state and every route group.
    pub fn configure(cfg: &mut web::ServiceConfig, storage: Arc<StorageManager>) {
        cfg.app_data(web::Data::new(storage));
        configure_catalog(cfg);
        configure_reports(cfg);
    }
}

/// Category and similarity endpoints under `/api`.
pub fn configure_catalog(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/categories", web::get().to(list_categories))
            .route("/categories", web::post().to(create_category))
            .route("/categories/{id}", web::get().to(get_category))
            .route("/categories/{id}", web::delete().to(delete_category))
            .route("/similarities", web::get().to(list_similarities))
            .route("/similarities", web::post().to(create_similarity))
            .route("/similarities/{a}/{b}", web::put().to(edit_similarity))
            .route("/similarities/{a}/{b}", web::patch().to(edit_similarity))
            .route("/similarities/{a}/{b}", web::delete().to(delete_similarity)),
    );
}

/// Graph report export under `/admin`.
pub fn configure_reports(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/admin/export-graph-report/",
        web::get().to(export_graph_report),
    );
}

fn error_response(status: StatusCode, message: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "error": message.to_string()
    }))
}

async fn list_categories(storage: web::Data<Arc<StorageManager>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(storage.catalog().list_categories()))
}

async fn create_category(
    storage: web::Data<Arc<StorageManager>>,
    req: web::Json<CreateCategoryRequest>,
) -> ActixResult<HttpResponse> {
    let name = req.into_inner().name;
    if name.trim().is_empty() {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "Category name must not be empty",
        ));
    }

    match storage.catalog().add_category(name) {
        Ok(node) => Ok(HttpResponse::Created().json(node)),
        Err(e) => Ok(error_response(StatusCode::INTERNAL_SERVER_ERROR, e)),
    }
}

fn category_info(catalog: &CatalogStore, id: NodeId) -> catgraph_core::Result<CategoryInfo> {
    let node = catalog.get_category(id).ok_or(Error::CategoryNotFound(id))?;
    // Fails if the category is deleted between the two reads.
    let similar_to = catalog.similar_to(id)?;
    Ok(CategoryInfo {
        id: node.id,
        name: node.name,
        similar_to,
    })
}

async fn get_category(
    storage: web::Data<Arc<StorageManager>>,
    path: web::Path<NodeId>,
) -> ActixResult<HttpResponse> {
    match category_info(storage.catalog(), path.into_inner()) {
        Ok(info) => Ok(HttpResponse::Ok().json(info)),
        Err(Error::CategoryNotFound(_)) => {
            Ok(error_response(StatusCode::NOT_FOUND, "Category not found"))
        }
        Err(e) => Ok(error_response(StatusCode::INTERNAL_SERVER_ERROR, e)),
    }
}

async fn delete_category(
    storage: web::Data<Arc<StorageManager>>,
    path: web::Path<NodeId>,
) -> ActixResult<HttpResponse> {
    match storage.catalog().remove_category(path.into_inner()) {
        Ok(_) => Ok(HttpResponse::NoContent().finish()),
        Err(Error::CategoryNotFound(_)) => {
            Ok(error_response(StatusCode::NOT_FOUND, "Category not found"))
        }
        Err(e) => Ok(error_response(StatusCode::INTERNAL_SERVER_ERROR, e)),
    }
}

async fn list_similarities(storage: web::Data<Arc<StorageManager>>) -> ActixResult<HttpResponse> {
    let pairs: Vec<SimilarityPair> = storage
        .catalog()
        .list_similarities()
        .into_iter()
        .map(|edge| SimilarityPair {
            category_a: edge.a(),
            category_b: edge.b(),
        })
        .collect();
    Ok(HttpResponse::Ok().json(pairs))
}

async fn create_similarity(
    storage: web::Data<Arc<StorageManager>>,
    req: web::Json<SimilarityPair>,
) -> ActixResult<HttpResponse> {
    let SimilarityPair {
        category_a,
        category_b,
    } = req.into_inner();

    match storage.catalog().add_similarity(category_a, category_b) {
        Ok(true) => Ok(HttpResponse::Created().json(SimilarityPair {
            category_a: category_a.min(category_b),
            category_b: category_a.max(category_b),
        })),
        Ok(false) => Ok(HttpResponse::Ok().finish()),
        Err(e @ (Error::SelfSimilarity(_) | Error::CategoryNotFound(_))) => {
            Ok(error_response(StatusCode::BAD_REQUEST, e))
        }
        Err(e) => Ok(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            e,
        )),
    }
}

async fn edit_similarity() -> ActixResult<HttpResponse> {
    Ok(error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        "Editing similarities is not allowed.",
    ))
}

async fn delete_similarity(
    storage: web::Data<Arc<StorageManager>>,
    path: web::Path<(NodeId, NodeId)>,
) -> ActixResult<HttpResponse> {
    let (a, b) = path.into_inner();

    match storage.catalog().remove_similarity(a, b) {
        Ok(true) => Ok(HttpResponse::NoContent().finish()),
        Ok(false) => Ok(error_response(StatusCode::NOT_FOUND, "Similarity not found")),
        Err(e) => Ok(error_response(StatusCode::BAD_REQUEST, e)),
    }
}

fn inline_report(report: &Report) -> HttpResponse {
    match ReportExporter::to_document(report) {
        Ok(document) => HttpResponse::Ok()
            .content_type("application/json")
            .body(document),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

async fn export_graph_report(
    storage: web::Data<Arc<StorageManager>>,
    query: web::Query<ExportQuery>,
) -> ActixResult<HttpResponse> {
    let download = query.download.as_deref() == Some("1");

    match storage.analyze() {
        Ok((path, report)) => {
            if !download {
                return Ok(inline_report(&report));
            }
            match std::fs::read(&path) {
                Ok(bytes) => Ok(HttpResponse::Ok()
                    .content_type("application/json")
                    .insert_header((
                        header::CONTENT_DISPOSITION,
                        "attachment; filename=graph_report.json",
                    ))
                    .body(bytes)),
                Err(e) => Ok(error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    e,
                )),
            }
        }
        Err(e @ AnalyzeError::Export { .. }) => {
            if download {
                return Ok(error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    e,
                ));
            }
            warn!("Serving graph report without artifact: {}", e);
            match e.report() {
                Some(report) => Ok(inline_report(report)),
                None => Ok(error_response(StatusCode::INTERNAL_SERVER_ERROR, &e)),
            }
        }
        Err(e) => Ok(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            e,
        )),
    }
}
