use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use wordspace_core::Error;
use wordspace_explore::{params, Explorer};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MidpointRequest {
    word1: String,
    word2: String,
    num_results: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalogyRequest {
    word1: String,
    word2: String,
    word3: String,
    num_results: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NeighborsRequest {
    word: String,
    num_results: Option<usize>,
    min_score: Option<f32>,
}

#[derive(Deserialize)]
struct CompareRequest {
    word1: String,
    word2: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinearPathRequest {
    word1: String,
    word2: String,
    num_steps: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GreedyPathRequest {
    word1: String,
    word2: String,
    max_hops: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SliceRequest {
    word1: String,
    word2: String,
    num_results: Option<usize>,
    max_depth: Option<usize>,
}

#[derive(Deserialize)]
struct CoordinatesRequest {
    words: Vec<String>,
    dimensions: Option<usize>,
}

#[derive(Serialize)]
struct ExistsResponse {
    word: String,
    exists: bool,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(explorer: Explorer, port: u16) -> std::io::Result<()> {
        info!(
            "Serving {} store on http://0.0.0.0:{}/api",
            explorer.store().store_name(),
            port
        );
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(explorer.clone()))
                .configure(RestApi::configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }

    /// Register every route. Expects `web::Data<Explorer>` in app data.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.route("/health", web::get().to(health))
            .service(
                web::scope("/api")
                    .route("/words/{word}", web::get().to(word_exists))
                    .route("/neighbors", web::post().to(neighbors))
                    .route("/compare", web::post().to(compare))
                    .route("/midpoint", web::post().to(midpoint))
                    .route("/analogy", web::post().to(analogy))
                    .route("/linear-path", web::post().to(linear_path))
                    .route("/greedy-path", web::post().to(greedy_path))
                    .route("/slice", web::post().to(slice))
                    .route("/coordinates", web::post().to(coordinates)),
            );
    }
}

/// Structured error body naming the offending words where there are any
fn error_response(e: &Error) -> HttpResponse {
    match e {
        Error::NotFound { words } => HttpResponse::NotFound().json(serde_json::json!({
            "error": e.to_string(),
            "words": words,
        })),
        Error::InvalidInput(_) | Error::InvalidDimension { .. } => {
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            }))
        }
        Error::UpstreamUnavailable(_) => {
            error!("{}", e);
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "error": e.to_string()
            }))
        }
    }
}

fn respond<T: Serialize>(result: wordspace_core::Result<T>) -> ActixResult<HttpResponse> {
    match result {
        Ok(body) => Ok(HttpResponse::Ok().json(body)),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn health(explorer: web::Data<Explorer>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "store": explorer.store().store_name(),
    })))
}

async fn word_exists(
    explorer: web::Data<Explorer>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let word = path.into_inner();
    let exists = explorer.exists(&word).await;
    Ok(HttpResponse::Ok().json(ExistsResponse { word, exists }))
}

async fn neighbors(
    explorer: web::Data<Explorer>,
    req: web::Json<NeighborsRequest>,
) -> ActixResult<HttpResponse> {
    respond(
        explorer
            .find_neighbors(
                &req.word,
                req.num_results.unwrap_or(params::DEFAULT_NUM_RESULTS),
                req.min_score,
            )
            .await,
    )
}

async fn compare(
    explorer: web::Data<Explorer>,
    req: web::Json<CompareRequest>,
) -> ActixResult<HttpResponse> {
    respond(explorer.compare(&req.word1, &req.word2).await)
}

async fn midpoint(
    explorer: web::Data<Explorer>,
    req: web::Json<MidpointRequest>,
) -> ActixResult<HttpResponse> {
    respond(
        explorer
            .find_midpoint(
                &req.word1,
                &req.word2,
                req.num_results.unwrap_or(params::DEFAULT_NUM_RESULTS),
            )
            .await,
    )
}

async fn analogy(
    explorer: web::Data<Explorer>,
    req: web::Json<AnalogyRequest>,
) -> ActixResult<HttpResponse> {
    respond(
        explorer
            .find_analogy(
                &req.word1,
                &req.word2,
                &req.word3,
                req.num_results.unwrap_or(params::DEFAULT_NUM_RESULTS),
            )
            .await,
    )
}

async fn linear_path(
    explorer: web::Data<Explorer>,
    req: web::Json<LinearPathRequest>,
) -> ActixResult<HttpResponse> {
    respond(
        explorer
            .linear_path(
                &req.word1,
                &req.word2,
                req.num_steps.unwrap_or(params::DEFAULT_NUM_STEPS),
            )
            .await,
    )
}

async fn greedy_path(
    explorer: web::Data<Explorer>,
    req: web::Json<GreedyPathRequest>,
) -> ActixResult<HttpResponse> {
    respond(
        explorer
            .greedy_path(
                &req.word1,
                &req.word2,
                req.max_hops.unwrap_or(params::DEFAULT_MAX_HOPS),
            )
            .await,
    )
}

async fn slice(
    explorer: web::Data<Explorer>,
    req: web::Json<SliceRequest>,
) -> ActixResult<HttpResponse> {
    respond(
        explorer
            .slice(
                &req.word1,
                &req.word2,
                req.num_results.unwrap_or(params::DEFAULT_SLICE_RESULTS),
                req.max_depth.unwrap_or(params::DEFAULT_MAX_DEPTH),
            )
            .await,
    )
}

async fn coordinates(
    explorer: web::Data<Explorer>,
    req: web::Json<CoordinatesRequest>,
) -> ActixResult<HttpResponse> {
    if req.words.is_empty() {
        return Ok(error_response(&Error::InvalidInput(
            "'words' must not be empty".to_string(),
        )));
    }
    respond(
        explorer
            .coordinates(&req.words, req.dimensions.unwrap_or(2))
            .await,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let not_found = error_response(&Error::NotFound { words: vec!["x".to_string()] });
        assert_eq!(not_found.status(), 404);

        let bad = error_response(&Error::InvalidDimension { expected: 3, actual: 2 });
        assert_eq!(bad.status(), 400);

        let down = error_response(&Error::UpstreamUnavailable("timeout".to_string()));
        assert_eq!(down.status(), 503);
    }
}
