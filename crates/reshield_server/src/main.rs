use axum::{
    extract::{Json, State},
    http::{Method, StatusCode},
    response::Html,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use reshield::{assess, AssessError, AssessmentReport};
use reshield_core::record::PatientRecord;
use reshield_model::{ArtifactPaths, ScoringContext};
use reshield_risk::RiskLabel;

#[derive(Debug, Serialize)]
struct PredictResponse {
    label: RiskLabel,
    headline: String,
    probability: f64,
    probability_pct: String,
    risk_factors: Vec<String>,
    model_id: String,
    model_version: String,
}

impl From<AssessmentReport> for PredictResponse {
    fn from(report: AssessmentReport) -> Self {
        let headline = if report.label.is_high() {
            "High Risk of Readmission".to_string()
        } else {
            "Low Risk".to_string()
        };
        PredictResponse {
            label: report.label,
            headline,
            probability: report.probability,
            probability_pct: report.probability_pct,
            risk_factors: report.risk_factors,
            model_id: report.model_id,
            model_version: report.model_version,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct SchemaResponse {
    model_id: String,
    model_version: String,
    trained_at: Option<String>,
    n_features: usize,
    columns: Vec<String>,
}

fn artifact_paths_from_env() -> ArtifactPaths {
    let defaults = ArtifactPaths::default();
    let model = std::env::var("RESHIELD_MODEL_PATH")
        .map(PathBuf::from)
        .unwrap_or(defaults.model);
    let features = std::env::var("RESHIELD_FEATURES_PATH")
        .map(PathBuf::from)
        .unwrap_or(defaults.features);
    ArtifactPaths::new(model, features)
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let paths = artifact_paths_from_env();
    let context = match ScoringContext::load(&paths) {
        Ok(context) => Arc::new(context),
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!(
                "hint: run 'reshield demo' to write a demo artifact pair, or set \
                 RESHIELD_MODEL_PATH and RESHIELD_FEATURES_PATH"
            );
            std::process::exit(2);
        }
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/schema", get(schema))
        .route("/predict", post(predict))
        .layer(cors)
        .with_state(context);

    let addr = SocketAddr::from(([127, 0, 0, 1], 8720));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    println!("reshield_server listening on http://{addr}");
    axum::serve(listener, app).await.unwrap();
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

async fn health() -> &'static str {
    "ok"
}

async fn schema(State(context): State<Arc<ScoringContext>>) -> Json<SchemaResponse> {
    let model = context.model();
    Json(SchemaResponse {
        model_id: model.model_id.clone(),
        model_version: model.model_version.clone(),
        trained_at: model.trained_at.clone(),
        n_features: model.n_features,
        columns: context.schema().columns().to_vec(),
    })
}

async fn predict(
    State(context): State<Arc<ScoringContext>>,
    Json(record): Json<PatientRecord>,
) -> Result<Json<PredictResponse>, (StatusCode, Json<ErrorResponse>)> {
    match assess(&context, &record) {
        Ok(report) => Ok(Json(PredictResponse::from(report))),
        Err(e @ AssessError::Record(_)) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
        Err(e) => {
            log::error!("scoring failed: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}
