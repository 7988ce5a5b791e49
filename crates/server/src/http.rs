//! HTTP surface over the booking service.

use std::{future::Future, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use shipping_core::{BookingService, BookingView, ErrorKind, ShippingError};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Base path of the shipping resource.
pub const SHIPPING_PATH: &str = "/api/shipping";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    booking: BookingService,
    currency: Arc<str>,
}

impl AppState {
    /// Wrap the booking service with the currency label shown on bookings.
    pub fn new(booking: BookingService, currency: impl Into<Arc<str>>) -> Self {
        Self {
            booking,
            currency: currency.into(),
        }
    }
}

/// Body of `POST /api/shipping`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookShippingRequest {
    /// Origin location code.
    pub origin: String,
    /// Destination location code.
    pub destination: String,
    /// Shipment weight.
    pub weight: f64,
}

/// Response of `POST /api/shipping`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookShippingResponse {
    /// Identifier of the new booking.
    pub id: String,
}

/// Error rendered as `{"error": message}` with a matching status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<ShippingError> for ApiError {
    fn from(err: ShippingError) -> Self {
        let status = match err.kind() {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.message().to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/shipping", post(book_shipping))
        .route("/shipping/:id", get(get_booking));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
        .layer(middleware::from_fn(log_status))
        .layer(TraceLayer::new_for_http())
}

/// Serve until `shutdown` resolves, letting in-flight requests finish.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("starting http server on {}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

async fn book_shipping(
    State(state): State<AppState>,
    payload: Result<Json<BookShippingRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let id = state
        .booking
        .book_shipping(&request.origin, &request.destination, request.weight)?;

    let location = format!("{SHIPPING_PATH}/{id}");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(BookShippingResponse { id }),
    )
        .into_response())
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookingView>, ApiError> {
    let booking = state.booking.get_booking(&id)?;
    Ok(Json(booking.view(&state.currency)))
}

async fn log_status(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    let status = response.status();
    if status.is_server_error() {
        error!(status = status.as_u16(), %method, %path, "request failed");
    } else if status.is_client_error() {
        info!(status = status.as_u16(), %method, %path, "request rejected");
    }
    response
}
