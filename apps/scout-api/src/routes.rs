use axum::{
	Json, Router,
	extract::{State, rejection::JsonRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};

use scout_service::{Error as ServiceError, FindCreatorsRequest, FindCreatorsResponse};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/creators/search", post(find_creators))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn find_creators(
	State(state): State<AppState>,
	payload: Result<Json<FindCreatorsRequest>, JsonRejection>,
) -> Result<Json<FindCreatorsResponse>, ApiError> {
	let Json(request) = payload.map_err(|rejection| {
		ApiError::from(ServiceError::InvalidRequest { message: rejection.body_text() })
	})?;
	let creators = state.service.try_find_creators(request).await?;

	Ok(Json(FindCreatorsResponse::ok(creators)))
}

/// Failure response carrying the same body shape as a success.
#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	body: FindCreatorsResponse,
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let status = match &err {
			ServiceError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
			ServiceError::SearchFailure { .. }
			| ServiceError::RerankFailure { .. }
			| ServiceError::Storage { .. }
			| ServiceError::Qdrant { .. }
			| ServiceError::Provider { .. } => StatusCode::BAD_GATEWAY,
		};

		Self { status, body: FindCreatorsResponse::failure(&err) }
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(self.status, Json(self.body)).into_response()
	}
}
