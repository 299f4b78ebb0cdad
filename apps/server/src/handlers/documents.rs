//! Markdown document import endpoint.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_shared::dto::ImportResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ImportQuery {
    pub filename: String,
}

/// POST /api/v1/documents?filename=x.md
///
/// The raw document bytes are the request body. The importer reports
/// every failure as a structured outcome, so this handler only decides
/// the status code.
pub async fn import(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<ImportQuery>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let outcome = state
        .importer
        .import(&body, &query.filename, identity.admin_id)
        .await;

    let response = ImportResponse {
        success: outcome.success,
        message: outcome.message,
        post_id: outcome.post.as_ref().map(|p| p.id.to_string()),
    };

    if response.success {
        tracing::info!(filename = %query.filename, author = %identity.username, "Document imported");
        Ok(HttpResponse::Created().json(response))
    } else {
        tracing::info!(filename = %query.filename, message = %response.message, "Document rejected");
        Ok(HttpResponse::UnprocessableEntity().json(response))
    }
}
