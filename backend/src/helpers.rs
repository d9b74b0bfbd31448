use axum::http::StatusCode;

use crate::repository::RepoError;

pub type ApiResult<T> = Result<T, (StatusCode, String)>;

pub fn to_500<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    tracing::error!(error = %e, "internal error");
    (StatusCode::INTERNAL_SERVER_ERROR, "Erreur interne du serveur.".into())
}

pub fn from_repo(e: RepoError) -> (StatusCode, String) {
    match e {
        RepoError::NotFound(_) => not_found(e.to_string()),
        RepoError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        RepoError::Invalid(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
        RepoError::IdsExhausted | RepoError::Database(_) => to_500(e),
    }
}

pub fn not_found(msg: impl Into<String>) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, msg.into())
}
