use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => {
                HttpError::BadRequest(format!("Validation failed: {errors:?}"))
            }

            ServiceError::IdExists => {
                HttpError::BadRequest("A new entity cannot already have an ID".into())
            }

            ServiceError::InvalidQuery(msg) => HttpError::BadRequest(msg),

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Not found".into()),
                RepositoryError::InvalidQuery(msg) => HttpError::BadRequest(msg),
                _ => HttpError::Internal("Repository error".into()),
            },

            ServiceError::Internal(msg) => HttpError::Internal(msg),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse {
            status: "error".into(),
            message: msg,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_repository_error_maps_to_404() {
        let err = HttpError::from(ServiceError::Repo(RepositoryError::NotFound));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn rejected_search_query_maps_to_400() {
        let err = HttpError::from(ServiceError::Repo(RepositoryError::InvalidQuery(
            "Syntax Error: (tea".into(),
        )));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn search_index_failure_maps_to_500() {
        let err = HttpError::from(ServiceError::Repo(RepositoryError::Search(
            "index writer poisoned".into(),
        )));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_query_maps_to_400() {
        let err = HttpError::from(ServiceError::InvalidQuery("unbalanced".into()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_failure_maps_to_500() {
        let err = HttpError::from(ServiceError::Repo(RepositoryError::Sqlx(
            sqlx::Error::RowNotFound,
        )));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
