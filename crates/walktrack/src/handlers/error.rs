use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use walktrack_core::records::ValidationErrors;
use walktrack_core::storage::{repository_error_to_status_code, RepositoryError};

use crate::service::ServiceError;

pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self(
            RepositoryError::NotFound {
                entity_type,
                id: id.into(),
            }
            .into(),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, errors) = classify(&self.0);

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        let mut body = json!({
            "status": status.as_u16(),
            "message": self.0.to_string(),
        });
        if let Some(errors) = errors {
            body["errors"] = Value::Object(errors);
        }

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

fn classify(err: &anyhow::Error) -> (StatusCode, Option<Map<String, Value>>) {
    if let Some(service_error) = err.downcast_ref::<ServiceError>() {
        return match service_error {
            ServiceError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Some(field_errors(errors)))
            }
            ServiceError::Repository(repo_error) => (repository_status(repo_error), None),
        };
    }
    if let Some(errors) = err.downcast_ref::<ValidationErrors>() {
        return (StatusCode::BAD_REQUEST, Some(field_errors(errors)));
    }
    if let Some(repo_error) = err.downcast_ref::<RepositoryError>() {
        return (repository_status(repo_error), None);
    }
    if let Some(rejection) = err.downcast_ref::<JsonRejection>() {
        let status = match rejection {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        return (status, None);
    }

    (StatusCode::INTERNAL_SERVER_ERROR, None)
}

fn repository_status(err: &RepositoryError) -> StatusCode {
    let code = repository_error_to_status_code(err);
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// First message per field.
fn field_errors(errors: &ValidationErrors) -> Map<String, Value> {
    let mut fields = Map::new();
    for error in errors.iter() {
        fields
            .entry(error.field())
            .or_insert_with(|| Value::String(error.to_string()));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use walktrack_core::records::ValidationError;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_is_404() {
        let (status, body) = render(AppError::not_found("User", "7")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], 404);
        assert_eq!(body["message"], "User not found: 7");
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_validation_errors_list_fields() {
        let mut errors = ValidationErrors::default();
        errors.push(ValidationError::NameLength);
        errors.push(ValidationError::InvalidEmail);

        let (status, body) = render(ServiceError::Validation(errors).into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert_eq!(
            body["errors"]["name"],
            "Name must be between 2 and 60 characters"
        );
        assert_eq!(body["errors"]["email"], "Email must be a valid address");
    }

    #[tokio::test]
    async fn test_repository_errors_map_through_status_table() {
        let conflict = RepositoryError::AlreadyExists {
            entity_type: "User",
            id: "ana@example.com".to_string(),
        };
        let (status, _) = render(ServiceError::Repository(conflict).into()).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let down = RepositoryError::ConnectionFailed("closed".to_string());
        let (status, body) = render(down.into()).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["message"], "Connection failed: closed");
    }

    #[tokio::test]
    async fn test_unknown_errors_are_500() {
        let (status, body) = render(anyhow::anyhow!("boom").into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], 500);
    }
}
