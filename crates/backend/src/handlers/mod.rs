pub mod a001_company;
pub mod a002_capability;
pub mod table_settings;
pub mod ui;

use axum::http::StatusCode;

use crate::domain::error::DomainError;

pub(crate) fn domain_status(e: &DomainError) -> StatusCode {
    match e {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Internal(err) => {
            tracing::error!("{:#}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub(crate) fn parse_id(id: &str) -> Result<uuid::Uuid, StatusCode> {
    uuid::Uuid::parse_str(id).map_err(|_| StatusCode::BAD_REQUEST)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_status_mapping() {
        assert_eq!(
            domain_status(&DomainError::Validation("empty".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            domain_status(&DomainError::not_found("company", "42")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            domain_status(&DomainError::Internal(anyhow::anyhow!("disk full"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert_eq!(parse_id("not-a-uuid"), Err(StatusCode::BAD_REQUEST));
        assert!(parse_id(&uuid::Uuid::new_v4().to_string()).is_ok());
    }
}
