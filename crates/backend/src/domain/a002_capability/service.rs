use super::repository;
use contracts::domain::a002_capability::aggregate::{Capability, CapabilityDto};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Создание новой возможности
pub async fn create(db: &DatabaseConnection, dto: CapabilityDto) -> Result<Uuid, DomainError> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("CAP-{}", &Uuid::new_v4().simple().to_string()[..8]));
    let mut aggregate = Capability::new_for_insert(code, dto.description, dto.comment);

    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    let id = repository::insert(db, &aggregate).await?;
    tracing::info!("Capability {} created ({})", aggregate.code, id);
    Ok(id)
}

/// Мягкое удаление возможности
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, DomainError> {
    Ok(repository::soft_delete(db, id).await?)
}

pub async fn get_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<Capability>, DomainError> {
    let found = repository::get_by_id(db, id).await?;
    Ok(found.filter(|c| !c.metadata.is_deleted))
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Capability>, DomainError> {
    Ok(repository::list_all(db).await?)
}
