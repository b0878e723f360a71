use super::{capability_link, repository};
use contracts::domain::a001_company::aggregate::{CapabilityRef, Company, CompanyDto};
use contracts::domain::a002_capability::aggregate::Capability;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::domain::a002_capability;
use crate::domain::error::DomainError;

/// Создание новой компании
pub async fn create(db: &DatabaseConnection, dto: CompanyDto) -> Result<Uuid, DomainError> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("CMP-{}", &Uuid::new_v4().simple().to_string()[..8]));
    let mut aggregate = Company::new_for_insert(code, dto.description, dto.website, dto.comment);

    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    let id = repository::insert(db, &aggregate).await?;
    tracing::info!("Company {} created ({})", aggregate.code, id);
    Ok(id)
}

/// Обновление существующей компании
pub async fn update(db: &DatabaseConnection, dto: CompanyDto) -> Result<(), DomainError> {
    let id = dto
        .id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| DomainError::Validation("Invalid ID".into()))?;

    let mut aggregate = repository::get_by_id(db, id)
        .await?
        .filter(|c| !c.metadata.is_deleted)
        .ok_or_else(|| DomainError::not_found("company", id))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    repository::update(db, &aggregate).await?;
    Ok(())
}

/// Мягкое удаление компании
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, DomainError> {
    Ok(repository::soft_delete(db, id).await?)
}

/// Компания вместе с привязанными возможностями
pub async fn get_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<Company>, DomainError> {
    let Some(company) = repository::get_by_id(db, id)
        .await?
        .filter(|c| !c.metadata.is_deleted)
    else {
        return Ok(None);
    };

    let linked_ids = capability_link::capability_ids(db, id).await?;
    let capabilities = a002_capability::repository::get_by_ids(db, &linked_ids).await?;
    Ok(Some(attach_capabilities(company, &linked_ids, capabilities)))
}

/// Список компаний (без возможностей)
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Company>, DomainError> {
    Ok(repository::list_all(db).await?)
}

pub async fn link_capability(
    db: &DatabaseConnection,
    company_id: Uuid,
    capability_id: Uuid,
) -> Result<(), DomainError> {
    if get_by_id(db, company_id).await?.is_none() {
        return Err(DomainError::not_found("company", company_id));
    }
    if a002_capability::service::get_by_id(db, capability_id).await?.is_none() {
        return Err(DomainError::not_found("capability", capability_id));
    }

    capability_link::link(db, company_id, capability_id).await?;
    tracing::info!("Capability {} linked to company {}", capability_id, company_id);
    Ok(())
}

pub async fn unlink_capability(
    db: &DatabaseConnection,
    company_id: Uuid,
    capability_id: Uuid,
) -> Result<bool, DomainError> {
    let removed = capability_link::unlink(db, company_id, capability_id).await?;
    if removed {
        tracing::info!("Capability {} unlinked from company {}", capability_id, company_id);
    }
    Ok(removed)
}

/// Возможности в порядке привязки; связи с удалёнными или
/// отсутствующими возможностями отбрасываются
fn attach_capabilities(
    mut company: Company,
    linked_ids: &[String],
    capabilities: Vec<Capability>,
) -> Company {
    company.capabilities = linked_ids
        .iter()
        .filter_map(|id| {
            capabilities
                .iter()
                .find(|c| c.id.as_string() == *id)
                .map(Capability::to_ref)
        })
        .collect::<Vec<CapabilityRef>>();
    company
}
