//! Company to capability links (a001_company_capability)

use chrono::{SecondsFormat, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a001_company_capability")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub company_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub capability_id: String,
    pub linked_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Capability ids linked to a company, in link order
pub async fn capability_ids(
    conn: &DatabaseConnection,
    company_id: Uuid,
) -> anyhow::Result<Vec<String>> {
    let mut rows = Entity::find()
        .filter(Column::CompanyId.eq(company_id.to_string()))
        .all(conn)
        .await?;
    rows.sort_by(|a, b| a.linked_at.cmp(&b.linked_at));
    Ok(rows.into_iter().map(|r| r.capability_id).collect())
}

/// Idempotent: linking an already linked pair keeps the original timestamp.
pub async fn link(
    conn: &DatabaseConnection,
    company_id: Uuid,
    capability_id: Uuid,
) -> anyhow::Result<()> {
    // Fixed-width timestamps so that text order is link order
    let linked_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
    let active = ActiveModel {
        company_id: Set(company_id.to_string()),
        capability_id: Set(capability_id.to_string()),
        linked_at: Set(linked_at),
    };
    Entity::insert(active)
        .on_conflict(
            OnConflict::columns([Column::CompanyId, Column::CapabilityId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

pub async fn unlink(
    conn: &DatabaseConnection,
    company_id: Uuid,
    capability_id: Uuid,
) -> anyhow::Result<bool> {
    let result = Entity::delete_many()
        .filter(Column::CompanyId.eq(company_id.to_string()))
        .filter(Column::CapabilityId.eq(capability_id.to_string()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}
