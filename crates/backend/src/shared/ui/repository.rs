use chrono::Utc;
use contracts::shared::table_settings::StoredTableConfig;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sys_table_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub table_name: String,
    pub config_json: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for StoredTableConfig {
    fn from(m: Model) -> Self {
        StoredTableConfig {
            table_name: m.table_name,
            config_json: m.config_json,
            updated_at: m.updated_at,
        }
    }
}

/// Получить сохранённую конфигурацию таблицы
pub async fn get(
    conn: &DatabaseConnection,
    table_name: &str,
) -> Result<Option<StoredTableConfig>, DbErr> {
    let result = Entity::find_by_id(table_name.to_string()).one(conn).await?;
    Ok(result.map(Into::into))
}

/// Сохранить (вставить или заменить) конфигурацию таблицы
pub async fn upsert(
    conn: &DatabaseConnection,
    table_name: &str,
    config_json: String,
) -> Result<(), DbErr> {
    let active = ActiveModel {
        table_name: Set(table_name.to_string()),
        config_json: Set(config_json),
        updated_at: Set(Utc::now().to_rfc3339()),
    };
    Entity::insert(active)
        .on_conflict(
            OnConflict::column(Column::TableName)
                .update_columns([Column::ConfigJson, Column::UpdatedAt])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}
