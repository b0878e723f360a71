use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::EntityMetadata;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор компании
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub Uuid);

impl CompanyId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CompanyId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Краткая ссылка на возможность, привязанную к компании
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityRef {
    pub id: String,
    pub code: String,
    pub description: String,
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Компания (клиент, партнёр или поставщик)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub code: String,
    pub description: String,
    pub website: Option<String>,
    pub comment: Option<String>,

    /// Привязанные возможности, загружаются вместе с компанией
    #[serde(default)]
    pub capabilities: Vec<CapabilityRef>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Company {
    /// Создать новую компанию для вставки в БД
    pub fn new_for_insert(
        code: String,
        description: String,
        website: Option<String>,
        comment: Option<String>,
    ) -> Self {
        Self {
            id: CompanyId::new_v4(),
            code,
            description,
            website,
            comment,
            capabilities: Vec::new(),
            metadata: EntityMetadata::new(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &CompanyDto) {
        if let Some(code) = &dto.code {
            self.code = code.clone();
        }
        self.description = dto.description.clone();
        self.website = dto.website.clone();
        self.comment = dto.comment.clone();
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("Description must not be empty".into());
        }
        if self.code.trim().is_empty() {
            return Err("Code must not be empty".into());
        }
        if let Some(website) = self.website.as_deref().filter(|w| !w.trim().is_empty()) {
            if !website.starts_with("http://") && !website.starts_with("https://") {
                return Err("Website must start with http:// or https://".into());
            }
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.metadata.touch();
    }

    pub fn has_capability(&self, capability_id: &str) -> bool {
        self.capabilities.iter().any(|c| c.id == capability_id)
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления компании
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompanyDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub website: Option<String>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(website: Option<&str>) -> Company {
        Company::new_for_insert(
            "CMP-001".into(),
            "Acme Corp".into(),
            website.map(Into::into),
            None,
        )
    }

    #[test]
    fn test_validate_accepts_minimal_company() {
        assert!(company(None).validate().is_ok());
        assert!(company(Some("https://acme.example")).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_website() {
        assert!(company(Some("acme.example")).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_description() {
        let mut c = company(None);
        c.description = "  ".into();
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_update_keeps_code_when_not_supplied() {
        let mut c = company(None);
        c.update(&CompanyDto {
            description: "Acme Holdings".into(),
            ..Default::default()
        });
        assert_eq!(c.code, "CMP-001");
        assert_eq!(c.description, "Acme Holdings");
    }

    #[test]
    fn test_before_write_bumps_version() {
        let mut c = company(None);
        c.before_write();
        assert_eq!(c.metadata.version, 1);
    }
}
