use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a001_company::aggregate::CapabilityRef;
use crate::domain::common::EntityMetadata;

/// Уникальный идентификатор возможности
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapabilityId(pub Uuid);

impl CapabilityId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

/// Возможность (компетенция), которую можно привязать к компании
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capability {
    pub id: CapabilityId,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Capability {
    pub fn new_for_insert(code: String, description: String, comment: Option<String>) -> Self {
        Self {
            id: CapabilityId::new_v4(),
            code,
            description,
            comment,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("Description must not be empty".into());
        }
        if self.code.trim().is_empty() {
            return Err("Code must not be empty".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.metadata.touch();
    }

    pub fn to_ref(&self) -> CapabilityRef {
        CapabilityRef {
            id: self.id.as_string(),
            code: self.code.clone(),
            description: self.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CapabilityDto {
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_ref_copies_identity() {
        let cap = Capability::new_for_insert("CAP-7".into(), "Cloud migration".into(), None);
        let r = cap.to_ref();
        assert_eq!(r.id, cap.id.as_string());
        assert_eq!(r.code, "CAP-7");
    }

    #[test]
    fn test_validate_requires_code() {
        let cap = Capability::new_for_insert("".into(), "Cloud migration".into(), None);
        assert!(cap.validate().is_err());
    }
}
