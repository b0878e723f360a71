use serde::{Deserialize, Serialize};

/// Endpoint names used by the page layer.
///
/// The set is open: any other string is a valid endpoint and simply has
/// no configured tabs unless `config.toml` declares some.
pub mod endpoint {
    pub const CREATE: &str = "create";
    pub const VIEW: &str = "view";
    pub const EDIT: &str = "edit";
}

/// A tab on an entity page
///
/// List order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabDescriptor {
    pub tab_name: String,
    #[serde(default)]
    pub active: bool,
}

impl TabDescriptor {
    pub fn new(tab_name: impl Into<String>, active: bool) -> Self {
        Self {
            tab_name: tab_name.into(),
            active,
        }
    }

    pub fn active(tab_name: impl Into<String>) -> Self {
        Self::new(tab_name, true)
    }

    pub fn inactive(tab_name: impl Into<String>) -> Self {
        Self::new(tab_name, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_descriptor_wire_format() {
        let tab = TabDescriptor::inactive("Capabilities");
        let json = serde_json::to_value(&tab).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"tab_name": "Capabilities", "active": false})
        );
    }

    #[test]
    fn test_active_defaults_to_false() {
        let tab: TabDescriptor = serde_json::from_str(r#"{"tab_name": "About"}"#).unwrap();
        assert_eq!(tab, TabDescriptor::inactive("About"));
    }
}
