//! Tab resolution for entity pages
//!
//! `TabResolver` turns `(entity_type, endpoint, entity)` into the ordered
//! list of tabs a page shows: the static base list from the registry,
//! followed by conditional tabs whose rule matches the entity.

use std::collections::HashMap;

use contracts::domain::a001_company::aggregate::Company;
use contracts::shared::tabs::{endpoint, TabDescriptor};
use serde_json::Value;

// ============================================================================
// Entity access
// ============================================================================

/// Attribute-style read access to an entity instance
pub trait EntityRef {
    fn attribute(&self, name: &str) -> Option<Value>;
}

impl EntityRef for Value {
    fn attribute(&self, name: &str) -> Option<Value> {
        self.as_object()?.get(name).cloned()
    }
}

impl EntityRef for Company {
    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::String(self.to_string_id())),
            "code" => Some(Value::String(self.code.clone())),
            "description" => Some(Value::String(self.description.clone())),
            "website" => Some(self.website.clone().map_or(Value::Null, Value::String)),
            "comment" => Some(self.comment.clone().map_or(Value::Null, Value::String)),
            "capabilities" => serde_json::to_value(&self.capabilities).ok(),
            _ => None,
        }
    }
}

/// Truthiness of an attribute value: null, false, zero, "" and empty
/// collections are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

// ============================================================================
// Conditional rules
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributePredicate {
    /// Attribute exists, whatever its value
    Present,
    /// Attribute exists and is truthy
    Truthy,
}

impl AttributePredicate {
    pub fn matches(&self, value: Option<&Value>) -> bool {
        match self {
            AttributePredicate::Present => value.is_some(),
            AttributePredicate::Truthy => value.is_some_and(is_truthy),
        }
    }
}

/// Adds `tab` when an entity of `entity_type` satisfies `predicate` on `attribute`
#[derive(Debug, Clone)]
pub struct ConditionalTabRule {
    pub entity_type: String,
    pub attribute: String,
    pub predicate: AttributePredicate,
    pub tab: TabDescriptor,
}

impl ConditionalTabRule {
    pub fn new(
        entity_type: &str,
        attribute: &str,
        predicate: AttributePredicate,
        tab: TabDescriptor,
    ) -> Self {
        Self {
            entity_type: entity_type.to_lowercase(),
            attribute: attribute.to_string(),
            predicate,
            tab,
        }
    }

    fn applies(&self, entity_type: &str, entity: &dyn EntityRef) -> bool {
        self.entity_type == entity_type
            && self
                .predicate
                .matches(entity.attribute(&self.attribute).as_ref())
    }
}

/// Companies with at least one linked capability get a Capabilities tab.
///
/// Rules only fire over HTTP for entity types the tabs handler can load
/// (`handlers::ui::load_entity`); a rule for a new type needs a loader there.
pub fn default_rules() -> Vec<ConditionalTabRule> {
    vec![ConditionalTabRule::new(
        "company",
        "capabilities",
        AttributePredicate::Truthy,
        TabDescriptor::inactive("Capabilities"),
    )]
}

// ============================================================================
// Registry
// ============================================================================

/// Base tab lists keyed by (entity_type, endpoint). Entity types are
/// stored lower-cased; endpoints are matched exactly.
#[derive(Debug, Clone, Default)]
pub struct TabConfigRegistry {
    entries: HashMap<(String, String), Vec<TabDescriptor>>,
}

impl TabConfigRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        use TabDescriptor as T;

        let mut registry = Self::empty();

        registry.insert("company", endpoint::CREATE, vec![T::active("About")]);
        registry.insert(
            "company",
            endpoint::VIEW,
            vec![
                T::active("About"),
                T::inactive("Opportunities"),
                T::inactive("Relationships"),
            ],
        );
        registry.insert("company", endpoint::EDIT, vec![T::active("About")]);

        registry.insert("capability", endpoint::CREATE, vec![T::active("About")]);
        registry.insert(
            "capability",
            endpoint::VIEW,
            vec![T::active("About"), T::inactive("Companies")],
        );
        registry.insert("capability", endpoint::EDIT, vec![T::active("About")]);

        registry.insert("opportunity", endpoint::CREATE, vec![T::active("About")]);
        registry.insert(
            "opportunity",
            endpoint::VIEW,
            vec![
                T::active("About"),
                T::inactive("CRISP Scores"),
                T::inactive("Companies"),
            ],
        );
        registry.insert(
            "opportunity",
            endpoint::EDIT,
            vec![T::active("About"), T::inactive("CRISP Scores")],
        );

        registry.insert("user", endpoint::CREATE, vec![T::active("Profile")]);
        registry.insert(
            "user",
            endpoint::VIEW,
            vec![T::active("Profile"), T::inactive("Opportunities")],
        );
        registry.insert("user", endpoint::EDIT, vec![T::active("Profile")]);

        registry
    }

    /// Built-in entries with `[ui.tabs]` overrides applied on top
    pub fn with_overrides(
        mut self,
        overrides: &HashMap<String, HashMap<String, Vec<TabDescriptor>>>,
    ) -> Self {
        for (entity_type, endpoints) in overrides {
            for (endpoint, tabs) in endpoints {
                tracing::info!(
                    "Tab override for {}/{}: {} tab(s)",
                    entity_type,
                    endpoint,
                    tabs.len()
                );
                self.insert(entity_type, endpoint, tabs.clone());
            }
        }
        self
    }

    pub fn insert(&mut self, entity_type: &str, endpoint: &str, tabs: Vec<TabDescriptor>) {
        self.entries
            .insert((entity_type.to_lowercase(), endpoint.to_string()), tabs);
    }

    /// Base tabs for a normalized entity type; empty when nothing is configured
    pub fn get(&self, entity_type: &str, endpoint: &str) -> &[TabDescriptor] {
        self.entries
            .get(&(entity_type.to_string(), endpoint.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Resolver
// ============================================================================

#[derive(Debug, Clone)]
pub struct TabResolver {
    registry: TabConfigRegistry,
    rules: Vec<ConditionalTabRule>,
}

impl TabResolver {
    pub fn new(registry: TabConfigRegistry, rules: Vec<ConditionalTabRule>) -> Self {
        Self { registry, rules }
    }

    pub fn with_default_rules(registry: TabConfigRegistry) -> Self {
        Self::new(registry, default_rules())
    }

    pub fn registry(&self) -> &TabConfigRegistry {
        &self.registry
    }

    /// Whether any conditional rule inspects entities of this type
    pub fn has_rules_for(&self, entity_type: &str) -> bool {
        let entity_type = entity_type.to_lowercase();
        self.rules.iter().any(|rule| rule.entity_type == entity_type)
    }

    /// Ordered tabs for a page. Never fails: unknown combinations yield
    /// an empty list. Tab names are not de-duplicated.
    pub fn resolve_tabs(
        &self,
        entity_type: &str,
        endpoint: &str,
        entity: Option<&dyn EntityRef>,
    ) -> Vec<TabDescriptor> {
        let entity_type = entity_type.to_lowercase();

        let base = self.registry.get(&entity_type, endpoint);
        if base.is_empty() {
            tracing::debug!("No tabs configured for {}/{}", entity_type, endpoint);
        }
        let mut tabs = base.to_vec();

        if let Some(entity) = entity {
            for rule in &self.rules {
                if rule.applies(&entity_type, entity) {
                    tabs.push(rule.tab.clone());
                }
            }
        }

        tabs
    }
}

impl Default for TabResolver {
    fn default() -> Self {
        Self::with_default_rules(TabConfigRegistry::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_company::aggregate::CapabilityRef;
    use serde_json::json;

    fn resolver() -> TabResolver {
        TabResolver::default()
    }

    fn company_with(capabilities: Vec<CapabilityRef>) -> Company {
        let mut company =
            Company::new_for_insert("CMP-1".into(), "Acme".into(), None, None);
        company.capabilities = capabilities;
        company
    }

    fn names(tabs: &[TabDescriptor]) -> Vec<&str> {
        tabs.iter().map(|t| t.tab_name.as_str()).collect()
    }

    #[test]
    fn test_base_list_returned_in_configured_order() {
        let r = resolver();
        for entity_type in ["company", "capability", "opportunity", "user"] {
            for ep in [endpoint::CREATE, endpoint::VIEW, endpoint::EDIT] {
                let tabs = r.resolve_tabs(entity_type, ep, None);
                assert_eq!(tabs, r.registry().get(entity_type, ep).to_vec());
                assert!(!tabs.is_empty());
            }
        }
        assert_eq!(
            names(&r.resolve_tabs("company", endpoint::VIEW, None)),
            vec!["About", "Opportunities", "Relationships"]
        );
    }

    #[test]
    fn test_company_with_capabilities_gets_trailing_tab() {
        let r = resolver();
        let company = company_with(vec![CapabilityRef {
            id: "c1".into(),
            code: "CAP-1".into(),
            description: "Data engineering".into(),
        }]);

        let tabs = r.resolve_tabs("company", endpoint::VIEW, Some(&company));
        let base = r.registry().get("company", endpoint::VIEW);

        assert_eq!(tabs.len(), base.len() + 1);
        assert_eq!(&tabs[..base.len()], base);
        assert_eq!(tabs.last(), Some(&TabDescriptor::inactive("Capabilities")));
    }

    #[test]
    fn test_company_without_capabilities_is_unchanged() {
        let r = resolver();
        let company = company_with(Vec::new());
        let tabs = r.resolve_tabs("company", endpoint::VIEW, Some(&company));
        assert_eq!(tabs, r.registry().get("company", endpoint::VIEW).to_vec());
    }

    #[test]
    fn test_entity_type_is_case_insensitive() {
        let r = resolver();
        assert_eq!(
            r.resolve_tabs("COMPANY", endpoint::CREATE, None),
            r.resolve_tabs("company", endpoint::CREATE, None)
        );
        let entity = json!({"capabilities": ["crm"]});
        assert_eq!(
            r.resolve_tabs("Company", endpoint::EDIT, Some(&entity)).last(),
            Some(&TabDescriptor::inactive("Capabilities"))
        );
    }

    #[test]
    fn test_unknown_entity_yields_empty_list() {
        assert!(resolver()
            .resolve_tabs("unknown_entity", endpoint::VIEW, None)
            .is_empty());
        assert!(resolver().resolve_tabs("company", "archive", None).is_empty());
    }

    #[test]
    fn test_repeated_calls_do_not_mutate_registry() {
        let r = resolver();
        let entity = json!({"capabilities": [1, 2]});
        let first = r.resolve_tabs("company", endpoint::VIEW, Some(&entity));
        let second = r.resolve_tabs("company", endpoint::VIEW, Some(&entity));
        assert_eq!(first, second);
        assert_eq!(r.registry().get("company", endpoint::VIEW).len(), 3);
    }

    #[test]
    fn test_rule_only_applies_to_its_entity_type() {
        let entity = json!({"capabilities": ["crm"]});
        let tabs = resolver().resolve_tabs("capability", endpoint::VIEW, Some(&entity));
        assert_eq!(names(&tabs), vec!["About", "Companies"]);
    }

    #[test]
    fn test_missing_or_falsy_attribute_does_not_match() {
        let r = resolver();
        for entity in [json!({}), json!({"capabilities": null}), json!({"capabilities": ""})] {
            let tabs = r.resolve_tabs("company", endpoint::VIEW, Some(&entity));
            assert_eq!(tabs.len(), 3, "entity {entity} should not add a tab");
        }
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let mut registry = TabConfigRegistry::empty();
        registry.insert("company", endpoint::VIEW, vec![TabDescriptor::active("About")]);
        let rules = vec![ConditionalTabRule::new(
            "company",
            "description",
            AttributePredicate::Present,
            TabDescriptor::inactive("About"),
        )];
        let r = TabResolver::new(registry, rules);
        let tabs = r.resolve_tabs("company", endpoint::VIEW, Some(&json!({"description": ""})));
        assert_eq!(names(&tabs), vec!["About", "About"]);
    }

    #[test]
    fn test_overrides_replace_builtin_entry() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "Company".to_string(),
            HashMap::from([(
                endpoint::VIEW.to_string(),
                vec![TabDescriptor::active("Summary")],
            )]),
        );
        let registry = TabConfigRegistry::builtin().with_overrides(&overrides);
        assert_eq!(registry.get("company", endpoint::VIEW), &[TabDescriptor::active("Summary")]);
        assert_eq!(registry.get("company", endpoint::EDIT), &[TabDescriptor::active("About")]);
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!({"a": 1})));
    }

    #[test]
    fn test_has_rules_for_follows_rule_set() {
        let resolver = resolver();
        assert!(resolver.has_rules_for("Company"));
        assert!(!resolver.has_rules_for("opportunity"));

        let custom = TabResolver::new(
            TabConfigRegistry::builtin(),
            vec![ConditionalTabRule::new(
                "Opportunity",
                "crisp_score",
                AttributePredicate::Present,
                TabDescriptor::inactive("CRISP Scores"),
            )],
        );
        assert!(custom.has_rules_for("opportunity"));
        assert!(!custom.has_rules_for("company"));
    }
}
