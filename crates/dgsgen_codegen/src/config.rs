//! Generation options.

use dgsgen_schema::TypeMapping;
use serde::Deserialize;

/// Options for a generation run.
///
/// Deserializes from camelCase JSON; every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CodeGenConfig {
    /// Base package; constants live here.
    pub package_name: String,
    pub sub_package_name_client: String,
    pub sub_package_name_types: String,
    pub sub_package_name_datafetchers: String,
    /// Schema type name → fully qualified Java type.
    pub type_mapping: TypeMapping,
    /// `Type` or `Type.field` entries excluded from generation.
    pub skip: Vec<String>,
    pub generate_data_types: bool,
    pub generate_client_api: bool,
    pub generate_datafetchers: bool,
    /// Leave out `_entities` projections and representation classes for `@key` types.
    pub skip_entity_queries: bool,
    pub generate_interface_setters: bool,
    /// Use boxed types for non-null scalars too.
    pub generate_boxed_types: bool,
    pub generate_all_constructor: bool,
    /// Query fields to generate client classes for; empty means all.
    pub include_queries: Vec<String>,
    pub include_mutations: Vec<String>,
    pub include_subscriptions: Vec<String>,
    pub short_projection_names: bool,
    pub snake_case_constant_names: bool,
    pub add_deprecated_annotation: bool,
    pub add_generated_annotation: bool,
}

impl Default for CodeGenConfig {
    fn default() -> Self {
        Self {
            package_name: "com.netflix.dgs.codegen.generated".to_string(),
            sub_package_name_client: "client".to_string(),
            sub_package_name_types: "types".to_string(),
            sub_package_name_datafetchers: "datafetchers".to_string(),
            type_mapping: TypeMapping::default(),
            skip: Vec::new(),
            generate_data_types: true,
            generate_client_api: true,
            generate_datafetchers: true,
            skip_entity_queries: false,
            generate_interface_setters: true,
            generate_boxed_types: false,
            generate_all_constructor: true,
            include_queries: Vec::new(),
            include_mutations: Vec::new(),
            include_subscriptions: Vec::new(),
            short_projection_names: false,
            snake_case_constant_names: false,
            add_deprecated_annotation: false,
            add_generated_annotation: false,
        }
    }
}

impl CodeGenConfig {
    /// Creates a config for a base package.
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn package_name_client(&self) -> String {
        format!("{}.{}", self.package_name, self.sub_package_name_client)
    }

    #[must_use]
    pub fn package_name_types(&self) -> String {
        format!("{}.{}", self.package_name, self.sub_package_name_types)
    }

    #[must_use]
    pub fn package_name_datafetchers(&self) -> String {
        format!("{}.{}", self.package_name, self.sub_package_name_datafetchers)
    }

    /// Whether a `skip` entry names the type.
    #[must_use]
    pub fn skips_type(&self, type_name: &str) -> bool {
        self.skip.iter().any(|entry| entry == type_name)
    }

    /// Whether a `skip` entry names the type or the field.
    #[must_use]
    pub fn skips_field(&self, type_name: &str, field_name: &str) -> bool {
        self.skip.iter().any(|entry| {
            entry == type_name
                || entry
                    .split_once('.')
                    .is_some_and(|(ty, field)| ty == type_name && field == field_name)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packages() {
        let config = CodeGenConfig::new("com.example");
        assert_eq!(config.package_name_types(), "com.example.types");
        assert_eq!(config.package_name_client(), "com.example.client");
        assert_eq!(config.package_name_datafetchers(), "com.example.datafetchers");
    }

    #[test]
    fn test_json_defaults() {
        let config: CodeGenConfig = serde_json::from_str(r#"{"packageName": "com.example"}"#).unwrap();
        assert_eq!(config, CodeGenConfig::new("com.example"));
        assert!(config.generate_interface_setters);
        let config: CodeGenConfig = serde_json::from_str(r#"{"generateInterfaceSetters": false}"#).unwrap();
        assert!(!config.generate_interface_setters);
        assert!(serde_json::from_str::<CodeGenConfig>(r#"{"interfaceSetters": true}"#).is_err());
    }

    #[test]
    fn test_skip_entries() {
        let config = CodeGenConfig {
            skip: vec!["Secret".to_string(), "Person.ssn".to_string()],
            ..CodeGenConfig::default()
        };
        assert!(config.skips_type("Secret"));
        assert!(!config.skips_type("Person"));
        assert!(config.skips_field("Person", "ssn"));
        assert!(config.skips_field("Secret", "anything"));
        assert!(!config.skips_field("Person", "name"));
    }
}
