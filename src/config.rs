use serde::Deserialize;
#[allow(unused_imports)]
use validator::{Validate, ValidationError};
use validator_derive::Validate;

use std::path::PathBuf;

#[derive(Debug, Deserialize, Validate, Clone)]
pub struct Config {
    #[serde(default = "default_model_path")]
    #[validate(custom = "ensure_model_file")]
    pub model_path: String,

    #[serde(default = "default_context_window")]
    #[validate(range(min = 1))]
    pub context_window: usize,

    #[serde(default = "default_debug")]
    pub debug: bool,

    #[serde(default = "default_aspects")]
    #[validate]
    pub aspects: Vec<AspectConfig>,
}

#[derive(Debug, Deserialize, Validate, Clone)]
pub struct AspectConfig {
    pub name: String,

    #[validate(length(min = 1))]
    pub keywords: Vec<String>,
}

fn default_debug() -> bool {
    false
}

fn default_context_window() -> usize {
    3
}

fn default_model_path() -> String {
    "./en_tokenizer.bin".to_string()
}

fn default_aspects() -> Vec<AspectConfig> {
    vec![
        AspectConfig {
            name: "product_quality".to_string(),
            keywords: vec!["quality".to_string(), "product".to_string()],
        },
        AspectConfig {
            name: "delivery".to_string(),
            keywords: vec!["delivery".to_string(), "shipping".to_string()],
        },
        AspectConfig {
            name: "customer_service".to_string(),
            keywords: vec!["service".to_string(), "support".to_string()],
        },
    ]
}

fn ensure_model_file(model_path: &str) -> Result<(), ValidationError> {
    if PathBuf::from(model_path).exists() {
        Ok(())
    } else {
        Err(ValidationError::new("Tokenizer model missing"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_stock_aspects() {
        let config: Config = toml::from_str("").unwrap();
        let names: Vec<_> = config.aspects.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["product_quality", "delivery", "customer_service"]);
        assert_eq!(config.context_window, 3);
        assert_eq!(config.model_path, "./en_tokenizer.bin");
        assert!(!config.debug);
    }

    #[test]
    fn aspects_are_configurable() {
        let config: Config = toml::from_str(
            r#"
            [[aspects]]
            name = "packaging"
            keywords = ["box", "packaging"]
            "#,
        )
        .unwrap();
        assert_eq!(config.aspects.len(), 1);
        assert_eq!(config.aspects[0].name, "packaging");
        assert_eq!(config.aspects[0].keywords, ["box", "packaging"]);
    }

    #[test]
    fn aspect_without_keywords_is_invalid() {
        let aspect = AspectConfig {
            name: "packaging".to_string(),
            keywords: vec![],
        };
        assert!(aspect.validate().is_err());
    }

    #[test]
    fn missing_model_file_is_invalid() {
        let config: Config = toml::from_str("model_path = \"./no-such.bin\"").unwrap();
        assert!(config.validate().is_err());
    }
}
