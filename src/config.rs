// Key-binding files: loading and key resolution
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_value::Value as SerdeValue;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::keycodes;

static BINDING_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("binding name pattern is valid"));

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Only accept canonical key names ("ENTER"), no aliases or case folding.
    #[serde(default)]
    pub strict_names: bool,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct BindingConfig {
    pub name: String,
    #[serde(rename = "key", alias = "keycode")]
    pub raw_key: Option<SerdeValue>, // string or int from TOML, or None
    #[serde(skip_deserializing)]
    pub keycode: u32, // resolved after parsing
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct BindingsConfig {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub binding: Vec<BindingConfig>,
}

fn integer_value(value: &SerdeValue) -> Option<i128> {
    match value {
        SerdeValue::U8(i) => Some(*i as i128),
        SerdeValue::U16(i) => Some(*i as i128),
        SerdeValue::U32(i) => Some(*i as i128),
        SerdeValue::U64(i) => Some(*i as i128),
        SerdeValue::I8(i) => Some(*i as i128),
        SerdeValue::I16(i) => Some(*i as i128),
        SerdeValue::I32(i) => Some(*i as i128),
        SerdeValue::I64(i) => Some(*i as i128),
        _ => None,
    }
}

fn resolve_key_name(name: &str, strict: bool) -> Result<u32, String> {
    let resolved = if strict {
        keycodes::lookup(name)
    } else {
        keycodes::resolve(name)
    };
    resolved.map_err(|e| e.to_string())
}

fn resolve_binding(binding: &BindingConfig, settings: &Settings) -> Result<u32, String> {
    match binding.raw_key.as_ref() {
        Some(SerdeValue::String(s)) => resolve_key_name(s, settings.strict_names).map_err(|e| {
            format!("Error processing key for binding '{}': {}", binding.name, e)
        }),
        None => resolve_key_name(&binding.name, settings.strict_names).map_err(|e| {
            format!(
                "Error processing binding '{}': could not resolve a key from the binding name. Please specify a 'key' field. Details: {}",
                binding.name, e
            )
        }),
        Some(other) => match integer_value(other) {
            Some(i) if i < 0 => Err(format!(
                "Negative keycode {} for binding '{}' is invalid.",
                i, binding.name
            )),
            Some(i) => {
                let code = u32::try_from(i).map_err(|_| {
                    format!(
                        "Integer keycode {} for binding '{}' is too large for u32.",
                        i, binding.name
                    )
                })?;
                if keycodes::name_of(code).is_none() {
                    log::warn!(
                        "Binding '{}' uses keycode {}, which has no named key.",
                        binding.name,
                        code
                    );
                }
                Ok(code)
            }
            None => Err(format!(
                "Invalid type for key field of binding '{}': expected string or integer, got {:?}",
                binding.name, other
            )),
        },
    }
}

/// Parses bindings from TOML text and resolves every key reference.
///
/// `origin` is only used in error messages. All resolution problems are
/// collected and returned together.
pub fn parse_config(config_content: &str, origin: &str) -> Result<BindingsConfig, ConfigError> {
    let mut bindings_config: BindingsConfig =
        toml::from_str(config_content).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })?;

    let settings = bindings_config.settings.clone();
    let mut resolution_errors = Vec::new();
    for binding in bindings_config.binding.iter_mut() {
        if !BINDING_NAME_RE.is_match(&binding.name) {
            resolution_errors.push(format!(
                "Binding name '{}' is invalid: expected a letter followed by letters, digits, '_' or '-'.",
                binding.name
            ));
            continue;
        }
        match resolve_binding(binding, &settings) {
            Ok(code) => {
                log::debug!("Binding '{}' resolved to keycode {}", binding.name, code);
                binding.keycode = code;
            }
            Err(e) => resolution_errors.push(e),
        }
    }

    if !resolution_errors.is_empty() {
        return Err(ConfigError::Resolution(resolution_errors));
    }

    log::info!(
        "Loaded {} bindings from '{}'",
        bindings_config.binding.len(),
        origin
    );
    Ok(bindings_config)
}

pub fn load_and_process_config(config_path: impl AsRef<Path>) -> Result<BindingsConfig, ConfigError> {
    let config_path = config_path.as_ref();
    let config_content = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
        path: config_path.to_path_buf(),
        source,
    })?;
    parse_config(&config_content, &config_path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(config: &BindingsConfig) -> Vec<(String, u32)> {
        config
            .binding
            .iter()
            .map(|b| (b.name.clone(), b.keycode))
            .collect()
    }

    #[test]
    fn test_string_and_integer_keys() {
        let config = parse_config(
            r#"
            [[binding]]
            name = "submit"
            key = "ENTER"

            [[binding]]
            name = "cancel"
            keycode = 27

            [[binding]]
            name = "pick"
            key = "return"
            "#,
            "inline",
        )
        .unwrap();
        assert_eq!(
            codes(&config),
            vec![
                ("submit".to_string(), 13),
                ("cancel".to_string(), 27),
                ("pick".to_string(), 13)
            ]
        );
        assert!(!config.settings.strict_names);
    }

    #[test]
    fn test_missing_key_uses_binding_name() {
        let config = parse_config("[[binding]]\nname = \"caps_lock\"\n", "inline").unwrap();
        assert_eq!(config.binding[0].keycode, 20);
    }

    #[test]
    fn test_unnamed_integer_code_is_accepted() {
        let config = parse_config("[[binding]]\nname = \"a\"\nkey = 65\n", "inline").unwrap();
        assert_eq!(config.binding[0].keycode, 65);
    }

    #[test]
    fn test_strict_names() {
        let text = r#"
            [settings]
            strict_names = true

            [[binding]]
            name = "submit"
            key = "enter"
        "#;
        match parse_config(text, "inline") {
            Err(ConfigError::Resolution(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("Unknown key name: 'enter'"));
            }
            other => panic!("expected resolution error, got {:?}", other),
        }
    }

    #[test]
    fn test_all_resolution_errors_are_reported() {
        let text = r#"
            [[binding]]
            name = "jump"
            key = "hyper"

            [[binding]]
            name = "back"
            key = -8

            [[binding]]
            name = "9lives"
            key = "TAB"

            [[binding]]
            name = "weird"
            key = 1.5
        "#;
        match parse_config(text, "inline") {
            Err(ConfigError::Resolution(errors)) => {
                assert_eq!(errors.len(), 4);
                assert!(errors[0].contains("'hyper'"));
                assert!(errors[1].contains("Negative keycode -8"));
                assert!(errors[2].contains("'9lives' is invalid"));
                assert!(errors[3].contains("expected string or integer"));
            }
            other => panic!("expected resolution error, got {:?}", other),
        }
    }

    #[test]
    fn test_too_large_code() {
        let err = parse_config("[[binding]]\nname = \"big\"\nkey = 5000000000\n", "inline")
            .unwrap_err();
        assert!(err.to_string().contains("too large for u32"));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[[binding]\nname = ", "broken.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_misspelled_binding_field_is_rejected() {
        let err = parse_config("[[binding]]\nname = \"up\"\nkee = \"DOWN\"\n", "inline")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("kee"));
    }

    #[test]
    fn test_misspelled_binding_table_is_rejected() {
        let err = parse_config("[[bindings]]\nname = \"jump\"\nkey = \"hyper\"\n", "inline")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bindings"));
    }

    #[test]
    fn test_misspelled_setting_is_rejected() {
        let text = r#"
            [settings]
            strict_name = true

            [[binding]]
            name = "submit"
            key = "enter"
        "#;
        let err = parse_config(text, "inline").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("strict_name"));
    }

    #[test]
    fn test_empty_file() {
        let config = parse_config("", "empty").unwrap();
        assert!(config.binding.is_empty());
        assert_eq!(config.settings, Settings::default());
    }

    #[test]
    fn test_missing_file() {
        let err = load_and_process_config("/nonexistent/bindings.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
