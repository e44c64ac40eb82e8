// src/check.rs

//! This module implements the `check` command: it validates a resolved
//! bindings file and prints what each binding ended up pointing at.

use crate::config::BindingsConfig;
use crate::error::ConfigError;
use crate::keycodes;
use std::collections::HashMap;

/// Validates a resolved bindings file.
///
/// Checks for:
/// - Duplicate binding names (compared case-insensitively).
/// - Duplicate keycodes, including two different spellings of the same key.
pub fn validate_config(config: &BindingsConfig) -> Result<(), ConfigError> {
    let mut names_seen: HashMap<String, &str> = HashMap::new();
    for binding in &config.binding {
        let folded = binding.name.to_lowercase();
        if let Some(existing) = names_seen.get(&folded) {
            return Err(ConfigError::Validation(format!(
                "Duplicate binding name '{}' (already defined as '{}').",
                binding.name, existing
            )));
        }
        names_seen.insert(folded, &binding.name);
    }

    let mut keycodes_seen: HashMap<u32, &str> = HashMap::new();
    for binding in &config.binding {
        if let Some(existing) = keycodes_seen.get(&binding.keycode) {
            return Err(ConfigError::Validation(format!(
                "Duplicate keycode {} detected. Used by binding '{}' and binding '{}'.",
                binding.keycode, existing, binding.name
            )));
        }
        keycodes_seen.insert(binding.keycode, &binding.name);
    }
    Ok(())
}

/// Renders the report printed by `check`, one line per binding.
pub fn format_config_for_check(config: &BindingsConfig) -> String {
    let mut report = format!(
        "Bindings ({}, strict names: {}):\n",
        config.binding.len(),
        config.settings.strict_names
    );
    for binding in &config.binding {
        report.push_str(&format!(
            "  {:<16} -> {:>3} ({})\n",
            binding.name,
            binding.keycode,
            keycodes::name_of(binding.keycode).unwrap_or("<unnamed>")
        ));
    }
    report
}

pub fn print_config_for_check(config: &BindingsConfig) {
    print!("{}", format_config_for_check(config));
}
