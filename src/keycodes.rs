// Browser keyboard event codes (KeyboardEvent.keyCode) for the common named keys.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::error::KeycodeError;

/// Key codes as plain constants, for callers that know the key at compile time.
pub mod codes {
    pub const SPACE: u32 = 32;
    pub const ENTER: u32 = 13;
    pub const TAB: u32 = 9;
    pub const ESC: u32 = 27;
    pub const BACKSPACE: u32 = 8;
    pub const SHIFT: u32 = 16;
    pub const CTRL: u32 = 17;
    pub const ALT: u32 = 18;
    pub const CAPS: u32 = 20;
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
}

// Declaration order is iteration order.
static KEYCODE_TABLE: [(&str, u32); 13] = [
    ("SPACE", codes::SPACE),
    ("ENTER", codes::ENTER),
    ("TAB", codes::TAB),
    ("ESC", codes::ESC),
    ("BACKSPACE", codes::BACKSPACE),
    ("SHIFT", codes::SHIFT),
    ("CTRL", codes::CTRL),
    ("ALT", codes::ALT),
    ("CAPS", codes::CAPS),
    ("LEFT", codes::LEFT),
    ("UP", codes::UP),
    ("RIGHT", codes::RIGHT),
    ("DOWN", codes::DOWN),
];

// Alternative spellings accepted by `resolve`, already normalized.
const ALIASES: [(&str, &str); 15] = [
    ("SPACEBAR", "SPACE"),
    ("RETURN", "ENTER"),
    ("ESCAPE", "ESC"),
    ("BKSP", "BACKSPACE"),
    ("CONTROL", "CTRL"),
    ("OPTION", "ALT"),
    ("CAPSLOCK", "CAPS"),
    ("LEFTARROW", "LEFT"),
    ("ARROWLEFT", "LEFT"),
    ("UPARROW", "UP"),
    ("ARROWUP", "UP"),
    ("RIGHTARROW", "RIGHT"),
    ("ARROWRIGHT", "RIGHT"),
    ("DOWNARROW", "DOWN"),
    ("ARROWDOWN", "DOWN"),
];

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::build);

/// Read-only mapping between key names and key codes.
///
/// The only instance lives for the whole process and is reached through
/// [`registry`]. Nothing hands out `&mut Registry`, so the table can be read
/// from any thread without synchronization.
#[derive(Debug)]
pub struct Registry {
    entries: &'static [(&'static str, u32)],
    by_name: HashMap<&'static str, u32>,
    by_code: HashMap<u32, &'static str>,
    aliases: HashMap<&'static str, &'static str>,
}

impl Registry {
    fn build() -> Registry {
        let by_name: HashMap<_, _> = KEYCODE_TABLE.iter().copied().collect();
        let by_code: HashMap<_, _> = KEYCODE_TABLE
            .iter()
            .map(|&(name, code)| (code, name))
            .collect();
        let aliases: HashMap<_, _> = ALIASES.iter().copied().collect();
        log::debug!(
            "Keycode registry initialized with {} keys and {} aliases",
            by_name.len(),
            aliases.len()
        );
        Registry {
            entries: &KEYCODE_TABLE,
            by_name,
            by_code,
            aliases,
        }
    }

    /// Returns the code for a canonical key name such as `"ENTER"`.
    ///
    /// Matching is exact and case-sensitive. Use [`Registry::resolve`] for
    /// user-typed names.
    pub fn lookup(&self, name: &str) -> Result<u32, KeycodeError> {
        self.get(name)
            .ok_or_else(|| KeycodeError::UnknownKeyName(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Canonical name for a key code, if the code is in the table.
    pub fn name_of(&self, code: u32) -> Option<&'static str> {
        self.by_code.get(&code).copied()
    }

    /// Resolves a loosely written key name (e.g. "Caps_Lock", "return", "arrow-up").
    ///
    /// ## Normalization Rules:
    /// 1. **Uppercase:** the whole string is uppercased.
    /// 2. **Separator Removal:** `_`, `-` and whitespace are removed.
    ///
    /// The normalized name is matched against the canonical names first and
    /// then against the alias list.
    pub fn resolve(&self, name: &str) -> Result<u32, KeycodeError> {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| !(c.is_whitespace() || matches!(c, '_' | '-')))
            .flat_map(char::to_uppercase)
            .collect();

        if normalized.is_empty() {
            return Err(KeycodeError::EmptyKeyName);
        }

        if let Some(code) = self.get(&normalized) {
            return Ok(code);
        }
        self.aliases
            .get(normalized.as_str())
            .and_then(|canonical| self.get(canonical))
            .ok_or_else(|| KeycodeError::UnknownKeyName(name.to_string()))
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn registry() -> &'static Registry {
    &REGISTRY
}

pub fn lookup(name: &str) -> Result<u32, KeycodeError> {
    registry().lookup(name)
}

pub fn get(name: &str) -> Option<u32> {
    registry().get(name)
}

pub fn name_of(code: u32) -> Option<&'static str> {
    registry().name_of(code)
}

pub fn resolve(name: &str) -> Result<u32, KeycodeError> {
    registry().resolve(name)
}
