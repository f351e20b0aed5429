//! Domain Value Objects
//!
//! Immutable value types for the room domain.

use puzzle::{Assists, Difficulty};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

use platform::crypto::{
    ALPHANUMERIC, UNAMBIGUOUS_ALPHABET, constant_time_eq, from_hex, random_in_range,
    random_string, sha256, to_hex,
};

use crate::error::{RoomError, RoomResult};

// ============================================================================
// RoomId
// ============================================================================

pub const ROOM_ID_LEN: usize = 6;

/// Short human-typeable room code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn generate() -> Self {
        Self(random_string(UNAMBIGUOUS_ALPHABET, ROOM_ID_LEN))
    }

    /// Normalize user input (trim, upper-case) and check the alphabet.
    /// Anything that cannot be a room code is reported as not found.
    pub fn parse(input: &str) -> RoomResult<Self> {
        let code = input.trim().to_ascii_uppercase();
        let well_formed = code.len() == ROOM_ID_LEN
            && code.bytes().all(|b| UNAMBIGUOUS_ALPHABET.contains(&b));
        if well_formed {
            Ok(Self(code))
        } else {
            Err(RoomError::RoomNotFound)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Host secret
// ============================================================================

pub const HOST_SECRET_LEN: usize = 32;

/// Host capability token, handed to the creator exactly once
#[derive(Clone, PartialEq, Eq)]
pub struct HostSecret(String);

impl HostSecret {
    pub fn generate() -> Self {
        Self(random_string(ALPHANUMERIC, HOST_SECRET_LEN))
    }

    pub fn digest(&self) -> SecretDigest {
        SecretDigest::of(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for HostSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HostSecret(***)")
    }
}

/// SHA-256 of a host secret; the only form a room stores
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SecretDigest([u8; 32]);

impl SecretDigest {
    pub fn of(secret: &str) -> Self {
        Self(sha256(secret.as_bytes()))
    }

    /// Constant-time check of a presented token
    pub fn matches(&self, presented: &str) -> bool {
        !presented.is_empty() && constant_time_eq(&self.0, &sha256(presented.as_bytes()))
    }
}

impl fmt::Debug for SecretDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretDigest({})", &to_hex(&self.0)[..8])
    }
}

impl Serialize for SecretDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_hex(&self.0))
    }
}

impl<'de> Deserialize<'de> for SecretDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        from_hex(&s)
            .and_then(|bytes| <[u8; 32]>::try_from(bytes).ok())
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom("expected 64 hex digits"))
    }
}

// ============================================================================
// Join PIN
// ============================================================================

/// Six-digit join code (100000-999999)
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoinPin(String);

impl JoinPin {
    pub fn generate() -> Self {
        Self(random_in_range(100_000, 999_999).to_string())
    }

    pub fn matches(&self, presented: &str) -> bool {
        constant_time_eq(self.0.as_bytes(), presented.trim().as_bytes())
    }

    /// First two digits followed by a mask
    pub fn hint(&self) -> String {
        let prefix: String = self.0.chars().take(2).collect();
        format!("{prefix}••••")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for JoinPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JoinPin({})", self.hint())
    }
}

#[cfg(test)]
impl JoinPin {
    pub(crate) fn fixed(pin: &str) -> Self {
        Self(pin.to_string())
    }
}

// ============================================================================
// Display names
// ============================================================================

/// NFC-normalize, trim, cap to `max_chars`, trim again
fn clean_display_text(raw: &str, max_chars: usize) -> String {
    let normalized: String = raw.nfc().collect();
    let capped: String = normalized.trim().chars().take(max_chars).collect();
    capped.trim_end().to_string()
}

/// Member display name, unique within a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nickname(String);

impl Nickname {
    pub fn parse(raw: &str, max_chars: usize) -> RoomResult<Self> {
        let value = clean_display_text(raw, max_chars);
        if value.is_empty() {
            return Err(RoomError::NicknameRequired);
        }
        Ok(Self(value))
    }

    /// `"Alex"` -> `"Alex(k)"`
    pub fn with_suffix(&self, k: u32) -> Self {
        Self(format!("{}({k})", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Country or organization shown next to a nickname
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Affiliation(String);

impl Affiliation {
    pub fn parse(raw: &str, max_chars: usize) -> RoomResult<Self> {
        let value = clean_display_text(raw, max_chars);
        if value.is_empty() {
            return Err(RoomError::AffiliationRequired);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Status and game configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Lobby,
    Running,
    Ended,
}

/// Per-room game settings chosen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub highlight_same_numbers: bool,
    pub show_completed_numbers: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            highlight_same_numbers: true,
            show_completed_numbers: true,
        }
    }
}

impl GameConfig {
    pub fn assists(&self) -> Assists {
        Assists::new(self.highlight_same_numbers, self.show_completed_numbers)
    }

    pub fn apply(&mut self, patch: &ConfigPatch) {
        if let Some(difficulty) = patch.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(flag) = patch.highlight_same_numbers {
            self.highlight_same_numbers = flag;
        }
        if let Some(flag) = patch.show_completed_numbers {
            self.show_completed_numbers = flag;
        }
    }
}

/// Partial update of [`GameConfig`]; unknown fields are ignored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub highlight_same_numbers: Option<bool>,
    #[serde(default)]
    pub show_completed_numbers: Option<bool>,
}
