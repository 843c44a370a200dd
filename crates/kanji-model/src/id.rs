use std::fmt;

use crate::ModelError;

/// Stable identifier derived from a character's Unicode codepoint.
///
/// Rendered as `u` followed by the lowercase hex codepoint, zero-padded to
/// at least four digits (`山` → `u5c71`, `𠮟` → `u20b9f`). The identifier is
/// a pure function of the character, so any consumer can re-derive it
/// without a lookup table.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct KanjiId(String);

impl KanjiId {
    pub fn from_char(character: char) -> Self {
        Self(format!("u{:04x}", character as u32))
    }

    /// Parse an existing `uXXXX` identifier string.
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        let hex = value
            .strip_prefix('u')
            .ok_or_else(|| ModelError::MalformedId(value.to_string()))?;
        if hex.len() < 4 {
            return Err(ModelError::MalformedId(value.to_string()));
        }
        let codepoint =
            u32::from_str_radix(hex, 16).map_err(|_| ModelError::MalformedId(value.to_string()))?;
        let character =
            char::from_u32(codepoint).ok_or_else(|| ModelError::MalformedId(value.to_string()))?;
        Ok(Self::from_char(character))
    }

    /// Re-derive the character this identifier was computed from.
    pub fn character(&self) -> Option<char> {
        let hex = self.0.strip_prefix('u')?;
        let codepoint = u32::from_str_radix(hex, 16).ok()?;
        char::from_u32(codepoint)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex portion without the `u` prefix, used for asset filenames.
    pub fn hex(&self) -> &str {
        &self.0[1..]
    }
}

impl fmt::Display for KanjiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::KanjiId;
    use proptest::prelude::{ProptestConfig, any, proptest};

    #[test]
    fn derives_lowercase_padded_hex() {
        assert_eq!(KanjiId::from_char('山').as_str(), "u5c71");
        assert_eq!(KanjiId::from_char('一').as_str(), "u4e00");
        // Codepoints below U+1000 pad to four digits.
        assert_eq!(KanjiId::from_char('A').as_str(), "u0041");
    }

    #[test]
    fn supplementary_plane_uses_five_digits() {
        // 𠮟 (U+20B9F) is a Joyo kanji outside the BMP.
        assert_eq!(KanjiId::from_char('\u{20B9F}').as_str(), "u20b9f");
    }

    #[test]
    fn round_trips_through_character() {
        let id = KanjiId::from_char('水');
        assert_eq!(id.character(), Some('水'));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(KanjiId::parse("5c71").is_err());
        assert!(KanjiId::parse("u").is_err());
        assert!(KanjiId::parse("uzzzz").is_err());
    }

    #[test]
    fn hex_strips_prefix() {
        assert_eq!(KanjiId::from_char('山').hex(), "5c71");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn id_round_trips_for_any_char(c in any::<char>()) {
            let id = KanjiId::from_char(c);
            proptest::prop_assert_eq!(id.character(), Some(c));
            proptest::prop_assert!(id.hex().len() >= 4);
            proptest::prop_assert_eq!(id.as_str(), id.as_str().to_lowercase());
        }
    }
}
