//! Locale-aware string ordering used by the sort engine.

use std::cmp::Ordering;
use std::fmt;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;
use icu_provider::DataLocale;
use thiserror::Error;

/// Locale used when configuration does not name one.
pub const DEFAULT_LOCALE: &str = "en";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextOrderError {
    #[error("invalid locale tag '{tag}': {reason}")]
    InvalidLocale { tag: String, reason: String },
    #[error("no collation data for locale '{tag}': {reason}")]
    Unsupported { tag: String, reason: String },
}

/// CLDR collation for one pinned locale.
pub struct TextOrder {
    locale: String,
    collator: Collator,
}

impl TextOrder {
    pub fn for_locale(tag: &str) -> Result<Self, TextOrderError> {
        let locale: Locale = tag.parse().map_err(|err| TextOrderError::InvalidLocale {
            tag: tag.to_string(),
            reason: format!("{err}"),
        })?;
        let data_locale = DataLocale::from(&locale);
        let collator = Collator::try_new(&data_locale, CollatorOptions::new()).map_err(|err| {
            TextOrderError::Unsupported {
                tag: tag.to_string(),
                reason: format!("{err}"),
            }
        })?;
        Ok(Self {
            locale: locale.to_string(),
            collator,
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b)
    }
}

impl fmt::Debug for TextOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextOrder")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_ignores_case_and_diacritics_at_primary_level() {
        let order = TextOrder::for_locale("en").expect("en");
        assert_eq!(order.compare("alice", "Bob"), Ordering::Less);
        assert_eq!(order.compare("Änne", "Zoe"), Ordering::Less);
        assert_eq!(order.compare("Anna", "Änne"), Ordering::Less);
        assert_eq!(order.compare("", ""), Ordering::Equal);
    }

    #[test]
    fn swedish_sorts_a_umlaut_after_z() {
        let order = TextOrder::for_locale("sv").expect("sv");
        assert_eq!(order.compare("Änne", "Zoe"), Ordering::Greater);
    }

    #[test]
    fn malformed_tag_is_rejected() {
        let err = TextOrder::for_locale("not a locale!").expect_err("should fail");
        assert!(matches!(err, TextOrderError::InvalidLocale { .. }));
    }
}
