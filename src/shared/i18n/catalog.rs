use std::collections::HashMap;
use std::sync::Arc;

const EMBEDDED: &[(&str, &str)] = &[
    ("en", include_str!("locales/en.toml")),
    ("ru", include_str!("locales/ru.toml")),
];

pub type SharedMessages = Arc<MessageCatalog>;

/// Message templates per locale.
///
/// Lookup falls back from the exact locale to its primary subtag
/// (`ru-RU` → `ru`), then to the default locale, then to the key itself.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    default_locale: String,
    locales: HashMap<String, HashMap<String, String>>,
}

impl MessageCatalog {
    /// Catalog built from the locales shipped with the service.
    pub fn embedded(default_locale: &str) -> Result<Self, toml::de::Error> {
        Self::from_sources(default_locale, EMBEDDED)
    }

    pub fn from_sources(
        default_locale: &str,
        sources: &[(&str, &str)],
    ) -> Result<Self, toml::de::Error> {
        let mut locales = HashMap::with_capacity(sources.len());
        for (locale, source) in sources {
            let table: HashMap<String, String> = toml::from_str(source)?;
            locales.insert(locale.to_lowercase(), table);
        }
        Ok(Self {
            default_locale: default_locale.to_lowercase(),
            locales,
        })
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(&locale.to_lowercase())
    }

    /// Message for `key` in the default locale.
    pub fn message(&self, key: &str) -> String {
        self.message_in(&self.default_locale, key)
    }

    pub fn message_in(&self, locale: &str, key: &str) -> String {
        self.lookup(locale, key)
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }

    /// Message for `key` with `{name}` placeholders replaced from `args`.
    pub fn format_in(&self, locale: &str, key: &str, args: &[(&str, String)]) -> String {
        let mut text = self.message_in(locale, key);
        for (name, value) in args {
            text = text.replace(&format!("{{{}}}", name), value);
        }
        text
    }

    /// Template for `key`, or `None` when no locale in the fallback chain
    /// defines it.
    pub fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        let locale = locale.to_lowercase();
        let primary = locale.split(['-', '_']).next().unwrap_or_default();

        let found = [locale.as_str(), primary, self.default_locale.as_str()]
            .into_iter()
            .filter_map(|l| self.locales.get(l))
            .find_map(|table| table.get(key))
            .map(String::as_str);
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalogs_parse() {
        let catalog = MessageCatalog::embedded("en").unwrap();
        assert!(catalog.has_locale("en"));
        assert!(catalog.has_locale("ru"));
        assert_eq!(catalog.message("room.not-found"), "Room not found");
    }

    #[test]
    fn every_english_key_is_translated() {
        let en: HashMap<String, String> = toml::from_str(EMBEDDED[0].1).unwrap();
        let ru: HashMap<String, String> = toml::from_str(EMBEDDED[1].1).unwrap();
        let mut missing: Vec<_> = en.keys().filter(|k| !ru.contains_key(*k)).collect();
        missing.sort();
        assert!(missing.is_empty(), "untranslated keys: {:?}", missing);
    }

    #[test]
    fn region_falls_back_to_primary_language() {
        let catalog = MessageCatalog::embedded("en").unwrap();
        assert_eq!(catalog.message_in("ru-RU", "room.not-found"), "Номер не найден");
    }

    #[test]
    fn unknown_locale_uses_default() {
        let catalog = MessageCatalog::embedded("en").unwrap();
        assert_eq!(catalog.message_in("de", "hotel.not-found"), "Hotel not found");
    }

    #[test]
    fn unknown_key_echoes_key() {
        let catalog = MessageCatalog::embedded("en").unwrap();
        assert_eq!(catalog.message("no.such.key"), "no.such.key");
    }

    #[test]
    fn placeholders_are_substituted() {
        let catalog = MessageCatalog::from_sources(
            "en",
            &[("en", r#""validation.length" = "between {min} and {max}""#)],
        )
        .unwrap();
        let text = catalog.format_in(
            "en",
            "validation.length",
            &[("min", "1".to_string()), ("max", "50".to_string())],
        );
        assert_eq!(text, "between 1 and 50");
    }
}
