use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::countries::{self, CountryRule};
use super::pattern::PatternHandler;
use super::traits::PostalCodeHandler;
use super::types::Layout;
use crate::config::HandlerConfig;

/// Shared, resolved handler instance.
pub type SharedHandler = Arc<dyn PostalCodeHandler>;

type Produce = dyn Fn() -> Option<SharedHandler> + Send + Sync;

/// Zero-argument producer of a handler instance.
///
/// Factories are stored as bindings and only invoked when a country is
/// first looked up. A factory returning `None` means the binding cannot be
/// resolved; the country is then reported as unsupported.
#[derive(Clone)]
pub struct HandlerFactory {
    name: Cow<'static, str>,
    produce: Arc<Produce>,
}

impl HandlerFactory {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, produce: F) -> Self
    where
        F: Fn() -> Option<SharedHandler> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            produce: Arc::new(produce),
        }
    }

    /// Build a fresh `H` on every instantiation.
    pub fn of<H>() -> Self
    where
        H: PostalCodeHandler + Default + 'static,
    {
        Self::new(std::any::type_name::<H>(), || {
            Some(Arc::new(H::default()) as SharedHandler)
        })
    }

    /// Hand out clones of one existing instance.
    pub fn instance<H>(handler: H) -> Self
    where
        H: PostalCodeHandler + 'static,
    {
        let shared: SharedHandler = Arc::new(handler);
        Self::new(std::any::type_name::<H>(), move || Some(Arc::clone(&shared)))
    }

    /// Reuse the built-in rule of another country, e.g. bind `"ZZ"` to the
    /// rule of `"GB"`. Unresolved when that country has no built-in rule.
    pub fn builtin(country: &str) -> Self {
        let country = country.to_ascii_uppercase();
        Self::new(format!("builtin:{country}"), move || {
            countries::rule_for(&country).and_then(compile_rule)
        })
    }

    /// Regex-driven handler, compiled when first resolved. Unresolved when
    /// the pattern does not compile or the hint is empty.
    pub fn pattern(pattern: impl Into<String>, hint: impl Into<String>, layout: Layout) -> Self {
        let pattern = pattern.into();
        let hint = hint.into();
        Self::new(format!("pattern:{pattern}"), move || {
            if hint.trim().is_empty() {
                tracing::warn!(%pattern, "Pattern handler has an empty hint");
                return None;
            }
            compile(&pattern, &pattern, &hint, layout.clone())
        })
    }

    /// Binding that never resolves. Useful to hide a built-in country.
    pub fn unresolved(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, || None)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn create(&self) -> Option<SharedHandler> {
        (self.produce)()
    }
}

impl From<&HandlerConfig> for HandlerFactory {
    fn from(config: &HandlerConfig) -> Self {
        match (&config.builtin, &config.pattern) {
            (Some(country), _) => HandlerFactory::builtin(country),
            (None, Some(pattern)) => HandlerFactory::pattern(
                pattern.clone(),
                config.hint.clone().unwrap_or_default(),
                layout_from_config(config),
            ),
            (None, None) => HandlerFactory::unresolved("config:empty"),
        }
    }
}

fn layout_from_config(config: &HandlerConfig) -> Layout {
    let separator = |default: &'static str| -> Cow<'static, str> {
        config
            .separator
            .clone()
            .map(Cow::Owned)
            .unwrap_or(Cow::Borrowed(default))
    };

    if let Some(at) = config.split_at {
        Layout::Split {
            at,
            separator: separator(" "),
        }
    } else if let Some(tail) = config.split_tail {
        Layout::SplitTail {
            tail,
            separator: separator(" "),
        }
    } else if let Some(prefix) = &config.prefix {
        Layout::Prefixed {
            prefix: Cow::Owned(prefix.clone()),
            separator: separator("-"),
        }
    } else {
        Layout::Compact
    }
}

fn compile_rule(rule: &CountryRule) -> Option<SharedHandler> {
    shared(rule.country, PatternHandler::from_rule(rule))
}

fn compile(label: &str, pattern: &str, hint: &str, layout: Layout) -> Option<SharedHandler> {
    shared(label, PatternHandler::new(pattern, hint, layout))
}

fn shared(label: &str, compiled: Result<PatternHandler, regex::Error>) -> Option<SharedHandler> {
    match compiled {
        Ok(handler) => Some(Arc::new(handler)),
        Err(error) => {
            tracing::warn!(handler = label, %error, "Failed to compile postal code pattern");
            None
        }
    }
}

impl fmt::Debug for HandlerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFactory")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Table of handler bindings keyed by uppercased country code.
#[derive(Clone, Debug, Default)]
pub struct HandlerRegistry {
    factories: BTreeMap<String, HandlerFactory>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with every built-in country rule
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for rule in countries::rules() {
            registry.register(
                rule.country,
                HandlerFactory::new(format!("builtin:{}", rule.country), move || {
                    compile_rule(rule)
                }),
            );
        }
        registry
    }

    /// Store or overwrite the binding for `country`, returning the previous one.
    pub fn register(
        &mut self,
        country: impl AsRef<str>,
        factory: HandlerFactory,
    ) -> Option<HandlerFactory> {
        self.factories
            .insert(country.as_ref().to_ascii_uppercase(), factory)
    }

    pub fn get(&self, country: &str) -> Option<&HandlerFactory> {
        self.factories.get(&country.to_ascii_uppercase())
    }

    pub fn has_handler(&self, country: &str) -> bool {
        self.factories.contains_key(&country.to_ascii_uppercase())
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Fixed;

    impl PostalCodeHandler for Fixed {
        fn validate(&self, postal_code: &str) -> bool {
            postal_code == "OK"
        }

        fn format(&self, _postal_code: &str) -> String {
            "O-K".to_string()
        }

        fn hint(&self) -> &str {
            "OK"
        }
    }

    #[test]
    fn test_factory_of_builds_new_instances() {
        let factory = HandlerFactory::of::<Fixed>();
        let a = factory.create().unwrap();
        let b = factory.create().unwrap();

        assert!(!Arc::ptr_eq(&a, &b));
        assert!(a.validate("OK"));
        assert!(factory.name().ends_with("Fixed"));
    }

    #[test]
    fn test_factory_instance_shares_handler() {
        let factory = HandlerFactory::instance(Fixed);
        let a = factory.create().unwrap();
        let b = factory.create().unwrap();

        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_builtin_alias() {
        let factory = HandlerFactory::builtin("gb");
        let handler = factory.create().unwrap();

        assert!(handler.validate("WC2E9RZ"));
        assert_eq!(factory.name(), "builtin:GB");
        assert!(HandlerFactory::builtin("XX").create().is_none());
    }

    #[test]
    fn test_pattern_factory() {
        let factory = HandlerFactory::pattern("[0-9]{3}", "NNN", Layout::split(1, "-"));
        let handler = factory.create().unwrap();

        assert!(handler.validate("123"));
        assert_eq!(handler.format("123"), "1-23");
        assert_eq!(handler.hint(), "NNN");
    }

    #[test]
    fn test_pattern_factory_unresolved_on_bad_input() {
        assert!(HandlerFactory::pattern("[0-9", "NNN", Layout::Compact).create().is_none());
        assert!(HandlerFactory::pattern("[0-9]", " ", Layout::Compact).create().is_none());
        assert!(HandlerFactory::unresolved("missing").create().is_none());
    }

    #[test]
    fn test_factory_from_config() {
        let alias = HandlerConfig {
            builtin: Some("pl".to_string()),
            ..Default::default()
        };
        let handler = HandlerFactory::from(&alias).create().unwrap();
        assert_eq!(handler.format("12345"), "12-345");

        let pattern = HandlerConfig {
            pattern: Some("[A-Z]{2}[0-9]{2}".to_string()),
            hint: Some("AA NN".to_string()),
            split_at: Some(2),
            ..Default::default()
        };
        let handler = HandlerFactory::from(&pattern).create().unwrap();
        assert!(handler.validate("AB12"));
        assert_eq!(handler.format("AB12"), "AB 12");

        let prefixed = HandlerConfig {
            pattern: Some("(?:XY)?[0-9]{3}".to_string()),
            hint: Some("XY-NNN".to_string()),
            prefix: Some("XY".to_string()),
            ..Default::default()
        };
        let handler = HandlerFactory::from(&prefixed).create().unwrap();
        assert_eq!(handler.format("123"), "XY-123");
    }

    #[test]
    fn test_factory_from_incomplete_config_is_unresolved() {
        assert!(HandlerFactory::from(&HandlerConfig::default()).create().is_none());

        let missing_hint = HandlerConfig {
            pattern: Some("[0-9]{3}".to_string()),
            ..Default::default()
        };
        assert!(HandlerFactory::from(&missing_hint).create().is_none());

        let unknown_alias = HandlerConfig {
            builtin: Some("XX".to_string()),
            ..Default::default()
        };
        assert!(HandlerFactory::from(&unknown_alias).create().is_none());
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = HandlerRegistry::with_defaults();

        assert_eq!(registry.len(), countries::rules().len());
        assert!(registry.has_handler("fr"));
        assert!(registry.has_handler("GB"));
        assert!(!registry.has_handler("XX"));

        let handler = registry.get("pl").unwrap().create().unwrap();
        assert_eq!(handler.format("12345"), "12-345");
    }

    #[test]
    fn test_registry_register_overwrites() {
        let mut registry = HandlerRegistry::new();
        assert!(registry.is_empty());

        assert!(registry.register("zz", HandlerFactory::of::<Fixed>()).is_none());
        let previous = registry.register("ZZ", HandlerFactory::unresolved("gone"));

        assert!(previous.is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("Zz").unwrap().name(), "gone");
        assert_eq!(registry.countries().collect::<Vec<_>>(), vec!["ZZ"]);
    }
}
