use std::collections::{BTreeSet, HashMap};
use std::fmt;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{PostalCodeError, Result};
use crate::handlers::{HandlerFactory, HandlerRegistry, SharedHandler};
use crate::normalize::normalize;
use crate::observability::{Metrics, MetricsSnapshot};
use crate::postal_code::PostalCode;

/// Resolves country codes to handlers and runs postal codes through them.
///
/// Country codes are case-insensitive. User-registered bindings take
/// precedence over built-in rules; resolved handlers are cached per country
/// until a new binding is registered for that country.
pub struct PostalCodeManager {
    builtin: HandlerRegistry,
    state: Mutex<ManagerState>,
    metrics: Metrics,
}

#[derive(Default)]
struct ManagerState {
    overrides: HandlerRegistry,
    cache: HashMap<String, SharedHandler>,
    /// Bumped on every registration, per country
    generations: HashMap<String, u64>,
}

impl ManagerState {
    fn generation(&self, country: &str) -> u64 {
        self.generations.get(country).copied().unwrap_or(0)
    }
}

impl PostalCodeManager {
    /// Manager with built-in rules only
    pub fn new() -> Self {
        Self {
            builtin: HandlerRegistry::with_defaults(),
            state: Mutex::new(ManagerState::default()),
            metrics: Metrics::new(),
        }
    }

    /// Manager with an initial set of user bindings
    pub fn with_handlers<I, K>(handlers: I) -> Self
    where
        I: IntoIterator<Item = (K, HandlerFactory)>,
        K: AsRef<str>,
    {
        let manager = Self::new();
        for (country, factory) in handlers {
            manager.register_handler(country.as_ref(), factory);
        }
        manager
    }

    /// Manager with the handler bindings declared in configuration
    pub fn from_config(config: &Config) -> Self {
        Self::with_handlers(
            config
                .handlers
                .iter()
                .map(|(country, handler)| (country, HandlerFactory::from(handler))),
        )
    }

    /// Whether a handler can be resolved for `country`
    pub fn is_supported_country(&self, country: &str) -> bool {
        self.resolve(&country.to_ascii_uppercase()).is_some()
    }

    /// Whether `postal_code` matches the rule of `country`
    pub fn validate(&self, postal_code: &str, country: &str) -> Result<bool> {
        let (_, handler) = self.handler(country)?;
        Ok(handler.validate(&normalize(postal_code)))
    }

    /// Canonical form of `postal_code`, or `InvalidPostalCode` when the
    /// country's rule rejects it
    pub fn format(&self, postal_code: &str, country: &str) -> Result<String> {
        let (country, handler) = self.handler(country)?;
        let normalized = normalize(postal_code);

        if !handler.validate(&normalized) {
            return Err(PostalCodeError::invalid_postal_code(
                postal_code,
                country,
                handler.hint(),
            ));
        }

        Ok(handler.format(&normalized))
    }

    /// Like [`format`](Self::format), with `None` for a rejected code.
    /// An unknown country is still an error.
    pub fn format_or_none(&self, postal_code: &str, country: &str) -> Result<Option<String>> {
        match self.format(postal_code, country) {
            Ok(formatted) => Ok(Some(formatted)),
            Err(PostalCodeError::InvalidPostalCode { .. }) => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Expected format description for `country`
    pub fn hint(&self, country: &str) -> Result<String> {
        let (_, handler) = self.handler(country)?;
        Ok(handler.hint().to_string())
    }

    /// Bind `country` to `factory`, replacing any previous binding.
    ///
    /// A cached handler for the country is dropped, so the next call uses
    /// the new binding. The factory is not invoked here; one that later
    /// fails to produce a handler makes the country unsupported. Factories
    /// run without the manager lock held and may call back into it.
    pub fn register_handler(&self, country: &str, factory: HandlerFactory) -> &Self {
        let country = country.to_ascii_uppercase();
        tracing::debug!(%country, handler = factory.name(), "Registering postal code handler");

        let mut state = self.state.lock();
        state.overrides.register(&country, factory);
        state.cache.remove(&country);
        *state.generations.entry(country).or_default() += 1;
        drop(state);

        self.metrics.registered();
        self
    }

    /// Value object bound to this manager
    pub fn postal_code(
        &self,
        postal_code: impl Into<String>,
        country: impl Into<String>,
    ) -> PostalCode<'_> {
        PostalCode::new(postal_code, country, self)
    }

    /// Sorted codes of every country that currently resolves
    pub fn supported_countries(&self) -> Vec<String> {
        let registered: Vec<String> = {
            let state = self.state.lock();
            state.overrides.countries().map(str::to_string).collect()
        };

        self.builtin
            .countries()
            .map(str::to_string)
            .chain(registered)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter(|country| self.is_supported_country(country))
            .collect()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn handler(&self, country: &str) -> Result<(String, SharedHandler)> {
        let country = country.to_ascii_uppercase();
        match self.resolve(&country) {
            Some(handler) => Ok((country, handler)),
            None => Err(PostalCodeError::unknown_country(country)),
        }
    }

    /// Cache, then user bindings, then built-in rules. A user binding that
    /// fails to produce a handler shadows the built-in rule.
    ///
    /// The factory runs with the lock released. Its result is only cached
    /// when no registration for the country happened meanwhile; otherwise
    /// the lookup starts over with the new binding.
    fn resolve(&self, country: &str) -> Option<SharedHandler> {
        loop {
            let (factory, generation) = {
                let state = self.state.lock();
                if let Some(handler) = state.cache.get(country) {
                    tracing::debug!(%country, "Postal code handler cache hit");
                    self.metrics.cache_hit();
                    return Some(SharedHandler::clone(handler));
                }

                let factory = state
                    .overrides
                    .get(country)
                    .or_else(|| self.builtin.get(country))
                    .cloned()?;
                (factory, state.generation(country))
            };

            tracing::debug!(%country, handler = factory.name(), "Postal code handler cache miss");
            let created = factory.create();

            let mut state = self.state.lock();
            if state.generation(country) != generation {
                tracing::debug!(%country, "Binding replaced during resolution, retrying");
                continue;
            }

            // Another caller may have resolved the same binding first
            if let Some(handler) = state.cache.get(country) {
                self.metrics.cache_hit();
                return Some(SharedHandler::clone(handler));
            }

            return match created {
                Some(handler) => {
                    tracing::debug!(
                        %country,
                        handler = factory.name(),
                        "Resolved postal code handler"
                    );
                    state
                        .cache
                        .insert(country.to_string(), SharedHandler::clone(&handler));
                    self.metrics.instantiated();
                    Some(handler)
                }
                None => {
                    tracing::warn!(
                        %country,
                        handler = factory.name(),
                        "Handler binding could not be resolved"
                    );
                    self.metrics.resolution_failed();
                    None
                }
            };
        }
    }
}

impl Default for PostalCodeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PostalCodeManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("PostalCodeManager")
            .field("builtin", &self.builtin.len())
            .field("overrides", &state.overrides)
            .field("cached", &state.cache.len())
            .finish()
    }
}
