//! Name-keyed collection of constructed adapters.

use grisp_core::AppConfig;
use grisp_sentiment::SocialSentimentAdapter;

use crate::clients::{EconomicAdapter, NewsAdapter, WebSearchAdapter};
use crate::datasets::{ClimateAdapter, TerrorismAdapter};
use crate::error::AdapterError;

/// Every adapter the report can draw on.
pub enum Adapter {
    Climate(ClimateAdapter),
    Terrorism(TerrorismAdapter),
    Economic(EconomicAdapter),
    News(NewsAdapter),
    WebSearch(WebSearchAdapter),
    SocialSentiment(SocialSentimentAdapter),
}

impl Adapter {
    /// Names in the order [`AdapterRegistry::from_config`] registers them.
    pub const NAMES: [&'static str; 6] = [
        BUILDERS[0].0,
        BUILDERS[1].0,
        BUILDERS[2].0,
        BUILDERS[3].0,
        BUILDERS[4].0,
        BUILDERS[5].0,
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Climate(_) => ClimateAdapter::NAME,
            Self::Terrorism(_) => TerrorismAdapter::NAME,
            Self::Economic(_) => EconomicAdapter::NAME,
            Self::News(_) => NewsAdapter::NAME,
            Self::WebSearch(_) => WebSearchAdapter::NAME,
            Self::SocialSentiment(_) => SocialSentimentAdapter::NAME,
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Climate(_) => "ND-GAIN climate vulnerability and readiness scores",
            Self::Terrorism(_) => "Global Terrorism Database incidents in the trailing window",
            Self::Economic(_) => "latest World Bank indicator value",
            Self::News(_) => "top NewsAPI articles with headline sentiment",
            Self::WebSearch(_) => "top Google Custom Search results",
            Self::SocialSentiment(_) => "sentiment split of recent English X posts",
        }
    }

    /// Example of the query shape the adapter expects.
    #[must_use]
    pub fn query_hint(&self) -> &'static str {
        match self {
            Self::Climate(_) | Self::Terrorism(_) => "<country name>, e.g. India",
            Self::Economic(_) => "<country_code>:<indicator_code>, e.g. US:SP.POP.TOTL",
            Self::News(_) | Self::WebSearch(_) | Self::SocialSentiment(_) => {
                "<free text>, e.g. India political stability"
            }
        }
    }

    /// Runs the adapter. Always yields report text; failures are rendered.
    pub async fn fetch(&self, query: &str) -> String {
        match self {
            Self::Climate(a) => a.fetch(query),
            Self::Terrorism(a) => a.fetch(query),
            Self::Economic(a) => a.fetch(query).await,
            Self::News(a) => a.fetch(query).await,
            Self::WebSearch(a) => a.fetch(query).await,
            Self::SocialSentiment(a) => a.fetch(query).await,
        }
    }
}

impl std::fmt::Debug for Adapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Adapter").field(&self.name()).finish()
    }
}

type Builder = fn(&AppConfig) -> Result<Adapter, AdapterError>;

/// Construction order for [`AdapterRegistry::from_config`].
const BUILDERS: [(&str, Builder); 6] = [
    (ClimateAdapter::NAME, |config| {
        Ok(Adapter::Climate(ClimateAdapter::from_path(
            &config.climate_dataset_path,
        )?))
    }),
    (TerrorismAdapter::NAME, |config| {
        Ok(Adapter::Terrorism(TerrorismAdapter::from_path(
            &config.terrorism_dataset_path,
            config.terrorism_window(),
        )?))
    }),
    (EconomicAdapter::NAME, |config| {
        Ok(Adapter::Economic(EconomicAdapter::from_config(config)?))
    }),
    (NewsAdapter::NAME, |config| {
        Ok(Adapter::News(NewsAdapter::from_config(config)?))
    }),
    (WebSearchAdapter::NAME, |config| {
        Ok(Adapter::WebSearch(WebSearchAdapter::from_config(config)?))
    }),
    (SocialSentimentAdapter::NAME, |config| {
        Ok(Adapter::SocialSentiment(SocialSentimentAdapter::from_config(config)?))
    }),
];

/// A source that could not be constructed, kept for reporting.
#[derive(Debug)]
pub struct ExcludedAdapter {
    pub name: &'static str,
    pub error: AdapterError,
}

/// Adapters keyed by name, iterated in registration order.
#[derive(Debug, Default)]
pub struct AdapterRegistry {
    adapters: Vec<Adapter>,
}

impl AdapterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds every adapter, failing on the first one that cannot be built.
    ///
    /// # Errors
    ///
    /// Returns the [`AdapterError`] of the first adapter that fails.
    pub fn from_config(config: &AppConfig) -> Result<Self, AdapterError> {
        let mut registry = Self::new();
        for (_, build) in BUILDERS {
            registry.register(build(config)?);
        }
        Ok(registry)
    }

    /// Builds every adapter it can; the rest are logged and returned.
    #[must_use]
    pub fn from_config_lenient(config: &AppConfig) -> (Self, Vec<ExcludedAdapter>) {
        let mut registry = Self::new();
        let mut excluded = Vec::new();

        for (name, build) in BUILDERS {
            match build(config) {
                Ok(adapter) => registry.register(adapter),
                Err(error) => {
                    tracing::warn!(
                        adapter = name,
                        error = %error,
                        "adapter unavailable, excluding from report"
                    );
                    excluded.push(ExcludedAdapter { name, error });
                }
            }
        }

        tracing::info!(
            registered = registry.len(),
            excluded = excluded.len(),
            "adapter registry built"
        );
        (registry, excluded)
    }

    /// Adds `adapter`, replacing any adapter already registered under its
    /// name in place.
    pub fn register(&mut self, adapter: Adapter) {
        if let Some(slot) = self.adapters.iter_mut().find(|a| a.name() == adapter.name()) {
            *slot = adapter;
        } else {
            self.adapters.push(adapter);
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Adapter> {
        self.adapters.iter().find(|a| a.name() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.adapters.iter().map(Adapter::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Adapter> {
        self.adapters.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
