//! Report assembly: runs every registered adapter once and joins the blocks.
//!
//! Adapters are awaited one after another in registry order. Each block is
//! whatever text the adapter returns, so a failing source shows up as its own
//! failure line and never aborts the report.

use std::fmt::Write as _;

use grisp_core::format::render_failure;
use grisp_indicators::{Adapter, AdapterRegistry, ExcludedAdapter};

/// Indicators queried when the caller names none.
pub(crate) const DEFAULT_INDICATORS: [&str; 3] = ["NY.GDP.MKTP.CD", "SP.POP.TOTL", "FP.CPI.TOTL.ZG"];

/// What one report is about, and how each adapter should be queried.
#[derive(Debug, Clone)]
pub(crate) struct ReportRequest {
    pub country: String,
    pub country_code: Option<String>,
    pub indicators: Vec<String>,
    pub news_query: Option<String>,
    pub search_query: Option<String>,
    pub social_query: Option<String>,
}

impl ReportRequest {
    /// Queries to send to `adapter`. Empty when the adapter has nothing to ask.
    fn queries_for(&self, adapter: &Adapter) -> Vec<String> {
        let or_country = |q: &Option<String>| q.clone().unwrap_or_else(|| self.country.clone());
        match adapter {
            Adapter::Climate(_) | Adapter::Terrorism(_) => vec![self.country.clone()],
            Adapter::Economic(_) => match &self.country_code {
                Some(code) => self
                    .indicators
                    .iter()
                    .map(|indicator| format!("{code}:{indicator}"))
                    .collect(),
                None => Vec::new(),
            },
            Adapter::News(_) => vec![or_country(&self.news_query)],
            Adapter::WebSearch(_) => vec![or_country(&self.search_query)],
            Adapter::SocialSentiment(_) => vec![or_country(&self.social_query)],
        }
    }
}

/// Runs the registry against `request` and renders the full report.
///
/// Sources listed in `excluded` get a failure line in place of their block.
pub(crate) async fn assemble_report(
    registry: &AdapterRegistry,
    excluded: &[ExcludedAdapter],
    request: &ReportRequest,
) -> String {
    let mut out = format!("# GRiSP Risk Report: {}\n", request.country);

    for adapter in registry.iter() {
        let queries = request.queries_for(adapter);
        let _ = write!(out, "\n## {}\n", adapter.name());

        if queries.is_empty() {
            tracing::debug!(adapter = adapter.name(), "no query for adapter, skipping");
            let _ = write!(
                out,
                "\nSkipped: no query for {} (expects {}).\n",
                adapter.name(),
                adapter.query_hint()
            );
            continue;
        }

        for query in queries {
            tracing::debug!(adapter = adapter.name(), query = %query, "running adapter");
            let block = adapter.fetch(&query).await;
            let _ = write!(out, "\n{block}\n");
        }
    }

    for ExcludedAdapter { name, error } in excluded {
        let _ = write!(
            out,
            "\n## {name}\n\n{}\n",
            render_failure(name, &request.country, error)
        );
    }

    out
}
