//! Country-risk indicator adapters.
//!
//! Every adapter takes one query string and returns one text block. Dataset
//! adapters (ND-GAIN climate index, Global Terrorism Database) load their CSV
//! once at construction; REST adapters (World Bank, NewsAPI, Google Custom
//! Search) issue a single GET per call. [`AdapterRegistry`] collects them by
//! name for the report assembler.

pub mod clients;
pub mod datasets;
pub mod error;
pub mod registry;

pub use clients::{EconomicAdapter, NewsAdapter, WebSearchAdapter};
pub use datasets::{ClimateAdapter, TerrorismAdapter};
pub use error::{AdapterError, DatasetError, FetchError};
pub use registry::{Adapter, AdapterRegistry, ExcludedAdapter};
