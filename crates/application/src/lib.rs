//! Application services and ports.

#![forbid(unsafe_code)]

mod aggregation_service;
mod catalog_translator;
mod navigation_service;

pub use aggregation_service::{AggregationService, AggregationSummary, AssembledAggregations};
pub use catalog_translator::CatalogTranslator;
pub use navigation_service::{NavigationResolution, NavigationService};
