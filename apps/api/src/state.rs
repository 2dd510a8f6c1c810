use std::sync::Arc;

use iamview_application::{AggregationService, NavigationService};
use iamview_domain::Translator;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub navigation_service: NavigationService,
    pub aggregation_service: AggregationService,
    pub translator: Arc<dyn Translator>,
}

impl AppState {
    pub fn new(navigation_service: NavigationService, translator: Arc<dyn Translator>) -> Self {
        Self {
            navigation_service,
            aggregation_service: AggregationService::new(translator.clone()),
            translator,
        }
    }
}
