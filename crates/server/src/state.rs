use std::sync::Arc;

use reelmix_catalog::discover::DiscoveryService;
use reelmix_catalog::provider::AnimeIdMapper;

use crate::inflight::InFlight;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub discovery: DiscoveryService,
    pub id_mapper: Arc<dyn AnimeIdMapper>,
    pub inflight: InFlight,
}

impl AppState {
    pub fn new(discovery: DiscoveryService, id_mapper: Arc<dyn AnimeIdMapper>) -> Self {
        Self {
            discovery,
            id_mapper,
            inflight: InFlight::new(),
        }
    }
}
