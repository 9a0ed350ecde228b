use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use skyfare_core::repository::{BookingGateway, FlightLookup, LocationDirectory};
use skyfare_core::CoreResult;
use skyfare_search::{FilterDefaults, PriceRange};
use skyfare_store::Config;
use crate::metrics::SearchMetrics;
use crate::session_store::SessionStore;

/// Values the handlers need from configuration.
#[derive(Debug, Clone, Copy)]
pub struct SearchSettings {
    pub filters: FilterDefaults,
    pub monthly_limit: usize,
    pub session_idle: Duration,
}

impl SearchSettings {
    pub fn from_config(config: &Config) -> CoreResult<Self> {
        let price_range = PriceRange::new(
            config.filters.default_price_min,
            config.filters.default_price_max,
        )?;
        Ok(Self {
            filters: FilterDefaults::new(price_range)?,
            monthly_limit: config.monthly.default_limit,
            session_idle: Duration::from_secs(config.sessions.idle_seconds),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<dyn FlightLookup>,
    pub locations: Arc<dyn LocationDirectory>,
    pub bookings: Arc<dyn BookingGateway>,
    pub settings: SearchSettings,
    pub sessions: Arc<RwLock<SessionStore>>,
    pub metrics: Arc<SearchMetrics>,
}

impl AppState {
    pub fn new(
        lookup: Arc<dyn FlightLookup>,
        locations: Arc<dyn LocationDirectory>,
        bookings: Arc<dyn BookingGateway>,
        settings: SearchSettings,
    ) -> Result<Self, prometheus::Error> {
        Ok(Self {
            lookup,
            locations,
            bookings,
            settings,
            sessions: Arc::new(RwLock::new(SessionStore::new(settings.session_idle))),
            metrics: Arc::new(SearchMetrics::new()?),
        })
    }
}
