use std::sync::Arc;

use service::CarWashService;

/// Shared handler state; the store is chosen once at startup.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CarWashService>,
}

impl AppState {
    pub fn new(service: CarWashService) -> Self {
        Self { service: Arc::new(service) }
    }
}
