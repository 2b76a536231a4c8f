pub mod handlers;
pub mod routes;

pub use routes::create_router;

use crate::services::DashboardServices;

#[derive(Clone)]
pub struct ApiState {
    pub services: DashboardServices,
}

impl ApiState {
    pub fn new(services: DashboardServices) -> Self {
        Self { services }
    }
}
