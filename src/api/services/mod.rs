pub mod admin;
pub mod analytics;
pub mod health;
pub mod redirect;

pub use analytics::AnalyticsService;
pub use health::{HealthService, health_routes};
pub use redirect::{RedirectService, redirect_routes};
