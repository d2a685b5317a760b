//! Service layer for business logic
//!
//! Services own a shared `SeaOrmStorage` handle and are constructed once at
//! startup; HTTP handlers receive them through `web::Data`.

mod auth;
mod category_service;
mod redirect;
mod url_service;

pub use auth::*;
pub use category_service::*;
pub use redirect::*;
pub use url_service::*;
