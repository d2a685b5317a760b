pub mod args;
mod r#impl;
mod structs;
pub mod validators;

pub use r#impl::{get_config, init_config};
pub use structs::*;
pub use validators::{
    MAX_COOKIE_MAX_AGE_DAYS, MAX_SESSION_DAYS, MAX_TOKEN_MINUTES, MIN_JWT_SECRET_LEN,
    validate_static_config,
};
