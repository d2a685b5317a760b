//! Mode routing
//!
//! - Server mode (HTTP server, default)
//! - hash-password / generate-config one-shot commands

pub mod server;

pub use server::{configure_app, run_server};

use anyhow::Result;

use crate::config::StaticConfig;
use crate::utils::password::hash_password;

/// 打印 Argon2 哈希，用于 `auth.admin_password`
pub fn run_hash_password(password: &str) -> Result<()> {
    let hash = hash_password(password).map_err(|e| anyhow::anyhow!("{}", e))?;
    println!("{}", hash);
    Ok(())
}

/// 写出示例配置文件
pub fn run_generate_config(path: &str) -> Result<()> {
    StaticConfig::default()
        .save_to_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to write sample config to {}: {}", path, e))?;
    println!("Sample configuration written to {}", path);
    Ok(())
}
