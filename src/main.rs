use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use linkshelf::config::args::{Cli, Command};
use linkshelf::config::{get_config, init_config, validate_static_config};
use linkshelf::runtime::modes::{run_generate_config, run_hash_password, run_server};
use linkshelf::system::init_logging;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command_or_default() {
        Command::HashPassword { password } => run_hash_password(&password),
        Command::GenerateConfig { path } => run_generate_config(&path),
        Command::Serve => {
            init_config(cli.config.as_deref());
            let config = get_config();

            // 保持 guard 存活直到进程退出
            let _log_guard = init_logging(&config.logging);

            if let Err(problems) = validate_static_config(&config) {
                for problem in &problems {
                    error!("Invalid configuration: {}", problem);
                }
                anyhow::bail!("configuration has {} problem(s)", problems.len());
            }

            info!("linkshelf v{} starting", env!("CARGO_PKG_VERSION"));
            run_server(&config).await
        }
    }
}
