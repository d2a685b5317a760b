//! Command-line arguments

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "linkshelf", version, about = "URL shortener with categories and click analytics")]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print an Argon2 hash suitable for `auth.admin_password`
    HashPassword { password: String },
    /// Write a sample configuration file
    GenerateConfig {
        #[arg(default_value = "config.example.toml")]
        path: String,
    },
}

impl Cli {
    /// 未指定子命令时默认启动服务器
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_serve() {
        let cli = Cli::parse_from(["linkshelf"]);
        assert_eq!(cli.command_or_default(), Command::Serve);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_config_flag() {
        let cli = Cli::parse_from(["linkshelf", "--config", "custom.toml", "serve"]);
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        assert_eq!(cli.command_or_default(), Command::Serve);
    }

    #[test]
    fn test_hash_password_subcommand() {
        let cli = Cli::parse_from(["linkshelf", "hash-password", "s3cret"]);
        assert_eq!(
            cli.command_or_default(),
            Command::HashPassword {
                password: "s3cret".to_string()
            }
        );
    }
}
