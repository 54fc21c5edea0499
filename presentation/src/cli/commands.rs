//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for gemchat
#[derive(Parser, Debug)]
#[command(name = "gemchat")]
#[command(author, version, about = "Terminal chat workspace with a Gemini bot in every channel")]
#[command(long_about = r#"
gemchat is a chat workspace in your terminal. Servers, channels and members
are mocked in memory; every message you post is answered by Gemini, with one
conversation per channel.

The Gemini API key is read from the config file, then from $API_KEY (or the
variable named by gemini.api_key_env), then from $GEMINI_API_KEY.

Configuration files are loaded from (in priority order):
1. GEMCHAT_* environment variables (GEMCHAT_BOT__MODEL=...)
2. --config <path>     Explicit config file
3. ./gemchat.toml      Project-level config
4. ~/.config/gemchat/config.toml   Global config

Example:
  gemchat
  gemchat --user Ada --model gemini-2.5-pro
"#)]
pub struct Cli {
    /// Log in as this user instead of prompting
    #[arg(short, long, value_name = "NAME")]
    pub user: Option<String>,

    /// Gemini model answering in channels
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the typing indicator
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["gemchat", "-u", "Ada", "-m", "gemini-2.5-pro", "-vv", "-q"]);
        assert_eq!(cli.user.as_deref(), Some("Ada"));
        assert_eq!(cli.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
        assert!(!cli.no_color);
    }
}
