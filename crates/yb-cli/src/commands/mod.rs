// ABOUTME: CLI command definitions using clap
// ABOUTME: Defines the log-tail subcommands and their shared output options

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

pub mod log;
pub mod push;

#[derive(Parser, Debug)]
#[command(
    name = "yb",
    about = "Command-line client for the yb application platform",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Control-plane address (e.g., controller.yottab.io:443)
    #[arg(long, global = true, env = "YB_HOST")]
    pub host: Option<String>,

    /// Bearer token; when unset it is read from the config file on every request
    #[arg(long, global = true, env = "YB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Config file (default: ~/.yb/config.json)
    #[arg(long, global = true, env = "YB_CONFIG")]
    pub config: Option<PathBuf>,

    /// More diagnostics on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Stream the runtime log of an application
    Log(LogArgs),

    /// Image push commands
    #[command(subcommand)]
    Push(PushCommand),
}

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Application name
    #[arg(value_name = "APP")]
    pub args: Vec<String>,

    #[command(flatten)]
    pub output: TailOptions,
}

#[derive(Subcommand, Debug)]
pub enum PushCommand {
    /// Stream the build log of a pushed image
    Log {
        /// Application name
        #[arg(long)]
        name: String,

        /// Image tag that was pushed
        #[arg(long)]
        tag: String,

        #[command(flatten)]
        output: TailOptions,
    },
}

/// Options shared by every log tail.
#[derive(Args, Debug, Clone)]
pub struct TailOptions {
    /// Prefix each line with its server timestamp
    #[arg(long)]
    pub timestamps: bool,

    /// Milliseconds to wait before reconnecting a dropped stream
    #[arg(long, default_value_t = 500)]
    pub retry_delay_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_command() {
        let cli = Cli::try_parse_from(["yb", "log", "web", "--timestamps"]).unwrap();
        match cli.command {
            Command::Log(args) => {
                assert_eq!(args.args, vec!["web"]);
                assert!(args.output.timestamps);
                assert_eq!(args.output.retry_delay_ms, 500);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_log_without_app_defers_validation() {
        let cli = Cli::try_parse_from(["yb", "log"]).unwrap();
        assert!(matches!(cli.command, Command::Log(ref a) if a.args.is_empty()));
    }

    #[test]
    fn test_parse_push_log_command() {
        let cli = Cli::try_parse_from([
            "yb",
            "push",
            "log",
            "--name=shop",
            "--tag=v2",
            "--retry-delay-ms",
            "250",
        ])
        .unwrap();
        match cli.command {
            Command::Push(PushCommand::Log { name, tag, output }) => {
                assert_eq!(name, "shop");
                assert_eq!(tag, "v2");
                assert_eq!(output.retry_delay_ms, 250);
                assert!(!output.timestamps);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_push_log_requires_tag() {
        assert!(Cli::try_parse_from(["yb", "push", "log", "--name", "shop"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "yb",
            "log",
            "web",
            "--host",
            "localhost:50051",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.host.as_deref(), Some("localhost:50051"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
