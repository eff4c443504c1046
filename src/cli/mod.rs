// Command-line interface: server startup plus a small client for a running gateway

pub mod commands;

use crate::config::BackendKind;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "repo-gateway")]
#[command(about = "Repository management gateway in front of the GitHub API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the gateway server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,

        /// Backend serving the endpoints (github or memory)
        #[arg(long, env = "BACKEND")]
        backend: Option<BackendKind>,
    },

    /// Create a repository through a running gateway
    Create {
        /// Repository name
        name: String,

        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// List repositories of the token owner
    List {
        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Delete a repository
    Delete {
        /// Repository owner
        owner: String,

        /// Repository name
        repo: String,

        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Count open pull requests of a repository
    Pulls {
        /// Repository owner
        owner: String,

        /// Repository name
        repo: String,

        #[command(flatten)]
        remote: RemoteArgs,
    },
}

/// Where the client commands send their requests
#[derive(Args, Debug, Clone)]
pub struct RemoteArgs {
    /// Base URL of the gateway
    #[arg(long, env = "GATEWAY_URL", default_value = "http://127.0.0.1:8080")]
    pub server: String,

    /// Authorization value forwarded to GitHub, e.g. "Bearer ghp_..."
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["repo-gateway", "serve", "--port", "9000", "--backend", "memory"])
            .unwrap();
        match cli.command {
            Commands::Serve { port, backend, .. } => {
                assert_eq!(port, Some(9000));
                assert_eq!(backend, Some(BackendKind::Memory));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_delete() {
        let cli = Cli::try_parse_from([
            "repo-gateway",
            "delete",
            "testuser",
            "test-repo",
            "--server",
            "http://localhost:3000",
            "--token",
            "Bearer t",
        ])
        .unwrap();
        match cli.command {
            Commands::Delete {
                owner,
                repo,
                remote,
            } => {
                assert_eq!(owner, "testuser");
                assert_eq!(repo, "test-repo");
                assert_eq!(remote.server, "http://localhost:3000");
                assert_eq!(remote.token.as_deref(), Some("Bearer t"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_backend() {
        assert!(Cli::try_parse_from(["repo-gateway", "serve", "--backend", "sqlite"]).is_err());
    }
}
