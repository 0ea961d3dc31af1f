// ABOUTME: Integration tests for yb-cli command dispatch.
// ABOUTME: Covers argument validation and fail-fast setup errors without a live control plane.

use clap::Parser;
use tempfile::TempDir;
use yb_cli::commands::Cli;
use yb_logtail::CancellationToken;

fn parse(dir: &TempDir, args: &[&str]) -> Cli {
    let config = dir.path().join("config.json");
    let mut argv = vec!["yb", "--config", config.to_str().unwrap()];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[tokio::test]
async fn log_without_app_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    let cli = parse(&dir, &["log"]);

    let err = yb_cli::run_command(cli, CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("application name is required"));
}

#[tokio::test]
async fn push_log_rejects_ambiguous_identity() {
    let dir = TempDir::new().unwrap();
    let cli = parse(&dir, &["push", "log", "--name", "shop:web", "--tag", "v1"]);

    let err = yb_cli::run_command(cli, CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("must not contain ':'"));
}

#[tokio::test]
async fn unreachable_host_fails_fast() {
    let dir = TempDir::new().unwrap();
    let cli = parse(&dir, &["log", "web", "--host", "127.0.0.1:1"]);

    let err = yb_cli::run_command(cli, CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Could not get application log");
    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    assert!(
        chain.iter().any(|e| e.contains("could not reach control plane")),
        "{:?}",
        chain
    );
}

#[tokio::test]
async fn push_log_failure_suggests_retry_command() {
    let dir = TempDir::new().unwrap();
    let cli = parse(
        &dir,
        &["push", "log", "--name", "shop", "--tag", "v1", "--host", "127.0.0.1:1"],
    );

    let err = yb_cli::run_command(cli, CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err
        .to_string()
        .contains("yb push log --name=shop --tag=v1"));
}
