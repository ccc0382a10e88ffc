// Command flows over a temp state directory and a one-shot upstream.
// Only argument-supplied inputs are used, so nothing prompts.

mod common;

use aexus_cli::commands::{run_analyst, run_auth, run_scenario, Context};
use aexus_cli::config::{Config, ANALYST_BASE_URL, SCENARIO_ENGINE_URL, API_URL, TOKEN_ANALYST_URL};
use aexus_cli::error::CliError;
use aexus_cli::store::{StateDirs, UserSession};
use common::{client, serve_once};

fn context(root: &std::path::Path, settings: &[(&str, String)]) -> Context {
    let file = settings
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect::<Vec<_>>();
    Context {
        config: Config::from_sources(file, Vec::new()),
        state: StateDirs::under(root),
        api: client(),
    }
}

#[test]
fn analyst_without_endpoint_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path(), &[]);

    let err = run_analyst(&ctx, Some("So111")).unwrap_err();
    assert!(matches!(err, CliError::MissingConfig(_)));
    assert!(!ctx.state.points_dir.exists());
    assert!(!ctx.state.cli_dir.exists());
}

#[test]
fn analyst_scan_awards_points_then_records_history() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"token":{"name":"Bonk","symbol":"BONK","mint":"So111"},"pools":[]}"#,
    );
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path(), &[(TOKEN_ANALYST_URL, format!("{}/scan", base))]);

    run_analyst(&ctx, Some("So111")).unwrap();

    let seen = server.join().unwrap();
    assert_eq!(seen.request_line, "GET /scan?tokenAddress=So111 HTTP/1.1");

    let points = ctx.state.points().load("default");
    assert!((3..=7).contains(&points.points));

    let scans = ctx.state.history().list_analyst(None);
    assert_eq!(scans.len(), 1);
    assert_eq!(scans[0].mint, "So111");
    assert_eq!(scans[0].symbol.as_deref(), Some("BONK"));
}

#[test]
fn failed_scan_records_nothing() {
    let (base, server) = serve_once("404 Not Found", r#"{"error":"Token not found"}"#);
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path(), &[(ANALYST_BASE_URL, base)]);

    let err = run_analyst(&ctx, Some("nope")).unwrap_err();
    server.join().unwrap();
    assert_eq!(err.to_string(), "Token not found");
    assert!(!ctx.state.points().path().exists());
    assert!(!ctx.state.history().path().exists());
}

#[test]
fn scenario_run_records_sentiment_and_points() {
    let (base, server) = serve_once("200 OK", r#"{"sentiment":"bearish","summary":"Prices slide."}"#);
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path(), &[(SCENARIO_ENGINE_URL, base)]);

    run_scenario(&ctx, &["what if".to_string(), "SOL halves".to_string()]).unwrap();

    let seen = server.join().unwrap();
    let body: serde_json::Value = serde_json::from_str(&seen.body).unwrap();
    assert_eq!(body, serde_json::json!({"input": "what if SOL halves"}));

    let runs = ctx.state.history().list_scenarios(None);
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].prompt, "what if SOL halves");
    assert_eq!(runs[0].sentiment_label.as_deref(), Some("Bearish"));
    let awarded = runs[0].points.unwrap();
    assert!((6..=8).contains(&awarded));
    assert_eq!(ctx.state.points().load("default").points, u64::from(awarded));
}

#[test]
fn scenario_uses_session_identity() {
    let (base, server) = serve_once("200 OK", r#"{"sentiment":"bullish"}"#);
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path(), &[(API_URL, base)]);
    let session = UserSession::new("trinity", "Trinity");
    ctx.state.session().save(&session).unwrap();

    run_scenario(&ctx, &["what if ETH flips".to_string()]).unwrap();

    let seen = server.join().unwrap();
    let body: serde_json::Value = serde_json::from_str(&seen.body).unwrap();
    assert_eq!(body["userId"], session.id.as_str());
    assert!(ctx.state.points().load("trinity").points > 0);
    assert_eq!(ctx.state.points().load("default").points, 0);
}

#[test]
fn logout_removes_session() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path(), &[]);
    ctx.state.session().save(&UserSession::new("neo", "Neo")).unwrap();

    run_auth(&ctx, true).unwrap();
    assert!(ctx.state.session().load().is_none());
    run_auth(&ctx, true).unwrap();
}
