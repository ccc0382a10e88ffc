// Command flows. Each one resolves its configuration first, prompts for
// missing input, calls at most one upstream service, prints the result
// and then records points and history.

use crate::analyst::build_analyst_view;
use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::layout::{divider, section};
use crate::progression::{analyst_award, rank_snapshot, scenario_award, PointsSource};
use crate::render::{render_analyst, render_award, render_points_overview, render_scenario, render_session};
use crate::scenario::{build_engine_view, build_scenario_result, ScenarioInput};
use crate::store::{StateDirs, UserSession};
use crate::ui;
use log::info;

pub const DEFAULT_IDENTITY: &str = "default";

/// Everything a command needs for one invocation.
pub struct Context {
    pub config: Config,
    pub state: StateDirs,
    pub api: ApiClient,
}

/// Points are tracked under the session handle, or a shared default
/// identity when nobody is signed in.
pub fn active_identity(session: Option<&UserSession>) -> String {
    session
        .map(|s| s.handle.clone())
        .unwrap_or_else(|| DEFAULT_IDENTITY.to_string())
}

/// Parse a manual points adjustment such as `+10`, `-5` or `3.7`.
/// Blank or unparsable input is no change.
pub fn parse_delta(input: &str) -> i64 {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v.trunc() as i64,
        _ => 0,
    }
}

fn input_or_prompt(from_args: String, question: &str) -> CliResult<String> {
    let from_args = from_args.trim().to_string();
    if !from_args.is_empty() {
        return Ok(from_args);
    }
    Ok(ui::ask(question)?)
}

pub fn run_scenario(ctx: &Context, args: &[String]) -> CliResult<()> {
    let endpoint = ctx.config.scenario_endpoint()?;

    ui::heading("AEXUS Scenario Engine");
    ui::hint("Start with phrases like: what if SOL reaches a new high while liquidity stays thin.");
    let prompt = input_or_prompt(args.join(" "), "Describe a what-if scenario")?;
    if prompt.is_empty() {
        return Err(CliError::EmptyInput(
            "Empty scenario prompt. Nothing to simulate.".into(),
        ));
    }

    let session = ctx.state.session().load();
    let identity = active_identity(session.as_ref());
    let user_id = session.map(|s| s.id);

    let raw = ui::with_spinner(
        "Scenario is processing. Synthesizing sentiment, impacts, and key watchpoints.",
        || ctx.api.run_scenario_engine(&endpoint, &prompt, user_id.as_deref()),
    )?;

    let engine = build_engine_view(&raw);
    let award = scenario_award(&prompt, &mut rand::thread_rng());
    let input = ScenarioInput { prompt, user_id };
    let result = build_scenario_result(input, engine, award.points, award.label);
    println!("{}", render_scenario(&result));

    let (snapshot, delta) = ctx.state.points().apply(
        &identity,
        i64::from(award.points),
        PointsSource::Scenario,
        award.label,
    )?;
    ctx.state.history().append_scenario(
        &result.input.prompt,
        Some(result.sentiment_label),
        Some(award.points),
    )?;
    info!("Scenario recorded for {} ({:?})", identity, award.band);

    println!("{}", render_award(award.label, &delta, &rank_snapshot(snapshot.points)));
    Ok(())
}

pub fn run_analyst(ctx: &Context, mint: Option<&str>) -> CliResult<()> {
    let endpoint = ctx.config.analyst_endpoint()?;

    ui::heading("AEXUS Analyst");
    ui::hint("Paste a Solana mint address to pull token telemetry from the analyst node.");
    let mint = input_or_prompt(mint.unwrap_or("").to_string(), "Solana mint address")?;
    if mint.is_empty() {
        return Err(CliError::EmptyInput(
            "Empty token address. Nothing to scan.".into(),
        ));
    }
    println!("Target mint: {}", mint);

    let raw = ui::with_spinner(
        "Scan in progress. Pulling upstream data, shaping metrics, and assembling a view.",
        || ctx.api.fetch_token_analysis(&endpoint, &mint),
    )?;

    let view = build_analyst_view(&raw);
    println!("{}", render_analyst(&view));

    let identity = active_identity(ctx.state.session().load().as_ref());
    let award = analyst_award(view.risk.has_risk_flags, view.pools.len(), &mut rand::thread_rng());
    let (snapshot, delta) = ctx.state.points().apply(
        &identity,
        i64::from(award.points),
        PointsSource::Analyst,
        award.label,
    )?;
    let symbol = Some(view.profile.symbol.as_str()).filter(|s| *s != "-");
    ctx.state.history().append_analyst(&mint, symbol)?;
    info!("Scan recorded for {} ({:?})", identity, award.band);

    println!("{}", render_award(award.label, &delta, &rank_snapshot(snapshot.points)));
    Ok(())
}

pub fn run_auth(ctx: &Context, logout: bool) -> CliResult<()> {
    let store = ctx.state.session();
    ui::heading("AEXUS Identity");

    if logout {
        if store.clear()? {
            println!("Session cleared.");
        } else {
            println!("No active session.");
        }
        return Ok(());
    }

    println!("AEXUS identity sessions live locally inside this CLI and scope progression data.");
    let portal = ctx.config.portal_base_url();

    if let Some(existing) = store.load() {
        println!("{}", section("Current session"));
        println!("{}", render_session(&existing, portal));
        println!();
        if !ui::confirm("Replace this session?", false)? {
            return Ok(());
        }
    }

    let handle = ui::ask_or("Choose an AEXUS handle", DEFAULT_IDENTITY)?;
    let display_name = ui::ask_or("Display name", &handle)?;
    let session = UserSession::new(&handle, &display_name);
    store.save(&session)?;
    info!("Session saved for {}", session.handle);

    println!("{}", section("Session summary"));
    println!("{}", render_session(&session, portal));
    Ok(())
}

pub fn run_points(ctx: &Context, limit: usize) -> CliResult<()> {
    ui::heading("AEXUS Progression");
    ui::hint("Progression is stored locally and mirrors the in-protocol rank model.");

    let id = match ctx.state.session().load() {
        Some(session) => session.handle,
        None => ui::ask_or("Enter your AEXUS ID", DEFAULT_IDENTITY)?,
    };

    let points = ctx.state.points();
    let history = ctx.state.history();
    let snapshot = points.load(&id);
    println!(
        "{}",
        render_points_overview(
            &snapshot,
            &rank_snapshot(snapshot.points),
            &history.list_scenarios(Some(limit)),
            &history.list_analyst(Some(limit)),
        )
    );
    println!();

    let answer = ui::ask("Add or subtract points (for example +10, -5, or blank to keep)")?;
    let (updated, delta) = points.apply(
        &id,
        parse_delta(&answer),
        PointsSource::Manual,
        "Manual adjustment",
    )?;

    println!("\nUpdated progression\n{}", divider());
    println!("Points: {} ({:+})", updated.points, delta.gained);
    println!("Rank: {}", updated.rank_title);
    println!("Updated at: {}", updated.last_updated.to_rfc3339());
    Ok(())
}
