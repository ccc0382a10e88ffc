// Console renderers. Each returns plain text so the shapes can be checked
// without a terminal; `ui` adds colour when printing headings.

use crate::analyst::AnalystView;
use crate::format::{
    format_int, format_pct, format_signed_pct, format_timestamp, format_usd, pad,
    render_table_header, render_table_row, Align, TableColumn,
};
use crate::layout::section;
use crate::progression::{describe_rank, PointsDelta, RankSnapshot};
use crate::scenario::ScenarioResult;
use crate::store::{AnalystHistoryRecord, PointsSnapshot, ScenarioHistoryRecord, UserSession};

fn yes_no(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "Yes",
        Some(false) => "No",
        None => "Unknown",
    }
}

fn bullet_list(out: &mut Vec<String>, label: &str, items: &[String], empty: &str) {
    out.push(section(label));
    if items.is_empty() {
        out.push(empty.to_string());
    } else {
        out.extend(items.iter().map(|item| format!("- {}", item)));
    }
}

pub fn pool_columns() -> Vec<TableColumn> {
    vec![
        TableColumn::new("Market", 12),
        TableColumn::new("Quote", 8),
        TableColumn::new("Liquidity", 12).align(Align::Right),
        TableColumn::new("Price", 14).align(Align::Right),
        TableColumn::new("Vol 24h", 12).align(Align::Right),
        TableColumn::new("Buys", 8).align(Align::Right),
        TableColumn::new("Sells", 8).align(Align::Right),
    ]
}

pub fn render_analyst(view: &AnalystView) -> String {
    let p = &view.profile;
    let mut out = vec![
        section("Token profile"),
        format!("Name: {}", p.name),
        format!("Symbol: {}", p.symbol),
        format!("Mint: {}", p.mint),
        format!("Creator: {}", p.creator.as_deref().unwrap_or("-")),
        format!("Created: {}", format_timestamp(p.created_at)),
        format!("Jupiter verified: {}", yes_no(p.is_jupiter_verified)),
        format!("Rugged: {}", yes_no(p.is_rugged)),
    ];
    if let Some(image) = &p.image_url {
        out.push(format!("Image: {}", image));
    }
    out.push(String::new());
    out.push("Description:".to_string());
    out.push(p.description.clone());

    out.push(section("Headline metrics"));
    out.push(format!("Last price (USD): {}", format_usd(view.last_price_usd)));
    out.push(format!("Market cap (USD): {}", format_usd(view.market_cap_usd)));
    out.push(format!(
        "Total liquidity (USD): {}",
        format_usd(view.total_liquidity_usd)
    ));
    out.push(format!(
        "Txns: {} (buys {}, sells {})",
        format_int(Some(view.total_txns)),
        format_int(Some(view.total_buys)),
        format_int(Some(view.total_sells))
    ));
    out.push(format!("Holders: {}", format_int(Some(view.holders))));

    out.push(section("Price change events"));
    for bucket in &view.price_changes {
        out.push(format!(
            "{}: {}",
            pad(bucket.key, 4, Align::Left),
            format_signed_pct(bucket.percentage)
        ));
    }

    let risk = &view.risk;
    out.push(section("Risk surface"));
    out.push(format!("Top 10 holders: {}", format_pct(risk.top10_percentage)));
    out.push(format!("Dev holdings: {}", format_pct(risk.dev_holdings_percentage)));
    out.push(format!(
        "Snipers: {} | {}",
        format_int(risk.snipers_count),
        format_pct(risk.snipers_percentage)
    ));
    out.push(format!(
        "Insiders: {} | {}",
        format_int(risk.insiders_count),
        format_pct(risk.insiders_percentage)
    ));
    if risk.flags.is_empty() {
        out.push("Risk flags: none reported".to_string());
    } else {
        out.push("Risk flags:".to_string());
        out.extend(risk.flags.iter().map(|f| format!("- {}", f)));
    }

    out.push(section("Pools"));
    if view.pools.is_empty() {
        out.push("No pools returned for this token.".to_string());
    } else {
        let columns = pool_columns();
        out.push(render_table_header(&columns));
        for pool in &view.pools {
            let cells = [
                pool.market.clone(),
                pool.quote_token.clone(),
                format_usd(pool.liquidity_usd),
                format_usd(pool.price_usd),
                format_usd(pool.volume_24h_usd),
                format_int(pool.buys_24h),
                format_int(pool.sells_24h),
            ];
            out.push(render_table_row(&cells, &columns));
        }
    }

    out.join("\n")
}

pub fn render_scenario(result: &ScenarioResult) -> String {
    let mut out = vec![
        format!("You: {}", result.input.prompt),
        section("AEXUS Answer"),
        format!("Sentiment: {}", result.sentiment_label),
        String::new(),
        result.framing.clone(),
        String::new(),
        result.summary.clone(),
    ];
    bullet_list(&mut out, "Main impacts", &result.impacts, "No impacts reported.");
    bullet_list(&mut out, "Key risks", &result.risks, "No risks reported.");
    bullet_list(
        &mut out,
        "Things to monitor",
        &result.watchpoints,
        "No watchpoints reported.",
    );
    if let Some(hint) = &result.progression_hint {
        out.push(String::new());
        out.push(format!("Engine hint: {}", hint));
    }
    out.join("\n")
}

/// Points gained by an action plus the resulting rank.
pub fn render_award(label: &str, delta: &PointsDelta, rank: &RankSnapshot) -> String {
    let mut out = vec![
        section("Progression"),
        format!("{}: +{} points", label, delta.gained),
        format!(
            "Total: {} ({})",
            format_int(Some(delta.new as f64)),
            rank.rank.title()
        ),
    ];
    if delta.rank_changed() {
        out.push(format!("Rank up! You are now {}.", rank.rank.title()));
    }
    out.join("\n")
}

pub fn render_points_overview(
    snapshot: &PointsSnapshot,
    rank: &RankSnapshot,
    scenarios: &[ScenarioHistoryRecord],
    scans: &[AnalystHistoryRecord],
) -> String {
    let mut out = vec![
        format!("Current ID: {}", snapshot.id),
        format!("Progression points: {}", format_int(Some(snapshot.points as f64))),
        format!("Rank tier: {}", rank.rank.title()),
        describe_rank(rank.rank).to_string(),
    ];
    match (rank.next_rank, rank.points_to_next) {
        (Some(next), Some(remaining)) => out.push(format!(
            "Next tier: {} in {} points",
            next.title(),
            format_int(Some(remaining as f64))
        )),
        _ => out.push("Next tier: top tier reached".to_string()),
    }
    out.push(format!(
        "Last updated: {}",
        format_timestamp(Some(snapshot.last_updated))
    ));

    out.push(section("Scenario runs"));
    if scenarios.is_empty() {
        out.push("No scenario runs recorded in this environment.".to_string());
    }
    for record in scenarios {
        let points = record
            .points
            .map(|p| format!("+{}", p))
            .unwrap_or_else(|| "-".to_string());
        out.push(format!(
            "{}  {}  {}  {}",
            format_timestamp(Some(record.created_at)),
            pad(record.sentiment_label.as_deref().unwrap_or("-"), 21, Align::Left),
            pad(&points, 4, Align::Right),
            record.prompt
        ));
    }

    out.push(section("Token scans"));
    if scans.is_empty() {
        out.push("No token scans recorded in this environment.".to_string());
    }
    for record in scans {
        out.push(format!(
            "{}  {}  {}",
            format_timestamp(Some(record.created_at)),
            pad(record.symbol.as_deref().unwrap_or("-"), 10, Align::Left),
            record.mint
        ));
    }

    out.push(String::new());
    out.push("Points accumulate when scenarios are executed and tokens are scanned.".to_string());
    out.join("\n")
}

pub fn render_session(session: &UserSession, portal_base: Option<&str>) -> String {
    let mut out = vec![
        format!("ID: {}", session.id),
        format!("Handle: {}", session.handle),
        format!("Display name: {}", session.display_name),
        format!("Created: {}", format_timestamp(Some(session.created_at))),
    ];
    if let Some(base) = portal_base {
        out.push(format!(
            "Portal: {}/{}",
            base.trim_end_matches('/'),
            session.handle
        ));
    }
    out.join("\n")
}
