//! Token analyst view model.
//!
//! `build_analyst_view` turns an upstream token-analysis document of
//! unknown shape into an `AnalystView` where every field has a value.
//!
//! | field | source | default |
//! |---|---|---|
//! | `profile.name` | `token.name` | `"Unknown"` |
//! | `profile.symbol` | `token.symbol` | `"-"` |
//! | `profile.mint` | `token.mint` | `"Unknown mint"` |
//! | `profile.description` | `token.description` | `"No description available."` |
//! | `profile.image_url` | `token.image` | `None` |
//! | `profile.creator` | `token.creation.creator` | `None` |
//! | `profile.created_at` | `token.creation.created_time` (unix s) | `None` |
//! | `profile.is_jupiter_verified` | `risk.jupiterVerified` | `None` |
//! | `profile.is_rugged` | `risk.rugged` | `None` |
//! | `pools[].market` / `quote_token` | `market` / `quoteToken` | `"-"` |
//! | `pools[]` numbers | `liquidity.usd`, `price.usd`, `marketCap.usd`, `txns.*` | `None` |
//! | `risk.*` numbers | `top10`, `dev.percentage`, `snipers.*`, `insiders.*` | `None` |
//! | `risk.flags` | `risk.risks`; null, nested and blank entries dropped | `[]` |
//! | `price_changes` | `events.<window>.priceChangePercentage` | `None` per window |
//! | `total_txns` / `total_buys` / `total_sells` / `holders` | top level | `0` |

use crate::json::{bool_at, field, number_at, string_list_at, text_at, text_or};
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use serde_json::Value;

static NULL: Value = Value::Null;

/// Price-change windows, always reported in this order.
pub const PRICE_CHANGE_WINDOWS: [&str; 11] = [
    "1m", "5m", "15m", "30m", "1h", "2h", "3h", "4h", "6h", "12h", "24h",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenProfile {
    pub name: String,
    pub symbol: String,
    pub mint: String,
    pub description: String,
    pub image_url: Option<String>,
    pub creator: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub is_jupiter_verified: Option<bool>,
    pub is_rugged: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolView {
    pub market: String,
    pub quote_token: String,
    pub liquidity_usd: Option<f64>,
    pub price_usd: Option<f64>,
    pub market_cap_usd: Option<f64>,
    pub volume_24h_usd: Option<f64>,
    pub buys_24h: Option<f64>,
    pub sells_24h: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskSurface {
    pub top10_percentage: Option<f64>,
    pub dev_holdings_percentage: Option<f64>,
    pub snipers_count: Option<f64>,
    pub snipers_percentage: Option<f64>,
    pub insiders_count: Option<f64>,
    pub insiders_percentage: Option<f64>,
    pub has_risk_flags: bool,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceChangeBucket {
    pub key: &'static str,
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalystView {
    pub profile: TokenProfile,
    pub pools: Vec<PoolView>,
    pub risk: RiskSurface,
    pub price_changes: Vec<PriceChangeBucket>,
    pub last_price_usd: Option<f64>,
    pub market_cap_usd: Option<f64>,
    pub total_liquidity_usd: Option<f64>,
    pub total_txns: f64,
    pub total_buys: f64,
    pub total_sells: f64,
    pub holders: f64,
    pub generated_at: DateTime<Utc>,
    pub raw: Value,
}

/// Headline figures picked from the pool list. Each one uses its own
/// criterion: price from the deepest pool, market cap as the maximum over
/// all pools, liquidity as the sum.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PoolMetrics {
    pub last_price_usd: Option<f64>,
    pub market_cap_usd: Option<f64>,
    pub total_liquidity_usd: Option<f64>,
}

fn unix_seconds(value: Option<f64>) -> Option<DateTime<Utc>> {
    let secs = value.filter(|v| *v > 0.0)?;
    let millis = secs * 1000.0;
    if !millis.is_finite() || millis > i64::MAX as f64 {
        return None;
    }
    Utc.timestamp_millis_opt(millis as i64).single()
}

fn build_profile(token: &Value, risk: &Value) -> TokenProfile {
    TokenProfile {
        name: text_or(token, &["name"], "Unknown"),
        symbol: text_or(token, &["symbol"], "-"),
        mint: text_or(token, &["mint"], "Unknown mint"),
        description: text_or(token, &["description"], "No description available."),
        image_url: text_at(token, &["image"]),
        creator: text_at(token, &["creation", "creator"]),
        created_at: unix_seconds(number_at(token, &["creation", "created_time"])),
        is_jupiter_verified: bool_at(risk, &["jupiterVerified"]),
        is_rugged: bool_at(risk, &["rugged"]),
    }
}

pub fn build_pool_view(pool: &Value) -> PoolView {
    PoolView {
        market: text_or(pool, &["market"], "-"),
        quote_token: text_or(pool, &["quoteToken"], "-"),
        liquidity_usd: number_at(pool, &["liquidity", "usd"]),
        price_usd: number_at(pool, &["price", "usd"]),
        market_cap_usd: number_at(pool, &["marketCap", "usd"]),
        volume_24h_usd: number_at(pool, &["txns", "volume24h"]),
        buys_24h: number_at(pool, &["txns", "buys"]),
        sells_24h: number_at(pool, &["txns", "sells"]),
    }
}

pub fn aggregate_pools(pools: &[PoolView]) -> PoolMetrics {
    if pools.is_empty() {
        return PoolMetrics::default();
    }

    let mut deepest: Option<&PoolView> = None;
    let mut max_liquidity = -1.0;
    let mut total_liquidity = 0.0;
    let mut best_market_cap = 0.0;

    for pool in pools {
        let liquidity = pool.liquidity_usd.unwrap_or(0.0);
        let market_cap = pool.market_cap_usd.unwrap_or(0.0);
        total_liquidity += liquidity;
        // strict comparison: the first pool wins ties
        if liquidity > max_liquidity {
            max_liquidity = liquidity;
            deepest = Some(pool);
        }
        if market_cap > best_market_cap {
            best_market_cap = market_cap;
        }
    }

    PoolMetrics {
        last_price_usd: deepest.and_then(|p| p.price_usd),
        market_cap_usd: Some(best_market_cap).filter(|v| *v > 0.0),
        total_liquidity_usd: Some(total_liquidity).filter(|v| *v > 0.0),
    }
}

fn build_risk_surface(risk: &Value) -> RiskSurface {
    let flags = string_list_at(risk, &["risks"]);
    let rugged = bool_at(risk, &["rugged"]) == Some(true);
    RiskSurface {
        top10_percentage: number_at(risk, &["top10"]),
        dev_holdings_percentage: number_at(risk, &["dev", "percentage"]),
        snipers_count: number_at(risk, &["snipers", "count"]),
        snipers_percentage: number_at(risk, &["snipers", "totalPercentage"]),
        insiders_count: number_at(risk, &["insiders", "count"]),
        insiders_percentage: number_at(risk, &["insiders", "totalPercentage"]),
        has_risk_flags: rugged || !flags.is_empty(),
        flags,
    }
}

fn build_price_changes(events: &Value) -> Vec<PriceChangeBucket> {
    PRICE_CHANGE_WINDOWS
        .iter()
        .map(|&key| PriceChangeBucket {
            key,
            percentage: number_at(events, &[key, "priceChangePercentage"]),
        })
        .collect()
}

/// Build the display model. Never fails: absent or mistyped sections
/// degrade to their defaults.
pub fn build_analyst_view(data: &Value) -> AnalystView {
    let token = field(data, &["token"]).unwrap_or(&NULL);
    let risk = field(data, &["risk"]).unwrap_or(&NULL);
    let events = field(data, &["events"]).unwrap_or(&NULL);

    let pools: Vec<PoolView> = field(data, &["pools"])
        .and_then(Value::as_array)
        .map(|items| items.iter().map(build_pool_view).collect())
        .unwrap_or_default();
    let metrics = aggregate_pools(&pools);

    AnalystView {
        profile: build_profile(token, risk),
        risk: build_risk_surface(risk),
        price_changes: build_price_changes(events),
        last_price_usd: metrics.last_price_usd,
        market_cap_usd: metrics.market_cap_usd,
        total_liquidity_usd: metrics.total_liquidity_usd,
        total_txns: number_at(data, &["txns"]).unwrap_or(0.0),
        total_buys: number_at(data, &["buys"]).unwrap_or(0.0),
        total_sells: number_at(data, &["sells"]).unwrap_or(0.0),
        holders: number_at(data, &["holders"]).unwrap_or(0.0),
        pools,
        generated_at: Utc::now(),
        raw: data.clone(),
    }
}
