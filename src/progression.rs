// Progression: randomised point awards per action and rank tiers derived
// from the cumulative total. Callers own persistence.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const SCENARIO_POINTS_MIN: u32 = 6;
pub const SCENARIO_POINTS_MAX: u32 = 10;
pub const ANALYST_POINTS_MIN: u32 = 3;
pub const ANALYST_POINTS_MAX: u32 = 12;

/// Rank tiers, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Initiate,
    ChainExplorer,
    CoreOperator,
    ProtocolVanguard,
    AscendedArchitect,
}

/// Inclusive lower bounds, ascending.
pub const RANK_THRESHOLDS: [(u64, Rank); 5] = [
    (0, Rank::Initiate),
    (300, Rank::ChainExplorer),
    (800, Rank::CoreOperator),
    (2000, Rank::ProtocolVanguard),
    (5000, Rank::AscendedArchitect),
];

impl Rank {
    pub fn title(&self) -> &'static str {
        match self {
            Rank::Initiate => "Initiate",
            Rank::ChainExplorer => "Chain Explorer",
            Rank::CoreOperator => "Core Operator",
            Rank::ProtocolVanguard => "Protocol Vanguard",
            Rank::AscendedArchitect => "Ascended Architect",
        }
    }

    pub fn threshold(&self) -> u64 {
        RANK_THRESHOLDS
            .iter()
            .find(|(_, rank)| rank == self)
            .map(|(min, _)| *min)
            .unwrap_or(0)
    }

    pub fn next(&self) -> Option<Rank> {
        RANK_THRESHOLDS
            .iter()
            .map(|(_, rank)| *rank)
            .find(|rank| rank > self)
    }
}

pub fn compute_rank(points: u64) -> Rank {
    RANK_THRESHOLDS
        .iter()
        .rev()
        .find(|(min, _)| points >= *min)
        .map(|(_, rank)| *rank)
        .unwrap_or(Rank::Initiate)
}

pub fn describe_rank(rank: Rank) -> &'static str {
    match rank {
        Rank::AscendedArchitect => {
            "High signal actor with a fully imprinted presence inside the AEXUS field."
        }
        Rank::ProtocolVanguard => {
            "Consistent participant who shapes decision surfaces and runs frequent simulations."
        }
        Rank::CoreOperator => "Hands-on operator who engages across modules with a steady rhythm.",
        Rank::ChainExplorer => "Active scout running early experiments and mapping new routes.",
        Rank::Initiate => "New identity, ready to start building a trace across the system.",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankSnapshot {
    pub rank: Rank,
    pub points: u64,
    pub next_rank: Option<Rank>,
    /// Points still needed for `next_rank`.
    pub points_to_next: Option<u64>,
}

pub fn rank_snapshot(points: u64) -> RankSnapshot {
    let rank = compute_rank(points);
    let next_rank = rank.next();
    RankSnapshot {
        rank,
        points,
        next_rank,
        points_to_next: next_rank.map(|next| next.threshold().saturating_sub(points)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsSource {
    Scenario,
    Analyst,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsDelta {
    pub previous: u64,
    pub new: u64,
    /// Actual change after flooring the total at zero.
    pub gained: i64,
    pub source: PointsSource,
    pub label: String,
    pub created_at: DateTime<Utc>,
}

/// `new - previous`, clamped into `i64`.
fn signed_difference(previous: u64, new: u64) -> i64 {
    let diff = i128::from(new) - i128::from(previous);
    diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

impl PointsDelta {
    pub fn apply(previous: u64, change: i64, source: PointsSource, label: &str) -> Self {
        let new = if change >= 0 {
            previous.saturating_add(change.unsigned_abs())
        } else {
            previous.saturating_sub(change.unsigned_abs())
        };
        PointsDelta {
            previous,
            new,
            gained: signed_difference(previous, new),
            source,
            label: label.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn rank_changed(&self) -> bool {
        compute_rank(self.previous) != compute_rank(self.new)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioIntensity {
    Light,
    Standard,
    Dense,
}

impl ScenarioIntensity {
    /// Measured on the trimmed prompt, in characters.
    pub fn measure(prompt: &str) -> Self {
        match prompt.trim().chars().count() {
            0..=79 => ScenarioIntensity::Light,
            80..=219 => ScenarioIntensity::Standard,
            _ => ScenarioIntensity::Dense,
        }
    }

    pub fn range(&self) -> (u32, u32) {
        match self {
            ScenarioIntensity::Light => (6, 8),
            ScenarioIntensity::Standard => (7, 10),
            ScenarioIntensity::Dense => (8, 10),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioBand {
    Low,
    Mid,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioAward {
    pub points: u32,
    pub band: ScenarioBand,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalystBand {
    Scan,
    DeepScan,
    Extended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalystAward {
    pub points: u32,
    pub band: AnalystBand,
    pub label: &'static str,
}

pub fn scenario_award<R: Rng + ?Sized>(prompt: &str, rng: &mut R) -> ScenarioAward {
    let (min, max) = ScenarioIntensity::measure(prompt).range();
    let points = rng
        .gen_range(min..=max)
        .clamp(SCENARIO_POINTS_MIN, SCENARIO_POINTS_MAX);
    let (band, label) = match points {
        p if p <= 7 => (ScenarioBand::Low, "Scenario logged"),
        p if p >= 9 => (ScenarioBand::High, "Scenario deeply processed"),
        _ => (ScenarioBand::Mid, "Scenario processed"),
    };
    ScenarioAward { points, band, label }
}

pub fn analyst_award<R: Rng + ?Sized>(
    has_risk_flags: bool,
    pool_count: usize,
    rng: &mut R,
) -> AnalystAward {
    let (min, max) = if has_risk_flags { (5, 9) } else { (3, 7) };
    let richness = match pool_count {
        n if n >= 5 => 2,
        n if n >= 2 => 1,
        _ => 0,
    };
    let points = (rng.gen_range(min..=max) + richness).clamp(ANALYST_POINTS_MIN, ANALYST_POINTS_MAX);
    let (band, label) = match points {
        p if p >= 10 => (AnalystBand::Extended, "Extended analyst pass"),
        p if p >= 7 => (AnalystBand::DeepScan, "Deep analyst pass"),
        _ => (AnalystBand::Scan, "Quick analyst pass"),
    };
    AnalystAward { points, band, label }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rank_boundaries_promote() {
        assert_eq!(compute_rank(0), Rank::Initiate);
        assert_eq!(compute_rank(299), Rank::Initiate);
        assert_eq!(compute_rank(300), Rank::ChainExplorer);
        assert_eq!(compute_rank(799), Rank::ChainExplorer);
        assert_eq!(compute_rank(800), Rank::CoreOperator);
        assert_eq!(compute_rank(2000), Rank::ProtocolVanguard);
        assert_eq!(compute_rank(5000), Rank::AscendedArchitect);
        assert_eq!(compute_rank(u64::MAX), Rank::AscendedArchitect);
    }

    #[test]
    fn rank_is_monotonic() {
        let mut last = Rank::Initiate;
        for points in 0..6000 {
            let rank = compute_rank(points);
            assert!(rank >= last);
            last = rank;
        }
    }

    #[test]
    fn snapshot_reports_next_tier() {
        let snap = rank_snapshot(250);
        assert_eq!(snap.rank, Rank::Initiate);
        assert_eq!(snap.next_rank, Some(Rank::ChainExplorer));
        assert_eq!(snap.points_to_next, Some(50));

        let top = rank_snapshot(9000);
        assert_eq!(top.next_rank, None);
        assert_eq!(top.points_to_next, None);
        assert_eq!(top.rank.title(), "Ascended Architect");
    }

    #[test]
    fn delta_floors_at_zero() {
        let delta = PointsDelta::apply(10, -25, PointsSource::Manual, "manual");
        assert_eq!(delta.new, 0);
        assert_eq!(delta.gained, -10);

        let delta = PointsDelta::apply(295, 8, PointsSource::Scenario, "Scenario processed");
        assert_eq!(delta.new, 303);
        assert!(delta.rank_changed());
    }

    #[test]
    fn huge_adjustments_saturate() {
        let delta = PointsDelta::apply(i64::MAX as u64, i64::MAX, PointsSource::Manual, "manual");
        assert_eq!(delta.new, u64::MAX - 1);
        assert_eq!(delta.gained, i64::MAX);

        let delta = PointsDelta::apply(u64::MAX, i64::MAX, PointsSource::Manual, "manual");
        assert_eq!(delta.new, u64::MAX);
        assert_eq!(delta.gained, 0);

        let delta = PointsDelta::apply(u64::MAX, i64::MIN, PointsSource::Manual, "manual");
        assert_eq!(delta.new, u64::MAX - (1u64 << 63));
        assert_eq!(delta.gained, i64::MIN);

        let delta = PointsDelta::apply(u64::MAX, -1, PointsSource::Manual, "manual");
        assert_eq!(delta.gained, -1);
        assert!(!delta.rank_changed());
    }

    #[test]
    fn intensity_buckets() {
        assert_eq!(ScenarioIntensity::measure(&"a".repeat(79)), ScenarioIntensity::Light);
        assert_eq!(ScenarioIntensity::measure(&"a".repeat(80)), ScenarioIntensity::Standard);
        assert_eq!(ScenarioIntensity::measure(&"a".repeat(219)), ScenarioIntensity::Standard);
        assert_eq!(ScenarioIntensity::measure(&"a".repeat(220)), ScenarioIntensity::Dense);
        assert_eq!(
            ScenarioIntensity::measure(&format!("   {}   ", "a".repeat(79))),
            ScenarioIntensity::Light
        );
    }

    #[test]
    fn scenario_awards_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        let prompts = ["short".to_string(), "x".repeat(100), "x".repeat(400)];
        for prompt in &prompts {
            let (min, max) = ScenarioIntensity::measure(prompt).range();
            for _ in 0..500 {
                let award = scenario_award(prompt, &mut rng);
                assert!(award.points >= min && award.points <= max);
                assert!((6..=10).contains(&award.points));
            }
        }
    }

    #[test]
    fn scenario_light_prompts_reach_both_ends() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: Vec<u32> = (0..500).map(|_| scenario_award("hi", &mut rng).points).collect();
        assert!(seen.contains(&6));
        assert!(seen.contains(&8));
    }

    #[test]
    fn scenario_band_labels() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let award = scenario_award(&"x".repeat(120), &mut rng);
            match award.points {
                6 | 7 => assert_eq!(award.band, ScenarioBand::Low),
                8 => assert_eq!(award.label, "Scenario processed"),
                _ => assert_eq!(award.label, "Scenario deeply processed"),
            }
        }
    }

    #[test]
    fn analyst_awards_respect_flags_and_richness() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let plain = analyst_award(false, 0, &mut rng).points;
            assert!((3..=7).contains(&plain));
            let flagged = analyst_award(true, 1, &mut rng).points;
            assert!((5..=9).contains(&flagged));
            let rich = analyst_award(true, 5, &mut rng).points;
            assert!((7..=11).contains(&rich));
            let mid = analyst_award(false, 2, &mut rng).points;
            assert!((4..=8).contains(&mid));
        }
    }

    #[test]
    fn analyst_band_labels() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let award = analyst_award(true, 6, &mut rng);
            match award.points {
                p if p >= 10 => assert_eq!(award.band, AnalystBand::Extended),
                p if p >= 7 => assert_eq!(award.label, "Deep analyst pass"),
                _ => assert_eq!(award.band, AnalystBand::Scan),
            }
        }
    }
}
