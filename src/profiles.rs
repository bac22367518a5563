//! Category profile registry: schema types, TOML parsing, load-time
//! validation, and the process-wide read-only instance.
//!
//! A profile carries everything that distinguishes one category from
//! another (keyword sets, component weights, gating rule, bonus, labels,
//! confidence thresholds) so the aggregator stays a single parameterized
//! code path. Adding a category means adding a `[profiles.<id>]` table,
//! not new code.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::assess;
use crate::error::ScoreError;

/// Weight sums are validated against 1.0 within this tolerance.
const WEIGHT_SUM_EPSILON: f64 = 1e-6;

static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let raw = include_str!("../config/profiles.toml");
    Registry::from_toml_str(raw).expect("valid embedded category profiles")
});

/// Shared, immutable registry built on first use. Invalid embedded config
/// is a startup failure, never a per-request one.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// The three fixed editorial categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    Heartwarming,
    Motivational,
    Traumatic,
}

impl CategoryId {
    pub const ALL: [CategoryId; 3] = [
        CategoryId::Heartwarming,
        CategoryId::Motivational,
        CategoryId::Traumatic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryId::Heartwarming => "heartwarming",
            CategoryId::Motivational => "motivational",
            CategoryId::Traumatic => "traumatic",
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryId {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heartwarming" => Ok(CategoryId::Heartwarming),
            "motivational" => Ok(CategoryId::Motivational),
            "traumatic" => Ok(CategoryId::Traumatic),
            other => Err(ScoreError::InvalidCategory(other.to_string())),
        }
    }
}

/* ----------------------------
Config schema (from TOML)
---------------------------- */

#[derive(Debug, Clone, Deserialize)]
struct ProfilesRoot {
    profiles: BTreeMap<String, CategoryProfile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryProfile {
    pub display_name: String,
    pub base_score: f64,
    pub scale_factor: f64,
    /// Added once when at least two strong moments (relevance >= 5.0) exist.
    pub moment_bonus: f64,
    /// Cap on the staged-signal penalty inside authenticity assessors.
    pub staged_penalty_cap: f64,

    // Category-specific keyword banks; absent tables stay empty.
    #[serde(default)]
    pub achievement_terms: Vec<String>,
    #[serde(default)]
    pub struggle_terms: Vec<String>,
    #[serde(default)]
    pub responsible_terms: Vec<String>,
    #[serde(default)]
    pub exploitative_terms: Vec<String>,
    #[serde(default)]
    pub official_terms: Vec<String>,

    pub content_types: BTreeMap<String, Vec<String>>,
    pub viewer_emotions: EmotionTiers,
    pub authenticity_signals: AuthenticitySignals,
    pub speech_patterns: BTreeMap<String, Vec<String>>,
    pub component_weights: BTreeMap<String, f64>,
    pub gating: Gating,
    pub labels: Labels,
    pub confidence: ConfidenceCfg,
}

/// Viewer-emotion keywords by intensity tier. Tier weights in moment
/// relevance are 3.0 / 2.0 / 1.0.
#[derive(Debug, Clone, Deserialize)]
pub struct EmotionTiers {
    pub strong: Vec<String>,
    pub moderate: Vec<String>,
    pub mild: Vec<String>,
}

impl EmotionTiers {
    /// (tier weight, keywords) in descending intensity order.
    pub fn weighted(&self) -> [(f64, &[String]); 3] {
        [
            (3.0, self.strong.as_slice()),
            (2.0, self.moderate.as_slice()),
            (1.0, self.mild.as_slice()),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticitySignals {
    pub genuine: Vec<String>,
    pub staged: Vec<String>,
}

/// Multiplicative penalty applied when one component falls under its
/// threshold.
#[derive(Debug, Clone, Deserialize)]
pub struct Gating {
    pub component: String,
    pub threshold: f64,
    pub penalty: f64,
}

/// Label set for the authenticity classifier (>0.7 / >0.4 / below).
#[derive(Debug, Clone, Deserialize)]
pub struct Labels {
    pub authentic: String,
    pub questionable: String,
    pub fake: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfidenceCfg {
    pub floor: f64,
    pub comment_threshold: usize,
    pub view_threshold: u64,
    pub subscriber_threshold: u64,
}

/* ----------------------------
Registry
---------------------------- */

#[derive(Debug, Clone)]
pub struct Registry {
    heartwarming: CategoryProfile,
    motivational: CategoryProfile,
    traumatic: CategoryProfile,
}

impl Registry {
    /// Parse and validate a profile table. Any inconsistency (missing
    /// category, weights not summing to 1.0, unimplemented component name,
    /// gating pointing outside the weighted set) is a configuration error
    /// here, never at request time.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let mut root: ProfilesRoot = toml::from_str(toml_str)?;

        let mut take = |id: CategoryId| -> anyhow::Result<CategoryProfile> {
            let p = root
                .profiles
                .remove(id.as_str())
                .ok_or_else(|| anyhow::anyhow!("missing profile `{}`", id))?;
            validate_profile(id, &p)?;
            Ok(p)
        };

        let heartwarming = take(CategoryId::Heartwarming)?;
        let motivational = take(CategoryId::Motivational)?;
        let traumatic = take(CategoryId::Traumatic)?;

        if let Some(extra) = root.profiles.keys().next() {
            anyhow::bail!("unknown profile table `{extra}`");
        }

        Ok(Self {
            heartwarming,
            motivational,
            traumatic,
        })
    }

    pub fn profile(&self, id: CategoryId) -> &CategoryProfile {
        match id {
            CategoryId::Heartwarming => &self.heartwarming,
            CategoryId::Motivational => &self.motivational,
            CategoryId::Traumatic => &self.traumatic,
        }
    }
}

fn validate_profile(id: CategoryId, p: &CategoryProfile) -> anyhow::Result<()> {
    let sum: f64 = p.component_weights.values().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
        anyhow::bail!("profile `{id}`: component weights sum to {sum}, expected 1.0");
    }

    for (name, w) in &p.component_weights {
        if !assess::is_known_component(name) {
            anyhow::bail!("profile `{id}`: component `{name}` has no assessor");
        }
        if *w < 0.0 {
            anyhow::bail!("profile `{id}`: component `{name}` has negative weight {w}");
        }
    }

    if !p.component_weights.contains_key(&p.gating.component) {
        anyhow::bail!(
            "profile `{id}`: gating component `{}` is not weighted",
            p.gating.component
        );
    }
    if !(0.0..=1.0).contains(&p.gating.threshold) || !(0.0..=1.0).contains(&p.gating.penalty) {
        anyhow::bail!("profile `{id}`: gating threshold/penalty out of [0,1]");
    }
    if !(0.0..=1.0).contains(&p.confidence.floor) {
        anyhow::bail!("profile `{id}`: confidence floor out of [0,1]");
    }
    if p.content_types.values().all(|v| v.is_empty()) {
        anyhow::bail!("profile `{id}`: no content-type keywords configured");
    }

    Ok(())
}

/* ----------------------------
Tests
---------------------------- */
