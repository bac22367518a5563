//! # Scoring Engine
//! Pure, testable logic that maps `(VideoRecord, CategoryId)` → `ScoreResult`.
//! No I/O, no state across calls; distinct videos or categories can be
//! scored in parallel without coordination.

use std::str::FromStr;

use metrics::{counter, histogram};
use tracing::info;

use crate::assess;
use crate::corpus::TextCorpus;
use crate::error::ScoreError;
use crate::moments;
use crate::profiles::{registry, CategoryId};
use crate::result::{AuthenticitySignal, ScoreResult};
use crate::score;
use crate::video::VideoRecord;

/// Cap on the `keyIndicators` list.
const MAX_KEY_INDICATORS: usize = 6;

/// String-keyed entry point: resolves the category id first and fails fast
/// with `InvalidCategory` before touching the record.
pub fn analyze_for(video: &VideoRecord, category: &str) -> Result<ScoreResult, ScoreError> {
    let id = CategoryId::from_str(category)?;
    Ok(analyze(video, id))
}

/// Score one video against one category. Deterministic: identical inputs
/// yield an identical result.
pub fn analyze(video: &VideoRecord, id: CategoryId) -> ScoreResult {
    let t0 = std::time::Instant::now();
    let profile = registry().profile(id);

    let corpus = TextCorpus::build(video);
    let moments = moments::extract(&video.comments, profile);
    let component_scores = assess::assess_all(profile, video, &corpus, &moments);

    let final_score = score::final_score(profile, &component_scores, &moments);
    let confidence = score::confidence(profile, video, &component_scores);
    let authenticity_label = score::authenticity_label(profile, &component_scores);
    let key_indicators = key_indicators(&moments, &component_scores, profile);

    let result = ScoreResult {
        final_score,
        component_scores,
        confidence,
        authenticity_label,
        moments,
        key_indicators,
    };

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("clipscore_analyze_ms").record(ms);
    counter!("clipscore_analyses_total", "category" => id.as_str()).increment(1);
    // Never log titles or comment text; only a hashed id and the outcome.
    info!(
        target: "scoring",
        video = %anon_hash(&video.video_id),
        category = %id,
        score = result.final_score,
        confidence = result.confidence,
        label = %result.authenticity_label,
        moments = result.moments.len(),
    );

    result
}

/// Up to six human-readable markers of what drove the score, strongest
/// evidence first.
fn key_indicators(
    moments: &[crate::result::Moment],
    components: &std::collections::BTreeMap<String, f64>,
    profile: &crate::profiles::CategoryProfile,
) -> Vec<String> {
    let mut out = Vec::new();

    let strong = score::strong_moment_count(moments);
    if strong > 0 {
        out.push(format!("{strong} strong viewer-flagged moment(s)"));
    }

    // Content types seen across all extracted moments, deduplicated in
    // discovery order.
    for m in moments {
        for ct in &m.category_indicators.matched_content_types {
            let marker = format!("content: {ct}");
            if !out.contains(&marker) {
                out.push(marker);
            }
        }
    }

    match moments
        .iter()
        .map(|m| m.category_indicators.authenticity_signal)
        .find(|s| *s != AuthenticitySignal::Unknown)
    {
        Some(AuthenticitySignal::Genuine) => {
            out.push("genuine-reaction signals in comments".to_string())
        }
        Some(AuthenticitySignal::Questionable) => {
            out.push("staged/exploitative signals in comments".to_string())
        }
        _ => {}
    }

    let gate = &profile.gating.component;
    if let Some(v) = components.get(gate) {
        if *v < profile.gating.threshold {
            out.push(format!("low {gate} ({v:.2}) triggered penalty"));
        }
    }

    out.truncate(MAX_KEY_INDICATORS);
    out
}

/// Short stable hash for log lines; raw ids never appear in logs.
fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_video() -> VideoRecord {
        let mut v = VideoRecord::bare("vid1", "Soldier surprise reunion with family");
        v.description = "a genuine homecoming".to_string();
        v.view_count = 50_000;
        v.like_count = 2_000;
        v.comment_count = 300;
        v.comments = vec![
            "the reunion at 2:15 made me cry, so touching".to_string(),
            "beautiful family moment, tears".to_string(),
            "2:45 got me crying too".to_string(),
        ];
        v
    }

    #[test]
    fn unknown_category_fails_before_any_computation() {
        let err = analyze_for(&sample_video(), "unknown_category").unwrap_err();
        assert_eq!(
            err,
            ScoreError::InvalidCategory("unknown_category".to_string())
        );
    }

    #[test]
    fn result_respects_all_bounds() {
        let r = analyze(&sample_video(), CategoryId::Heartwarming);
        assert!((0.0..=10.0).contains(&r.final_score));
        assert!((0.0..=1.0).contains(&r.confidence));
        for (name, v) in &r.component_scores {
            assert!((0.0..=1.0).contains(v), "{name}: {v}");
        }
        assert!(r.key_indicators.len() <= 6);
    }

    #[test]
    fn analyze_is_deterministic() {
        let v = sample_video();
        let a = analyze(&v, CategoryId::Heartwarming);
        let b = analyze(&v, CategoryId::Heartwarming);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_video_scores_without_panicking() {
        let v = VideoRecord::bare("empty", "");
        for id in CategoryId::ALL {
            let r = analyze(&v, id);
            assert!((0.0..=10.0).contains(&r.final_score));
            assert!(r.moments.is_empty());
        }
    }

    #[test]
    fn key_indicators_surface_strong_moments_and_content() {
        let r = analyze(&sample_video(), CategoryId::Heartwarming);
        assert!(r
            .key_indicators
            .iter()
            .any(|k| k.contains("strong viewer-flagged")));
        assert!(r.key_indicators.iter().any(|k| k == "content: reunions"));
    }
}
