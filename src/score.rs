//! Score aggregation: weighted component sum, gating penalty, moment
//! bonus, confidence estimate, and the authenticity label. Everything here
//! is driven by `CategoryProfile` data; there are no per-category code
//! paths.

use std::collections::BTreeMap;

use crate::moments::STRONG_MOMENT_RELEVANCE;
use crate::profiles::CategoryProfile;
use crate::result::Moment;
use crate::video::VideoRecord;

/// Strong moments required before the profile's moment bonus applies.
const MOMENT_BONUS_MIN_COUNT: usize = 2;

/// Label thresholds on the gating component; identical structure across
/// categories, label strings from the profile.
const LABEL_AUTHENTIC_ABOVE: f64 = 0.7;
const LABEL_QUESTIONABLE_ABOVE: f64 = 0.4;

/// `base + scale * sum(w_i * clamp01(c_i))`, then gating penalty, then
/// moment bonus, clamped to [0, 10].
pub fn final_score(
    profile: &CategoryProfile,
    components: &BTreeMap<String, f64>,
    moments: &[Moment],
) -> f64 {
    let weighted: f64 = profile
        .component_weights
        .iter()
        .map(|(name, weight)| {
            let v = components.get(name).copied().unwrap_or(0.0);
            weight * v.clamp(0.0, 1.0)
        })
        .sum();

    let mut score = profile.base_score + profile.scale_factor * weighted;

    if gating_value(profile, components) < profile.gating.threshold {
        score *= profile.gating.penalty;
    }

    if strong_moment_count(moments) >= MOMENT_BONUS_MIN_COUNT {
        score += profile.moment_bonus;
    }

    score.clamp(0.0, 10.0)
}

/// Floor plus fixed increments gated on available evidence, clamped to
/// [0,1]. Monotone: more evidence never lowers it.
pub fn confidence(
    profile: &CategoryProfile,
    video: &VideoRecord,
    components: &BTreeMap<String, f64>,
) -> f64 {
    let cfg = &profile.confidence;
    let mut c = cfg.floor;

    if video.comments.len() > cfg.comment_threshold {
        c += 0.2;
    }
    if video.transcript.as_ref().is_some_and(|t| t.available) {
        c += 0.15;
    }
    if video.view_count > cfg.view_threshold {
        c += 0.1;
    }
    if gating_value(profile, components) > 0.3 {
        c += 0.1;
    }
    if video
        .channel_info
        .as_ref()
        .is_some_and(|ch| ch.subscriber_count > cfg.subscriber_threshold)
    {
        c += 0.05;
    }

    c.clamp(0.0, 1.0)
}

/// Map the gating component to the profile's label set.
pub fn authenticity_label(profile: &CategoryProfile, components: &BTreeMap<String, f64>) -> String {
    let v = gating_value(profile, components);
    if v > LABEL_AUTHENTIC_ABOVE {
        profile.labels.authentic.clone()
    } else if v > LABEL_QUESTIONABLE_ABOVE {
        profile.labels.questionable.clone()
    } else {
        profile.labels.fake.clone()
    }
}

pub fn strong_moment_count(moments: &[Moment]) -> usize {
    moments
        .iter()
        .filter(|m| m.relevance_score >= STRONG_MOMENT_RELEVANCE)
        .count()
}

fn gating_value(profile: &CategoryProfile, components: &BTreeMap<String, f64>) -> f64 {
    components
        .get(&profile.gating.component)
        .copied()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::{registry, CategoryId};
    use crate::result::{AuthenticitySignal, CategoryIndicators, Sentiment};

    fn profile(id: CategoryId) -> &'static CategoryProfile {
        registry().profile(id)
    }

    fn components(profile: &CategoryProfile, fill: f64) -> BTreeMap<String, f64> {
        profile
            .component_weights
            .keys()
            .map(|k| (k.clone(), fill))
            .collect()
    }

    fn strong_moment() -> Moment {
        Moment {
            timestamp_text: "2:15".to_string(),
            source_comment: "reunion at 2:15, crying".to_string(),
            relevance_score: 8.0,
            sentiment: Sentiment::Positive,
            category_indicators: CategoryIndicators {
                matched_content_types: vec!["reunions".to_string()],
                matched_emotion_words: vec!["crying".to_string()],
                authenticity_signal: AuthenticitySignal::Unknown,
            },
        }
    }

    #[test]
    fn score_stays_bounded_at_extremes() {
        for id in CategoryId::ALL {
            let p = profile(id);
            let zero = final_score(p, &components(p, 0.0), &[]);
            let full = final_score(
                p,
                &components(p, 1.0),
                &[strong_moment(), strong_moment()],
            );
            assert!((0.0..=10.0).contains(&zero), "{id}: {zero}");
            assert!((0.0..=10.0).contains(&full), "{id}: {full}");
            assert!(full > zero);
        }
    }

    #[test]
    fn gating_penalty_multiplies_when_under_threshold() {
        let p = profile(CategoryId::Traumatic);
        let mut comps = components(p, 0.6);

        let clean = final_score(p, &comps, &[]);
        comps.insert("responsible_handling".to_string(), 0.3);
        let gated = final_score(p, &comps, &[]);

        // Recompute the un-penalized sum with the lowered component to
        // isolate the multiplier.
        let weighted: f64 = p
            .component_weights
            .iter()
            .map(|(n, w)| w * comps[n])
            .sum();
        let expected = (p.base_score + p.scale_factor * weighted) * p.gating.penalty;
        assert!((gated - expected).abs() < 1e-9);
        assert!(gated < clean);
    }

    #[test]
    fn moment_bonus_needs_two_strong_moments() {
        let p = profile(CategoryId::Heartwarming);
        let comps = components(p, 0.5);

        let none = final_score(p, &comps, &[]);
        let one = final_score(p, &comps, &[strong_moment()]);
        let two = final_score(p, &comps, &[strong_moment(), strong_moment()]);

        assert_eq!(none, one);
        assert!((two - one - p.moment_bonus).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_components_are_clamped_before_weighting() {
        let p = profile(CategoryId::Heartwarming);
        let capped = final_score(p, &components(p, 1.0), &[]);
        let overflowing = final_score(p, &components(p, 7.0), &[]);
        assert_eq!(capped, overflowing);
    }

    #[test]
    fn confidence_grows_with_evidence_and_stays_bounded() {
        let p = profile(CategoryId::Heartwarming);
        let comps = components(p, 0.6);

        let mut v = VideoRecord::bare("id", "t");
        let bare = confidence(p, &v, &comps);

        v.comments = vec!["a".to_string(); 50];
        let with_comments = confidence(p, &v, &comps);

        v.view_count = 100_000;
        let with_views = confidence(p, &v, &comps);

        v.transcript = Some(crate::video::Transcript {
            available: true,
            text: String::new(),
            segments: vec![],
        });
        let with_transcript = confidence(p, &v, &comps);

        assert!(bare <= with_comments);
        assert!(with_comments <= with_views);
        assert!(with_views <= with_transcript);
        assert!((0.0..=1.0).contains(&with_transcript));
    }

    #[test]
    fn labels_follow_gating_thresholds() {
        let p = profile(CategoryId::Traumatic);

        let mut comps = components(p, 0.8);
        assert_eq!(authenticity_label(p, &comps), "responsible");

        comps.insert("responsible_handling".to_string(), 0.5);
        assert_eq!(authenticity_label(p, &comps), "questionable");

        comps.insert("responsible_handling".to_string(), 0.2);
        assert_eq!(authenticity_label(p, &comps), "exploitative");
    }
}
