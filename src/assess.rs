//! Per-category component assessors.
//!
//! Each assessor is a pure function of the corpus, the profile, and the
//! engagement/transcript/thumbnail/channel data, returning a value clamped
//! to [0,1]. Assessors that depend on an optional input degrade to a fixed
//! neutral default when it is missing; they never fail. Which six
//! components apply to a category is decided by the profile's weight table,
//! validated against `KNOWN_COMPONENTS` at registry load.

use std::collections::BTreeMap;

use crate::corpus::{count_present, TextCorpus};
use crate::moments::STRONG_MOMENT_RELEVANCE;
use crate::profiles::CategoryProfile;
use crate::result::{Moment, Sentiment};
use crate::sentiment;
use crate::video::VideoRecord;

/// Every component name an assessor exists for. Profile validation rejects
/// weight tables referencing anything else.
pub const KNOWN_COMPONENTS: &[&str] = &[
    "authenticity",
    "content_match",
    "emotional_impact",
    "viewer_response",
    "engagement",
    "visual_warmth",
    "speech_patterns",
    "achievement_authenticity",
    "responsible_handling",
    "source_credibility",
];

pub fn is_known_component(name: &str) -> bool {
    KNOWN_COMPONENTS.contains(&name)
}

// Neutral defaults when the optional input is unavailable.
const THUMBNAIL_DEFAULT: f64 = 0.5;
const TRANSCRIPT_DEFAULT: f64 = 0.4;
const CHANNEL_DEFAULT: f64 = 0.5;
const ENGAGEMENT_DEFAULT: f64 = 0.3;

/// Evaluate every component the profile weighs. Values are clamped before
/// they reach the aggregator.
pub fn assess_all(
    profile: &CategoryProfile,
    video: &VideoRecord,
    corpus: &TextCorpus,
    moments: &[Moment],
) -> BTreeMap<String, f64> {
    profile
        .component_weights
        .keys()
        .map(|name| {
            let v = assess_one(name, profile, video, corpus, moments);
            (name.clone(), v.clamp(0.0, 1.0))
        })
        .collect()
}

fn assess_one(
    name: &str,
    profile: &CategoryProfile,
    video: &VideoRecord,
    corpus: &TextCorpus,
    moments: &[Moment],
) -> f64 {
    match name {
        "authenticity" => authenticity(profile, corpus),
        "content_match" => content_match(profile, corpus),
        "emotional_impact" => emotional_impact(profile, video, corpus),
        "viewer_response" => viewer_response(video, moments),
        "engagement" => engagement(video),
        "visual_warmth" => visual_warmth(video),
        "speech_patterns" => speech_patterns(profile, corpus),
        "achievement_authenticity" => achievement_authenticity(profile, corpus),
        "responsible_handling" => responsible_handling(profile, corpus),
        "source_credibility" => source_credibility(video),
        // Unreachable for validated profiles.
        _ => 0.0,
    }
}

/// Base 0.5, up to +0.4 from genuine signals, down to the profile's cap
/// from staged signals.
fn authenticity(profile: &CategoryProfile, corpus: &TextCorpus) -> f64 {
    let signals = &profile.authenticity_signals;
    let genuine = count_present([corpus.comments.as_str()], &signals.genuine);
    let staged = count_present(corpus.title_and_comments(), &signals.staged);

    0.5 + (0.15 * genuine as f64).min(0.4)
        - (0.2 * staged as f64).min(profile.staged_penalty_cap)
}

/// Base 0.2 plus a bucketed bonus from total content-type keyword hits.
fn content_match(profile: &CategoryProfile, corpus: &TextCorpus) -> f64 {
    let hits: usize = profile
        .content_types
        .values()
        .map(|kws| count_present(corpus.title_and_comments(), kws))
        .sum();

    0.2 + match hits {
        h if h > 5 => 0.6,
        h if h > 2 => 0.4,
        h if h > 0 => 0.2,
        _ => 0.0,
    }
}

/// Base 0.3 plus positive-sentiment ratio and emotion-keyword density.
fn emotional_impact(profile: &CategoryProfile, video: &VideoRecord, corpus: &TextCorpus) -> f64 {
    let positive_ratio = if video.comments.is_empty() {
        0.0
    } else {
        let positives = video
            .comments
            .iter()
            .filter(|c| sentiment::classify(c) == Sentiment::Positive)
            .count();
        positives as f64 / video.comments.len() as f64
    };

    let density: usize = profile
        .viewer_emotions
        .weighted()
        .iter()
        .map(|(_, kws)| count_present([corpus.comments.as_str()], kws))
        .sum();

    0.3 + positive_ratio * 0.4
        + match density {
            d if d > 5 => 0.3,
            d if d > 2 => 0.2,
            _ => 0.0,
        }
}

/// Base 0.3, bonus for strong moments, small bonus for comment volume.
fn viewer_response(video: &VideoRecord, moments: &[Moment]) -> f64 {
    let strong = moments
        .iter()
        .filter(|m| m.relevance_score >= STRONG_MOMENT_RELEVANCE)
        .count();

    let moment_bonus = match strong {
        s if s >= 3 => 0.5,
        s if s >= 1 => 0.3,
        _ => 0.0,
    };
    let volume_bonus = if video.comment_count > 100 { 0.1 } else { 0.0 };

    0.3 + moment_bonus + volume_bonus
}

/// Like/comment ratios against views, bucketed. No views means no signal:
/// fixed fallback, no division.
fn engagement(video: &VideoRecord) -> f64 {
    if video.view_count == 0 {
        return ENGAGEMENT_DEFAULT;
    }
    let views = video.view_count as f64;
    let like_ratio = video.like_count as f64 / views;
    let comment_ratio = video.comment_count as f64 / views;

    if like_ratio > 0.03 || comment_ratio > 0.005 {
        0.8
    } else if like_ratio > 0.015 || comment_ratio > 0.002 {
        0.6
    } else {
        0.4
    }
}

/// Thumbnail tone/brightness heuristic; neutral without a thumbnail.
fn visual_warmth(video: &VideoRecord) -> f64 {
    let Some(thumb) = video.thumbnail.as_ref().filter(|t| t.available) else {
        return THUMBNAIL_DEFAULT;
    };

    let mut v = 0.3;
    if thumb.color_profile.warm_tones > thumb.color_profile.cold_tones {
        v += 0.3;
    }
    if (0.4..=0.8).contains(&thumb.brightness) {
        v += 0.2;
    }
    if (0.3..=0.7).contains(&thumb.contrast) {
        v += 0.1;
    }
    v
}

/// Speech-pattern phrases found in the transcript, bucketed; fixed default
/// when no transcript is available.
fn speech_patterns(profile: &CategoryProfile, corpus: &TextCorpus) -> f64 {
    if corpus.transcript.is_empty() {
        return TRANSCRIPT_DEFAULT;
    }
    let hits: usize = profile
        .speech_patterns
        .values()
        .map(|phrases| count_present([corpus.transcript.as_str()], phrases))
        .sum();

    0.2 + match hits {
        h if h > 4 => 0.6,
        h if h > 2 => 0.4,
        h if h > 0 => 0.2,
        _ => 0.0,
    }
}

/// Authenticity variant for motivational content: same signal shape with
/// the profile's (harsher) staged cap, plus a bonus when both struggle and
/// achievement language appear, the narrative arc the category is about.
fn achievement_authenticity(profile: &CategoryProfile, corpus: &TextCorpus) -> f64 {
    let base = authenticity(profile, corpus);

    let narrative_fields = [
        corpus.title.as_str(),
        corpus.description.as_str(),
        corpus.comments.as_str(),
        corpus.transcript.as_str(),
    ];
    let has_achievement = count_present(narrative_fields, &profile.achievement_terms) > 0;
    let has_struggle = count_present(narrative_fields, &profile.struggle_terms) > 0;

    if has_achievement && has_struggle {
        base + 0.1
    } else {
        base
    }
}

/// Responsible-framing balance for traumatic content: awareness/education
/// framing raises it, exploitative packaging lowers it, official sourcing
/// nudges it up.
fn responsible_handling(profile: &CategoryProfile, corpus: &TextCorpus) -> f64 {
    let mut v = 0.5;

    if count_present([corpus.description.as_str()], &profile.responsible_terms) > 0 {
        v += 0.2;
    }

    let exploit_hits = count_present(
        [corpus.title.as_str(), corpus.description.as_str()],
        &profile.exploitative_terms,
    );
    v -= (0.15 * exploit_hits as f64).min(0.45);

    if count_present(
        [corpus.title.as_str(), corpus.description.as_str()],
        &profile.official_terms,
    ) > 0
    {
        v += 0.1;
    }

    v
}

/// Subscriber-count buckets; neutral without channel info.
fn source_credibility(video: &VideoRecord) -> f64 {
    let Some(channel) = video.channel_info.as_ref() else {
        return CHANNEL_DEFAULT;
    };

    let base = match channel.subscriber_count {
        s if s > 1_000_000 => 0.9,
        s if s > 100_000 => 0.75,
        s if s > 10_000 => 0.6,
        s if s > 1_000 => 0.5,
        _ => 0.4,
    };
    let catalog_bonus = if channel.video_count > 100 { 0.05 } else { 0.0 };

    base + catalog_bonus
}
