//! Timestamped-moment extraction from viewer comments.
//!
//! A comment qualifies when it carries at least one well-formed timestamp
//! and any category-relevant keywords. Relevance is computed once per
//! comment; a comment with two timestamps yields two moments sharing the
//! same relevance and sentiment.

use crate::corpus::{contains_keyword, count_present};
use crate::profiles::CategoryProfile;
use crate::result::{AuthenticitySignal, CategoryIndicators, Moment};
use crate::sentiment;
use crate::timestamp::find_timestamps;

const CONTENT_TYPE_WEIGHT: f64 = 2.0;
const SPEECH_PATTERN_WEIGHT: f64 = 1.5;

/// Moments with relevance at or above this bound count as "strong" for the
/// viewer-response assessor and the aggregator's moment bonus.
pub const STRONG_MOMENT_RELEVANCE: f64 = 5.0;

/// Extract and rank moments from all comments. The result is sorted by
/// relevance descending; equal scores keep comment discovery order (stable
/// sort, no secondary key).
pub fn extract(comments: &[String], profile: &CategoryProfile) -> Vec<Moment> {
    let mut moments = Vec::new();

    for comment in comments {
        let timestamps = find_timestamps(comment);
        if timestamps.is_empty() {
            continue;
        }

        let text = comment.to_lowercase();
        let relevance = comment_relevance(&text, profile);
        if relevance <= 0.0 {
            continue;
        }

        let sentiment = sentiment::classify(comment);
        let indicators = category_indicators(&text, profile);

        for ts in timestamps {
            moments.push(Moment {
                timestamp_text: ts,
                source_comment: comment.clone(),
                relevance_score: relevance,
                sentiment,
                category_indicators: indicators.clone(),
            });
        }
    }

    moments.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    moments
}

/// Weighted keyword presence: content types x2.0, emotion tiers x3/2/1,
/// speech-pattern phrases x1.5.
fn comment_relevance(text: &str, profile: &CategoryProfile) -> f64 {
    let content_hits: usize = profile
        .content_types
        .values()
        .map(|kws| count_present([text], kws))
        .sum();

    let emotion_score: f64 = profile
        .viewer_emotions
        .weighted()
        .iter()
        .map(|(weight, kws)| *weight * count_present([text], kws) as f64)
        .sum();

    let phrase_hits: usize = profile
        .speech_patterns
        .values()
        .map(|phrases| count_present([text], phrases))
        .sum();

    CONTENT_TYPE_WEIGHT * content_hits as f64
        + emotion_score
        + SPEECH_PATTERN_WEIGHT * phrase_hits as f64
}

fn category_indicators(text: &str, profile: &CategoryProfile) -> CategoryIndicators {
    let matched_content_types = profile
        .content_types
        .iter()
        .filter(|(_, kws)| count_present([text], kws) > 0)
        .map(|(name, _)| name.clone())
        .collect();

    let mut matched_emotion_words: Vec<String> = Vec::new();
    for (_, kws) in profile.viewer_emotions.weighted() {
        for kw in kws {
            if matched_emotion_words.len() == 3 {
                break;
            }
            if contains_keyword(text, kw) && !matched_emotion_words.contains(kw) {
                matched_emotion_words.push(kw.clone());
            }
        }
    }

    // Genuine signals take precedence over staged ones.
    let signals = &profile.authenticity_signals;
    let authenticity_signal = if count_present([text], &signals.genuine) > 0 {
        AuthenticitySignal::Genuine
    } else if count_present([text], &signals.staged) > 0 {
        AuthenticitySignal::Questionable
    } else {
        AuthenticitySignal::Unknown
    };

    CategoryIndicators {
        matched_content_types,
        matched_emotion_words,
        authenticity_signal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::{registry, CategoryId};
    use crate::result::Sentiment;

    fn heartwarming() -> &'static CategoryProfile {
        registry().profile(CategoryId::Heartwarming)
    }

    #[test]
    fn reunion_comment_yields_relevant_moment() {
        let comments = vec!["the reunion at 2:15 made me cry, so touching".to_string()];
        let moments = extract(&comments, heartwarming());

        assert_eq!(moments.len(), 1);
        let m = &moments[0];
        assert_eq!(m.timestamp_text, "2:15");
        assert!(m.relevance_score > 0.0);
        assert!(m
            .category_indicators
            .matched_content_types
            .iter()
            .any(|t| t == "reunions"));
        assert_eq!(m.sentiment, Sentiment::Positive);
    }

    #[test]
    fn comment_without_keywords_is_dropped() {
        let comments = vec!["check 2:15 for the thing".to_string()];
        assert!(extract(&comments, heartwarming()).is_empty());
    }

    #[test]
    fn comment_without_timestamp_is_dropped() {
        let comments = vec!["the reunion made me cry".to_string()];
        assert!(extract(&comments, heartwarming()).is_empty());
    }

    #[test]
    fn two_timestamps_share_relevance_and_sentiment() {
        let comments = vec!["reunion at 2:15 and again at 2:45, crying".to_string()];
        let moments = extract(&comments, heartwarming());

        assert_eq!(moments.len(), 2);
        assert_eq!(moments[0].relevance_score, moments[1].relevance_score);
        assert_eq!(moments[0].sentiment, moments[1].sentiment);
        let texts: Vec<_> = moments.iter().map(|m| m.timestamp_text.as_str()).collect();
        assert!(texts.contains(&"2:15") && texts.contains(&"2:45"));
    }

    #[test]
    fn equal_scores_keep_discovery_order() {
        // Identical keyword content in both comments, different timestamps.
        let comments = vec![
            "reunion at 3:10, crying".to_string(),
            "reunion at 1:05, crying".to_string(),
        ];
        let moments = extract(&comments, heartwarming());
        assert_eq!(moments.len(), 2);
        assert_eq!(moments[0].relevance_score, moments[1].relevance_score);
        assert_eq!(moments[0].timestamp_text, "3:10");
        assert_eq!(moments[1].timestamp_text, "1:05");
    }

    #[test]
    fn sort_is_descending_by_relevance() {
        let comments = vec![
            "nice bit at 0:30, sweet".to_string(),
            "the reunion at 2:15 made me cry, so touching".to_string(),
        ];
        let moments = extract(&comments, heartwarming());
        assert_eq!(moments.len(), 2);
        assert!(moments[0].relevance_score >= moments[1].relevance_score);
        assert_eq!(moments[0].timestamp_text, "2:15");
    }

    #[test]
    fn genuine_signal_checked_before_staged() {
        let comments =
            vec!["reunion at 2:15, genuine reaction but looks staged".to_string()];
        let moments = extract(&comments, heartwarming());
        assert_eq!(
            moments[0].category_indicators.authenticity_signal,
            AuthenticitySignal::Genuine
        );
    }

    #[test]
    fn emotion_words_capped_at_three() {
        let comments =
            vec!["reunion at 2:15 crying tears sobbing emotional touched beautiful".to_string()];
        let moments = extract(&comments, heartwarming());
        assert!(moments[0].category_indicators.matched_emotion_words.len() <= 3);
    }
}
