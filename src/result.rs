//! Output types of a scoring run: the final `ScoreResult` and the
//! timestamped `Moment`s extracted from viewer comments. The JSON shape is
//! part of the public contract; dashboard and export consumers read these
//! fields verbatim.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Comment polarity from the keyword classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Authenticity marker attached to a single moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthenticitySignal {
    Genuine,
    Questionable,
    Unknown,
}

/// Category evidence collected for one moment's source comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryIndicators {
    /// Names of content types whose keywords matched (e.g. "reunions").
    pub matched_content_types: Vec<String>,
    /// Up to three matched viewer-emotion keywords.
    pub matched_emotion_words: Vec<String>,
    pub authenticity_signal: AuthenticitySignal,
}

/// A timestamp mentioned in a comment, scored for category relevance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moment {
    /// Timestamp as written, e.g. "2:15" or "1:02:15".
    pub timestamp_text: String,
    pub source_comment: String,
    pub relevance_score: f64,
    pub sentiment: Sentiment,
    pub category_indicators: CategoryIndicators,
}

/// Complete outcome of scoring one video against one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Always in [0, 10].
    pub final_score: f64,
    /// Component name → value in [0, 1]. BTreeMap keeps serialization
    /// order deterministic.
    pub component_scores: BTreeMap<String, f64>,
    /// Evidence-based trust estimate in [0, 1], independent of the score.
    pub confidence: f64,
    /// Category-specific label derived from the gating component.
    pub authenticity_label: String,
    /// Sorted by relevance descending; ties keep discovery order.
    pub moments: Vec<Moment>,
    /// Human-readable markers of what drove the score (at most 6).
    pub key_indicators: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_contract_shape() {
        let r = ScoreResult {
            final_score: 7.5,
            component_scores: BTreeMap::from([("authenticity".to_string(), 0.8)]),
            confidence: 0.75,
            authenticity_label: "authentic".to_string(),
            moments: vec![Moment {
                timestamp_text: "2:15".to_string(),
                source_comment: "the reunion at 2:15 made me cry".to_string(),
                relevance_score: 8.0,
                sentiment: Sentiment::Positive,
                category_indicators: CategoryIndicators {
                    matched_content_types: vec!["reunions".to_string()],
                    matched_emotion_words: vec!["cry".to_string()],
                    authenticity_signal: AuthenticitySignal::Unknown,
                },
            }],
            key_indicators: vec!["content: reunions".to_string()],
        };

        let v: serde_json::Value = serde_json::to_value(&r).unwrap();
        assert_eq!(v["finalScore"], serde_json::json!(7.5));
        assert_eq!(v["authenticityLabel"], serde_json::json!("authentic"));
        assert_eq!(v["componentScores"]["authenticity"], serde_json::json!(0.8));
        assert_eq!(v["moments"][0]["timestampText"], serde_json::json!("2:15"));
        assert_eq!(v["moments"][0]["sentiment"], serde_json::json!("positive"));
        assert_eq!(
            v["moments"][0]["categoryIndicators"]["authenticitySignal"],
            serde_json::json!("unknown")
        );
        assert!(v["keyIndicators"].is_array());
    }
}
