//! Keyword sentiment classifier for single comments.
//!
//! Two tiers per polarity: strong keywords weigh 2, ordinary keywords
//! weigh 1. Matching is case-insensitive substring containment, not
//! tokenization, so "cry" also fires inside "crying".

use crate::result::Sentiment;

const STRONG_POSITIVE: &[&str] = &[
    "amazing",
    "incredible",
    "beautiful",
    "crying",
    "tears",
    "love this",
    "best thing",
];

const POSITIVE: &[&str] = &[
    "love",
    "great",
    "awesome",
    "perfect",
    "emotional",
    "touching",
    "wholesome",
    "sweet",
];

const STRONG_NEGATIVE: &[&str] = &[
    "hate",
    "terrible",
    "awful",
    "disgusting",
    "staged",
    "fake",
];

const NEGATIVE: &[&str] = &["bad", "boring", "cringe", "clickbait", "waste of time"];

/// Classify one comment. Ties (including no hits at all) resolve to
/// neutral.
pub fn classify(comment: &str) -> Sentiment {
    let text = comment.to_lowercase();

    let hits = |set: &[&str]| set.iter().filter(|kw| text.contains(*kw)).count() as i32;

    let positive_total = 2 * hits(STRONG_POSITIVE) + hits(POSITIVE);
    let negative_total = 2 * hits(STRONG_NEGATIVE) + hits(NEGATIVE);

    if positive_total > negative_total {
        Sentiment::Positive
    } else if negative_total > positive_total {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_when_positive_outweighs() {
        assert_eq!(classify("This is beautiful, I love it"), Sentiment::Positive);
    }

    #[test]
    fn negative_when_negative_outweighs() {
        assert_eq!(classify("so staged and boring"), Sentiment::Negative);
    }

    #[test]
    fn tie_resolves_to_neutral() {
        // "love" (+1) vs "bad" (+1): equal totals.
        assert_eq!(classify("love the idea, bad execution"), Sentiment::Neutral);
        assert_eq!(classify("a plain comment"), Sentiment::Neutral);
    }

    #[test]
    fn strong_keywords_weigh_double() {
        // "crying" is strong positive (2); "bad" + "boring" are ordinary (1+1).
        assert_eq!(classify("crying but bad and boring"), Sentiment::Neutral);
        // One more ordinary negative tips it.
        assert_eq!(
            classify("crying but bad, boring and cringe"),
            Sentiment::Negative
        );
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        assert_eq!(classify("CRYING SO HARD"), Sentiment::Positive);
    }
}
