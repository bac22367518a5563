//! Lowercased search corpora for keyword containment checks.
//!
//! Missing optional inputs map to empty strings, never to `None`, so every
//! downstream containment check is a total function. Comments are joined
//! with a newline: no configured keyword or phrase spans lines, so the
//! separator cannot manufacture a match across two comments.

use crate::video::VideoRecord;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextCorpus {
    pub title: String,
    pub description: String,
    pub comments: String,
    pub transcript: String,
    pub channel_desc: String,
}

impl TextCorpus {
    pub fn build(video: &VideoRecord) -> Self {
        let transcript = video
            .transcript
            .as_ref()
            .filter(|t| t.available)
            .map(|t| t.text.to_lowercase())
            .unwrap_or_default();

        let channel_desc = video
            .channel_info
            .as_ref()
            .map(|c| c.description.to_lowercase())
            .unwrap_or_default();

        Self {
            title: video.title.to_lowercase(),
            description: video.description.to_lowercase(),
            comments: video
                .comments
                .iter()
                .map(|c| c.to_lowercase())
                .collect::<Vec<_>>()
                .join("\n"),
            transcript,
            channel_desc,
        }
    }

    /// Title + comments, the primary surface for keyword checks.
    pub fn title_and_comments(&self) -> [&str; 2] {
        [&self.title, &self.comments]
    }
}

/// Case-sensitive containment over pre-lowercased text; callers pass
/// lowercased keywords from profile config. Substring semantics are the
/// documented literal behavior ("cry" matches inside "crying").
pub fn contains_keyword(haystack: &str, keyword: &str) -> bool {
    !keyword.is_empty() && haystack.contains(keyword)
}

/// Number of keywords from `set` present in any of the given fields.
/// Presence-counted: a keyword counts once no matter how often it occurs.
pub fn count_present<'a, I>(fields: I, set: &[String]) -> usize
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    set.iter()
        .filter(|kw| {
            fields
                .clone()
                .into_iter()
                .any(|f| contains_keyword(f, kw))
        })
        .count()
}
