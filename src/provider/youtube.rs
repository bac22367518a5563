//! YouTube Data API v3 provider: `videos` for metadata/statistics and
//! `commentThreads` for viewer comments. Comment retrieval is best effort:
//! a failed comment fetch degrades to an empty list rather than failing
//! the whole record, since the engine is total without comments.

use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::counter;
use serde::Deserialize;

use crate::error::ProviderError;
use crate::provider::VideoProvider;
use crate::video::VideoRecord;

const VIDEOS_URL: &str = "https://www.googleapis.com/youtube/v3/videos";
const COMMENTS_URL: &str = "https://www.googleapis.com/youtube/v3/commentThreads";
const MAX_COMMENTS: u32 = 100;

pub struct YouTubeProvider {
    mode: Mode,
}

enum Mode {
    // Own copies so tests don't need 'static fixtures.
    #[cfg(feature = "provider-fixtures")]
    Fixture {
        video_json: String,
        comments_json: Option<String>,
    },
    #[cfg(feature = "provider-http")]
    Http {
        api_key: String,
        client: reqwest::Client,
    },
}

impl YouTubeProvider {
    #[cfg(feature = "provider-fixtures")]
    pub fn from_fixture_str(video_json: &str, comments_json: Option<&str>) -> Self {
        Self {
            mode: Mode::Fixture {
                video_json: video_json.to_string(),
                comments_json: comments_json.map(|s| s.to_string()),
            },
        }
    }

    #[cfg(feature = "provider-http")]
    pub fn from_api_key(api_key: impl Into<String>) -> Self {
        Self {
            mode: Mode::Http {
                api_key: api_key.into(),
                client: reqwest::Client::new(),
            },
        }
    }
}

#[async_trait]
impl VideoProvider for YouTubeProvider {
    async fn fetch_video(&self, video_id: &str) -> Result<VideoRecord, ProviderError> {
        match &self.mode {
            #[cfg(feature = "provider-fixtures")]
            Mode::Fixture {
                video_json,
                comments_json,
            } => {
                let mut record = parse_video_response(video_json, video_id)?;
                if let Some(cj) = comments_json {
                    record.comments = parse_comments_response(cj);
                }
                Ok(record)
            }

            #[cfg(feature = "provider-http")]
            Mode::Http { api_key, client } => {
                let resp = client
                    .get(VIDEOS_URL)
                    .query(&[
                        ("part", "snippet,statistics,contentDetails"),
                        ("id", video_id),
                        ("key", api_key),
                    ])
                    .send()
                    .await
                    .map_err(|e| {
                        tracing::warn!(error = ?e, provider = "YouTube", "video fetch failed");
                        counter!("clipscore_provider_errors_total").increment(1);
                        ProviderError::Transient(anyhow::Error::new(e).context("videos request"))
                    })?;
                let body = check_status(resp, video_id)?
                    .text()
                    .await
                    .context("videos body")
                    .map_err(ProviderError::Transient)?;

                let mut record = parse_video_response(&body, video_id)?;

                // Best effort: comments enrich scoring but are not required.
                match self.fetch_comments(client, api_key, video_id).await {
                    Ok(comments) => record.comments = comments,
                    Err(e) => {
                        tracing::warn!(error = ?e, provider = "YouTube", "comment fetch skipped");
                        counter!("clipscore_provider_errors_total").increment(1);
                    }
                }

                Ok(record)
            }
        }
    }

    fn name(&self) -> &'static str {
        "YouTube"
    }
}

#[cfg(feature = "provider-http")]
impl YouTubeProvider {
    async fn fetch_comments(
        &self,
        client: &reqwest::Client,
        api_key: &str,
        video_id: &str,
    ) -> Result<Vec<String>> {
        let max = MAX_COMMENTS.to_string();
        let body = client
            .get(COMMENTS_URL)
            .query(&[
                ("part", "snippet"),
                ("videoId", video_id),
                ("maxResults", max.as_str()),
                ("order", "relevance"),
                ("key", api_key),
            ])
            .send()
            .await
            .context("commentThreads request")?
            .error_for_status()
            .context("commentThreads status")?
            .text()
            .await
            .context("commentThreads body")?;
        Ok(parse_comments_response(&body))
    }
}

#[cfg(feature = "provider-http")]
fn check_status(
    resp: reqwest::Response,
    video_id: &str,
) -> Result<reqwest::Response, ProviderError> {
    use reqwest::StatusCode;
    match resp.status() {
        StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => Err(ProviderError::Auth),
        StatusCode::TOO_MANY_REQUESTS => Err(ProviderError::RateLimited),
        StatusCode::NOT_FOUND => Err(ProviderError::NotFound(video_id.to_string())),
        s if s.is_success() => Ok(resp),
        s => Err(ProviderError::Transient(anyhow::anyhow!(
            "unexpected status {s} from videos endpoint"
        ))),
    }
}

/* ----------------------------
Response mapping
---------------------------- */

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: Snippet,
    #[serde(default)]
    statistics: Statistics,
    #[serde(rename = "contentDetails", default)]
    content_details: ContentDetails,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    #[serde(rename = "channelTitle", default)]
    channel_title: String,
}

// YouTube serializes counters as strings.
#[derive(Debug, Default, Deserialize)]
struct Statistics {
    #[serde(rename = "viewCount")]
    view_count: Option<String>,
    #[serde(rename = "likeCount")]
    like_count: Option<String>,
    #[serde(rename = "commentCount")]
    comment_count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ContentDetails {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommentsResponse {
    #[serde(default)]
    items: Vec<CommentThread>,
}

#[derive(Debug, Deserialize)]
struct CommentThread {
    snippet: ThreadSnippet,
}

#[derive(Debug, Deserialize)]
struct ThreadSnippet {
    #[serde(rename = "topLevelComment")]
    top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
struct TopLevelComment {
    snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
struct CommentSnippet {
    #[serde(rename = "textDisplay")]
    text_display: String,
}

/// Map a `videos` endpoint payload onto a `VideoRecord`. An empty items
/// list means the video does not exist.
pub fn parse_video_response(json: &str, video_id: &str) -> Result<VideoRecord, ProviderError> {
    let parsed: VideosResponse = serde_json::from_str(json)
        .context("parsing videos response")
        .map_err(ProviderError::Transient)?;

    let item = parsed
        .items
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::NotFound(video_id.to_string()))?;

    let count = |s: &Option<String>| s.as_deref().and_then(|v| v.parse().ok()).unwrap_or(0);

    let mut record = VideoRecord::bare(video_id, item.snippet.title);
    record.description = item.snippet.description;
    record.tags = item.snippet.tags;
    record.view_count = count(&item.statistics.view_count);
    record.like_count = count(&item.statistics.like_count);
    record.comment_count = count(&item.statistics.comment_count);
    record.duration_seconds = item
        .content_details
        .duration
        .as_deref()
        .map(parse_duration_seconds)
        .unwrap_or(0);
    record.published_at = item
        .snippet
        .published_at
        .as_deref()
        .and_then(|ts| chrono::DateTime::parse_from_rfc3339(ts).ok())
        .map(|dt| dt.with_timezone(&chrono::Utc));
    record.channel_title = item.snippet.channel_title;
    Ok(record)
}

/// Top-level comment texts in retrieval order; unparseable payloads yield
/// an empty list.
pub fn parse_comments_response(json: &str) -> Vec<String> {
    serde_json::from_str::<CommentsResponse>(json)
        .map(|r| {
            r.items
                .into_iter()
                .map(|t| t.snippet.top_level_comment.snippet.text_display)
                .collect()
        })
        .unwrap_or_default()
}

/// Seconds from an ISO-8601 duration like `PT1H2M15S`. Explicit scanner;
/// anything unparseable maps to 0.
pub fn parse_duration_seconds(s: &str) -> u64 {
    let Some(rest) = s.strip_prefix("PT") else {
        return 0;
    };

    let mut total = 0u64;
    let mut num = 0u64;
    for c in rest.chars() {
        match c {
            '0'..='9' => num = num * 10 + (c as u64 - '0' as u64),
            'H' => {
                total += num * 3600;
                num = 0;
            }
            'M' => {
                total += num * 60;
                num = 0;
            }
            'S' => {
                total += num;
                num = 0;
            }
            _ => return 0,
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_scanner_handles_all_forms() {
        assert_eq!(parse_duration_seconds("PT1H2M15S"), 3735);
        assert_eq!(parse_duration_seconds("PT4M13S"), 253);
        assert_eq!(parse_duration_seconds("PT58S"), 58);
        assert_eq!(parse_duration_seconds("PT2H"), 7200);
        assert_eq!(parse_duration_seconds("garbage"), 0);
        assert_eq!(parse_duration_seconds("PT1X"), 0);
    }

    #[test]
    fn empty_items_map_to_not_found() {
        let err = parse_video_response(r#"{"items": []}"#, "missing").unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(id) if id == "missing"));
    }

    #[test]
    fn video_payload_maps_onto_record() {
        let json = r#"{
            "items": [{
                "snippet": {
                    "title": "Soldier reunion",
                    "description": "homecoming",
                    "publishedAt": "2024-05-01T12:00:00Z",
                    "channelTitle": "Clips"
                },
                "statistics": {
                    "viewCount": "12345",
                    "likeCount": "678",
                    "commentCount": "90"
                },
                "contentDetails": { "duration": "PT2M15S" }
            }]
        }"#;
        let v = parse_video_response(json, "abc").expect("parse");
        assert_eq!(v.video_id, "abc");
        assert_eq!(v.title, "Soldier reunion");
        assert_eq!(v.view_count, 12345);
        assert_eq!(v.duration_seconds, 135);
        assert!(v.published_at.is_some());
    }

    #[test]
    fn comment_payload_maps_in_order() {
        let json = r#"{
            "items": [
                {"snippet": {"topLevelComment": {"snippet": {"textDisplay": "first"}}}},
                {"snippet": {"topLevelComment": {"snippet": {"textDisplay": "second"}}}}
            ]
        }"#;
        assert_eq!(parse_comments_response(json), vec!["first", "second"]);
        assert!(parse_comments_response("not json").is_empty());
    }
}
