// src/provider/mod.rs
//! Video data providers. The scoring core never talks to the network; a
//! provider delivers a fully-populated `VideoRecord` (or a typed failure)
//! before the engine is invoked.

pub mod youtube;

use anyhow::Result;

use crate::error::ProviderError;
use crate::video::VideoRecord;

#[async_trait::async_trait]
pub trait VideoProvider {
    async fn fetch_video(&self, video_id: &str) -> Result<VideoRecord, ProviderError>;
    fn name(&self) -> &'static str;
}

/// Pull a video id out of a watch/short/embed URL, or accept a bare id.
/// Returns `None` for anything that cannot carry an id.
pub fn extract_video_id(url: &str) -> Option<String> {
    let url = url.trim();

    for marker in ["youtube.com/watch?v=", "youtu.be/", "youtube.com/embed/"] {
        if let Some(pos) = url.find(marker) {
            let tail = &url[pos + marker.len()..];
            let id: String = tail
                .chars()
                .take_while(|c| !matches!(c, '&' | '?' | '#' | '/' | '\n'))
                .collect();
            return (!id.is_empty()).then_some(id);
        }
    }

    // Bare id: no scheme, no path separators.
    let plausible = !url.is_empty()
        && url
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    plausible.then(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_common_url_forms() {
        for url in [
            "https://youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtube.com/embed/dQw4w9WgXcQ?rel=0",
        ] {
            assert_eq!(
                extract_video_id(url).as_deref(),
                Some("dQw4w9WgXcQ"),
                "url: {url}"
            );
        }
    }

    #[test]
    fn accepts_bare_id_and_rejects_junk() {
        assert_eq!(extract_video_id("dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(extract_video_id("https://example.com/clip"), None);
        assert_eq!(extract_video_id(""), None);
    }
}
