//! Bounded in-memory log of past analyses for the dashboard
//! and the debug endpoint. Append-only within the cap; oldest entries are
//! dropped first.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::profiles::CategoryId;
use crate::result::ScoreResult;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub recorded_at: DateTime<Utc>,
    pub video_id: String,
    pub title: String,
    pub category: CategoryId,
    pub final_score: f64,
    pub confidence: f64,
    pub authenticity_label: String,
}

#[derive(Debug)]
pub struct History {
    inner: Mutex<Vec<HistoryEntry>>,
    cap: usize,
}

impl History {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: Mutex::new(Vec::with_capacity(cap.min(10_000))),
            cap: cap.min(10_000),
        }
    }

    pub fn push(&self, video_id: &str, title: &str, category: CategoryId, result: &ScoreResult) {
        let entry = HistoryEntry {
            recorded_at: Utc::now(),
            video_id: video_id.to_string(),
            title: title.to_string(),
            category,
            final_score: result.final_score,
            confidence: result.confidence,
            authenticity_label: result.authenticity_label.clone(),
        };

        let mut v = self.inner.lock().expect("history mutex poisoned");
        v.push(entry);
        if v.len() > self.cap {
            let excess = v.len() - self.cap;
            v.drain(0..excess);
        }
    }

    pub fn snapshot_last_n(&self, n: usize) -> Vec<HistoryEntry> {
        let v = self.inner.lock().expect("history mutex poisoned");
        let len = v.len();
        let start = len.saturating_sub(n);
        v[start..].to_vec()
    }
}
