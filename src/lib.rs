// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod assess;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod history;
pub mod metrics;
pub mod moments;
pub mod profiles;
pub mod provider;
pub mod result;
pub mod score;
pub mod sentiment;
pub mod timestamp;
pub mod video;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::engine::{analyze, analyze_for};
pub use crate::error::{ProviderError, ScoreError};
pub use crate::profiles::{registry, CategoryId};
pub use crate::result::{Moment, ScoreResult, Sentiment};
pub use crate::video::VideoRecord;
