//! Cold chain freshness scoring: encode a reading, score it, render the page.

pub mod assets;
pub mod dashboard;
pub mod domain;
pub mod encoder;
pub mod model;
pub mod presentation;

pub use assets::{
    load_animation, AnimationAsset, AnimationPanel, AnimationSource, AssetError,
    DisabledAnimationSource, HttpAnimationSource,
};
pub use dashboard::{FreshnessDashboard, ScoreReport};
pub use domain::{FreshScore, ItemReading, PerishableCategory, ReadingError, RiskTier};
pub use encoder::{encode, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use model::{ScoringConfig, ScoringError, ScoringModel};
pub use presentation::{render_page, DashboardState, Theme};
