use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::assets::{load_animation, AnimationPanel, AnimationSource};
use super::domain::{FreshScore, ItemReading, RiskTier};
use super::encoder::{encode, FeatureVector};
use super::model::{ScoringError, ScoringModel};
use super::presentation::{render_page, DashboardState, Theme};

/// Result of one pass through encode → score → tier.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub reading: ItemReading,
    pub features: FeatureVector,
    pub score: FreshScore,
    pub tier: RiskTier,
    pub evaluated_at: DateTime<Utc>,
}

/// Service composing the encoder, throwaway model and page renderer.
///
/// The animation is fetched at most once, by [`FreshnessDashboard::prefetch_animation`].
/// Rendering only reads the cached panel, so a slow asset host never delays a page.
pub struct FreshnessDashboard<S: ?Sized> {
    model: ScoringModel,
    panel: OnceLock<AnimationPanel>,
    animation: Arc<S>,
}

impl<S> FreshnessDashboard<S>
where
    S: AnimationSource + ?Sized + 'static,
{
    pub fn new(model: ScoringModel, animation: Arc<S>) -> Self {
        Self {
            model,
            panel: OnceLock::new(),
            animation,
        }
    }

    pub fn model(&self) -> &ScoringModel {
        &self.model
    }

    /// Runs the scoring pipeline for one reading.
    pub fn submit(&self, reading: ItemReading) -> Result<ScoreReport, ScoringError> {
        let features = encode(&reading);
        let score = self.model.score(&features)?;
        let tier = score.tier();

        info!(
            category = reading.category().slug(),
            score = score.value(),
            tier = tier.label(),
            "freshscore computed"
        );

        Ok(ScoreReport {
            reading,
            features,
            score,
            tier,
            evaluated_at: Utc::now(),
        })
    }

    /// Fetches and caches the animation panel. Blocks on the asset host, so
    /// callers run it off the request path.
    pub fn prefetch_animation(&self) -> AnimationPanel {
        self.panel
            .get_or_init(|| load_animation(self.animation.as_ref()))
            .clone()
    }

    /// Cached panel; hidden until the prefetch has finished.
    pub fn animation(&self) -> AnimationPanel {
        self.panel.get().cloned().unwrap_or(AnimationPanel::Hidden)
    }

    /// Initial page with default slider values.
    pub fn landing(&self, theme: Theme) -> String {
        render_page(&DashboardState::initial(), &self.animation(), theme)
    }

    pub fn render_submission(
        &self,
        reading: ItemReading,
        theme: Theme,
    ) -> Result<String, ScoringError> {
        let report = self.submit(reading)?;
        let state = DashboardState::ResultDisplayed(report);
        Ok(render_page(&state, &self.animation(), theme))
    }
}

impl<S> std::fmt::Debug for FreshnessDashboard<S>
where
    S: AnimationSource + ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreshnessDashboard")
            .field("model", &self.model)
            .field("panel", &self.panel.get())
            .field("animation", &self.animation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freshness::assets::{AnimationAsset, AssetError, DisabledAnimationSource};
    use crate::freshness::domain::PerishableCategory;
    use crate::freshness::model::ScoringConfig;
    use std::thread;
    use std::time::{Duration, Instant};

    const STALL: Duration = Duration::from_millis(1500);

    #[derive(Debug)]
    struct StalledSource;

    impl AnimationSource for StalledSource {
        fn fetch(&self) -> Result<AnimationAsset, AssetError> {
            thread::sleep(STALL);
            Err(AssetError::Transport("timed out".to_string()))
        }
    }

    #[derive(Debug)]
    struct OfflineSource;

    impl AnimationSource for OfflineSource {
        fn fetch(&self) -> Result<AnimationAsset, AssetError> {
            Err(AssetError::Transport("network unreachable".to_string()))
        }
    }

    fn quick_model() -> ScoringModel {
        ScoringModel::new(ScoringConfig {
            trees: 5,
            samples: 100,
            ..ScoringConfig::default()
        })
    }

    #[test]
    fn submit_reports_tier_consistent_with_score() {
        let dashboard = FreshnessDashboard::new(quick_model(), Arc::new(DisabledAnimationSource));
        let report = dashboard
            .submit(ItemReading::default())
            .expect("pipeline succeeds");
        assert!((0.0..=100.0).contains(&report.score.value()));
        assert_eq!(report.tier, RiskTier::from_score(report.score.value()));
        assert_eq!(report.features.len(), 20);
    }

    #[test]
    fn offline_animation_does_not_block_scoring() {
        let dashboard = FreshnessDashboard::new(quick_model(), Arc::new(OfflineSource));
        assert_eq!(dashboard.animation(), AnimationPanel::Hidden);
        assert!(!dashboard.prefetch_animation().is_ready());
        let reading = ItemReading::new(PerishableCategory::Vaccines, 3.0, 60, 12.0, 400.0, 0)
            .expect("valid reading");
        let html = dashboard
            .render_submission(reading, Theme::Light)
            .expect("scoring unaffected by asset failure");
        assert!(html.contains("network unreachable"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn landing_page_awaits_input() {
        let source: Arc<dyn AnimationSource> = Arc::new(DisabledAnimationSource);
        let dashboard = FreshnessDashboard::new(quick_model(), source);
        let html = dashboard.landing(Theme::Dark);
        assert!(html.contains("<form"));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn stalled_asset_host_does_not_delay_scored_pages() {
        let dashboard = Arc::new(FreshnessDashboard::new(
            quick_model(),
            Arc::new(StalledSource),
        ));
        let prefetch = {
            let dashboard = Arc::clone(&dashboard);
            thread::spawn(move || dashboard.prefetch_animation())
        };

        let started = Instant::now();
        let html = dashboard
            .render_submission(ItemReading::default(), Theme::Light)
            .expect("scores while the asset is pending");
        assert!(started.elapsed() < STALL / 2, "page took {:?}", started.elapsed());
        assert!(html.contains("<svg"));
        assert!(!html.contains("timed out"));

        let panel = prefetch.join().expect("prefetch thread");
        assert!(!panel.is_ready());
        let html = dashboard
            .render_submission(ItemReading::default(), Theme::Light)
            .expect("scores");
        assert!(html.contains("timed out"));
    }

    #[test]
    fn animation_is_fetched_once() {
        #[derive(Debug, Default)]
        struct CountingSource(std::sync::atomic::AtomicUsize);

        impl AnimationSource for CountingSource {
            fn fetch(&self) -> Result<AnimationAsset, AssetError> {
                self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                Err(AssetError::Status(404))
            }
        }

        let source = Arc::new(CountingSource::default());
        let dashboard = FreshnessDashboard::new(quick_model(), Arc::clone(&source));
        dashboard.prefetch_animation();
        dashboard.prefetch_animation();
        dashboard.landing(Theme::Light);
        dashboard
            .render_submission(ItemReading::default(), Theme::Dark)
            .expect("scores");
        assert_eq!(source.0.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
