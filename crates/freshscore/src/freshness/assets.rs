use serde_json::Value;
use std::fmt::Debug;
use std::time::Duration;
use tracing::{debug, warn};

/// Decorative animation document (Lottie JSON) shown next to the form.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationAsset {
    pub source: String,
    pub document: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("no animation source configured")]
    Disabled,
    #[error("animation request failed: {0}")]
    Transport(String),
    #[error("animation server answered with status {0}")]
    Status(u16),
    #[error("animation payload is not valid JSON: {0}")]
    InvalidBody(String),
}

/// Where the optional animation comes from.
pub trait AnimationSource: Debug + Send + Sync {
    fn fetch(&self) -> Result<AnimationAsset, AssetError>;
}

/// Outcome shown to the operator; an unavailable asset degrades to a warning.
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationPanel {
    Ready(AnimationAsset),
    Unavailable { warning: String },
    /// No source configured; nothing is rendered.
    Hidden,
}

impl AnimationPanel {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Fetches the animation, folding every failure into a warning panel.
pub fn load_animation<S: AnimationSource + ?Sized>(source: &S) -> AnimationPanel {
    match source.fetch() {
        Ok(asset) => AnimationPanel::Ready(asset),
        Err(AssetError::Disabled) => {
            debug!("animation source disabled");
            AnimationPanel::Hidden
        }
        Err(err) => {
            warn!(error = %err, "animation unavailable");
            AnimationPanel::Unavailable {
                warning: format!("⚠️ Animation could not be loaded ({err})."),
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledAnimationSource;

impl AnimationSource for DisabledAnimationSource {
    fn fetch(&self) -> Result<AnimationAsset, AssetError> {
        Err(AssetError::Disabled)
    }
}

/// Blocking HTTP fetcher; call it from a blocking context only.
#[derive(Debug, Clone)]
pub struct HttpAnimationSource {
    url: String,
    timeout: Duration,
}

impl HttpAnimationSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AnimationSource for HttpAnimationSource {
    fn fetch(&self) -> Result<AnimationAsset, AssetError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| AssetError::Transport(err.to_string()))?;

        let response = client
            .get(&self.url)
            .send()
            .map_err(|err| AssetError::Transport(err.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(AssetError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|err| AssetError::Transport(err.to_string()))?;
        let document = serde_json::from_str::<Value>(&body)
            .map_err(|err| AssetError::InvalidBody(err.to_string()))?;

        Ok(AnimationAsset {
            source: self.url.clone(),
            document,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct FixedSource(Result<Value, u16>);

    impl AnimationSource for FixedSource {
        fn fetch(&self) -> Result<AnimationAsset, AssetError> {
            match &self.0 {
                Ok(document) => Ok(AnimationAsset {
                    source: "memory://truck".to_string(),
                    document: document.clone(),
                }),
                Err(status) => Err(AssetError::Status(*status)),
            }
        }
    }

    #[test]
    fn successful_fetch_is_ready() {
        let panel = load_animation(&FixedSource(Ok(json!({ "v": "5.7.4" }))));
        assert!(panel.is_ready());
    }

    #[test]
    fn non_200_degrades_to_warning() {
        let panel = load_animation(&FixedSource(Err(404)));
        match panel {
            AnimationPanel::Unavailable { warning } => assert!(warning.contains("404")),
            other => panic!("expected warning, got {other:?}"),
        }
    }

    #[test]
    fn disabled_source_hides_the_panel() {
        assert_eq!(
            load_animation(&DisabledAnimationSource),
            AnimationPanel::Hidden
        );
    }

    #[test]
    fn unreachable_host_is_a_transport_error() {
        let source =
            HttpAnimationSource::new("http://127.0.0.1:9/anim.json", Duration::from_millis(200));
        let err = source.fetch().expect_err("nothing listens on the discard port");
        assert!(matches!(err, AssetError::Transport(_)));
        assert!(!load_animation(&source).is_ready());
    }
}
