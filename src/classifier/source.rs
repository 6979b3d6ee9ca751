//! Ordered artifact acquisition: local file first, then a remote copy.
//!
//! Each source is attempted in turn and returns a typed result; the first
//! success wins. When every source fails the caller gets one error listing
//! all attempts in order.

use std::fmt;
use std::path::PathBuf;

use tracing::{info, warn};

use super::ModelArtifacts;
use crate::error::ArtifactError;

// ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSource {
    LocalFile(PathBuf),
    Remote(String),
}

impl fmt::Display for ArtifactSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ---
        match self {
            Self::LocalFile(path) => write!(f, "file '{}'", path.display()),
            Self::Remote(url) => write!(f, "url '{url}'"),
        }
    }
}

/// Artifacts together with the source that produced them.
#[derive(Debug)]
pub struct LoadedArtifacts {
    pub artifacts: ModelArtifacts,
    pub source: ArtifactSource,
}

impl ArtifactSource {
    // ---
    async fn load(&self, client: &reqwest::Client) -> Result<ModelArtifacts, ArtifactError> {
        // ---
        match self {
            Self::LocalFile(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|source| ArtifactError::Read {
                        path: path.display().to_string(),
                        source,
                    })?;
                ModelArtifacts::from_slice(&bytes, &self.to_string())
            }
            Self::Remote(url) => {
                let fetch_err = |source: reqwest::Error| ArtifactError::Fetch {
                    url: url.clone(),
                    source,
                };
                let bytes = client
                    .get(url)
                    .send()
                    .await
                    .and_then(reqwest::Response::error_for_status)
                    .map_err(fetch_err)?
                    .bytes()
                    .await
                    .map_err(fetch_err)?;
                ModelArtifacts::from_slice(&bytes, &self.to_string())
            }
        }
    }
}

/// Try each source in order and return the first that loads and validates.
pub async fn load_first_available(
    sources: &[ArtifactSource],
    client: &reqwest::Client,
) -> Result<LoadedArtifacts, ArtifactError> {
    // ---
    let mut attempts = Vec::with_capacity(sources.len());

    for source in sources {
        info!("Loading model artifacts from {}", source);
        match source.load(client).await {
            Ok(artifacts) => {
                info!(
                    "Loaded model artifacts from {} ({} classes)",
                    source,
                    artifacts.encoder.classes.len()
                );
                return Ok(LoadedArtifacts {
                    artifacts,
                    source: source.clone(),
                });
            }
            Err(e) => {
                warn!("Model artifact source {} failed: {}", source, e);
                attempts.push(format!("{source}: {e}"));
            }
        }
    }

    Err(ArtifactError::AllSourcesFailed { attempts })
}
