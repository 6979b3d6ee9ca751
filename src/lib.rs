//! Agronomic decision engine and prediction service.
//!
//! Turns field readings plus a crop classifier's probabilities into a crop
//! choice, an irrigation plan, a fertilizer plan and environmental
//! warnings. Module layout follows the Explicit Module Boundary Pattern
//! (EMBP): each module exposes a narrow surface and the crate root
//! re-exports what callers need.
//!
//! - `engine` – the pure decision pipeline ([`evaluate`])
//! - `classifier` – scaler / model / label collaborators and artifact loading
//! - `recommender` – reading → features → classifier → [`evaluate`]
//! - `routes` – axum router (`/predict`, `/health`)
//! - `config` – environment configuration

pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod recommender;
pub mod routes;

pub use config::Config;
pub use engine::{evaluate, ClassifierOutput, EnvironmentalReading, RecommendationResult, SoilType};
pub use error::{ArtifactError, EngineError};
pub use models::RawPredictRequest;
pub use recommender::Recommender;
