//! Service layer: the estimation pipeline and the providers that talk to
//! the optional generative text service.

pub mod ai_client;
pub mod blueprint;
pub mod estimator;
pub mod insights;

pub use ai_client::AiClient;
pub use blueprint::BlueprintProvider;
pub use estimator::EstimationPipeline;
pub use insights::{InsightProvider, ProjectSummary};
