pub mod advisor;
pub mod engine;
pub mod providers;
pub mod strategy;

pub use advisor::{build_prompt, parse_label, RemoteAdvisor};
pub use engine::{PredictionEngine, DAMPING_FACTOR};
pub use strategy::select_strategy;
