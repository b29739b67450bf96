//! Training pipeline for step-driven agents

pub mod observers;
pub mod training;

pub use observers::{MetricsObserver, ProgressObserver};
pub use training::{EpisodeSummary, TrainingConfig, TrainingPipeline, TrainingResult};
