use crate::config::ConfigError;
use crate::scheduler::SchedulerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VolumeBindError {
    #[error("Error: {0}")]
    Anyhow(#[from] anyhow::Error),
    #[error("Error: {0}")]
    IO(#[from] std::io::Error),
    #[error("Error: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),
    #[error("Error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("Error: {0}")]
    Config(#[from] ConfigError),
    #[error("Error: {0}")]
    Scheduler(#[from] SchedulerError),
}
