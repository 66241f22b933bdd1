use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub session: SessionTimings,
    pub model: ModelConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Countdown ceilings for the two capture phases
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SessionTimings {
    pub presentation_secs: u64,
    pub answer_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    /// Model name passed to the generative collaborator
    pub name: String,

    /// Per-request timeout for grading/question round-trips
    pub timeout_secs: u64,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
