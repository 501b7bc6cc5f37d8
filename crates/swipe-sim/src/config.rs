use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use swipe_core::engine::machine::EngineTuning;
use swipe_core::model::candidate::Candidate;
use thiserror::Error;
use tracing::Level;

const DEFAULT_TICK_MS: f32 = 16.0;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root replay configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimConfig {
    pub run_id: String,
    pub feed: FeedConfig,
    pub gestures: GestureConfig,
    #[serde(default)]
    pub tuning: EngineTuning,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: SimConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.feed.validate()?;
        self.gestures.validate()?;
        validate_tuning(&self.tuning)?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        Ok(())
    }

    /// Point the random gesture source at a different seed. Returns `false`
    /// when the config has no random block, leaving it untouched.
    pub fn override_random_seed(&mut self, seed: u64) -> bool {
        match self.gestures.random.as_mut() {
            Some(random) => {
                random.seed = seed;
                true
            }
            None => false,
        }
    }

    /// Replace the random gesture count. Returns `false` when the config has
    /// no random block, leaving it untouched.
    pub fn override_random_count(&mut self, count: usize) -> bool {
        match self.gestures.random.as_mut() {
            Some(random) => {
                random.count = count;
                true
            }
            None => false,
        }
    }

    /// Resolve output templates (`{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

/// Candidate feed block: an inline candidate list, a seeded generator, or
/// both (inline candidates come first).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FeedConfig {
    #[serde(default)]
    pub initial_score: u32,
    #[serde(default)]
    pub candidates: Vec<CandidateConfig>,
    #[serde(default)]
    pub generated: Option<GeneratedFeedConfig>,
}

impl FeedConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(generated) = &self.generated {
            if generated.count == 0 {
                return Err(ValidationError::InvalidField {
                    field: "feed.generated.count".to_string(),
                    message: "generated candidate count must be at least 1".to_string(),
                });
            }
        }

        if self.candidates.is_empty() && self.generated.is_none() {
            return Err(ValidationError::InvalidField {
                field: "feed".to_string(),
                message: "feed must list candidates or define a generated block".to_string(),
            });
        }

        Ok(())
    }

    pub fn to_candidates(&self) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = self
            .candidates
            .iter()
            .map(|c| Candidate::new(c.id.clone(), c.payload.clone(), c.weight))
            .collect();

        if let Some(generated) = &self.generated {
            candidates.extend(generated.to_candidates());
        }

        candidates
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CandidateConfig {
    pub id: String,
    pub payload: String,
    pub weight: u32,
}

/// Seeded candidate generator for larger replay feeds.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GeneratedFeedConfig {
    pub count: usize,
    pub seed: u64,
}

impl GeneratedFeedConfig {
    /// Produce `count` reproducible candidates with weights in 10..=100.
    fn to_candidates(&self) -> Vec<Candidate> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..self.count)
            .map(|index| {
                let weight = rng.gen_range(10..=100);
                Candidate::new(
                    format!("gen-{index:03}"),
                    format!("Generated item {index}"),
                    weight,
                )
            })
            .collect()
    }
}

/// Gesture source block: scripted traces, seeded random traces, or both.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GestureConfig {
    #[serde(default)]
    pub scripted: Vec<TraceConfig>,
    #[serde(default)]
    pub random: Option<RandomGestureConfig>,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: f32,
}

impl GestureConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if !(self.tick_ms > 0.0) {
            return Err(ValidationError::InvalidField {
                field: "gestures.tick_ms".to_string(),
                message: "tick interval must be greater than zero".to_string(),
            });
        }

        if let Some(random) = &self.random {
            if random.count == 0 {
                return Err(ValidationError::InvalidField {
                    field: "gestures.random.count".to_string(),
                    message: "random gesture count must be at least 1".to_string(),
                });
            }
        }

        if self.scripted.is_empty() && self.random.is_none() {
            return Err(ValidationError::InvalidField {
                field: "gestures".to_string(),
                message: "at least one scripted or random gesture is required".to_string(),
            });
        }

        Ok(())
    }
}

/// One scripted trace: cumulative `[dx, dy]` samples, released after the
/// last sample.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TraceConfig {
    pub samples: Vec<[f32; 2]>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RandomGestureConfig {
    pub count: usize,
    pub seed: u64,
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Concrete output paths after template resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

/// Logging defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default)]
    pub tick_details: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            tick_details: false,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn default_tick_ms() -> f32 {
    DEFAULT_TICK_MS
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run identifier must not be empty".to_string(),
        });
    }

    if let Some(bad) = run_id.chars().find(|c| !RUN_ID_ALLOWED.contains(*c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: format!("character '{bad}' is not allowed in run identifiers"),
        });
    }

    Ok(())
}

fn validate_tuning(tuning: &EngineTuning) -> Result<(), ValidationError> {
    if !(tuning.threshold > 0.0) {
        return Err(ValidationError::InvalidField {
            field: "tuning.threshold".to_string(),
            message: "decision threshold must be greater than zero".to_string(),
        });
    }

    if !(tuning.screen_width > tuning.threshold) {
        return Err(ValidationError::InvalidField {
            field: "tuning.screen_width".to_string(),
            message: "screen width must exceed the decision threshold".to_string(),
        });
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration at {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
