//! Run configuration: an optional YAML run file overlaid by command-line flags.

use outbreak_core::{Difficulty, ParseDifficultyError, SimConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing run file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Difficulty(#[from] ParseDifficultyError),
    #[error("flag {0} needs a value")]
    MissingValue(String),
    #[error("bad value for {flag}: {value}")]
    BadValue { flag: String, value: String },
    #[error("unknown flag {0}")]
    UnknownFlag(String),
}

/// One scheduled purchase: buy `item` once the simulation reaches `day`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub day: u32,
    pub item: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub difficulty: Difficulty,
    pub country: String,
    pub pathogen: String,
    pub days: u32,
    pub seed: u64,
    pub speed: u8,
    /// Sleep between ticks as the interactive game would.
    pub realtime: bool,
    /// Print the final snapshot as JSON on stdout.
    pub dump_json: bool,
    pub purchases: Vec<Purchase>,
}

impl Default for RunConfig {
    fn default() -> Self {
        let sim = SimConfig::default();
        Self {
            difficulty: Difficulty::default(),
            country: "usa".to_string(),
            pathogen: String::new(),
            days: 365,
            seed: sim.rng_seed,
            speed: sim.game_speed,
            realtime: false,
            dump_json: false,
            purchases: Vec::new(),
        }
    }
}

impl RunConfig {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            rng_seed: self.seed,
            game_speed: self.speed,
        }
    }

    /// Build from `args` (program name excluded). `--config` is read first so
    /// every other flag overrides the file regardless of order.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        let mut cfg = match args.iter().position(|a| a == "--config") {
            Some(i) => {
                let path = PathBuf::from(value_at(&args, i)?);
                let text = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Io { path, source })?;
                Self::from_yaml(&text)?
            }
            None => Self::default(),
        };

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--realtime" => cfg.realtime = true,
                "--dump-json" => cfg.dump_json = true,
                "--config" => i += 1,
                "--difficulty" => {
                    cfg.difficulty = value_at(&args, i)?.parse()?;
                    i += 1;
                }
                "--country" => {
                    cfg.country = value_at(&args, i)?.to_string();
                    i += 1;
                }
                "--name" => {
                    cfg.pathogen = value_at(&args, i)?.to_string();
                    i += 1;
                }
                "--days" => {
                    cfg.days = parse_at(&args, i)?;
                    i += 1;
                }
                "--seed" => {
                    cfg.seed = parse_at(&args, i)?;
                    i += 1;
                }
                "--speed" => {
                    cfg.speed = parse_at(&args, i)?;
                    i += 1;
                }
                "--buy" => {
                    // day:item
                    let raw = value_at(&args, i)?;
                    let bad = || ConfigError::BadValue {
                        flag: flag.to_string(),
                        value: raw.to_string(),
                    };
                    let (day, item) = raw.split_once(':').ok_or_else(bad)?;
                    cfg.purchases.push(Purchase {
                        day: day.parse().map_err(|_| bad())?,
                        item: item.to_string(),
                    });
                    i += 1;
                }
                other => return Err(ConfigError::UnknownFlag(other.to_string())),
            }
            i += 1;
        }
        Ok(cfg)
    }
}

fn value_at(args: &[String], i: usize) -> Result<&str, ConfigError> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| ConfigError::MissingValue(args[i].clone()))
}

fn parse_at<T: std::str::FromStr>(args: &[String], i: usize) -> Result<T, ConfigError> {
    let raw = value_at(args, i)?;
    raw.parse().map_err(|_| ConfigError::BadValue {
        flag: args[i].clone(),
        value: raw.to_string(),
    })
}
