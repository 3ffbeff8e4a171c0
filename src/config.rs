use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;
use tracing::debug;

use crate::errors::BenchError;
use crate::types::{Invocation, OutputFormat, TimeUnit};

pub const DEFAULT_INPUT: &str = "test.txt";
pub const DEFAULT_RUNS: usize = 10;
pub const LOCAL_CONFIG_FILE: &str = "compbench.toml";

/// Immutable settings for a single benchmark session.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input: PathBuf,
    pub runs: usize,
    pub binary: PathBuf,
    /// Arguments placed before the input path, e.g. `compress`.
    pub args: Vec<String>,
    pub unit: TimeUnit,
    /// Full argv of the build step; the first element is the program.
    pub build: Vec<String>,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            runs: DEFAULT_RUNS,
            binary: default_binary(),
            args: vec!["compress".to_string()],
            unit: TimeUnit::Seconds,
            build: vec![
                "cargo".to_string(),
                "build".to_string(),
                "--release".to_string(),
            ],
            format: OutputFormat::Text,
        }
    }
}

fn default_binary() -> PathBuf {
    Path::new("target")
        .join("release")
        .join(format!("cs581-project{}", std::env::consts::EXE_SUFFIX))
}

/// On-disk shape of `compbench.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub input: Option<PathBuf>,
    pub runs: Option<usize>,
    pub binary: Option<PathBuf>,
    pub args: Option<Vec<String>>,
    pub unit: Option<TimeUnit>,
    pub build: Option<Vec<String>>,
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub runs: Option<usize>,
    pub binary: Option<PathBuf>,
    pub unit: Option<TimeUnit>,
    pub json: bool,
}

impl Config {
    /// Layer defaults, then the file, then command-line overrides.
    pub fn merge(file: FileConfig, overrides: Overrides) -> Self {
        let mut config = Config::default();

        if let Some(input) = file.input {
            config.input = input;
        }
        if let Some(runs) = file.runs {
            config.runs = runs;
        }
        if let Some(binary) = file.binary {
            config.binary = binary;
        }
        if let Some(args) = file.args {
            config.args = args;
        }
        if let Some(unit) = file.unit {
            config.unit = unit;
        }
        if let Some(build) = file.build {
            config.build = build;
        }

        if let Some(input) = overrides.input {
            config.input = input;
        }
        if let Some(runs) = overrides.runs {
            config.runs = runs;
        }
        if let Some(binary) = overrides.binary {
            config.binary = binary;
        }
        if let Some(unit) = overrides.unit {
            config.unit = unit;
        }
        if overrides.json {
            config.format = OutputFormat::Json;
        }

        config
    }

    /// Checks that need no filesystem access.
    pub fn validate(&self) -> Result<()> {
        if self.runs < 1 {
            return Err(BenchError::InvalidRunCount { runs: self.runs }.into());
        }
        if self.binary.as_os_str().is_empty() {
            return Err(BenchError::EmptyBinaryPath.into());
        }
        if self.build.first().is_none_or(|program| program.is_empty()) {
            return Err(BenchError::EmptyBuildCommand.into());
        }
        Ok(())
    }

    /// Fails early when the input file is missing instead of letting the
    /// first run fail.
    pub fn check_input(&self) -> Result<()> {
        if !self.input.is_file() {
            return Err(BenchError::SubjectFileNotFound {
                path: self.input.clone(),
            }
            .into());
        }
        Ok(())
    }

    pub fn build_invocation(&self) -> Invocation {
        let (program, args) = match self.build.split_first() {
            Some((program, args)) => (program.as_str(), args.to_vec()),
            None => ("", Vec::new()),
        };
        Invocation::new(program, args)
    }

    pub fn subject_invocation(&self) -> Invocation {
        let mut args = self.args.clone();
        args.push(self.input.to_string_lossy().into_owned());
        Invocation::new(self.binary.clone(), args)
    }
}

/// Parse a config file's contents. `path` is only used for error messages.
pub fn parse_file_config(contents: &str, path: &Path) -> Result<FileConfig> {
    toml::from_str(contents).map_err(|e| {
        BenchError::ConfigParse {
            path: path.to_path_buf(),
            detail: e.message().to_string(),
        }
        .into()
    })
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let contents = std::fs::read_to_string(path).map_err(|source| BenchError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_file_config(&contents, path)
}

/// Locate the config file: an explicit path must exist; otherwise the
/// working directory is tried before the user config directory.
pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("compbench").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Build the final configuration from an optional file and CLI overrides.
pub fn load(explicit: Option<&Path>, overrides: Overrides) -> Result<Config> {
    let file = match find_config_file(explicit) {
        Some(path) => {
            debug!(path = %path.display(), "loading config file");
            read_file_config(&path)?
        }
        None => {
            debug!("no config file found, using defaults");
            FileConfig::default()
        }
    };

    let config = Config::merge(file, overrides);
    config.validate()?;
    Ok(config)
}
