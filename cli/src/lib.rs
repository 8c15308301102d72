use std::fs;
use std::path::{Path, PathBuf};

use morphotree::{Connectivity, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SATURATION: f32 = 0.8;
pub const DEFAULT_VALUE: f32 = 0.9;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Missing '{0}' field, set it in the config file or on the command line")]
    MissingField(&'static str),
    #[error("Invalid point '{0}', expected X,Y")]
    InvalidPoint(String),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// Settings of the `paint` command.
///
/// Every selected point picks the smallest node containing it; each node gets
/// its own hue in the two output images.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaintConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Nodes with an area at or below this are filtered out first
    pub area: Option<u32>,
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default = "default_tree_connectivity")]
    pub tree: Connectivity,
    #[serde(default = "default_contour_connectivity")]
    pub contour: Connectivity,
    #[serde(default = "default_saturation")]
    pub saturation: f32,
    #[serde(default = "default_value")]
    pub value: f32,
    /// Also write the first node's contour in red over the unfiltered input
    #[serde(default)]
    pub highlight: bool,
}

fn default_tree_connectivity() -> Connectivity {
    Connectivity::Eight
}

fn default_contour_connectivity() -> Connectivity {
    Connectivity::Four
}

fn default_saturation() -> f32 {
    DEFAULT_SATURATION
}

fn default_value() -> f32 {
    DEFAULT_VALUE
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            area: None,
            points: Vec::new(),
            tree: default_tree_connectivity(),
            contour: default_contour_connectivity(),
            saturation: DEFAULT_SATURATION,
            value: DEFAULT_VALUE,
            highlight: false,
        }
    }
}

impl PaintConfig {
    /// Load PaintConfig from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(content)?)
    }

    /// Load PaintConfig from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(CliError::UnsupportedFileFormat),
        }
    }

    pub fn to_toml(&self) -> Result<String, CliError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    pub fn to_json(&self) -> Result<String, CliError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    pub fn input(&self) -> Result<&Path, CliError> {
        self.input.as_deref().ok_or(CliError::MissingField("input"))
    }

    pub fn output(&self) -> Result<&Path, CliError> {
        self.output.as_deref().ok_or(CliError::MissingField("output"))
    }
}

/// Parses `X,Y` into a point.
pub fn parse_point(s: &str) -> Result<Point, CliError> {
    let invalid = || CliError::InvalidPoint(s.to_string());
    let (x, y) = s.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse().map_err(|_| invalid())?;
    let y = y.trim().parse().map_err(|_| invalid())?;
    Ok(Point::new(x, y))
}
