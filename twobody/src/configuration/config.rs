//! Configuration types for a two-body run.
//!
//! The physical constants (`G`, `dt`, `t_max`) are compile-time constants
//! in [`crate::simulation::params`] and are deliberately absent here. What can
//! be configured is:
//!
//! - [`EngineConfig`] – how the integrator treats coincident bodies
//! - [`ViewerConfig`] – screen mapping, window and label settings for the live viewer
//! - [`RunConfig`]    – top-level wrapper loaded from YAML
//! - [`Mode`]         – batch (file) or interactive (window), chosen on the command line
//!
//! # YAML format
//! Every field is optional; missing fields take the defaults shown here:
//!
//! ```yaml
//! engine:
//!   singularity: "propagate"   # or "reject"
//!
//! viewer:
//!   scale: 10000.0             # simulation units -> pixels
//!   offset: [ -100.0, 200.0 ]  # pixels, screen origin top-left, y down
//!   width: 1200.0
//!   height: 800.0
//!   marker_radius: 5.0
//!   font: "fonts/FiraMono-Medium.ttf"   # optional, bevy asset path
//!   font_size: 20.0
//! ```

use serde::Deserialize;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// What the integrator does when the two bodies coincide
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SingularityPolicy {
    #[serde(rename = "propagate")] // no guard, accelerations go to NaN/inf and flow through the state
    #[default]
    Propagate,

    #[serde(rename = "reject")] // step fails with `Error::SingularSeparation`, state left untouched
    Reject,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub singularity: SingularityPolicy,
}

/// Live viewer settings
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub scale: f32, // pixels per simulation length unit
    pub offset: [f32; 2], // pixel offset added after scaling
    pub width: f32, // window width in pixels
    pub height: f32, // window height in pixels
    pub marker_radius: f32, // body marker radius in pixels
    pub font: Option<String>, // label font asset, bevy's built-in font when absent
    pub font_size: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            scale: 10000.0,
            offset: [-100.0, 200.0],
            width: 1200.0,
            height: 800.0,
            marker_radius: 5.0,
            font: None,
            font_size: 20.0,
        }
    }
}

/// Top-level run configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub engine: EngineConfig,
    pub viewer: ViewerConfig,
}

impl RunConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Load from a YAML file, see [`resolve_config_path`] for lookup rules
    pub fn load(name: &Path) -> Result<Self> {
        let path = resolve_config_path(name);
        let file = File::open(&path)?;
        Self::from_reader(BufReader::new(file))
    }
}

/// An existing path is used as is; anything else is looked up in the crate's `scenarios/` directory.
pub fn resolve_config_path(name: &Path) -> PathBuf {
    if name.exists() {
        return name.to_path_buf();
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(name)
}

/// Output strategy for a run
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Batch { output: PathBuf }, // write `t,x1,y1,x2,y2` lines to `output`
    Interactive, // open a window and render live
}

impl Mode {
    pub fn from_output(output: Option<PathBuf>) -> Self {
        match output {
            Some(output) => Mode::Batch { output },
            None => Mode::Interactive,
        }
    }
}
