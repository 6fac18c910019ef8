use crate::level::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;

/// Caller-side switches for schedule generation.
///
/// The builders always compute every technique list; `include_advisory` and
/// `include_failures` gate what the exporters and statistics show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOptions {
    #[serde(default)]
    pub levels: LevelFilter,
    #[serde(default = "default_true")]
    pub include_advisory: bool,
    #[serde(default = "default_true")]
    pub include_failures: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            levels: LevelFilter::default(),
            include_advisory: true,
            include_failures: true,
        }
    }
}

impl ScheduleOptions {
    pub fn with_levels(levels: LevelFilter) -> Self {
        Self {
            levels,
            ..Self::default()
        }
    }

    pub fn load_from_json<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        serde_json::from_reader(file).map_err(io::Error::from)
    }

    pub fn save_to_json<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self).map_err(io::Error::from)
    }
}
