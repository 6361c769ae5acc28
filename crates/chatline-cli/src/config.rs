use chatline_core::config::Config;
use chatline_core::error::Result;
use std::path::Path;

const DEFAULT_CANDIDATES: [&str; 4] = [
    "chatline.toml",
    "chatline.yaml",
    "chatline.yml",
    "chatline.json",
];

/// Load the host config from an explicit path, a file in the working
/// directory, or fall back to the process environment alone.
pub fn load(explicit: Option<&str>) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::from_file(path);
    }

    for candidate in DEFAULT_CANDIDATES {
        if Path::new(candidate).exists() {
            tracing::debug!(path = candidate, "Loading config");
            return Config::from_file(candidate);
        }
    }

    Ok(Config::new())
}
