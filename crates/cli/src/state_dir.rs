//! Where the CLI keeps credentials, configuration and logs

use std::path::PathBuf;

pub const STATE_DIR_ENV: &str = "EVCHARGE_STATE_DIR";

const CREDENTIALS_FILE: &str = "credentials.json";
const CONFIG_FILE: &str = "config.toml";

/// Resolve the state directory: explicit flag, then `EVCHARGE_STATE_DIR`,
/// then the platform data directory
pub fn resolve(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        if let Ok(dir) = std::env::var(STATE_DIR_ENV) {
            PathBuf::from(dir)
        } else {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("evcharge")
        }
    })
}

pub fn credentials_path(state_dir: &std::path::Path) -> PathBuf {
    state_dir.join(CREDENTIALS_FILE)
}

pub fn config_path(state_dir: &std::path::Path) -> PathBuf {
    state_dir.join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir_wins() {
        let dir = resolve(Some(PathBuf::from("/tmp/evcharge-test")));
        assert_eq!(dir, PathBuf::from("/tmp/evcharge-test"));
        assert_eq!(
            credentials_path(&dir),
            PathBuf::from("/tmp/evcharge-test/credentials.json")
        );
    }
}
