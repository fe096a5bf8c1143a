use crate::error::{Result, SolverError};
use std::{env, path::PathBuf, time::Duration};

const ENV_TIME_BUDGET: &str = "MACHINE_SOLVER_TIME_BUDGET";
const ENV_OUTPUT_DIR: &str = "MACHINE_SOLVER_OUTPUT_DIR";

/// Per-machine solver budget used when the environment does not override it.
/// A practicality default, not a correctness requirement.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct Config {
    pub time_budget: Duration,
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_budget: DEFAULT_TIME_BUDGET,
            output_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(budget) = env::var(ENV_TIME_BUDGET) {
            let budget = budget.trim();
            if !budget.is_empty() {
                let secs: u64 = budget.parse().map_err(|_| {
                    SolverError::InvalidConfiguration(format!(
                        "{ENV_TIME_BUDGET} must be a positive number of seconds, got '{budget}'"
                    ))
                })?;
                if secs == 0 {
                    return Err(SolverError::InvalidConfiguration(format!(
                        "{ENV_TIME_BUDGET} must be at least 1 second"
                    )));
                }
                config.time_budget = Duration::from_secs(secs);
            }
        }

        if let Ok(output_dir) = env::var(ENV_OUTPUT_DIR) {
            if !output_dir.trim().is_empty() {
                let path = PathBuf::from(output_dir);

                // If the path already exists but is not a directory, reject early.
                if path.exists() && !path.is_dir() {
                    return Err(SolverError::InvalidConfiguration(format!(
                        "Output path is not a directory: {}",
                        path.display()
                    )));
                }

                config.output_dir = Some(path);
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, sync::Mutex};
    use tempfile::TempDir;

    // The test runner is multi-threaded and these tests share process-wide
    // environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        unsafe {
            env::remove_var(ENV_TIME_BUDGET);
            env::remove_var(ENV_OUTPUT_DIR);
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.time_budget, Duration::from_secs(30));
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_from_env_default() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        let config = Config::from_env().unwrap();
        assert_eq!(config.time_budget, DEFAULT_TIME_BUDGET);
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_from_env_with_time_budget() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_TIME_BUDGET, "5");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.time_budget, Duration::from_secs(5));

        clear_env();
    }

    #[test]
    fn test_from_env_with_invalid_time_budget() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_TIME_BUDGET, "soon");
        }

        assert!(Config::from_env().is_err());

        unsafe {
            env::set_var(ENV_TIME_BUDGET, "0");
        }

        assert!(Config::from_env().is_err());

        clear_env();
    }

    #[test]
    fn test_from_env_with_valid_output_dir() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        unsafe {
            env::set_var(ENV_OUTPUT_DIR, temp_dir.path());
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.output_dir, Some(temp_dir.path().to_path_buf()));

        clear_env();
    }

    #[test]
    fn test_from_env_with_file_as_output_dir() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("not_a_dir");
        std::fs::write(&file_path, "x").unwrap();
        unsafe {
            env::set_var(ENV_OUTPUT_DIR, &file_path);
        }

        assert!(Config::from_env().is_err());

        clear_env();
    }
}
