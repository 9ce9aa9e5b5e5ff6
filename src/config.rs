use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub workers: Option<usize>,
    pub stack_size: Option<usize>,
    pub thread_name_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: None,
            stack_size: Some(2 * 1024 * 1024),
            thread_name_prefix: "millrace-worker".to_string(),
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(n) = self.workers {
            if n == 0 {
                return Err(Error::config("workers must be > 0"));
            }
            if n > 1024 {
                return Err(Error::config("workers too large (max 1024)"));
            }
        }

        if self.thread_name_prefix.is_empty() {
            return Err(Error::config("thread_name_prefix must not be empty"));
        }

        Ok(())
    }

    pub fn worker_threads(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn workers(mut self, n: usize) -> Self {
        self.config.workers = Some(n);
        self
    }

    pub fn stack_size(mut self, size: usize) -> Self {
        self.config.stack_size = Some(size);
        self
    }

    pub fn thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.config.thread_name_prefix = prefix.into();
        self
    }

    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
        assert!(Config::default().worker_threads() >= 1);
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = Config::builder()
            .workers(4)
            .stack_size(1024 * 1024)
            .thread_name_prefix("drain")
            .build()
            .unwrap();
        assert_eq!(config.workers, Some(4));
        assert_eq!(config.stack_size, Some(1024 * 1024));
        assert_eq!(config.thread_name_prefix, "drain");
        assert_eq!(config.worker_threads(), 4);
    }

    #[test]
    fn test_rejects_zero_workers() {
        assert!(Config::builder().workers(0).build().is_err());
    }

    #[test]
    fn test_rejects_absurd_worker_count() {
        assert!(Config::builder().workers(4096).build().is_err());
    }
}
