use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use super::{ConfigSerializer, ContentProvider, FileContentProvider, Validate, YamlConfigSerializer};

pub const CONFIG_KEY: &str = "config";

pub struct ConfigManager<TContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TContentProvider: ContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    content_provider: TContentProvider,
    key: String,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    /// Reads `<dir>/config.yaml`.
    pub fn from_yaml_dir(dir: &str) -> Self {
        Self::new(FileContentProvider::new(dir), YamlConfigSerializer)
    }
}

impl<TContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TContentProvider, TConfig, TConfigSerializer>
where
    TContentProvider: ContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(content_provider: TContentProvider, config_serializer: TConfigSerializer) -> Self {
        Self {
            config_serializer,
            content_provider,
            key: CONFIG_KEY.to_string(),
            config: Arc::new(Mutex::new(None)),
        }
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self.config.lock().map_err(|_| "Config lock poisoned".to_string())?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        if let Some(config_data) = self.content_provider.read(&self.key)? {
            let config = self.config_serializer.deserialize(&config_data)?;

            config
                .validate()
                .map_err(|e| format!("Config validation error: {}", e))?;

            *current = Some(config.clone());
            return Ok(config);
        }

        Ok(TConfig::default())
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.content_provider.write(&self.key, &serialized_config)?;

        let mut current = self.config.lock().map_err(|_| "Config lock poisoned".to_string())?;
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryContentProvider;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct TestConfig {
        delay_ms: u64,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self { delay_ms: 800 }
        }
    }

    impl Validate for TestConfig {
        fn validate(&self) -> Result<(), String> {
            if self.delay_ms > 10_000 {
                return Err("delay_ms must not exceed 10000".to_string());
            }
            Ok(())
        }
    }

    fn manager(provider: &MemoryContentProvider) -> ConfigManager<MemoryContentProvider, TestConfig> {
        ConfigManager::new(provider.clone(), YamlConfigSerializer)
    }

    #[test]
    fn test_missing_record_yields_default() {
        let provider = MemoryContentProvider::new();
        assert_eq!(manager(&provider).get_config(), Ok(TestConfig::default()));
    }

    #[test]
    fn test_set_then_get_from_fresh_manager() {
        let provider = MemoryContentProvider::new();
        manager(&provider).set_config(&TestConfig { delay_ms: 50 }).unwrap();
        assert_eq!(manager(&provider).get_config(), Ok(TestConfig { delay_ms: 50 }));
    }

    #[test]
    fn test_invalid_record_is_rejected() {
        let provider = MemoryContentProvider::new();
        provider.write(CONFIG_KEY, "delay_ms: 99999").unwrap();
        let err = manager(&provider).get_config().unwrap_err();
        assert!(err.starts_with("Config validation error"));
    }

    #[test]
    fn test_set_rejects_invalid_config() {
        let provider = MemoryContentProvider::new();
        assert!(manager(&provider).set_config(&TestConfig { delay_ms: 20_000 }).is_err());
        assert_eq!(provider.read(CONFIG_KEY), Ok(None));
    }
}
