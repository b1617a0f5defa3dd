use std::sync::{Mutex, MutexGuard};

use super::{
    ConfigContentProvider, ConfigSerializer, EngineConfig, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Engine config backed by a content provider. The first successful load is
/// cached; a source with nothing stored yields `EngineConfig::default()`
/// without caching, so a later write is picked up.
pub struct ConfigManager<TProvider = FileContentConfigProvider, TSerializer = YamlConfigSerializer>
where
    TProvider: ConfigContentProvider,
    TSerializer: ConfigSerializer<EngineConfig>,
{
    provider: TProvider,
    serializer: TSerializer,
    cached: Mutex<Option<EngineConfig>>,
}

impl ConfigManager<FileContentConfigProvider, YamlConfigSerializer> {
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(FileContentConfigProvider::new(file_path), YamlConfigSerializer::new())
    }
}

impl<TProvider, TSerializer> ConfigManager<TProvider, TSerializer>
where
    TProvider: ConfigContentProvider,
    TSerializer: ConfigSerializer<EngineConfig>,
{
    pub fn new(provider: TProvider, serializer: TSerializer) -> Self {
        Self {
            provider,
            serializer,
            cached: Mutex::new(None),
        }
    }

    pub fn get_config(&self) -> Result<EngineConfig, String> {
        let mut cached = self.lock_cache()?;
        if let Some(config) = cached.as_ref() {
            return Ok(config.clone());
        }

        let Some(content) = self.provider.get_config_content()? else {
            return Ok(EngineConfig::default());
        };
        let config = self.serializer.deserialize(&content)?;
        check(&config)?;

        *cached = Some(config.clone());
        Ok(config)
    }

    /// Validates, writes through to the provider, then replaces the cache.
    pub fn set_config(&self, config: &EngineConfig) -> Result<(), String> {
        check(config)?;
        let content = self.serializer.serialize(config)?;
        self.provider.set_config_content(&content)?;

        *self.lock_cache()? = Some(config.clone());
        Ok(())
    }

    fn lock_cache(&self) -> Result<MutexGuard<'_, Option<EngineConfig>>, String> {
        self.cached
            .lock()
            .map_err(|_| "engine config cache is poisoned".to_string())
    }
}

fn check(config: &EngineConfig) -> Result<(), String> {
    config
        .validate()
        .map_err(|e| format!("Invalid engine config: {}", e))
}
