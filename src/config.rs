use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineSettings,
    pub recognition: RecognitionSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Sync clock period in milliseconds
    pub sync_tick_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RecognitionSettings {
    /// Recognition model name (e.g. "small")
    pub model: String,
    /// Spoken language of the audio
    pub language: String,
    /// Target language for per-segment translation
    pub translate_to: String,
    /// Request per-word timing from the model
    pub word_timestamps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineSettings::default(),
            recognition: RecognitionSettings::default(),
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self { sync_tick_ms: 100 }
    }
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            model: "small".to_string(),
            language: "ja".to_string(),
            translate_to: "vi".to_string(),
            word_timestamps: true,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
