//! Configuration loading.

use config::{Config, File};
use serde::{Deserialize, Serialize};

use fabula_error::{ConfigError, FabulaResult};
use fabula_models::{DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL};

/// Backend model selection.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModelsConfig {
    /// Model for narrative (structured text) generation
    #[serde(default = "default_text_model")]
    pub text: String,
    /// Model for illustration generation
    #[serde(default = "default_image_model")]
    pub image: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            text: default_text_model(),
            image: default_image_model(),
        }
    }
}

fn default_text_model() -> String {
    DEFAULT_TEXT_MODEL.to_string()
}

fn default_image_model() -> String {
    DEFAULT_IMAGE_MODEL.to_string()
}

/// Narration engine selection.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SpeechConfig {
    /// Speaker program invoked once per utterance
    #[serde(default = "default_speech_program")]
    pub program: String,
    /// Fixed arguments placed before the utterance text
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            program: default_speech_program(),
            args: Vec::new(),
        }
    }
}

fn default_speech_program() -> String {
    "espeak-ng".to_string()
}

/// Video export parameters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VideoConfig {
    /// Canvas width in pixels
    #[serde(default = "default_width")]
    pub width: u32,
    /// Canvas height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
    /// Output frame rate
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Caption font size in pixels
    #[serde(default = "default_font_size")]
    pub font_size: u32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            font_size: default_font_size(),
        }
    }
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

fn default_fps() -> u32 {
    30
}

fn default_font_size() -> u32 {
    28
}

/// Application configuration.
///
/// # Example
///
/// ```no_run
/// use fabula::FabulaConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FabulaConfig::load()?;
/// println!("text model: {}", config.models.text);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct FabulaConfig {
    /// Backend model selection
    #[serde(default)]
    pub models: ModelsConfig,
    /// Narration engine selection
    #[serde(default)]
    pub speech: SpeechConfig,
    /// Video export parameters
    #[serde(default)]
    pub video: VideoConfig,
}

impl FabulaConfig {
    /// Load configuration with precedence: current dir > home config dir
    /// > built-in defaults.
    ///
    /// Both `~/.config/fabula/fabula.toml` and `./fabula.toml` are
    /// optional and silently skipped if absent.
    pub fn load() -> FabulaResult<Self> {
        let mut builder = Config::builder();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/fabula/fabula.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("fabula").required(false));

        builder
            .build()
            .map_err(|e| {
                ConfigError::new(format!("Failed to build configuration: {}", e)).into()
            })
            .and_then(|config| {
                config.try_deserialize().map_err(|e| {
                    ConfigError::new(format!("Failed to parse configuration: {}", e)).into()
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_every_section() {
        let config = FabulaConfig::default();
        assert_eq!(config.models.text, DEFAULT_TEXT_MODEL);
        assert_eq!(config.models.image, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.speech.program, "espeak-ng");
        assert_eq!(config.video.width, 1280);
        assert_eq!(config.video.fps, 30);
    }

    #[test]
    fn partial_toml_keeps_defaults_for_the_rest() {
        let config: FabulaConfig = Config::builder()
            .add_source(config::File::from_str(
                "[speech]\nprogram = \"say\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.speech.program, "say");
        assert_eq!(config.models.text, DEFAULT_TEXT_MODEL);
        assert_eq!(config.video.height, 720);
    }
}
