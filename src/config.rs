use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Channel kept when not merging
    pub target_channel: u8,
    /// Disables channel filtering
    pub merge: bool,
    /// Later tracks win simultaneous events, mostly useful with `merge`
    pub reverse: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            target_channel: 0,
            merge: false,
            reverse: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderOptions {
    /// Multiplies every duration, values above 1.0 slow playback down
    pub speed: f64,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

impl EncoderOptions {
    pub fn validate(&self) -> Result<(), Error> {
        if self.speed.is_finite() && self.speed > 0.0 {
            Ok(())
        } else {
            Err(Error::InvalidSpeed(self.speed))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub convert: ConvertOptions,
    pub encoder: EncoderOptions,
}

impl Settings {
    pub fn from_ron(source: &str) -> Result<Self, Error> {
        let settings: Settings = ron::from_str(source)?;
        settings.encoder.validate()?;
        Ok(settings)
    }

    pub fn to_ron(&self) -> Result<String, Error> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let source = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&source)
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        fs::write(path, self.to_ron()?).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings = Settings::from_ron("(convert: (merge: true))").unwrap();
        assert!(settings.convert.merge);
        assert!(!settings.convert.reverse);
        assert_eq!(settings.convert.target_channel, 0);
        assert_eq!(settings.encoder.speed, 1.0);
    }

    #[test]
    fn full_settings_parse() {
        let source = r#"
            (
                convert: (target_channel: 9, merge: true, reverse: true),
                encoder: (speed: 0.8),
            )
        "#;

        let settings = Settings::from_ron(source).unwrap();
        assert_eq!(
            settings.convert,
            ConvertOptions {
                target_channel: 9,
                merge: true,
                reverse: true,
            }
        );
        assert_eq!(settings.encoder.speed, 0.8);
    }

    #[test]
    fn rejects_bad_speed() {
        let err = Settings::from_ron("(encoder: (speed: 0.0))").err().unwrap();
        assert!(matches!(err, Error::InvalidSpeed(_)));

        let err = Settings::from_ron("(encoder: (speed: -2.0))").err().unwrap();
        assert!(matches!(err, Error::InvalidSpeed(_)));
    }

    #[test]
    fn rejects_malformed_ron() {
        let err = Settings::from_ron("(convert: (merge: maybe))").err().unwrap();
        assert!(matches!(err, Error::Settings(_)));
    }

    #[test]
    fn survives_a_ron_round_trip() {
        let settings = Settings {
            convert: ConvertOptions {
                target_channel: 3,
                merge: true,
                reverse: false,
            },
            encoder: EncoderOptions { speed: 1.5 },
        };

        let text = settings.to_ron().unwrap();
        assert_eq!(Settings::from_ron(&text).unwrap(), settings);
    }
}
