//! Visual parameters fed to the fragment shader as `uHue`, `uSpeed`,
//! `uIntensity` and `uSize`.

use crate::error::ParamError;

pub const DEFAULT_HUE: f32 = 220.0;
pub const DEFAULT_SPEED: f32 = 1.0;
pub const DEFAULT_INTENSITY: f32 = 1.0;
pub const DEFAULT_SIZE: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightningParams {
    /// Hue in degrees.
    pub hue: f32,
    pub speed: f32,
    pub intensity: f32,
    pub size: f32,
}

impl Default for LightningParams {
    fn default() -> Self {
        Self {
            hue: DEFAULT_HUE,
            speed: DEFAULT_SPEED,
            intensity: DEFAULT_INTENSITY,
            size: DEFAULT_SIZE,
        }
    }
}

impl LightningParams {
    /// Applies `key=value` overrides on top of `self`.
    ///
    /// Unknown keys are ignored. A rejected value leaves its field untouched
    /// and is returned in the error list so the caller can report it.
    pub fn with_overrides<I, K, V>(mut self, pairs: I) -> (Self, Vec<ParamError>)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut errors = Vec::new();
        for (key, value) in pairs {
            if let Err(err) = self.apply(key.as_ref(), value.as_ref()) {
                errors.push(err);
            }
        }
        (self, errors)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ParamError> {
        match key {
            "hue" => self.hue = parse("hue", value, false)?,
            "speed" => self.speed = parse("speed", value, true)?,
            "intensity" => self.intensity = parse("intensity", value, true)?,
            "size" => self.size = parse("size", value, true)?,
            _ => {}
        }
        Ok(())
    }
}

fn parse(key: &'static str, raw: &str, non_negative: bool) -> Result<f32, ParamError> {
    let value: f32 = raw.trim().parse().map_err(|_| ParamError::NotANumber {
        key,
        value: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ParamError::NotFinite { key, value });
    }
    if non_negative && value < 0.0 {
        return Err(ParamError::Negative { key, value });
    }
    Ok(value)
}
