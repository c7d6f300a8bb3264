//! This module contains the [`ConversionSettings`] structure, used to customise conversion
//! and emission behaviour that the wire formats themselves leave to the tool.
//!
//! As with `SegySettings` in the crate this one is descended from, direct field manipulation
//! is discouraged since some values constrain others; use the setter and getter functions.
use crate::errors::SonarError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
/// Settings controlling a conversion run: chunk sizing for streamed sample copies, whether
/// unrecognised fields are preserved, and a couple of physical-constant overrides the source
/// recording does not itself carry.
pub struct ConversionSettings {
    /// Bytes copied per read when streaming sample payloads between files.
    pub(crate) chunk_size: usize,
    /// Water temperature in Celsius, used only when a recording requires one and the source
    /// format did not record it.
    pub(crate) temperature_c: f32,
    /// When true, fields with no canonical projection are kept on [`crate::ping::PingRow`]
    /// and written out by the Metadata CSV Emitter as `unknown_<name>` columns.
    pub(crate) export_unknown: bool,
}

impl Default for ConversionSettings {
    /// The default: a 64KiB copy chunk, 10C water temperature, unknown fields dropped.
    fn default() -> Self {
        ConversionSettings {
            chunk_size: 65536,
            temperature_c: 10.0,
            export_unknown: false,
        }
    }
}

impl ConversionSettings {
    #[cfg(feature = "to_json")]
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(&self).map_err(|e| e.to_string())
    }

    /// Sets the streaming copy chunk size.
    ///
    /// A chunk size of zero would stall the sample copy loop, so it is rejected.
    /// ```
    /// # use sonar_core::settings::ConversionSettings;
    /// let mut settings = ConversionSettings::default();
    /// assert_eq!(settings.get_chunk_size(), 65536);
    ///
    /// settings.set_chunk_size(4096).unwrap();
    /// assert_eq!(settings.get_chunk_size(), 4096);
    ///
    /// assert!(settings.set_chunk_size(0).is_err());
    /// ```
    pub fn set_chunk_size(&mut self, chunk_size: usize) -> Result<(), SonarError> {
        if chunk_size == 0 {
            return Err(SonarError::SettingsError {
                msg: "chunk_size must be greater than zero".to_string(),
            });
        }
        self.chunk_size = chunk_size;
        Ok(())
    }

    /// Sets the water temperature override, in Celsius.
    pub fn set_temperature_c(&mut self, temperature_c: f32) {
        self.temperature_c = temperature_c;
    }

    /// Sets whether fields with no canonical projection are kept and exported.
    /// ```
    /// # use sonar_core::settings::ConversionSettings;
    /// let mut settings = ConversionSettings::default();
    /// assert!(!settings.get_export_unknown());
    /// settings.set_export_unknown(true);
    /// assert!(settings.get_export_unknown());
    /// ```
    pub fn set_export_unknown(&mut self, export_unknown: bool) {
        self.export_unknown = export_unknown;
    }

    pub fn get_chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn get_temperature_c(&self) -> f32 {
        self.temperature_c
    }

    pub fn get_export_unknown(&self) -> bool {
        self.export_unknown
    }
}
