//! VN-100 register knowledge for the protocol decoder.
//!
//! The decoder crate is deliberately ignorant of what the sensor actually
//! emits; this crate supplies that knowledge. It carries the register ID
//! table, the binary output field tables for the common, imu, and attitude
//! groups, ASCII sentence decomposition, and [`RegisterStore`], a
//! [`SchemaStore`] implementation that maps configured binary outputs to
//! payload layouts.
//!
//! ```rust,ignore
//! use vn100_protocol::Decoder;
//! use vn100_registers::{CommonField, OutputConfig, RegisterStore};
//!
//! let mut store = RegisterStore::new();
//! store.register(&OutputConfig::new().common(CommonField::YawPitchRoll));
//! let mut decoder = Decoder::new(store);
//! ```

mod ascii;
mod binary;
mod constants;
mod error;

pub use ascii::*;
pub use binary::*;
pub use constants::*;
pub use error::*;

use std::collections::HashMap;

use vn100_protocol::{FrameLayout, HeaderDescriptor, SchemaStore};

/// Schema store backed by the configured binary output registers.
///
/// Each registered [`OutputConfig`] contributes one header descriptor and
/// the payload layout that goes with it. Headers seen on the wire that were
/// never registered look up to nothing, which the decoder treats as a false
/// sync byte.
#[derive(Debug, Clone, Default)]
pub struct RegisterStore {
    layouts: HashMap<HeaderDescriptor, FrameLayout>,
}

impl RegisterStore {
    /// Empty store with no binary outputs registered.
    pub fn new() -> Self {
        RegisterStore::default()
    }

    /// Store pre-loaded with the default telemetry output: attitude,
    /// compensated acceleration, and the magnetometer/temperature/pressure
    /// block from the common group.
    pub fn with_default_outputs() -> Self {
        let mut store = RegisterStore::new();
        store.register(
            &OutputConfig::new()
                .common(CommonField::YawPitchRoll)
                .common(CommonField::Accel)
                .common(CommonField::MagPres),
        );
        store
    }

    /// Register a binary output configuration.
    ///
    /// Re-registering a configuration with the same header replaces the
    /// previous layout.
    pub fn register(&mut self, config: &OutputConfig) {
        self.layouts.insert(config.descriptor(), config.layout());
    }

    /// Number of registered binary output configurations.
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// Whether no binary outputs are registered.
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

impl SchemaStore for RegisterStore {
    type Ascii = AsciiResponse;

    fn lookup_binary(&self, descriptor: &HeaderDescriptor) -> Option<&FrameLayout> {
        self.layouts.get(descriptor)
    }

    fn decode_ascii(&self, sentence: &[u8]) -> AsciiResponse {
        decode_sentence(sentence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_header_looks_up() {
        let config = OutputConfig::new().common(CommonField::YawPitchRoll);
        let mut store = RegisterStore::new();
        store.register(&config);

        let layout = store.lookup_binary(&config.descriptor()).unwrap();
        assert_eq!(layout.payload_len, 12);
    }

    #[test]
    fn test_unregistered_header_misses() {
        let store = RegisterStore::with_default_outputs();
        let stray = OutputConfig::new().imu(ImuField::Gyro).descriptor();
        assert!(store.lookup_binary(&stray).is_none());
    }

    #[test]
    fn test_reregister_replaces_layout() {
        let mut store = RegisterStore::new();
        let config = OutputConfig::new().common(CommonField::Accel);
        store.register(&config);
        store.register(&config);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_default_outputs_cover_csv_variables() {
        let store = RegisterStore::with_default_outputs();
        let config = OutputConfig::new()
            .common(CommonField::YawPitchRoll)
            .common(CommonField::Accel)
            .common(CommonField::MagPres);
        let layout = store.lookup_binary(&config.descriptor()).unwrap();
        let names: Vec<&str> = layout.fields.iter().map(|f| f.variable).collect();
        for wanted in ["temp", "pres", "yaw", "pitch", "roll", "accel[0]", "accel[2]"] {
            assert!(names.contains(&wanted), "missing {}", wanted);
        }
    }
}
