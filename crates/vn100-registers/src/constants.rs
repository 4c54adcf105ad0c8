//! Register constants
//!
//! Register ID numbers and binary output group positions for the VN-100.
//! See sections 5 and 6 of the VN-100 User Manual (UM001).

// ============================================================================
// System Registers
// ============================================================================

/// Model number (read-only).
pub const REG_MODEL_NUMBER: u8 = 1;
/// Serial number (read-only).
pub const REG_SERIAL_NUMBER: u8 = 3;
/// Serial baud rate.
pub const REG_SERIAL_BAUD_RATE: u8 = 5;
/// Async data output type (ADOR).
pub const REG_ASYNC_DATA_OUTPUT_TYPE: u8 = 6;
/// Async data output frequency (ADOF).
pub const REG_ASYNC_DATA_OUTPUT_FREQUENCY: u8 = 7;
/// Magnetic and gravity reference vectors.
pub const REG_MAGNETIC_GRAVITY_REFERENCE_VECTORS: u8 = 21;
/// Communication protocol control.
pub const REG_COMMUNICATION_PROTOCOL_CONTROL: u8 = 30;
/// Synchronization control.
pub const REG_SYNCHRONIZATION_CONTROL: u8 = 32;
/// Synchronization status counters.
pub const REG_SYNCHRONIZATION_STATUS: u8 = 33;
/// Binary output register 1.
pub const REG_BINARY_OUTPUT_1: u8 = 75;
/// Binary output register 2.
pub const REG_BINARY_OUTPUT_2: u8 = 76;
/// Binary output register 3.
pub const REG_BINARY_OUTPUT_3: u8 = 77;

// ============================================================================
// Attitude Subsystem Registers
// ============================================================================

/// VPE basic control.
pub const REG_VPE_BASIC_CONTROL: u8 = 35;
/// VPE magnetometer basic tuning.
pub const REG_VPE_MAGNETOMETER_BASIC_TUNING: u8 = 36;
/// VPE accelerometer basic tuning.
pub const REG_VPE_ACCELEROMETER_BASIC_TUNING: u8 = 38;

// ============================================================================
// IMU Subsystem Registers
// ============================================================================

/// IMU measurements (read-only).
pub const REG_IMU_MEASUREMENTS: u8 = 54;
/// Delta theta and delta velocity (read-only).
pub const REG_DELTA_THETA_DELTA_VELOCITY: u8 = 80;
/// Delta theta/velocity configuration.
pub const REG_DELTA_THETA_DELTA_VELOCITY_CONFIGURATION: u8 = 82;
/// Reference vector configuration.
pub const REG_REFERENCE_VECTOR_CONFIGURATION: u8 = 83;
/// IMU filtering configuration.
pub const REG_IMU_FILTERING_CONFIGURATION: u8 = 85;

// ============================================================================
// HSI / Velocity Aiding Registers
// ============================================================================

/// Magnetometer calibration control.
pub const REG_MAGNETOMETER_CALIBRATION_CONTROL: u8 = 44;
/// Calculated magnetometer calibration (read-only).
pub const REG_CALCULATED_MAGNETOMETER_CALIBRATION: u8 = 47;
/// Velocity compensation measurement.
pub const REG_VELOCITY_COMPENSATION_MEASUREMENT: u8 = 50;
/// Velocity compensation control.
pub const REG_VELOCITY_COMPENSATION_CONTROL: u8 = 51;

// ============================================================================
// Binary Output Groups
// ============================================================================

/// Bit of the "common" output group (group 1) in the group-enable byte.
pub const GROUP_BIT_COMMON: u8 = 0;
/// Bit of the "imu" output group (group 3) in the group-enable byte.
pub const GROUP_BIT_IMU: u8 = 2;
/// Bit of the "attitude" output group (group 5) in the group-enable byte.
pub const GROUP_BIT_ATTITUDE: u8 = 4;
