//! Binary output field tables.
//!
//! The VN-100 describes each binary output frame in its header: a
//! group-enable byte followed by one field-enable word per enabled group.
//! This module enumerates the fields the sensor can emit in the common
//! (group 1), imu (group 3), and attitude (group 5) groups, and builds
//! [`HeaderDescriptor`]/[`FrameLayout`] pairs for a chosen output
//! configuration.

use vn100_protocol::{
    Encoding, FieldSpec, FrameLayout, HeaderDescriptor, Unit,
};

use crate::constants::{GROUP_BIT_ATTITUDE, GROUP_BIT_COMMON, GROUP_BIT_IMU};

const fn f32_field(
    group: &'static str,
    field: &'static str,
    variable: &'static str,
    unit: Unit,
) -> FieldSpec {
    FieldSpec {
        group,
        field,
        variable,
        bits: 32,
        encoding: Encoding::Float32Le,
        unit,
    }
}

// ============================================================================
// Common Group (group 1)
// ============================================================================

const COMMON_YAW_PITCH_ROLL: [FieldSpec; 3] = [
    f32_field("common", "YawPitchRoll", "yaw", Unit::Degrees),
    f32_field("common", "YawPitchRoll", "pitch", Unit::Degrees),
    f32_field("common", "YawPitchRoll", "roll", Unit::Degrees),
];

const COMMON_QUATERNION: [FieldSpec; 4] = [
    f32_field("common", "Quaternion", "quat[0]", Unit::None),
    f32_field("common", "Quaternion", "quat[1]", Unit::None),
    f32_field("common", "Quaternion", "quat[2]", Unit::None),
    f32_field("common", "Quaternion", "quat[3]", Unit::None),
];

const COMMON_ANGULAR_RATE: [FieldSpec; 3] = [
    f32_field("common", "AngularRate", "rate[0]", Unit::RadiansPerSecond),
    f32_field("common", "AngularRate", "rate[1]", Unit::RadiansPerSecond),
    f32_field("common", "AngularRate", "rate[2]", Unit::RadiansPerSecond),
];

const COMMON_ACCEL: [FieldSpec; 3] = [
    f32_field("common", "Accel", "accel[0]", Unit::MetersPerSecondSquared),
    f32_field("common", "Accel", "accel[1]", Unit::MetersPerSecondSquared),
    f32_field("common", "Accel", "accel[2]", Unit::MetersPerSecondSquared),
];

const COMMON_IMU: [FieldSpec; 6] = [
    f32_field("common", "Imu", "uncomp_accel[0]", Unit::MetersPerSecondSquared),
    f32_field("common", "Imu", "uncomp_accel[1]", Unit::MetersPerSecondSquared),
    f32_field("common", "Imu", "uncomp_accel[2]", Unit::MetersPerSecondSquared),
    f32_field("common", "Imu", "uncomp_gyro[0]", Unit::RadiansPerSecond),
    f32_field("common", "Imu", "uncomp_gyro[1]", Unit::RadiansPerSecond),
    f32_field("common", "Imu", "uncomp_gyro[2]", Unit::RadiansPerSecond),
];

const COMMON_MAG_PRES: [FieldSpec; 5] = [
    f32_field("common", "MagPres", "mag[0]", Unit::Gauss),
    f32_field("common", "MagPres", "mag[1]", Unit::Gauss),
    f32_field("common", "MagPres", "mag[2]", Unit::Gauss),
    f32_field("common", "MagPres", "temp", Unit::Celsius),
    f32_field("common", "MagPres", "pres", Unit::Kilopascals),
];

const COMMON_DELTA_THETA: [FieldSpec; 7] = [
    f32_field("common", "DeltaTheta", "dtime", Unit::Seconds),
    f32_field("common", "DeltaTheta", "dtheta[0]", Unit::Degrees),
    f32_field("common", "DeltaTheta", "dtheta[1]", Unit::Degrees),
    f32_field("common", "DeltaTheta", "dtheta[2]", Unit::Degrees),
    f32_field("common", "DeltaTheta", "dvel[0]", Unit::MetersPerSecond),
    f32_field("common", "DeltaTheta", "dvel[1]", Unit::MetersPerSecond),
    f32_field("common", "DeltaTheta", "dvel[2]", Unit::MetersPerSecond),
];

/// Fields of the common output group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CommonField {
    /// Attitude as yaw, pitch, roll.
    YawPitchRoll = 3,
    /// Attitude as a quaternion.
    Quaternion = 4,
    /// Compensated angular rate.
    AngularRate = 5,
    /// Compensated acceleration.
    Accel = 8,
    /// Uncompensated accelerometer and gyro.
    Imu = 9,
    /// Magnetometer, temperature, and pressure.
    MagPres = 10,
    /// Delta theta and delta velocity.
    DeltaTheta = 11,
}

impl CommonField {
    /// Position of this field in the group's field-enable word.
    pub fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Payload layout of this field, in wire order.
    pub fn specs(self) -> &'static [FieldSpec] {
        match self {
            CommonField::YawPitchRoll => &COMMON_YAW_PITCH_ROLL,
            CommonField::Quaternion => &COMMON_QUATERNION,
            CommonField::AngularRate => &COMMON_ANGULAR_RATE,
            CommonField::Accel => &COMMON_ACCEL,
            CommonField::Imu => &COMMON_IMU,
            CommonField::MagPres => &COMMON_MAG_PRES,
            CommonField::DeltaTheta => &COMMON_DELTA_THETA,
        }
    }
}

// ============================================================================
// IMU Group (group 3)
// ============================================================================

const IMU_UNCOMP_MAG: [FieldSpec; 3] = [
    f32_field("imu", "UncompMag", "uncomp_mag[0]", Unit::Gauss),
    f32_field("imu", "UncompMag", "uncomp_mag[1]", Unit::Gauss),
    f32_field("imu", "UncompMag", "uncomp_mag[2]", Unit::Gauss),
];

const IMU_UNCOMP_ACCEL: [FieldSpec; 3] = [
    f32_field("imu", "UncompAccel", "uncomp_accel[0]", Unit::MetersPerSecondSquared),
    f32_field("imu", "UncompAccel", "uncomp_accel[1]", Unit::MetersPerSecondSquared),
    f32_field("imu", "UncompAccel", "uncomp_accel[2]", Unit::MetersPerSecondSquared),
];

const IMU_UNCOMP_GYRO: [FieldSpec; 3] = [
    f32_field("imu", "UncompGyro", "uncomp_gyro[0]", Unit::RadiansPerSecond),
    f32_field("imu", "UncompGyro", "uncomp_gyro[1]", Unit::RadiansPerSecond),
    f32_field("imu", "UncompGyro", "uncomp_gyro[2]", Unit::RadiansPerSecond),
];

const IMU_TEMP: [FieldSpec; 1] = [f32_field("imu", "Temp", "temp", Unit::Celsius)];

const IMU_PRES: [FieldSpec; 1] = [f32_field("imu", "Pres", "pres", Unit::Kilopascals)];

const IMU_DELTA_THETA: [FieldSpec; 4] = [
    f32_field("imu", "DeltaTheta", "dtime", Unit::Seconds),
    f32_field("imu", "DeltaTheta", "dtheta[0]", Unit::Degrees),
    f32_field("imu", "DeltaTheta", "dtheta[1]", Unit::Degrees),
    f32_field("imu", "DeltaTheta", "dtheta[2]", Unit::Degrees),
];

const IMU_DELTA_VEL: [FieldSpec; 3] = [
    f32_field("imu", "DeltaVel", "dvel[0]", Unit::MetersPerSecond),
    f32_field("imu", "DeltaVel", "dvel[1]", Unit::MetersPerSecond),
    f32_field("imu", "DeltaVel", "dvel[2]", Unit::MetersPerSecond),
];

const IMU_MAG: [FieldSpec; 3] = [
    f32_field("imu", "Mag", "mag[0]", Unit::Gauss),
    f32_field("imu", "Mag", "mag[1]", Unit::Gauss),
    f32_field("imu", "Mag", "mag[2]", Unit::Gauss),
];

const IMU_ACCEL: [FieldSpec; 3] = [
    f32_field("imu", "Accel", "accel[0]", Unit::MetersPerSecondSquared),
    f32_field("imu", "Accel", "accel[1]", Unit::MetersPerSecondSquared),
    f32_field("imu", "Accel", "accel[2]", Unit::MetersPerSecondSquared),
];

const IMU_GYRO: [FieldSpec; 3] = [
    f32_field("imu", "Gyro", "gyro[0]", Unit::RadiansPerSecond),
    f32_field("imu", "Gyro", "gyro[1]", Unit::RadiansPerSecond),
    f32_field("imu", "Gyro", "gyro[2]", Unit::RadiansPerSecond),
];

/// Fields of the imu output group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImuField {
    /// Uncompensated magnetometer.
    UncompMag = 1,
    /// Uncompensated accelerometer.
    UncompAccel = 2,
    /// Uncompensated gyro.
    UncompGyro = 3,
    /// Die temperature.
    Temp = 4,
    /// Barometric pressure.
    Pres = 5,
    /// Delta theta.
    DeltaTheta = 6,
    /// Delta velocity.
    DeltaVel = 7,
    /// Compensated magnetometer.
    Mag = 8,
    /// Compensated accelerometer.
    Accel = 9,
    /// Compensated gyro.
    Gyro = 10,
}

impl ImuField {
    /// Position of this field in the group's field-enable word.
    pub fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Payload layout of this field, in wire order.
    pub fn specs(self) -> &'static [FieldSpec] {
        match self {
            ImuField::UncompMag => &IMU_UNCOMP_MAG,
            ImuField::UncompAccel => &IMU_UNCOMP_ACCEL,
            ImuField::UncompGyro => &IMU_UNCOMP_GYRO,
            ImuField::Temp => &IMU_TEMP,
            ImuField::Pres => &IMU_PRES,
            ImuField::DeltaTheta => &IMU_DELTA_THETA,
            ImuField::DeltaVel => &IMU_DELTA_VEL,
            ImuField::Mag => &IMU_MAG,
            ImuField::Accel => &IMU_ACCEL,
            ImuField::Gyro => &IMU_GYRO,
        }
    }
}

// ============================================================================
// Attitude Group (group 5)
// ============================================================================

const ATTITUDE_YAW_PITCH_ROLL: [FieldSpec; 3] = [
    f32_field("attitude", "YawPitchRoll", "yaw", Unit::Degrees),
    f32_field("attitude", "YawPitchRoll", "pitch", Unit::Degrees),
    f32_field("attitude", "YawPitchRoll", "roll", Unit::Degrees),
];

const ATTITUDE_QUATERNION: [FieldSpec; 4] = [
    f32_field("attitude", "Quaternion", "quat[0]", Unit::None),
    f32_field("attitude", "Quaternion", "quat[1]", Unit::None),
    f32_field("attitude", "Quaternion", "quat[2]", Unit::None),
    f32_field("attitude", "Quaternion", "quat[3]", Unit::None),
];

const ATTITUDE_DCM: [FieldSpec; 9] = [
    f32_field("attitude", "Dcm", "dcm[0]", Unit::None),
    f32_field("attitude", "Dcm", "dcm[1]", Unit::None),
    f32_field("attitude", "Dcm", "dcm[2]", Unit::None),
    f32_field("attitude", "Dcm", "dcm[3]", Unit::None),
    f32_field("attitude", "Dcm", "dcm[4]", Unit::None),
    f32_field("attitude", "Dcm", "dcm[5]", Unit::None),
    f32_field("attitude", "Dcm", "dcm[6]", Unit::None),
    f32_field("attitude", "Dcm", "dcm[7]", Unit::None),
    f32_field("attitude", "Dcm", "dcm[8]", Unit::None),
];

const ATTITUDE_MAG_NED: [FieldSpec; 3] = [
    f32_field("attitude", "MagNed", "mag_ned[0]", Unit::Gauss),
    f32_field("attitude", "MagNed", "mag_ned[1]", Unit::Gauss),
    f32_field("attitude", "MagNed", "mag_ned[2]", Unit::Gauss),
];

const ATTITUDE_ACCEL_NED: [FieldSpec; 3] = [
    f32_field("attitude", "AccelNed", "accel_ned[0]", Unit::MetersPerSecondSquared),
    f32_field("attitude", "AccelNed", "accel_ned[1]", Unit::MetersPerSecondSquared),
    f32_field("attitude", "AccelNed", "accel_ned[2]", Unit::MetersPerSecondSquared),
];

const ATTITUDE_LINEAR_ACCEL_BODY: [FieldSpec; 3] = [
    f32_field("attitude", "LinearAccelBody", "lin_accel_body[0]", Unit::MetersPerSecondSquared),
    f32_field("attitude", "LinearAccelBody", "lin_accel_body[1]", Unit::MetersPerSecondSquared),
    f32_field("attitude", "LinearAccelBody", "lin_accel_body[2]", Unit::MetersPerSecondSquared),
];

const ATTITUDE_LINEAR_ACCEL_NED: [FieldSpec; 3] = [
    f32_field("attitude", "LinearAccelNed", "lin_accel_ned[0]", Unit::MetersPerSecondSquared),
    f32_field("attitude", "LinearAccelNed", "lin_accel_ned[1]", Unit::MetersPerSecondSquared),
    f32_field("attitude", "LinearAccelNed", "lin_accel_ned[2]", Unit::MetersPerSecondSquared),
];

const ATTITUDE_YPR_U: [FieldSpec; 3] = [
    f32_field("attitude", "YprU", "yaw_u", Unit::Degrees),
    f32_field("attitude", "YprU", "pitch_u", Unit::Degrees),
    f32_field("attitude", "YprU", "roll_u", Unit::Degrees),
];

/// Fields of the attitude output group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AttitudeField {
    /// Attitude as yaw, pitch, roll.
    YawPitchRoll = 1,
    /// Attitude as a quaternion.
    Quaternion = 2,
    /// Attitude as a direction cosine matrix, row major.
    Dcm = 3,
    /// Magnetometer rotated into the NED frame.
    MagNed = 4,
    /// Accelerometer rotated into the NED frame.
    AccelNed = 5,
    /// Linear acceleration in the body frame.
    LinearAccelBody = 6,
    /// Linear acceleration in the NED frame.
    LinearAccelNed = 7,
    /// Attitude uncertainty.
    YprU = 8,
}

impl AttitudeField {
    /// Position of this field in the group's field-enable word.
    pub fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Payload layout of this field, in wire order.
    pub fn specs(self) -> &'static [FieldSpec] {
        match self {
            AttitudeField::YawPitchRoll => &ATTITUDE_YAW_PITCH_ROLL,
            AttitudeField::Quaternion => &ATTITUDE_QUATERNION,
            AttitudeField::Dcm => &ATTITUDE_DCM,
            AttitudeField::MagNed => &ATTITUDE_MAG_NED,
            AttitudeField::AccelNed => &ATTITUDE_ACCEL_NED,
            AttitudeField::LinearAccelBody => &ATTITUDE_LINEAR_ACCEL_BODY,
            AttitudeField::LinearAccelNed => &ATTITUDE_LINEAR_ACCEL_NED,
            AttitudeField::YprU => &ATTITUDE_YPR_U,
        }
    }
}

// ============================================================================
// Output Configuration
// ============================================================================

/// A selection of binary output fields across groups.
///
/// Mirrors the contents of a binary output register (75-77): which groups
/// are enabled and which fields within each. The sensor emits fields in
/// ascending bit order regardless of configuration order, so selections
/// are sorted and deduplicated before layouts are built.
///
/// The same variable name can appear in more than one selected field (for
/// example `YawPitchRoll` in both the common and attitude groups). Decoded
/// frames key variables by name, so later occurrences in wire order
/// overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputConfig {
    common: Vec<CommonField>,
    imu: Vec<ImuField>,
    attitude: Vec<AttitudeField>,
}

impl OutputConfig {
    /// Empty configuration with no groups enabled.
    pub fn new() -> Self {
        OutputConfig::default()
    }

    /// Enable a field in the common group.
    pub fn common(mut self, field: CommonField) -> Self {
        self.common.push(field);
        self.common.sort();
        self.common.dedup();
        self
    }

    /// Enable a field in the imu group.
    pub fn imu(mut self, field: ImuField) -> Self {
        self.imu.push(field);
        self.imu.sort();
        self.imu.dedup();
        self
    }

    /// Enable a field in the attitude group.
    pub fn attitude(mut self, field: AttitudeField) -> Self {
        self.attitude.push(field);
        self.attitude.sort();
        self.attitude.dedup();
        self
    }

    /// The wire header this configuration produces.
    pub fn descriptor(&self) -> HeaderDescriptor {
        let mut group_enable = 0u8;
        let mut field_enable = Vec::new();
        if !self.common.is_empty() {
            group_enable |= 1 << GROUP_BIT_COMMON;
            field_enable.push(self.common.iter().fold(0, |word, f| word | f.bit()));
        }
        if !self.imu.is_empty() {
            group_enable |= 1 << GROUP_BIT_IMU;
            field_enable.push(self.imu.iter().fold(0, |word, f| word | f.bit()));
        }
        if !self.attitude.is_empty() {
            group_enable |= 1 << GROUP_BIT_ATTITUDE;
            field_enable.push(self.attitude.iter().fold(0, |word, f| word | f.bit()));
        }
        HeaderDescriptor::new(group_enable, field_enable)
    }

    /// The payload layout this configuration produces.
    pub fn layout(&self) -> FrameLayout {
        let mut fields = Vec::new();
        for field in &self.common {
            fields.extend_from_slice(field.specs());
        }
        for field in &self.imu {
            fields.extend_from_slice(field.specs());
        }
        for field in &self.attitude {
            fields.extend_from_slice(field.specs());
        }
        FrameLayout::from_fields(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_group_descriptor() {
        let config = OutputConfig::new()
            .common(CommonField::YawPitchRoll)
            .common(CommonField::Accel);
        let descriptor = config.descriptor();
        assert_eq!(descriptor.group_enable, 0x01);
        assert_eq!(descriptor.field_enable, vec![(1 << 3) | (1 << 8)]);
    }

    #[test]
    fn test_multi_group_descriptor_in_bit_order() {
        let config = OutputConfig::new()
            .attitude(AttitudeField::YawPitchRoll)
            .imu(ImuField::Temp)
            .common(CommonField::Accel);
        let descriptor = config.descriptor();
        assert_eq!(descriptor.group_enable, 0b0001_0101);
        assert_eq!(descriptor.field_enable, vec![1 << 8, 1 << 4, 1 << 1]);
        assert_eq!(descriptor.header_len(), 1 + 1 + 2 * 3);
    }

    #[test]
    fn test_layout_orders_fields_by_bit() {
        // Configured out of order; layout must follow the wire order.
        let config = OutputConfig::new()
            .common(CommonField::MagPres)
            .common(CommonField::YawPitchRoll);
        let layout = config.layout();
        let names: Vec<&str> = layout.fields.iter().map(|f| f.variable).collect();
        assert_eq!(
            names,
            vec!["yaw", "pitch", "roll", "mag[0]", "mag[1]", "mag[2]", "temp", "pres"]
        );
        assert_eq!(layout.payload_len, 8 * 4);
    }

    #[test]
    fn test_duplicate_selection_is_deduplicated() {
        let config = OutputConfig::new()
            .common(CommonField::Accel)
            .common(CommonField::Accel);
        assert_eq!(config.layout().fields.len(), 3);
    }

    #[test]
    fn test_field_bits_match_manual() {
        assert_eq!(CommonField::YawPitchRoll.bit(), 0x0008);
        assert_eq!(CommonField::MagPres.bit(), 0x0400);
        assert_eq!(ImuField::UncompMag.bit(), 0x0002);
        assert_eq!(AttitudeField::YprU.bit(), 0x0100);
    }

    #[test]
    fn test_specs_widths_are_uniform() {
        for field in [
            CommonField::YawPitchRoll,
            CommonField::Quaternion,
            CommonField::DeltaTheta,
        ] {
            for spec in field.specs() {
                assert_eq!(spec.bits, 32);
            }
        }
    }
}
