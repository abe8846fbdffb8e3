//! Conversions between argument bytes and physical values.

use super::encoding::OneByteEncodable;

/// Wire byte for fan speeds 1 to 8; each speed sets one more bit.
pub const FAN_SPEED_MAPPING: [u8; 8] = [0x01, 0x03, 0x07, 0x0f, 0x1f, 0x3f, 0x7f, 0xff];

/// Degrees Celsius for every NTC sensor byte.
#[rustfmt::skip]
pub const TEMPERATURE_MAPPING: [i8; 256] = [
    -74, -70, -66, -62, -59, -56, -54, -52,
    -50, -48, -47, -46, -44, -43, -42, -41,
    -40, -39, -38, -37, -36, -35, -34, -33,
    -33, -32, -31, -30, -30, -29, -28, -28,
    -27, -27, -26, -25, -25, -24, -24, -23,
    -23, -22, -22, -21, -21, -20, -20, -19,
    -19, -19, -18, -18, -17, -17, -16, -16,
    -16, -15, -15, -14, -14, -14, -13, -13,
    -12, -12, -12, -11, -11, -11, -10, -10,
     -9,  -9,  -9,  -8,  -8,  -8,  -7,  -7,
     -7,  -6,  -6,  -6,  -5,  -5,  -5,  -4,
     -4,  -4,  -3,  -3,  -3,  -2,  -2,  -2,
     -1,  -1,  -1,  -1,   0,   0,   0,   1,
      1,   1,   2,   2,   2,   3,   3,   3,
      4,   4,   4,   5,   5,   5,   5,   6,
      6,   6,   7,   7,   7,   8,   8,   8,
      9,   9,   9,  10,  10,  10,  11,  11,
     11,  12,  12,  12,  13,  13,  13,  14,
     14,  14,  15,  15,  15,  16,  16,  16,
     17,  17,  18,  18,  18,  19,  19,  19,
     20,  20,  21,  21,  21,  22,  22,  22,
     23,  23,  24,  24,  24,  25,  25,  26,
     26,  27,  27,  27,  28,  28,  29,  29,
     30,  30,  31,  31,  32,  32,  33,  33,
     34,  34,  35,  35,  36,  36,  37,  37,
     38,  38,  39,  40,  40,  41,  41,  42,
     43,  43,  44,  45,  45,  46,  47,  48,
     49,  49,  50,  51,  52,  53,  53,  54,
     55,  56,  57,  59,  60,  61,  62,  63,
     65,  66,  68,  69,  71,  73,  75,  77,
     79,  81,  82,  86,  90,  93,  97, 100,
    100, 100, 100, 100, 100, 100, 100, 100,
];

/// Returned by [`wire_from_temperature`] when no table entry reaches the target.
pub const TEMPERATURE_SATURATION: u8 = 100;

pub fn temperature_from_wire(byte: u8) -> i8 {
    TEMPERATURE_MAPPING[byte as usize]
}

/// First sensor byte whose temperature is at least `celsius`.
///
/// Flat regions of the table resolve to their lowest byte. The device expects
/// exactly this search, including the odd fallback.
pub fn wire_from_temperature(celsius: i8) -> u8 {
    TEMPERATURE_MAPPING
        .iter()
        .position(|&t| t >= celsius)
        .map_or(TEMPERATURE_SATURATION, |index| index as u8)
}

/// Fan speed 1 to 8, or 0 if the byte is not in the fan speed table.
pub fn fan_speed_from_wire(byte: u8) -> u8 {
    FAN_SPEED_MAPPING
        .iter()
        .position(|&b| b == byte)
        .map_or(0, |index| index as u8 + 1)
}

/// Wire byte for fan speed 1 to 8.
pub fn wire_from_fan_speed(speed: u8) -> Option<u8> {
    FanSpeed::new(speed).map(|speed| speed.encoded_as_byte())
}

/// A fan speed known to be within 1 to 8.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct FanSpeed(u8);

impl FanSpeed {
    pub const MIN: FanSpeed = FanSpeed(1);
    pub const MAX: FanSpeed = FanSpeed(8);

    pub fn new(speed: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&speed)
            .then_some(FanSpeed(speed))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl OneByteEncodable for FanSpeed {
    fn encoded_as_byte(&self) -> u8 {
        FAN_SPEED_MAPPING[(self.0 - 1) as usize]
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Celsius(pub i8);

impl OneByteEncodable for Celsius {
    fn encoded_as_byte(&self) -> u8 {
        wire_from_temperature(self.0)
    }
}

one_byte_encodable!(FanSpeed, Celsius);

const fn bit(byte: u8, n: u8) -> bool {
    byte & (1 << n) != 0
}

// 1 1 1 1 1 1 1 1
// | | | | | | | |
// | | | | | | | +- 0 power
// | | | | | | +--- 1 CO2 adjust
// | | | | | +----- 2 %RH adjust
// | | | | +------- 3 heating
// | | | +--------- 4 filter guard indicator
// | | +----------- 5 heating indicator
// | +------------- 6 fault indicator
// +--------------- 7 service reminder
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SelectStatus {
    pub power: bool,
    pub co2_adjust: bool,
    pub humidity_adjust: bool,
    pub heating: bool,
    pub filter_guard_indicator: bool,
    pub heating_indicator: bool,
    pub fault_indicator: bool,
    pub service_reminder_indicator: bool,
}

impl From<u8> for SelectStatus {
    fn from(byte: u8) -> Self {
        Self {
            power: bit(byte, 0),
            co2_adjust: bit(byte, 1),
            humidity_adjust: bit(byte, 2),
            heating: bit(byte, 3),
            filter_guard_indicator: bit(byte, 4),
            heating_indicator: bit(byte, 5),
            fault_indicator: bit(byte, 6),
            service_reminder_indicator: bit(byte, 7),
        }
    }
}

// 1 1 1 1 1 1 1 1
// | | | | _______
// | | | |    |
// | | | |    +---- 0-3 CO2 and %RH adjustment interval, minutes
// | | | +--------- 4 automatic %RH basic level seeker
// | | +----------- 5 boost switch mode (1 = boost, 0 = fireplace)
// | +------------- 6 radiator type (1 = water, 0 = electric)
// +--------------- 7 cascade adjust
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ProgramSettings {
    pub adjustment_interval_minutes: u8,
    pub automatic_humidity_level_seeker: bool,
    pub boost_switch_mode: BoostSwitchMode,
    pub radiator_type: RadiatorType,
    pub cascade_adjust: bool,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum BoostSwitchMode {
    #[default]
    Fireplace,
    Boost,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum RadiatorType {
    #[default]
    Electric,
    Water,
}

impl From<u8> for ProgramSettings {
    fn from(byte: u8) -> Self {
        Self {
            adjustment_interval_minutes: byte & 0x0f,
            automatic_humidity_level_seeker: bit(byte, 4),
            boost_switch_mode: if bit(byte, 5) {
                BoostSwitchMode::Boost
            } else {
                BoostSwitchMode::Fireplace
            },
            radiator_type: if bit(byte, 6) {
                RadiatorType::Water
            } else {
                RadiatorType::Electric
            },
            cascade_adjust: bit(byte, 7),
        }
    }
}

// bit 0: function of the max speed limit (0 = with adjustment, 1 = always)
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Program2Settings {
    pub max_speed_limit_mode: MaxSpeedLimitMode,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum MaxSpeedLimitMode {
    #[default]
    WithAdjustment,
    Always,
}

impl From<u8> for Program2Settings {
    fn from(byte: u8) -> Self {
        Self {
            max_speed_limit_mode: if bit(byte, 0) {
                MaxSpeedLimitMode::Always
            } else {
                MaxSpeedLimitMode::WithAdjustment
            },
        }
    }
}

// bit 5: post-heating on
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct IoPort1 {
    pub post_heating_on: bool,
}

impl From<u8> for IoPort1 {
    fn from(byte: u8) -> Self {
        Self {
            post_heating_on: bit(byte, 5),
        }
    }
}

// 1 1 1 1 1 1 1 1
// | | | | | | | |
// | | | | | | | +- 0 unused
// | | | | | | +--- 1 damper motor position (0 = winter, 1 = season)
// | | | | | +----- 2 fault signal relay (1 = closed)
// | | | | +------- 3 supply fan off
// | | | +--------- 4 pre-heating on
// | | +----------- 5 exhaust fan off
// | +------------- 6 fireplace/booster switch (1 = closed)
// +--------------- 7 unused
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct IoPort2 {
    pub damper_motor_position: bool,
    pub fault_signal_relay: bool,
    pub supply_fan_off: bool,
    pub pre_heating_on: bool,
    pub exhaust_fan_off: bool,
    pub fire_place_booster_on: bool,
}

impl From<u8> for IoPort2 {
    fn from(byte: u8) -> Self {
        Self {
            damper_motor_position: bit(byte, 1),
            fault_signal_relay: bit(byte, 2),
            supply_fan_off: bit(byte, 3),
            pre_heating_on: bit(byte, 4),
            exhaust_fan_off: bit(byte, 5),
            fire_place_booster_on: bit(byte, 6),
        }
    }
}
