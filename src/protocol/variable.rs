use strum::FromRepr;

/// Variable codes carried in the command byte of a telegram.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, FromRepr)]
pub enum Variable {
    /// Poll request; the requested variable travels in the argument byte.
    Poll = 0x00,

    IoPortFanSpeedRelays = 0x06,
    IoPortMultiPurpose1 = 0x07,
    IoPortMultiPurpose2 = 0x08,

    FanSpeed = 0x29,
    /// Higher of the two humidity sensor readings.
    Humidity = 0x2a,
    Co2High = 0x2b,
    Co2Low = 0x2c,
    InstalledCo2Sensors = 0x2d,
    CurrentIncoming = 0x2e,
    HumiditySensor1 = 0x2f,
    HumiditySensor2 = 0x30,

    TempOutside = 0x32,
    TempExhaust = 0x33,
    TempInside = 0x34,
    TempIncoming = 0x35,
    LastErrorNumber = 0x36,

    PostHeatingOnCounter = 0x55,
    PostHeatingOffTime = 0x56,
    PostHeatingTargetValue = 0x57,

    Flags1 = 0x6c,
    Flags2 = 0x6d,
    Flags3 = 0x6e,
    Flags4 = 0x6f,
    Flags5 = 0x70,
    /// Polled cyclically by panel 1.
    Flags6 = 0x71,
    FirePlaceBoosterCounter = 0x79,

    /// Broadcast twice when a CO2 sensor releases the bus.
    Resume = 0x8f,
    /// Broadcast twice when a CO2 sensor takes over the bus.
    Suspend = 0x91,

    Select = 0xa3,
    HeatingSetPoint = 0xa4,
    FanSpeedMax = 0xa5,
    ServiceReminder = 0xa6,
    PreHeatingSetPoint = 0xa7,
    /// Input fan stops below this temperature.
    InputFanStop = 0xa8,
    FanSpeedMin = 0xa9,
    Program = 0xaa,
    MaintenanceMonthCounter = 0xab,
    BasicHumidityLevel = 0xae,
    /// Heat recovery cell bypass set point.
    HrcBypass = 0xaf,
    DcFanInputAdjustment = 0xb0,
    DcFanOutputAdjustment = 0xb1,
    /// Defrosting starts when the exhaust air drops below this set point.
    CellDefrosting = 0xb2,
    Co2SetPointUpper = 0xb3,
    Co2SetPointLower = 0xb4,
    Program2 = 0xb5,

    /// Queried by the panels at start-up, answered with 3.
    StartupQuery = 0xc0,
}

impl Variable {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::from_repr(code)
    }
}

impl From<Variable> for u8 {
    fn from(variable: Variable) -> u8 {
        variable.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_roundtrip() {
        for code in 0..=u8::MAX {
            if let Some(variable) = Variable::from_code(code) {
                assert_eq!(variable.code(), code);
            }
        }
    }

    #[test]
    fn reserved_codes() {
        assert_eq!(Variable::from_code(0x91), Some(Variable::Suspend));
        assert_eq!(Variable::from_code(0x8f), Some(Variable::Resume));
        assert_eq!(Variable::from_code(0x00), Some(Variable::Poll));
        assert_eq!(Variable::from_code(0x01), None);
        assert_eq!(Variable::from_code(0xff), None);
    }
}
