use super::types::{
    fan_speed_from_wire, temperature_from_wire, BoostSwitchMode, IoPort1, IoPort2,
    MaxSpeedLimitMode, Program2Settings, ProgramSettings, RadiatorType, SelectStatus,
};
use super::variable::Variable;
use crate::property::{Property, Readings};

fn flag(on: bool) -> i8 {
    on as i8
}

fn readings_of<const N: usize>(values: [(Property, i8); N]) -> Readings {
    let mut readings = Readings::new();
    for reading in values {
        // no variable decodes to more than eight properties
        let _ = readings.push(reading);
    }
    readings
}

/// Decodes the argument byte of a telegram carrying `variable`.
///
/// Returns `None` if there is no decoder for the variable; poll requests and
/// the suspend/resume broadcasts land here as well. Variables that are known
/// but carry nothing worth caching decode to no readings.
pub fn readings(variable: Variable, value: u8) -> Option<Readings> {
    use Variable::*;

    // raw values are cached as they arrive, reinterpreted as signed
    let raw = value as i8;

    let readings = match variable {
        FanSpeed => readings_of([(Property::FanSpeed, fan_speed_from_wire(value) as i8)]),
        FanSpeedMax => readings_of([(Property::FanSpeedMax, fan_speed_from_wire(value) as i8)]),
        FanSpeedMin => readings_of([(Property::FanSpeedMin, fan_speed_from_wire(value) as i8)]),

        TempOutside => readings_of([(Property::TempOutside, temperature_from_wire(value))]),
        TempExhaust => readings_of([(Property::TempExhaust, temperature_from_wire(value))]),
        TempInside => readings_of([(Property::TempInside, temperature_from_wire(value))]),
        TempIncoming => readings_of([(Property::TempIncoming, temperature_from_wire(value))]),
        InputFanStop => readings_of([(
            Property::InputFanStopThreshold,
            temperature_from_wire(value),
        )]),
        HeatingSetPoint => {
            readings_of([(Property::HeatingSetPoint, temperature_from_wire(value))])
        }
        PreHeatingSetPoint => {
            readings_of([(Property::PreHeatingSetPoint, temperature_from_wire(value))])
        }
        HrcBypass => readings_of([(Property::HrcBypassThreshold, temperature_from_wire(value))]),
        CellDefrosting => readings_of([(
            Property::CellDefrostingThreshold,
            temperature_from_wire(value),
        )]),

        Select => {
            let status = SelectStatus::from(value);
            readings_of([
                (Property::PowerState, flag(status.power)),
                (Property::Co2AdjustState, flag(status.co2_adjust)),
                (Property::HumidityAdjustState, flag(status.humidity_adjust)),
                (Property::HeatingState, flag(status.heating)),
                (Property::FilterGuardIndicator, flag(status.filter_guard_indicator)),
                (Property::HeatingIndicator, flag(status.heating_indicator)),
                (Property::FaultIndicator, flag(status.fault_indicator)),
                (
                    Property::ServiceReminderIndicator,
                    flag(status.service_reminder_indicator),
                ),
            ])
        }

        Program => {
            let program = ProgramSettings::from(value);
            readings_of([
                (
                    Property::AdjustmentIntervalMinutes,
                    program.adjustment_interval_minutes as i8,
                ),
                (
                    Property::AutomaticHumidityLevelSeekerState,
                    flag(program.automatic_humidity_level_seeker),
                ),
                (
                    Property::BoostSwitchMode,
                    flag(program.boost_switch_mode == BoostSwitchMode::Boost),
                ),
                (
                    Property::RadiatorType,
                    flag(program.radiator_type == RadiatorType::Water),
                ),
                (Property::CascadeAdjust, flag(program.cascade_adjust)),
            ])
        }

        Program2 => {
            let program = Program2Settings::from(value);
            readings_of([(
                Property::MaxSpeedLimitMode,
                flag(program.max_speed_limit_mode == MaxSpeedLimitMode::Always),
            )])
        }

        IoPortMultiPurpose1 => {
            let port = IoPort1::from(value);
            readings_of([(Property::PostHeatingOn, flag(port.post_heating_on))])
        }

        IoPortMultiPurpose2 => {
            let port = IoPort2::from(value);
            readings_of([
                (Property::DamperMotorPosition, flag(port.damper_motor_position)),
                (Property::FaultSignalRelay, flag(port.fault_signal_relay)),
                (Property::SupplyFanOff, flag(port.supply_fan_off)),
                (Property::PreHeatingOn, flag(port.pre_heating_on)),
                (Property::ExhaustFanOff, flag(port.exhaust_fan_off)),
                (Property::FirePlaceBoosterOn, flag(port.fire_place_booster_on)),
            ])
        }

        Humidity => readings_of([(Property::Humidity, raw)]),
        BasicHumidityLevel => readings_of([(Property::BasicHumidityLevel, raw)]),
        HumiditySensor1 => readings_of([(Property::HumiditySensor1, raw)]),
        HumiditySensor2 => readings_of([(Property::HumiditySensor2, raw)]),
        Co2High => readings_of([(Property::Co2High, raw)]),
        Co2Low => readings_of([(Property::Co2Low, raw)]),
        Co2SetPointUpper => readings_of([(Property::Co2SetPointHigh, raw)]),
        Co2SetPointLower => readings_of([(Property::Co2SetPointLow, raw)]),
        DcFanInputAdjustment => readings_of([(Property::DcFanInputAdjustment, raw)]),
        DcFanOutputAdjustment => readings_of([(Property::DcFanOutputAdjustment, raw)]),
        ServiceReminder => readings_of([(Property::ServiceReminder, raw)]),
        CurrentIncoming => readings_of([(Property::IncomingCurrent, raw)]),
        LastErrorNumber => readings_of([(Property::LastErrorNumber, raw)]),

        IoPortFanSpeedRelays
        | InstalledCo2Sensors
        | PostHeatingOnCounter
        | PostHeatingOffTime
        | PostHeatingTargetValue
        | Flags1
        | Flags2
        | Flags3
        | Flags4
        | Flags5
        | Flags6
        | FirePlaceBoosterCounter
        | MaintenanceMonthCounter
        | StartupQuery => Readings::new(),

        Poll | Suspend | Resume => return None,
    };

    Some(readings)
}
