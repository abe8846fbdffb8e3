//! Device properties and the cache of their last observed values.

use heapless::Vec;
use log::debug;
use strum::{EnumCount, EnumIter, IntoStaticStr};

use crate::protocol::Variable;

/// Every value the device can report, plus the derived efficiencies and the
/// poll-only aliases for bit-field variables.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, EnumCount, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Property {
    FanSpeed,
    TempInside,
    TempOutside,
    TempExhaust,
    TempIncoming,

    // select
    PowerState,
    Co2AdjustState,
    HumidityAdjustState,
    HeatingState,
    FilterGuardIndicator,
    HeatingIndicator,
    FaultIndicator,
    ServiceReminderIndicator,

    Humidity,
    BasicHumidityLevel,
    HumiditySensor1,
    HumiditySensor2,

    Co2High,
    Co2Low,
    Co2SetPointHigh,
    Co2SetPointLow,

    FanSpeedMax,
    FanSpeedMin,
    DcFanInputAdjustment,
    DcFanOutputAdjustment,
    InputFanStopThreshold,
    HeatingSetPoint,
    PreHeatingSetPoint,
    HrcBypassThreshold,
    CellDefrostingThreshold,

    // program
    AdjustmentIntervalMinutes,
    AutomaticHumidityLevelSeekerState,
    BoostSwitchMode,
    RadiatorType,
    CascadeAdjust,

    // program 2
    MaxSpeedLimitMode,

    ServiceReminder,

    // multi purpose io port 1
    PostHeatingOn,

    // multi purpose io port 2
    DamperMotorPosition,
    FaultSignalRelay,
    SupplyFanOff,
    PreHeatingOn,
    ExhaustFanOff,
    FirePlaceBoosterOn,

    IncomingCurrent,
    LastErrorNumber,

    // calculated by `PropertyStore::update_efficiencies`
    InEfficiency,
    OutEfficiency,
    AverageEfficiency,

    // poll-only aliases, never hold a value
    SelectStatus,
    Program,
    Program2,
    IoPortMultiPurpose1,
    IoPortMultiPurpose2,
}

impl Property {
    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    /// The bus variable whose value this property is decoded from.
    ///
    /// `None` for the efficiencies, which never travel on the bus.
    pub fn variable(self) -> Option<Variable> {
        use Property::*;

        let variable = match self {
            FanSpeed => Variable::FanSpeed,
            TempInside => Variable::TempInside,
            TempOutside => Variable::TempOutside,
            TempExhaust => Variable::TempExhaust,
            TempIncoming => Variable::TempIncoming,

            PowerState
            | Co2AdjustState
            | HumidityAdjustState
            | HeatingState
            | FilterGuardIndicator
            | HeatingIndicator
            | FaultIndicator
            | ServiceReminderIndicator
            | SelectStatus => Variable::Select,

            Humidity => Variable::Humidity,
            BasicHumidityLevel => Variable::BasicHumidityLevel,
            HumiditySensor1 => Variable::HumiditySensor1,
            HumiditySensor2 => Variable::HumiditySensor2,

            Co2High => Variable::Co2High,
            Co2Low => Variable::Co2Low,
            Co2SetPointHigh => Variable::Co2SetPointUpper,
            Co2SetPointLow => Variable::Co2SetPointLower,

            FanSpeedMax => Variable::FanSpeedMax,
            FanSpeedMin => Variable::FanSpeedMin,
            DcFanInputAdjustment => Variable::DcFanInputAdjustment,
            DcFanOutputAdjustment => Variable::DcFanOutputAdjustment,
            InputFanStopThreshold => Variable::InputFanStop,
            HeatingSetPoint => Variable::HeatingSetPoint,
            PreHeatingSetPoint => Variable::PreHeatingSetPoint,
            HrcBypassThreshold => Variable::HrcBypass,
            CellDefrostingThreshold => Variable::CellDefrosting,

            AdjustmentIntervalMinutes
            | AutomaticHumidityLevelSeekerState
            | BoostSwitchMode
            | RadiatorType
            | CascadeAdjust
            | Program => Variable::Program,

            MaxSpeedLimitMode | Program2 => Variable::Program2,

            ServiceReminder => Variable::ServiceReminder,

            PostHeatingOn | IoPortMultiPurpose1 => Variable::IoPortMultiPurpose1,

            DamperMotorPosition
            | FaultSignalRelay
            | SupplyFanOff
            | PreHeatingOn
            | ExhaustFanOff
            | FirePlaceBoosterOn
            | IoPortMultiPurpose2 => Variable::IoPortMultiPurpose2,

            IncomingCurrent => Variable::CurrentIncoming,
            LastErrorNumber => Variable::LastErrorNumber,

            InEfficiency | OutEfficiency | AverageEfficiency => return None,
        };

        Some(variable)
    }

    pub fn is_derived(self) -> bool {
        matches!(
            self,
            Property::InEfficiency | Property::OutEfficiency | Property::AverageEfficiency
        )
    }
}

/// Values decoded from one telegram. A single byte carries at most eight.
pub type Readings = Vec<(Property, i8), 8>;

/// Properties that changed in one update, with their new values.
pub type Changes = Vec<(Property, i8), 8>;

/// Last known value of every property. `None` until the bus has reported it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PropertyStore {
    values: [Option<i8>; Property::COUNT],
}

impl Default for PropertyStore {
    fn default() -> Self {
        let mut store = Self {
            values: [None; Property::COUNT],
        };
        store.values[Property::FanSpeed.index()] = Some(1);
        store.values[Property::FanSpeedMax.index()] = Some(8);
        store.values[Property::FanSpeedMin.index()] = Some(1);
        store
    }
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: Property) -> Option<i8> {
        self.values[property.index()]
    }

    /// Stores `value` and returns true if it differs from the cached one.
    pub fn set_if_changed(&mut self, property: Property, value: i8) -> bool {
        let slot = &mut self.values[property.index()];
        if *slot == Some(value) {
            return false;
        }
        debug!("{:?}: {:?} -> {}", property, *slot, value);
        *slot = Some(value);
        true
    }

    /// Applies a batch of readings and keeps the ones that changed.
    pub fn apply(&mut self, readings: &Readings) -> Changes {
        let mut changes = Changes::new();
        for &(property, value) in readings {
            if self.set_if_changed(property, value) {
                // same capacity as `readings`
                let _ = changes.push((property, value));
            }
        }
        changes
    }

    /// Recomputes the heat recovery efficiencies from the cached temperatures.
    ///
    /// Nothing happens while any of the four temperatures is unknown, or when
    /// inside and outside are equal. The percentages are truncated to whole
    /// numbers before they are compared with the cache, so drift below one
    /// percent never registers as a change.
    pub fn update_efficiencies(&mut self) -> Changes {
        let mut changes = Changes::new();

        let (Some(inside), Some(outside), Some(exhaust), Some(incoming)) = (
            self.get(Property::TempInside),
            self.get(Property::TempOutside),
            self.get(Property::TempExhaust),
            self.get(Property::TempIncoming),
        ) else {
            return changes;
        };

        let max_possible = i16::from(inside) - i16::from(outside);
        if max_possible == 0 {
            return changes;
        }
        let max_possible = f32::from(max_possible);

        let in_efficiency =
            f32::from(i16::from(incoming) - i16::from(outside)) * 100.0 / max_possible;
        let out_efficiency =
            f32::from(i16::from(inside) - i16::from(exhaust)) * 100.0 / max_possible;
        let average_efficiency = (in_efficiency + out_efficiency) / 2.0;

        for (property, efficiency) in [
            (Property::InEfficiency, in_efficiency),
            (Property::OutEfficiency, out_efficiency),
            (Property::AverageEfficiency, average_efficiency),
        ] {
            // `as` truncates toward zero and saturates at the i8 bounds
            let value = efficiency as i8;
            if self.set_if_changed(property, value) {
                // capacity is 8, at most 3 pushed
                let _ = changes.push((property, value));
            }
        }

        changes
    }
}
