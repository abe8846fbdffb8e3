use crate::property::Property;
use crate::protocol::{Variable, ADDRESS_PANEL1, ADDRESS_PANEL8};

/// Which decoders are registered.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Profile {
    /// Every known variable.
    #[default]
    Full,
    /// Fan speed, the four temperatures and the select status byte only.
    /// Variables that carry nothing worth caching are still acknowledged.
    Minimal,
}

impl Profile {
    /// Whether telegrams carrying `variable` are decoded under this profile.
    ///
    /// Suspend and resume are always honoured, they gate our own transmissions.
    pub fn decodes(self, variable: Variable) -> bool {
        match self {
            Profile::Full => true,
            Profile::Minimal => matches!(
                variable,
                Variable::FanSpeed
                    | Variable::TempInside
                    | Variable::TempOutside
                    | Variable::TempExhaust
                    | Variable::TempIncoming
                    | Variable::Select
                    | Variable::Suspend
                    | Variable::Resume
                    | Variable::IoPortFanSpeedRelays
                    | Variable::InstalledCo2Sensors
                    | Variable::PostHeatingOnCounter
                    | Variable::PostHeatingOffTime
                    | Variable::PostHeatingTargetValue
                    | Variable::Flags1
                    | Variable::Flags2
                    | Variable::Flags3
                    | Variable::Flags4
                    | Variable::Flags5
                    | Variable::Flags6
                    | Variable::FirePlaceBoosterCounter
                    | Variable::MaintenanceMonthCounter
                    | Variable::StartupQuery
            ),
        }
    }

    pub fn includes(self, property: Property) -> bool {
        match property.variable() {
            Some(variable) => self.decodes(variable),
            None => property.is_derived(),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Address our own telegrams are sent from.
    pub sender_id: u8,
    /// Panel whose traffic with the master we listen to.
    pub receiver_id: u8,
    pub profile: Profile,
}

impl Default for Config {
    /// Act as panel 8 and listen to the conversation of panel 1.
    fn default() -> Self {
        Self {
            sender_id: ADDRESS_PANEL8,
            receiver_id: ADDRESS_PANEL1,
            profile: Profile::Full,
        }
    }
}

impl Config {
    pub fn with_sender_id(mut self, sender_id: u8) -> Self {
        self.sender_id = sender_id;
        self
    }

    pub fn with_receiver_id(mut self, receiver_id: u8) -> Self {
        self.receiver_id = receiver_id;
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }
}
