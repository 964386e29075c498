//! Optical amplifier device class.
//!
//! An OA raises the optical power of a line, typically an EDFA or Raman
//! stage. The settable attributes drive the gain/power control loop and
//! the loss-of-signal handling; a large read-only telemetry set reports
//! measured gain, per-band powers, laser figures and temperatures.

use serde::{Deserialize, Serialize};

use crate::attr::{
    Attr, AttrAccess, AttrKind, AttrProperty, AttrValue, RawAttrId, StandardAttr,
};
use crate::types::ObjectType;
use crate::units::{Db, Dbm};

/// Amplification stage technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum AmplifierType {
    Edfa = 0,
    ForwardRaman = 1,
    BackwardRaman = 2,
    Hybrid = 3,
}

const AMPLIFIER_TYPES: &[&str] = &["edfa", "forward-raman", "backward-raman", "hybrid"];

/// Selected gain range of the stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum GainRange {
    #[default]
    Low = 0,
    Mid = 1,
    High = 2,
    Fixed = 3,
}

const GAIN_RANGES: &[&str] = &["low-gain-range", "mid-gain-range", "high-gain-range", "fixed-gain-range"];

/// Amplifier regulation mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum AmpMode {
    ConstantPower = 0,
    #[default]
    ConstantGain = 1,
    DynamicGain = 2,
    DynamicPower = 3,
}

const AMP_MODES: &[&str] = &["constant-power", "constant-gain", "dynamic-gain", "dynamic-power"];

/// Fiber plant profile the stage is tuned for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum FiberTypeProfile {
    Dsf = 0,
    Leaf = 1,
    #[default]
    Ssmf = 2,
    Twc = 3,
    Twrs = 4,
}

const FIBER_TYPE_PROFILES: &[&str] = &["dsf", "leaf", "ssmf", "twc", "twrs"];

/// Behavior on loss of input signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum WorkingState {
    #[default]
    LosA = 0,
    LosN = 1,
}

const WORKING_STATES: &[&str] = &["los-a", "los-n"];

/// Operational status reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum OperStatus {
    Active = 0,
    Inactive = 1,
    Disabled = 2,
}

const OPER_STATUSES: &[&str] = &["active", "inactive", "disabled"];

/// Administrative state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum AdminState {
    #[default]
    Enabled = 0,
    Disabled = 1,
    Maint = 2,
}

const ADMIN_STATES: &[&str] = &["enabled", "disabled", "maint"];

/// Amplifier attribute ids.
///
/// Raw ids are stable and contiguous from zero; consumers may persist
/// them across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AmplifierAttrId {
    /// Vendor-assigned instance number. Mandatory at create, immutable.
    Id = 0,
    EquipmentFailure = 1,
    EquipmentMismatch = 2,
    AdminState = 3,
    OperStatus = 4,
    Type = 5,
    /// Target gain in units of 0.01 dB.
    TargetGain = 6,
    MinGain = 7,
    MaxGain = 8,
    /// Target gain tilt in units of 0.01 dB.
    TargetGainTilt = 9,
    GainRange = 10,
    AmpMode = 11,
    /// Target output power in units of 0.01 dBm.
    TargetOutputPower = 12,
    MaxOutputPower = 13,
    Enabled = 14,
    FiberTypeProfile = 15,
    WorkingState = 16,
    InputLosThreshold = 17,
    InputLosHysteresis = 18,
    OutputLosThreshold = 19,
    OutputLosHysteresis = 20,
    GainLowThreshold = 21,
    GainLowHysteresis = 22,
    InputLowThreshold = 23,
    OutputLowThreshold = 24,
    LosAseDelay = 25,
    InputOffsetLinepRx = 26,
    OutputOffsetLinepTx = 27,
    InputOffsetLinesRx = 28,
    OutputOffsetLinesTx = 29,
    AprNodeEnable = 30,
    AprNodeReflectionThreshold = 31,
    AprLineEnable = 32,
    /// Case temperature in units of 0.1 °C.
    Temperature = 33,
    ActualGain = 34,
    ActualGainTilt = 35,
    InputPowerTotal = 36,
    InputPowerCBand = 37,
    InputPowerLBand = 38,
    OutputPowerTotal = 39,
    OutputPowerCBand = 40,
    OutputPowerLBand = 41,
    /// Laser bias current in units of 0.01 mA.
    LaserBiasCurrent = 42,
    OpticalReturnLoss = 43,
    /// Laser temperature in units of 0.01 °C.
    LaserTemperature = 44,
    PanelInputPowerLinepRx = 45,
    PanelOutputPowerLinepTx = 46,
    PanelInputPowerLinesRx = 47,
    PanelOutputPowerLinesTx = 48,
    /// Laser TEC current in units of 0.01 mA.
    LaserTecCurrent = 49,
    IngressVoaAtten = 50,
    MonOutputPower = 51,
}

macro_rules! prop {
    ($id:expr, $name:literal, $kind:expr, $access:ident) => {
        AttrProperty {
            id: $id,
            name: $name,
            kind: $kind,
            access: AttrAccess::$access,
            mandatory_on_create: false,
            default: None,
        }
    };
    ($id:expr, $name:literal, $kind:expr, $access:ident, default = $default:expr) => {
        AttrProperty {
            id: $id,
            name: $name,
            kind: $kind,
            access: AttrAccess::$access,
            mandatory_on_create: false,
            default: Some($default),
        }
    };
}

const UINT2: AttrKind = AttrKind::Uint { decimals: 2 };
const INT2: AttrKind = AttrKind::Int { decimals: 2 };

impl StandardAttr for AmplifierAttrId {
    const OBJECT_TYPE: ObjectType = ObjectType::Amplifier;

    const ATTRS: &'static [AttrProperty] = &[
        AttrProperty {
            id: 0,
            name: "id",
            kind: AttrKind::Uint { decimals: 0 },
            access: AttrAccess::CreateOnly,
            mandatory_on_create: true,
            default: None,
        },
        prop!(1, "equipment-failure", AttrKind::Bool, ReadOnly),
        prop!(2, "equipment-mismatch", AttrKind::Bool, ReadOnly),
        prop!(
            3,
            "admin-state",
            AttrKind::Enum { values: ADMIN_STATES },
            CreateAndSet,
            default = AttrValue::Enum(AdminState::Enabled as u32)
        ),
        prop!(4, "oper-status", AttrKind::Enum { values: OPER_STATUSES }, ReadOnly),
        prop!(5, "type", AttrKind::Enum { values: AMPLIFIER_TYPES }, ReadOnly),
        prop!(6, "target-gain", UINT2, CreateAndSet, default = AttrValue::Uint(2000)),
        prop!(7, "min-gain", UINT2, ReadOnly),
        prop!(8, "max-gain", UINT2, ReadOnly),
        prop!(9, "target-gain-tilt", INT2, CreateAndSet, default = AttrValue::Int(0)),
        prop!(
            10,
            "gain-range",
            AttrKind::Enum { values: GAIN_RANGES },
            CreateAndSet,
            default = AttrValue::Enum(GainRange::Low as u32)
        ),
        prop!(
            11,
            "amp-mode",
            AttrKind::Enum { values: AMP_MODES },
            CreateAndSet,
            default = AttrValue::Enum(AmpMode::ConstantGain as u32)
        ),
        prop!(12, "target-output-power", INT2, CreateAndSet, default = AttrValue::Int(800)),
        prop!(13, "max-output-power", INT2, CreateAndSet, default = AttrValue::Int(2500)),
        prop!(14, "enabled", AttrKind::Bool, CreateAndSet, default = AttrValue::Bool(false)),
        prop!(
            15,
            "fiber-type-profile",
            AttrKind::Enum { values: FIBER_TYPE_PROFILES },
            CreateAndSet,
            default = AttrValue::Enum(FiberTypeProfile::Ssmf as u32)
        ),
        prop!(
            16,
            "working-state",
            AttrKind::Enum { values: WORKING_STATES },
            CreateAndSet,
            default = AttrValue::Enum(WorkingState::LosA as u32)
        ),
        prop!(17, "input-los-threshold", INT2, CreateAndSet, default = AttrValue::Int(-4000)),
        prop!(18, "input-los-hysteresis", UINT2, CreateAndSet, default = AttrValue::Uint(300)),
        prop!(19, "output-los-threshold", INT2, CreateAndSet, default = AttrValue::Int(-1000)),
        prop!(20, "output-los-hysteresis", UINT2, CreateAndSet, default = AttrValue::Uint(300)),
        prop!(21, "gain-low-threshold", UINT2, CreateAndSet, default = AttrValue::Uint(500)),
        prop!(22, "gain-low-hysteresis", UINT2, CreateAndSet, default = AttrValue::Uint(50)),
        prop!(23, "input-low-threshold", INT2, CreateAndSet, default = AttrValue::Int(-3700)),
        prop!(24, "output-low-threshold", INT2, CreateAndSet, default = AttrValue::Int(-700)),
        prop!(
            25,
            "los-ase-delay",
            AttrKind::Int { decimals: 0 },
            CreateAndSet,
            default = AttrValue::Int(0)
        ),
        prop!(26, "input-offset-linep-rx", INT2, ReadOnly),
        prop!(27, "output-offset-linep-tx", INT2, ReadOnly),
        prop!(28, "input-offset-lines-rx", INT2, ReadOnly),
        prop!(29, "output-offset-lines-tx", INT2, ReadOnly),
        prop!(30, "apr-node-enable", AttrKind::Bool, CreateAndSet, default = AttrValue::Bool(false)),
        prop!(
            31,
            "apr-node-reflection-threshold",
            INT2,
            CreateAndSet,
            default = AttrValue::Int(-1700)
        ),
        prop!(32, "apr-line-enable", AttrKind::Bool, CreateAndSet, default = AttrValue::Bool(false)),
        prop!(33, "temperature", AttrKind::Int { decimals: 1 }, ReadOnly),
        prop!(34, "actual-gain", INT2, ReadOnly),
        prop!(35, "actual-gain-tilt", INT2, ReadOnly),
        prop!(36, "input-power-total", INT2, ReadOnly),
        prop!(37, "input-power-c-band", INT2, ReadOnly),
        prop!(38, "input-power-l-band", INT2, ReadOnly),
        prop!(39, "output-power-total", INT2, ReadOnly),
        prop!(40, "output-power-c-band", INT2, ReadOnly),
        prop!(41, "output-power-l-band", INT2, ReadOnly),
        prop!(42, "laser-bias-current", UINT2, ReadOnly),
        prop!(43, "optical-return-loss", UINT2, ReadOnly),
        prop!(44, "laser-temperature", INT2, ReadOnly),
        prop!(45, "panel-input-power-linep-rx", INT2, ReadOnly),
        prop!(46, "panel-output-power-linep-tx", INT2, ReadOnly),
        prop!(47, "panel-input-power-lines-rx", INT2, ReadOnly),
        prop!(48, "panel-output-power-lines-tx", INT2, ReadOnly),
        prop!(49, "laser-tec-current", UINT2, ReadOnly),
        prop!(50, "ingress-voa-atten", UINT2, ReadOnly),
        prop!(51, "mon-output-power", INT2, ReadOnly),
    ];

    fn raw(self) -> RawAttrId {
        self as RawAttrId
    }

    fn from_raw(raw: RawAttrId) -> Option<Self> {
        use AmplifierAttrId::*;
        Some(match raw {
            0 => Id,
            1 => EquipmentFailure,
            2 => EquipmentMismatch,
            3 => AdminState,
            4 => OperStatus,
            5 => Type,
            6 => TargetGain,
            7 => MinGain,
            8 => MaxGain,
            9 => TargetGainTilt,
            10 => GainRange,
            11 => AmpMode,
            12 => TargetOutputPower,
            13 => MaxOutputPower,
            14 => Enabled,
            15 => FiberTypeProfile,
            16 => WorkingState,
            17 => InputLosThreshold,
            18 => InputLosHysteresis,
            19 => OutputLosThreshold,
            20 => OutputLosHysteresis,
            21 => GainLowThreshold,
            22 => GainLowHysteresis,
            23 => InputLowThreshold,
            24 => OutputLowThreshold,
            25 => LosAseDelay,
            26 => InputOffsetLinepRx,
            27 => OutputOffsetLinepTx,
            28 => InputOffsetLinesRx,
            29 => OutputOffsetLinesTx,
            30 => AprNodeEnable,
            31 => AprNodeReflectionThreshold,
            32 => AprLineEnable,
            33 => Temperature,
            34 => ActualGain,
            35 => ActualGainTilt,
            36 => InputPowerTotal,
            37 => InputPowerCBand,
            38 => InputPowerLBand,
            39 => OutputPowerTotal,
            40 => OutputPowerCBand,
            41 => OutputPowerLBand,
            42 => LaserBiasCurrent,
            43 => OpticalReturnLoss,
            44 => LaserTemperature,
            45 => PanelInputPowerLinepRx,
            46 => PanelOutputPowerLinepTx,
            47 => PanelInputPowerLinesRx,
            48 => PanelOutputPowerLinesTx,
            49 => LaserTecCurrent,
            50 => IngressVoaAtten,
            51 => MonOutputPower,
            _ => return None,
        })
    }
}

/// Typed builder for an amplifier create list, covering every settable
/// attribute with its documented default.
#[derive(Debug, Clone)]
pub struct AmplifierConfig {
    /// Vendor-assigned instance number (mandatory).
    pub id: u32,
    pub admin_state: AdminState,
    pub target_gain: Db,
    pub target_gain_tilt: Db,
    pub gain_range: GainRange,
    pub amp_mode: AmpMode,
    pub target_output_power: Dbm,
    pub max_output_power: Dbm,
    pub enabled: bool,
    pub fiber_type_profile: FiberTypeProfile,
    pub working_state: WorkingState,
    pub input_los_threshold: Dbm,
    pub input_los_hysteresis: Db,
    pub output_los_threshold: Dbm,
    pub output_los_hysteresis: Db,
    pub gain_low_threshold: Db,
    pub gain_low_hysteresis: Db,
    pub input_low_threshold: Dbm,
    pub output_low_threshold: Dbm,
    /// Delay before ASE handling after LOS, driver-defined units.
    pub los_ase_delay: i32,
    pub apr_node_enable: bool,
    pub apr_node_reflection_threshold: Dbm,
    pub apr_line_enable: bool,
}

impl AmplifierConfig {
    /// Starts a config for the given instance number with the documented
    /// defaults for everything else.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            admin_state: AdminState::Enabled,
            target_gain: Db::from_hundredths(2000),
            target_gain_tilt: Db::ZERO,
            gain_range: GainRange::Low,
            amp_mode: AmpMode::ConstantGain,
            target_output_power: Dbm::from_hundredths(800),
            max_output_power: Dbm::from_hundredths(2500),
            enabled: false,
            fiber_type_profile: FiberTypeProfile::Ssmf,
            working_state: WorkingState::LosA,
            input_los_threshold: Dbm::from_hundredths(-4000),
            input_los_hysteresis: Db::from_hundredths(300),
            output_los_threshold: Dbm::from_hundredths(-1000),
            output_los_hysteresis: Db::from_hundredths(300),
            gain_low_threshold: Db::from_hundredths(500),
            gain_low_hysteresis: Db::from_hundredths(50),
            input_low_threshold: Dbm::from_hundredths(-3700),
            output_low_threshold: Dbm::from_hundredths(-700),
            los_ase_delay: 0,
            apr_node_enable: false,
            apr_node_reflection_threshold: Dbm::from_hundredths(-1700),
            apr_line_enable: false,
        }
    }

    /// Renders the config as a create attribute list.
    pub fn to_attrs(&self) -> Vec<Attr<AmplifierAttrId>> {
        use AmplifierAttrId as A;
        vec![
            Attr::new(A::Id, AttrValue::Uint(self.id)),
            Attr::new(A::AdminState, AttrValue::Enum(self.admin_state as u32)),
            Attr::new(
                A::TargetGain,
                AttrValue::Uint(self.target_gain.as_hundredths() as u32),
            ),
            Attr::new(
                A::TargetGainTilt,
                AttrValue::Int(self.target_gain_tilt.as_hundredths()),
            ),
            Attr::new(A::GainRange, AttrValue::Enum(self.gain_range as u32)),
            Attr::new(A::AmpMode, AttrValue::Enum(self.amp_mode as u32)),
            Attr::new(
                A::TargetOutputPower,
                AttrValue::Int(self.target_output_power.as_hundredths()),
            ),
            Attr::new(
                A::MaxOutputPower,
                AttrValue::Int(self.max_output_power.as_hundredths()),
            ),
            Attr::new(A::Enabled, AttrValue::Bool(self.enabled)),
            Attr::new(
                A::FiberTypeProfile,
                AttrValue::Enum(self.fiber_type_profile as u32),
            ),
            Attr::new(A::WorkingState, AttrValue::Enum(self.working_state as u32)),
            Attr::new(
                A::InputLosThreshold,
                AttrValue::Int(self.input_los_threshold.as_hundredths()),
            ),
            Attr::new(
                A::InputLosHysteresis,
                AttrValue::Uint(self.input_los_hysteresis.as_hundredths() as u32),
            ),
            Attr::new(
                A::OutputLosThreshold,
                AttrValue::Int(self.output_los_threshold.as_hundredths()),
            ),
            Attr::new(
                A::OutputLosHysteresis,
                AttrValue::Uint(self.output_los_hysteresis.as_hundredths() as u32),
            ),
            Attr::new(
                A::GainLowThreshold,
                AttrValue::Uint(self.gain_low_threshold.as_hundredths() as u32),
            ),
            Attr::new(
                A::GainLowHysteresis,
                AttrValue::Uint(self.gain_low_hysteresis.as_hundredths() as u32),
            ),
            Attr::new(
                A::InputLowThreshold,
                AttrValue::Int(self.input_low_threshold.as_hundredths()),
            ),
            Attr::new(
                A::OutputLowThreshold,
                AttrValue::Int(self.output_low_threshold.as_hundredths()),
            ),
            Attr::new(A::LosAseDelay, AttrValue::Int(self.los_ase_delay)),
            Attr::new(A::AprNodeEnable, AttrValue::Bool(self.apr_node_enable)),
            Attr::new(
                A::AprNodeReflectionThreshold,
                AttrValue::Int(self.apr_node_reflection_threshold.as_hundredths()),
            ),
            Attr::new(A::AprLineEnable, AttrValue::Bool(self.apr_line_enable)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::build_create_map;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_table_indexed_by_id() {
        for (idx, prop) in AmplifierAttrId::ATTRS.iter().enumerate() {
            assert_eq!(prop.id as usize, idx);
            assert_eq!(AmplifierAttrId::from_raw(prop.id).unwrap().raw(), prop.id);
        }
        assert_eq!(AmplifierAttrId::ATTRS.len(), 52);
        assert!(AmplifierAttrId::from_raw(52).is_none());
    }

    #[test]
    fn test_header_defaults() {
        assert_eq!(
            AmplifierAttrId::TargetGain.property().default,
            Some(AttrValue::Uint(2000))
        );
        assert_eq!(
            AmplifierAttrId::InputLosThreshold.property().default,
            Some(AttrValue::Int(-4000))
        );
        assert_eq!(
            AmplifierAttrId::AmpMode.property().default,
            Some(AttrValue::Enum(AmpMode::ConstantGain as u32))
        );
        assert_eq!(
            AmplifierAttrId::FiberTypeProfile.property().default,
            Some(AttrValue::Enum(FiberTypeProfile::Ssmf as u32))
        );
        // Temperature carries one implied decimal digit, laser temperature two.
        assert_eq!(
            AmplifierAttrId::Temperature.property().kind,
            AttrKind::Int { decimals: 1 }
        );
        assert_eq!(
            AmplifierAttrId::LaserTemperature.property().kind,
            AttrKind::Int { decimals: 2 }
        );
    }

    #[test]
    fn test_config_covers_every_settable_attr() {
        let config = AmplifierConfig::new(9);
        let map = build_create_map(&config.to_attrs()).unwrap();
        for prop in AmplifierAttrId::ATTRS {
            match prop.access {
                AttrAccess::ReadOnly => assert!(!map.contains_key(&prop.id)),
                _ => assert!(map.contains_key(&prop.id), "missing {}", prop.name),
            }
        }
    }

    #[test]
    fn test_config_matches_table_defaults() {
        // A default-constructed config must reproduce the documented
        // defaults exactly.
        let map = build_create_map(&AmplifierConfig::new(1).to_attrs()).unwrap();
        for prop in AmplifierAttrId::ATTRS {
            if let Some(default) = prop.default {
                assert_eq!(map.get(&prop.id), Some(&default), "attr {}", prop.name);
            }
        }
    }
}
