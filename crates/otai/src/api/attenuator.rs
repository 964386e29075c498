//! Variable optical attenuator device class.
//!
//! A VOA inserts a controlled optical loss into a line. It either holds a
//! constant attenuation or servos the attenuation to hold a constant
//! output power, and reports the applied loss and output power back as
//! read-only telemetry.

use serde::{Deserialize, Serialize};

use crate::attr::{
    Attr, AttrAccess, AttrKind, AttrProperty, AttrValue, RawAttrId, StandardAttr,
};
use crate::types::ObjectType;
use crate::units::{Db, Dbm};

/// Attenuation regulation mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum AttenuationMode {
    /// Servo the attenuation to hold the target output power.
    ConstantPower = 0,
    /// Hold the configured attenuation.
    #[default]
    ConstantAttenuation = 1,
}

const ATTENUATION_MODES: &[&str] = &["constant-power", "constant-attenuation"];

/// Attenuator attribute ids.
///
/// Raw ids are stable and contiguous from zero; consumers may persist
/// them across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AttenuatorAttrId {
    /// Vendor-assigned instance number. Mandatory at create, immutable.
    Id = 0,
    /// Regulation mode.
    AttenuationMode = 1,
    /// Target output power in units of 0.01 dBm.
    TargetOutputPower = 2,
    /// Configured attenuation in units of 0.01 dB.
    Attenuation = 3,
    /// Whether the attenuator is actively regulating.
    Enabled = 4,
    /// Built-in fixed attenuation in units of 0.01 dB.
    FixAttenuation = 5,
    /// Attenuation currently applied, in units of 0.01 dB.
    ActualAttenuation = 6,
    /// Total output optical power in units of 0.01 dBm.
    OutputPowerTotal = 7,
    /// Optical return loss in units of 0.01 dB.
    OpticalReturnLoss = 8,
}

impl StandardAttr for AttenuatorAttrId {
    const OBJECT_TYPE: ObjectType = ObjectType::Attenuator;

    const ATTRS: &'static [AttrProperty] = &[
        AttrProperty {
            id: 0,
            name: "id",
            kind: AttrKind::Uint { decimals: 0 },
            access: AttrAccess::CreateOnly,
            mandatory_on_create: true,
            default: None,
        },
        AttrProperty {
            id: 1,
            name: "attenuation-mode",
            kind: AttrKind::Enum {
                values: ATTENUATION_MODES,
            },
            access: AttrAccess::CreateAndSet,
            mandatory_on_create: false,
            default: Some(AttrValue::Enum(AttenuationMode::ConstantAttenuation as u32)),
        },
        AttrProperty {
            id: 2,
            name: "target-output-power",
            kind: AttrKind::Uint { decimals: 2 },
            access: AttrAccess::CreateAndSet,
            mandatory_on_create: false,
            default: Some(AttrValue::Uint(0)),
        },
        AttrProperty {
            id: 3,
            name: "attenuation",
            kind: AttrKind::Uint { decimals: 2 },
            access: AttrAccess::CreateAndSet,
            mandatory_on_create: false,
            default: Some(AttrValue::Uint(500)),
        },
        AttrProperty {
            id: 4,
            name: "enabled",
            kind: AttrKind::Bool,
            access: AttrAccess::CreateAndSet,
            mandatory_on_create: false,
            default: Some(AttrValue::Bool(true)),
        },
        AttrProperty {
            id: 5,
            name: "fix-attenuation",
            kind: AttrKind::Uint { decimals: 2 },
            access: AttrAccess::ReadOnly,
            mandatory_on_create: false,
            default: None,
        },
        AttrProperty {
            id: 6,
            name: "actual-attenuation",
            kind: AttrKind::Uint { decimals: 2 },
            access: AttrAccess::ReadOnly,
            mandatory_on_create: false,
            default: None,
        },
        AttrProperty {
            id: 7,
            name: "output-power-total",
            kind: AttrKind::Int { decimals: 2 },
            access: AttrAccess::ReadOnly,
            mandatory_on_create: false,
            default: None,
        },
        AttrProperty {
            id: 8,
            name: "optical-return-loss",
            kind: AttrKind::Int { decimals: 2 },
            access: AttrAccess::ReadOnly,
            mandatory_on_create: false,
            default: None,
        },
    ];

    fn raw(self) -> RawAttrId {
        self as RawAttrId
    }

    fn from_raw(raw: RawAttrId) -> Option<Self> {
        match raw {
            0 => Some(AttenuatorAttrId::Id),
            1 => Some(AttenuatorAttrId::AttenuationMode),
            2 => Some(AttenuatorAttrId::TargetOutputPower),
            3 => Some(AttenuatorAttrId::Attenuation),
            4 => Some(AttenuatorAttrId::Enabled),
            5 => Some(AttenuatorAttrId::FixAttenuation),
            6 => Some(AttenuatorAttrId::ActualAttenuation),
            7 => Some(AttenuatorAttrId::OutputPowerTotal),
            8 => Some(AttenuatorAttrId::OpticalReturnLoss),
            _ => None,
        }
    }
}

/// Typed builder for an attenuator create list.
#[derive(Debug, Clone)]
pub struct AttenuatorConfig {
    /// Vendor-assigned instance number (mandatory).
    pub id: u32,
    /// Regulation mode.
    pub mode: AttenuationMode,
    /// Target output power; meaningful in constant-power mode.
    pub target_output_power: Dbm,
    /// Configured attenuation.
    pub attenuation: Db,
    /// Regulation enable.
    pub enabled: bool,
}

impl AttenuatorConfig {
    /// Starts a config for the given instance number with the documented
    /// defaults for everything else.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            mode: AttenuationMode::ConstantAttenuation,
            target_output_power: Dbm::ZERO,
            attenuation: Db::from_hundredths(500),
            enabled: true,
        }
    }

    /// Renders the config as a create attribute list.
    pub fn to_attrs(&self) -> Vec<Attr<AttenuatorAttrId>> {
        vec![
            Attr::new(AttenuatorAttrId::Id, AttrValue::Uint(self.id)),
            Attr::new(
                AttenuatorAttrId::AttenuationMode,
                AttrValue::Enum(self.mode as u32),
            ),
            Attr::new(
                AttenuatorAttrId::TargetOutputPower,
                AttrValue::Uint(self.target_output_power.as_hundredths() as u32),
            ),
            Attr::new(
                AttenuatorAttrId::Attenuation,
                AttrValue::Uint(self.attenuation.as_hundredths() as u32),
            ),
            Attr::new(AttenuatorAttrId::Enabled, AttrValue::Bool(self.enabled)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::build_create_map;

    #[test]
    fn test_table_indexed_by_id() {
        for (idx, prop) in AttenuatorAttrId::ATTRS.iter().enumerate() {
            assert_eq!(prop.id as usize, idx);
            assert_eq!(AttenuatorAttrId::from_raw(prop.id).unwrap().raw(), prop.id);
        }
        assert_eq!(AttenuatorAttrId::ATTRS.len(), 9);
        assert!(AttenuatorAttrId::from_raw(9).is_none());
    }

    #[test]
    fn test_property_lookup() {
        let prop = AttenuatorAttrId::Attenuation.property();
        assert_eq!(prop.name, "attenuation");
        assert_eq!(prop.default, Some(AttrValue::Uint(500)));
        assert_eq!(prop.kind, AttrKind::Uint { decimals: 2 });
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = AttenuatorConfig::new(1);
        config.attenuation = Db::from_hundredths(1234);

        let map = build_create_map(&config.to_attrs()).unwrap();
        assert_eq!(
            map.get(&AttenuatorAttrId::Attenuation.raw()),
            Some(&AttrValue::Uint(1234))
        );
        assert_eq!(
            map.get(&AttenuatorAttrId::Enabled.raw()),
            Some(&AttrValue::Bool(true))
        );
    }

    #[test]
    fn test_id_is_mandatory() {
        // Enabled alone is not enough to create.
        let err = build_create_map::<AttenuatorAttrId>(&[Attr::new(
            AttenuatorAttrId::Enabled,
            AttrValue::Bool(false),
        )])
        .unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::MandatoryAttributeMissing { name: "id" }
        ));
    }
}
