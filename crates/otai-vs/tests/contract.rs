//! Contract conformance tests for the virtual OTAI implementation.
//!
//! These exercise the attribute/dispatch discipline end to end through the
//! public per-class APIs: create defaults, access classes, handle
//! invalidation, scaled-integer round-trips, and the statistics surface.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use sonic_otai::api::amplifier::{AmplifierAttrId, AmplifierConfig, AmpMode};
use sonic_otai::api::attenuator::{AttenuationMode, AttenuatorAttrId, AttenuatorConfig};
use sonic_otai::attr::{Attr, AttrId, AttrValue};
use sonic_otai::error::Error;
use sonic_otai::stats::{StatId, StatsMode};
use sonic_otai::types::ObjectType;
use sonic_otai::{DeviceApi, StandardAttr, CUSTOM_RANGE_END, CUSTOM_RANGE_START};
use sonic_otai_vs::{
    NullDriver, StoreConfig, Vs, STAT_INPUT_LOS_EVENTS, STAT_OUTPUT_LOS_EVENTS,
};

fn get_one<A, K, Api>(api: &Api, id: sonic_otai::ObjectId<K>, attr: A) -> AttrValue
where
    K: sonic_otai::ObjectKind,
    A: StandardAttr,
    Api: DeviceApi<Kind = K, Attr = A>,
{
    api.get_attribute(id, &[AttrId::Standard(attr)]).unwrap()[0]
}

#[test]
fn attr_ids_outside_both_ranges_are_rejected() {
    let vs = Vs::new();
    let switch = vs.create_switch();
    let api = vs.attenuator_api();
    let voa = api
        .create(switch, &AttenuatorConfig::new(1).to_attrs())
        .unwrap();

    // Between the standard range and the custom range.
    let err = AttrId::<AttenuatorAttrId>::from_raw(9).unwrap_err();
    assert!(matches!(err, Error::InvalidAttribute { id: 9, .. }));
    // Past the custom range; expressible only through the escape hatch.
    let err = api
        .set_attribute(voa, Attr::custom(CUSTOM_RANGE_END, AttrValue::Uint(0)))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidAttribute { .. }));
    let err = api
        .get_attribute(voa, &[AttrId::Custom(CUSTOM_RANGE_END + 1)])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidAttribute { .. }));
}

#[test]
fn create_applies_documented_defaults() {
    let vs = Vs::new();
    let switch = vs.create_switch();
    let api = vs.attenuator_api();

    // Only the mandatory instance number is supplied.
    let voa = api
        .create(switch, &[Attr::new(AttenuatorAttrId::Id, AttrValue::Uint(7))])
        .unwrap();

    assert_eq!(
        get_one(&api, voa, AttenuatorAttrId::AttenuationMode),
        AttrValue::Enum(AttenuationMode::ConstantAttenuation as u32)
    );
    assert_eq!(
        get_one(&api, voa, AttenuatorAttrId::TargetOutputPower),
        AttrValue::Uint(0)
    );
    assert_eq!(
        get_one(&api, voa, AttenuatorAttrId::Attenuation),
        AttrValue::Uint(500)
    );
    assert_eq!(
        get_one(&api, voa, AttenuatorAttrId::Enabled),
        AttrValue::Bool(true)
    );

    let oa = vs
        .amplifier_api()
        .create(switch, &[Attr::new(AmplifierAttrId::Id, AttrValue::Uint(7))])
        .unwrap();
    assert_eq!(
        get_one(&vs.amplifier_api(), oa, AmplifierAttrId::TargetGain),
        AttrValue::Uint(2000)
    );
    assert_eq!(
        get_one(&vs.amplifier_api(), oa, AmplifierAttrId::InputLosThreshold),
        AttrValue::Int(-4000)
    );
    assert_eq!(
        get_one(&vs.amplifier_api(), oa, AmplifierAttrId::AmpMode),
        AttrValue::Enum(AmpMode::ConstantGain as u32)
    );
}

#[test]
fn create_without_mandatory_attr_leaves_nothing() {
    let vs = Vs::new();
    let switch = vs.create_switch();

    let err = vs.amplifier_api().create(switch, &[]).unwrap_err();
    assert!(matches!(
        err,
        Error::MandatoryAttributeMissing { name: "id" }
    ));
    assert!(vs.store().objects_of(ObjectType::Amplifier).is_empty());
}

#[test]
fn set_on_read_only_and_create_only_attrs_fails_without_effect() {
    let vs = Vs::new();
    let switch = vs.create_switch();
    let api = vs.attenuator_api();
    let voa = api
        .create(switch, &AttenuatorConfig::new(3).to_attrs())
        .unwrap();

    let before = get_one(&api, voa, AttenuatorAttrId::Id);
    let err = api
        .set_attribute(voa, Attr::new(AttenuatorAttrId::Id, AttrValue::Uint(99)))
        .unwrap_err();
    assert!(matches!(err, Error::CreateOnlyAttribute { name: "id" }));
    assert_eq!(get_one(&api, voa, AttenuatorAttrId::Id), before);

    let err = api
        .set_attribute(
            voa,
            Attr::new(AttenuatorAttrId::ActualAttenuation, AttrValue::Uint(1)),
        )
        .unwrap_err();
    assert!(matches!(err, Error::ReadOnlyAttribute { .. }));
    assert_eq!(
        get_one(&api, voa, AttenuatorAttrId::ActualAttenuation),
        AttrValue::Uint(0)
    );
}

#[test]
fn set_with_wrong_type_or_bad_discriminant_fails_without_effect() {
    let vs = Vs::new();
    let switch = vs.create_switch();
    let api = vs.attenuator_api();
    let voa = api
        .create(switch, &AttenuatorConfig::new(3).to_attrs())
        .unwrap();

    let err = api
        .set_attribute(
            voa,
            Attr::new(AttenuatorAttrId::Attenuation, AttrValue::Bool(true)),
        )
        .unwrap_err();
    assert!(matches!(err, Error::WrongValueType { .. }));

    let err = api
        .set_attribute(
            voa,
            Attr::new(AttenuatorAttrId::AttenuationMode, AttrValue::Enum(2)),
        )
        .unwrap_err();
    assert!(matches!(err, Error::ValueOutOfRange { value: 2, .. }));
    assert_eq!(
        get_one(&api, voa, AttenuatorAttrId::Attenuation),
        AttrValue::Uint(500)
    );
}

#[test]
fn removed_handle_is_invalid_for_every_operation() {
    let vs = Vs::new();
    let switch = vs.create_switch();
    let api = vs.amplifier_api();
    let oa = api
        .create(switch, &AmplifierConfig::new(1).to_attrs())
        .unwrap();

    api.remove(oa).unwrap();

    assert!(matches!(
        api.get_attribute(oa, &[AttrId::Standard(AmplifierAttrId::TargetGain)])
            .unwrap_err(),
        Error::InvalidObjectId { .. }
    ));
    assert!(matches!(
        api.set_attribute(oa, Attr::new(AmplifierAttrId::TargetGain, AttrValue::Uint(1500)))
            .unwrap_err(),
        Error::InvalidObjectId { .. }
    ));
    assert!(matches!(
        api.remove(oa).unwrap_err(),
        Error::InvalidObjectId { .. }
    ));
    assert!(matches!(
        api.get_stats(oa, &[STAT_INPUT_LOS_EVENTS]).unwrap_err(),
        Error::InvalidObjectId { .. }
    ));
    assert!(vs.store().objects_of(ObjectType::Amplifier).is_empty());
}

#[test]
fn scaled_integers_round_trip_exactly() {
    let vs = Vs::new();
    let switch = vs.create_switch();
    let api = vs.attenuator_api();
    let voa = api
        .create(switch, &AttenuatorConfig::new(1).to_attrs())
        .unwrap();

    // 12.34 dB travels as 1234 hundredths, bit-exact.
    api.set_attribute(
        voa,
        Attr::new(AttenuatorAttrId::Attenuation, AttrValue::Uint(1234)),
    )
    .unwrap();
    assert_eq!(
        get_one(&api, voa, AttenuatorAttrId::Attenuation),
        AttrValue::Uint(1234)
    );

    let oa_api = vs.amplifier_api();
    let oa = oa_api
        .create(switch, &AmplifierConfig::new(1).to_attrs())
        .unwrap();
    oa_api
        .set_attribute(
            oa,
            Attr::new(AmplifierAttrId::TargetOutputPower, AttrValue::Int(-250)),
        )
        .unwrap();
    assert_eq!(
        get_one(&oa_api, oa, AmplifierAttrId::TargetOutputPower),
        AttrValue::Int(-250)
    );
}

#[test]
fn every_settable_attenuator_attr_round_trips() {
    let vs = Vs::new();
    let switch = vs.create_switch();
    let api = vs.attenuator_api();
    let voa = api
        .create(switch, &AttenuatorConfig::new(1).to_attrs())
        .unwrap();

    let cases = [
        (AttenuatorAttrId::AttenuationMode, AttrValue::Enum(0)),
        (AttenuatorAttrId::TargetOutputPower, AttrValue::Uint(150)),
        (AttenuatorAttrId::Attenuation, AttrValue::Uint(1234)),
        (AttenuatorAttrId::Enabled, AttrValue::Bool(false)),
    ];
    for (attr, value) in cases {
        api.set_attribute(voa, Attr::new(attr, value)).unwrap();
        assert_eq!(get_one(&api, voa, attr), value, "attr {:?}", attr);
    }
}

#[test]
fn custom_range_attrs_are_stored_and_served() {
    let vs = Vs::new();
    let switch = vs.create_switch();
    let api = vs.amplifier_api();
    let oa = api
        .create(switch, &AmplifierConfig::new(1).to_attrs())
        .unwrap();

    let vendor_id = CUSTOM_RANGE_START + 0x42;
    api.set_attribute(oa, Attr::custom(vendor_id, AttrValue::Int(-77)))
        .unwrap();
    assert_eq!(
        api.get_attribute(oa, &[AttrId::Custom(vendor_id)]).unwrap(),
        vec![AttrValue::Int(-77)]
    );
    // A custom id never written to this object is unknown for it.
    assert!(api
        .get_attribute(oa, &[AttrId::Custom(CUSTOM_RANGE_START)])
        .is_err());
}

#[test]
fn get_is_whole_call_and_order_preserving() {
    let vs = Vs::new();
    let switch = vs.create_switch();
    let api = vs.attenuator_api();
    let voa = api
        .create(switch, &AttenuatorConfig::new(1).to_attrs())
        .unwrap();

    let values = api
        .get_attribute(
            voa,
            &[
                AttrId::Standard(AttenuatorAttrId::Enabled),
                AttrId::Standard(AttenuatorAttrId::Attenuation),
            ],
        )
        .unwrap();
    assert_eq!(values, vec![AttrValue::Bool(true), AttrValue::Uint(500)]);

    // One bad id fails the whole call; no partial list comes back.
    assert!(api
        .get_attribute(
            voa,
            &[
                AttrId::Standard(AttenuatorAttrId::Enabled),
                AttrId::Custom(CUSTOM_RANGE_START + 9),
            ],
        )
        .is_err());

    // Degenerate empty request.
    assert_eq!(api.get_attribute(voa, &[]).unwrap(), Vec::new());
}

#[test]
fn stats_baseline_clear_and_read_and_clear() {
    let vs = Vs::new();
    let switch = vs.create_switch();
    let api = vs.amplifier_api();
    let oa = api
        .create(switch, &AmplifierConfig::new(1).to_attrs())
        .unwrap();

    let ids = [STAT_INPUT_LOS_EVENTS, STAT_OUTPUT_LOS_EVENTS];
    assert_eq!(api.get_stats(oa, &ids).unwrap(), vec![0, 0]);

    vs.store()
        .bump_counter(ObjectType::Amplifier, oa.as_raw(), STAT_INPUT_LOS_EVENTS, 3)
        .unwrap();
    assert_eq!(api.get_stats(oa, &ids).unwrap(), vec![3, 0]);

    // Plain reads do not disturb the counters.
    assert_eq!(api.get_stats(oa, &ids).unwrap(), vec![3, 0]);

    // Read-and-clear returns the value once, then the baseline.
    assert_eq!(
        api.get_stats_ext(oa, &ids, StatsMode::ReadAndClear).unwrap(),
        vec![3, 0]
    );
    assert_eq!(api.get_stats(oa, &ids).unwrap(), vec![0, 0]);

    vs.store()
        .bump_counter(ObjectType::Amplifier, oa.as_raw(), STAT_OUTPUT_LOS_EVENTS, 5)
        .unwrap();
    api.clear_stats(oa, &ids).unwrap();
    assert_eq!(api.get_stats(oa, &ids).unwrap(), vec![0, 0]);
}

#[test]
fn unknown_counter_id_fails_wholesale() {
    let vs = Vs::new();
    let switch = vs.create_switch();
    let api = vs.attenuator_api();
    let voa = api
        .create(switch, &AttenuatorConfig::new(1).to_attrs())
        .unwrap();

    vs.store()
        .bump_counter(ObjectType::Attenuator, voa.as_raw(), STAT_INPUT_LOS_EVENTS, 9)
        .unwrap();

    let err = api
        .get_stats_ext(
            voa,
            &[STAT_INPUT_LOS_EVENTS, StatId(999)],
            StatsMode::ReadAndClear,
        )
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCounter { id: StatId(999), .. }));
    // The failed read-and-clear cleared nothing.
    assert_eq!(api.get_stats(voa, &[STAT_INPUT_LOS_EVENTS]).unwrap(), vec![9]);

    assert!(api.clear_stats(voa, &[StatId(999)]).is_err());
}

#[test]
fn create_beyond_capacity_fails_cleanly() {
    let vs = Vs::with_driver(StoreConfig { max_objects: 2 }, Arc::new(NullDriver));
    let switch = vs.create_switch();
    let api = vs.attenuator_api();

    api.create(switch, &AttenuatorConfig::new(1).to_attrs())
        .unwrap();
    api.create(switch, &AttenuatorConfig::new(2).to_attrs())
        .unwrap();
    let err = api
        .create(switch, &AttenuatorConfig::new(3).to_attrs())
        .unwrap_err();
    assert!(matches!(err, Error::TableFull { capacity: 2 }));
    assert_eq!(vs.store().objects_of(ObjectType::Attenuator).len(), 2);
}

/// Driver that refuses all creates, or writes to one attribute id, as a
/// vendor adapter would for an unprovisioned slot or an unsupported knob.
struct PickyDriver {
    reject_create: bool,
    reject_set_of: Option<sonic_otai::RawAttrId>,
}

impl sonic_otai_vs::DeviceDriver for PickyDriver {
    fn on_create(
        &self,
        _class: ObjectType,
        _oid: sonic_otai::RawObjectId,
        _attrs: &sonic_otai::AttrMap,
    ) -> Result<(), Error> {
        if self.reject_create {
            return Err(Error::DriverRejected {
                operation: "create",
                message: "slot not provisioned".into(),
            });
        }
        Ok(())
    }

    fn on_set(
        &self,
        _class: ObjectType,
        _oid: sonic_otai::RawObjectId,
        id: sonic_otai::RawAttrId,
        _value: AttrValue,
    ) -> Result<(), Error> {
        if self.reject_set_of == Some(id) {
            return Err(Error::DriverRejected {
                operation: "set",
                message: "attribute not supported by hardware".into(),
            });
        }
        Ok(())
    }

    fn on_remove(&self, _class: ObjectType, _oid: sonic_otai::RawObjectId) -> Result<(), Error> {
        Ok(())
    }

    fn read_attribute(
        &self,
        _class: ObjectType,
        _oid: sonic_otai::RawObjectId,
        _id: sonic_otai::RawAttrId,
    ) -> Option<AttrValue> {
        None
    }

    fn counters(&self, _class: ObjectType) -> &[StatId] {
        &[]
    }
}

#[test]
fn driver_rejected_create_leaves_nothing() {
    let vs = Vs::with_driver(
        StoreConfig::default(),
        Arc::new(PickyDriver {
            reject_create: true,
            reject_set_of: None,
        }),
    );
    let switch = vs.create_switch();

    let err = vs
        .attenuator_api()
        .create(switch, &AttenuatorConfig::new(1).to_attrs())
        .unwrap_err();
    assert!(matches!(err, Error::DriverRejected { operation: "create", .. }));
    assert!(vs.store().is_empty());
}

#[test]
fn driver_rejected_set_keeps_prior_value() {
    let vs = Vs::with_driver(
        StoreConfig::default(),
        Arc::new(PickyDriver {
            reject_create: false,
            reject_set_of: Some(AttenuatorAttrId::Attenuation.raw()),
        }),
    );
    let switch = vs.create_switch();
    let api = vs.attenuator_api();
    let voa = api
        .create(switch, &AttenuatorConfig::new(1).to_attrs())
        .unwrap();

    let err = api
        .set_attribute(
            voa,
            Attr::new(AttenuatorAttrId::Attenuation, AttrValue::Uint(700)),
        )
        .unwrap_err();
    assert!(matches!(err, Error::DriverRejected { operation: "set", .. }));
    assert_eq!(
        get_one(&api, voa, AttenuatorAttrId::Attenuation),
        AttrValue::Uint(500)
    );
}

#[test]
fn handles_are_unique_and_never_reused() {
    let vs = Vs::new();
    let switch = vs.create_switch();
    let api = vs.attenuator_api();

    let a = api
        .create(switch, &AttenuatorConfig::new(1).to_attrs())
        .unwrap();
    api.remove(a).unwrap();
    let b = api
        .create(switch, &AttenuatorConfig::new(1).to_attrs())
        .unwrap();
    assert_ne!(a, b);
    // The old handle stays dead.
    assert!(api.remove(a).is_err());
}
