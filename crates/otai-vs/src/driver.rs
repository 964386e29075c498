//! The vendor driver seam.
//!
//! Hardware effects are out of scope for the object store: it records
//! attribute state and delegates the physical side of every operation to
//! a [`DeviceDriver`]. A production deployment plugs a vendor adapter in
//! here; tests and development run on [`NullDriver`].

use sonic_otai::attr::{AttrMap, AttrValue, RawAttrId};
use sonic_otai::error::Result;
use sonic_otai::stats::StatId;
use sonic_otai::types::{ObjectType, RawObjectId};

/// Input LOS transition count, supported by the default driver for both
/// device classes.
pub const STAT_INPUT_LOS_EVENTS: StatId = StatId(0);

/// Output LOS transition count, supported by the default driver for both
/// device classes.
pub const STAT_OUTPUT_LOS_EVENTS: StatId = StatId(1);

/// Hardware hooks behind the object store.
///
/// Each hook runs inside the store's per-object critical section, before
/// the corresponding state change is committed; returning an error aborts
/// the operation with nothing applied. Implementations must therefore not
/// call back into the store.
pub trait DeviceDriver: Send + Sync {
    /// Applies a validated create to the hardware.
    fn on_create(&self, class: ObjectType, oid: RawObjectId, attrs: &AttrMap) -> Result<()>;

    /// Applies one validated attribute write to the hardware.
    fn on_set(&self, class: ObjectType, oid: RawObjectId, id: RawAttrId, value: AttrValue)
        -> Result<()>;

    /// Releases hardware resources for an object being removed.
    fn on_remove(&self, class: ObjectType, oid: RawObjectId) -> Result<()>;

    /// Samples a read-only, device-derived attribute.
    ///
    /// Returning `None` means no reading is available; the store then
    /// reports the type's zero value.
    fn read_attribute(&self, class: ObjectType, oid: RawObjectId, id: RawAttrId)
        -> Option<AttrValue>;

    /// The statistics counters a device class supports.
    fn counters(&self, class: ObjectType) -> &[StatId];
}

/// Driver with no hardware behind it.
///
/// Accepts every operation, reports no telemetry, and supports the two
/// generic LOS event counters.
#[derive(Debug, Default)]
pub struct NullDriver;

impl DeviceDriver for NullDriver {
    fn on_create(&self, _class: ObjectType, _oid: RawObjectId, _attrs: &AttrMap) -> Result<()> {
        Ok(())
    }

    fn on_set(
        &self,
        _class: ObjectType,
        _oid: RawObjectId,
        _id: RawAttrId,
        _value: AttrValue,
    ) -> Result<()> {
        Ok(())
    }

    fn on_remove(&self, _class: ObjectType, _oid: RawObjectId) -> Result<()> {
        Ok(())
    }

    fn read_attribute(
        &self,
        _class: ObjectType,
        _oid: RawObjectId,
        _id: RawAttrId,
    ) -> Option<AttrValue> {
        None
    }

    fn counters(&self, _class: ObjectType) -> &[StatId] {
        &[STAT_INPUT_LOS_EVENTS, STAT_OUTPUT_LOS_EVENTS]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_driver_accepts_everything() {
        let driver = NullDriver;
        assert!(driver
            .on_create(ObjectType::Attenuator, 1, &AttrMap::new())
            .is_ok());
        assert!(driver
            .on_set(ObjectType::Amplifier, 1, 6, AttrValue::Uint(2000))
            .is_ok());
        assert!(driver.on_remove(ObjectType::Attenuator, 1).is_ok());
        assert_eq!(driver.read_attribute(ObjectType::Amplifier, 1, 34), None);
        assert_eq!(driver.counters(ObjectType::Attenuator).len(), 2);
    }
}
