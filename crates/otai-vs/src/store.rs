//! In-memory managed-object store.
//!
//! The store owns every created object: its class, its owning switch, its
//! attribute map and its statistics counters. Object ids encode the class
//! code in the top byte over a monotonically increasing sequence, so a
//! removed handle can never alias a later object.
//!
//! Concurrency: records live in a [`DashMap`]; an operation holds the
//! record's entry for its whole critical section, so concurrent calls
//! against the same handle are serialized while distinct handles proceed
//! in parallel. Driver hooks run inside that section, before the state
//! change commits, which keeps each operation atomic: a rejected hook
//! leaves the record untouched.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use serde_json::json;
use tracing::{debug, warn};

use sonic_otai::attr::{
    build_create_map, is_custom_attr, Attr, AttrAccess, AttrId, AttrMap, AttrValue, RawAttrId,
    StandardAttr,
};
use sonic_otai::error::{Error, Result};
use sonic_otai::stats::{StatId, StatsMode};
use sonic_otai::types::{ObjectType, RawObjectId};

use crate::driver::DeviceDriver;

/// Store tuning knobs.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum number of live device objects (switches excluded).
    pub max_objects: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { max_objects: 1024 }
    }
}

#[derive(Debug)]
struct ObjectRecord {
    class: ObjectType,
    switch: RawObjectId,
    attrs: AttrMap,
    counters: HashMap<StatId, u64>,
}

/// Registry of live managed objects.
pub struct ObjectStore {
    config: StoreConfig,
    driver: Arc<dyn DeviceDriver>,
    objects: DashMap<RawObjectId, ObjectRecord>,
    switches: DashSet<RawObjectId>,
    next_seq: AtomicU64,
}

impl ObjectStore {
    pub fn new(config: StoreConfig, driver: Arc<dyn DeviceDriver>) -> Self {
        Self {
            config,
            driver,
            objects: DashMap::new(),
            switches: DashSet::new(),
            next_seq: AtomicU64::new(1),
        }
    }

    /// Mints an oid tagging the class code in the top byte. Sequence
    /// numbers are never reused.
    fn alloc_oid(&self, class: ObjectType) -> RawObjectId {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        (u64::from(class.code()) << 56) | seq
    }

    /// Creates a switch context.
    pub fn create_switch(&self) -> RawObjectId {
        let oid = self.alloc_oid(ObjectType::Switch);
        self.switches.insert(oid);
        debug!(oid, "switch created");
        oid
    }

    /// Removes a switch context. Fails while device objects still live
    /// under it.
    pub fn remove_switch(&self, switch: RawObjectId) -> Result<()> {
        if !self.switches.contains(&switch) {
            return Err(Error::InvalidSwitchId { oid: switch });
        }
        if self.objects.iter().any(|r| r.switch == switch) {
            return Err(Error::ObjectInUse {
                class: ObjectType::Switch,
                oid: switch,
            });
        }
        self.switches.remove(&switch);
        debug!(oid = switch, "switch removed");
        Ok(())
    }

    /// Creates a device object from a validated attribute list.
    pub fn create<A: StandardAttr>(
        &self,
        switch: RawObjectId,
        attrs: &[Attr<A>],
    ) -> Result<RawObjectId> {
        let class = A::OBJECT_TYPE;
        if !self.switches.contains(&switch) {
            warn!(%class, switch, "create rejected: unknown switch");
            return Err(Error::InvalidSwitchId { oid: switch });
        }
        let map = build_create_map(attrs).map_err(|err| {
            warn!(%class, %err, "create rejected");
            err
        })?;
        if self.objects.len() >= self.config.max_objects {
            warn!(%class, capacity = self.config.max_objects, "create rejected: table full");
            return Err(Error::TableFull {
                capacity: self.config.max_objects,
            });
        }

        let oid = self.alloc_oid(class);
        self.driver.on_create(class, oid, &map)?;

        let counters = self
            .driver
            .counters(class)
            .iter()
            .map(|&id| (id, 0))
            .collect();
        self.objects.insert(
            oid,
            ObjectRecord {
                class,
                switch,
                attrs: map,
                counters,
            },
        );
        debug!(%class, oid, "object created");
        Ok(oid)
    }

    /// Removes a device object. The handle is invalid afterwards.
    pub fn remove(&self, class: ObjectType, oid: RawObjectId) -> Result<()> {
        match self.objects.entry(oid) {
            Entry::Occupied(entry) if entry.get().class == class => {
                self.driver.on_remove(class, oid)?;
                entry.remove();
                debug!(%class, oid, "object removed");
                Ok(())
            }
            _ => {
                warn!(%class, oid, "remove rejected: unknown object");
                Err(Error::InvalidObjectId { class, oid })
            }
        }
    }

    /// Replaces one settable attribute's value.
    pub fn set<A: StandardAttr>(&self, oid: RawObjectId, attr: Attr<A>) -> Result<()> {
        let class = A::OBJECT_TYPE;
        let raw_id = validate_set(&attr).map_err(|err| {
            warn!(%class, oid, %err, "set rejected");
            err
        })?;

        let mut record = self
            .objects
            .get_mut(&oid)
            .filter(|r| r.class == class)
            .ok_or(Error::InvalidObjectId { class, oid })?;
        self.driver.on_set(class, oid, raw_id, attr.value)?;
        record.attrs.insert(raw_id, attr.value);
        debug!(%class, oid, attr = raw_id, "attribute set");
        Ok(())
    }

    /// Reads current values for the requested ids, in request order.
    ///
    /// Read-only attributes come from the driver (zero of their type when
    /// no reading is available); everything else comes from the stored
    /// map. Fails as a whole on any invalid id.
    pub fn get<A: StandardAttr>(
        &self,
        oid: RawObjectId,
        ids: &[AttrId<A>],
    ) -> Result<Vec<AttrValue>> {
        let class = A::OBJECT_TYPE;
        let record = self
            .objects
            .get(&oid)
            .filter(|r| r.class == class)
            .ok_or(Error::InvalidObjectId { class, oid })?;

        let mut values = Vec::with_capacity(ids.len());
        for id in ids {
            let value = match id {
                AttrId::Standard(a) => {
                    let prop = a.property();
                    if prop.access == AttrAccess::ReadOnly {
                        self.driver
                            .read_attribute(class, oid, prop.id)
                            .unwrap_or(AttrValue::zero_of(&prop.kind))
                    } else {
                        record
                            .attrs
                            .get(&prop.id)
                            .copied()
                            .unwrap_or(AttrValue::zero_of(&prop.kind))
                    }
                }
                AttrId::Custom(raw) => {
                    if !is_custom_attr(*raw) {
                        return Err(Error::InvalidAttribute { class, id: *raw });
                    }
                    *record.attrs.get(raw).ok_or(Error::InvalidAttribute {
                        class,
                        id: *raw,
                    })?
                }
            };
            values.push(value);
        }
        Ok(values)
    }

    /// Reads counter values for the requested ids, in request order.
    ///
    /// Under [`StatsMode::ReadAndClear`], each counter is reset to zero
    /// after being sampled. Ids are validated up front so a failed call
    /// clears nothing.
    pub fn get_stats(
        &self,
        class: ObjectType,
        oid: RawObjectId,
        counters: &[StatId],
        mode: StatsMode,
    ) -> Result<Vec<u64>> {
        let mut record = self
            .objects
            .get_mut(&oid)
            .filter(|r| r.class == class)
            .ok_or(Error::InvalidObjectId { class, oid })?;

        for &id in counters {
            if !record.counters.contains_key(&id) {
                return Err(Error::InvalidCounter { class, id });
            }
        }

        let mut values = Vec::with_capacity(counters.len());
        for &id in counters {
            if let Some(counter) = record.counters.get_mut(&id) {
                values.push(*counter);
                if mode == StatsMode::ReadAndClear {
                    *counter = 0;
                }
            }
        }
        Ok(values)
    }

    /// Resets the named counters to zero.
    pub fn clear_stats(
        &self,
        class: ObjectType,
        oid: RawObjectId,
        counters: &[StatId],
    ) -> Result<()> {
        let mut record = self
            .objects
            .get_mut(&oid)
            .filter(|r| r.class == class)
            .ok_or(Error::InvalidObjectId { class, oid })?;

        for &id in counters {
            if !record.counters.contains_key(&id) {
                return Err(Error::InvalidCounter { class, id });
            }
        }
        for &id in counters {
            record.counters.insert(id, 0);
        }
        Ok(())
    }

    /// Bumps a counter, as a driver's interrupt path would.
    pub fn bump_counter(
        &self,
        class: ObjectType,
        oid: RawObjectId,
        id: StatId,
        delta: u64,
    ) -> Result<()> {
        let mut record = self
            .objects
            .get_mut(&oid)
            .filter(|r| r.class == class)
            .ok_or(Error::InvalidObjectId { class, oid })?;
        let counter = record
            .counters
            .get_mut(&id)
            .ok_or(Error::InvalidCounter { class, id })?;
        *counter += delta;
        Ok(())
    }

    /// Live object ids of a class, in no particular order.
    pub fn objects_of(&self, class: ObjectType) -> Vec<RawObjectId> {
        self.objects
            .iter()
            .filter(|r| r.class == class)
            .map(|r| *r.key())
            .collect()
    }

    /// Number of live device objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Diagnostics snapshot of every live object.
    pub fn dump(&self) -> serde_json::Value {
        let objects: Vec<_> = self
            .objects
            .iter()
            .map(|r| {
                let attrs: HashMap<String, AttrValue> = r
                    .attrs
                    .iter()
                    .map(|(id, v)| (format!("0x{id:x}"), *v))
                    .collect();
                let counters: HashMap<String, u64> = r
                    .counters
                    .iter()
                    .map(|(id, v)| (id.to_string(), *v))
                    .collect();
                json!({
                    "oid": format!("0x{:016x}", r.key()),
                    "class": r.class,
                    "switch": format!("0x{:016x}", r.switch),
                    "attrs": attrs,
                    "counters": counters,
                })
            })
            .collect();
        json!({ "objects": objects })
    }
}

/// Checks the set-time access discipline and value contract, yielding the
/// raw id to store.
fn validate_set<A: StandardAttr>(attr: &Attr<A>) -> Result<RawAttrId> {
    match attr.id {
        AttrId::Standard(a) => {
            let prop = a.property();
            match prop.access {
                AttrAccess::ReadOnly => return Err(Error::ReadOnlyAttribute { name: prop.name }),
                AttrAccess::CreateOnly => {
                    return Err(Error::CreateOnlyAttribute { name: prop.name })
                }
                AttrAccess::CreateAndSet => {}
            }
            prop.check_value(&attr.value)?;
            Ok(prop.id)
        }
        AttrId::Custom(raw) => {
            if !is_custom_attr(raw) {
                return Err(Error::InvalidAttribute {
                    class: A::OBJECT_TYPE,
                    id: raw,
                });
            }
            Ok(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{NullDriver, STAT_INPUT_LOS_EVENTS};
    use sonic_otai::api::attenuator::{AttenuatorAttrId, AttenuatorConfig};

    fn store() -> ObjectStore {
        ObjectStore::new(StoreConfig::default(), Arc::new(NullDriver))
    }

    #[test]
    fn test_oid_encodes_class() {
        let store = store();
        let switch = store.create_switch();
        let oid = store
            .create(switch, &AttenuatorConfig::new(1).to_attrs())
            .unwrap();
        assert_eq!(oid >> 56, u64::from(ObjectType::Attenuator.code()));
        assert_eq!(switch >> 56, u64::from(ObjectType::Switch.code()));
    }

    #[test]
    fn test_create_requires_switch() {
        let store = store();
        let err = store
            .create(0xdead, &AttenuatorConfig::new(1).to_attrs())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSwitchId { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_capacity_bound() {
        let store = ObjectStore::new(StoreConfig { max_objects: 1 }, Arc::new(NullDriver));
        let switch = store.create_switch();
        store
            .create(switch, &AttenuatorConfig::new(1).to_attrs())
            .unwrap();
        let err = store
            .create(switch, &AttenuatorConfig::new(2).to_attrs())
            .unwrap_err();
        assert!(matches!(err, Error::TableFull { capacity: 1 }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_switch_in_use() {
        let store = store();
        let switch = store.create_switch();
        let oid = store
            .create(switch, &AttenuatorConfig::new(1).to_attrs())
            .unwrap();
        assert!(matches!(
            store.remove_switch(switch).unwrap_err(),
            Error::ObjectInUse { .. }
        ));
        store.remove(ObjectType::Attenuator, oid).unwrap();
        store.remove_switch(switch).unwrap();
    }

    #[test]
    fn test_class_mismatch_is_invalid_handle() {
        let store = store();
        let switch = store.create_switch();
        let oid = store
            .create(switch, &AttenuatorConfig::new(1).to_attrs())
            .unwrap();
        // An attenuator handle is not an amplifier handle.
        let err = store.remove(ObjectType::Amplifier, oid).unwrap_err();
        assert!(matches!(err, Error::InvalidObjectId { .. }));
    }

    #[test]
    fn test_counters_seeded_at_zero() {
        let store = store();
        let switch = store.create_switch();
        let oid = store
            .create(switch, &AttenuatorConfig::new(1).to_attrs())
            .unwrap();
        let values = store
            .get_stats(
                ObjectType::Attenuator,
                oid,
                &[STAT_INPUT_LOS_EVENTS],
                StatsMode::Read,
            )
            .unwrap();
        assert_eq!(values, vec![0]);
    }

    #[test]
    fn test_dump_lists_objects() {
        let store = store();
        let switch = store.create_switch();
        store
            .create(switch, &AttenuatorConfig::new(1).to_attrs())
            .unwrap();
        let dump = store.dump();
        assert_eq!(dump["objects"].as_array().unwrap().len(), 1);
        assert_eq!(dump["objects"][0]["class"], "Attenuator");
    }

    #[test]
    fn test_get_unset_custom_attr_fails() {
        let store = store();
        let switch = store.create_switch();
        let oid = store
            .create(switch, &AttenuatorConfig::new(1).to_attrs())
            .unwrap();
        let err = store
            .get::<AttenuatorAttrId>(oid, &[AttrId::Custom(sonic_otai::CUSTOM_RANGE_START)])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAttribute { .. }));
    }
}
