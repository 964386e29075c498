//! Dispatch-table adapters over the object store.
//!
//! [`Vs`] plays the role of the capability lookup: it owns the store and
//! the driver, and hands out one [`VsApi`] per device class. `VsApi` is
//! the vendor-side realization of [`DeviceApi`] — all validation and
//! bookkeeping happens in the store; the adapter only binds the class's
//! handle kind and attribute set.

use std::marker::PhantomData;
use std::sync::Arc;

use sonic_otai::api::amplifier::AmplifierAttrId;
use sonic_otai::api::attenuator::AttenuatorAttrId;
use sonic_otai::api::DeviceApi;
use sonic_otai::attr::{Attr, AttrId, AttrValue, StandardAttr};
use sonic_otai::error::Result;
use sonic_otai::stats::{StatId, StatsMode};
use sonic_otai::types::{
    AmplifierKind, AttenuatorKind, ObjectId, ObjectKind, SwitchOid,
};

use crate::driver::{DeviceDriver, NullDriver};
use crate::store::{ObjectStore, StoreConfig};

/// Binds a device class's handle kind to its attribute set.
pub trait VsClass: Send + Sync + 'static {
    type Kind: ObjectKind;
    type Attr: StandardAttr;
}

/// Variable optical attenuator class.
pub struct AttenuatorClass;

impl VsClass for AttenuatorClass {
    type Kind = AttenuatorKind;
    type Attr = AttenuatorAttrId;
}

/// Optical amplifier class.
pub struct AmplifierClass;

impl VsClass for AmplifierClass {
    type Kind = AmplifierKind;
    type Attr = AmplifierAttrId;
}

/// Per-class dispatch table backed by the shared store.
pub struct VsApi<C: VsClass> {
    store: Arc<ObjectStore>,
    _marker: PhantomData<C>,
}

impl<C: VsClass> VsApi<C> {
    fn new(store: Arc<ObjectStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }
}

impl<C: VsClass> DeviceApi for VsApi<C> {
    type Kind = C::Kind;
    type Attr = C::Attr;

    fn create(
        &self,
        switch: SwitchOid,
        attrs: &[Attr<Self::Attr>],
    ) -> Result<ObjectId<Self::Kind>> {
        let oid = self.store.create::<Self::Attr>(switch.as_raw(), attrs)?;
        Ok(ObjectId::from_raw_unchecked(oid))
    }

    fn remove(&self, id: ObjectId<Self::Kind>) -> Result<()> {
        self.store
            .remove(<Self::Attr as StandardAttr>::OBJECT_TYPE, id.as_raw())
    }

    fn set_attribute(&self, id: ObjectId<Self::Kind>, attr: Attr<Self::Attr>) -> Result<()> {
        self.store.set(id.as_raw(), attr)
    }

    fn get_attribute(
        &self,
        id: ObjectId<Self::Kind>,
        ids: &[AttrId<Self::Attr>],
    ) -> Result<Vec<AttrValue>> {
        self.store.get(id.as_raw(), ids)
    }

    fn get_stats(&self, id: ObjectId<Self::Kind>, counters: &[StatId]) -> Result<Vec<u64>> {
        self.store.get_stats(
            <Self::Attr as StandardAttr>::OBJECT_TYPE,
            id.as_raw(),
            counters,
            StatsMode::Read,
        )
    }

    fn get_stats_ext(
        &self,
        id: ObjectId<Self::Kind>,
        counters: &[StatId],
        mode: StatsMode,
    ) -> Result<Vec<u64>> {
        self.store.get_stats(
            <Self::Attr as StandardAttr>::OBJECT_TYPE,
            id.as_raw(),
            counters,
            mode,
        )
    }

    fn clear_stats(&self, id: ObjectId<Self::Kind>, counters: &[StatId]) -> Result<()> {
        self.store.clear_stats(
            <Self::Attr as StandardAttr>::OBJECT_TYPE,
            id.as_raw(),
            counters,
        )
    }
}

/// The virtual device context.
///
/// Owns the object store and the driver; the capability-lookup analog
/// keyed by device class is the pair of `*_api()` accessors.
pub struct Vs {
    store: Arc<ObjectStore>,
}

impl Vs {
    /// A context on the default config with no hardware behind it.
    pub fn new() -> Self {
        Self::with_driver(StoreConfig::default(), Arc::new(NullDriver))
    }

    /// A context over a vendor driver.
    pub fn with_driver(config: StoreConfig, driver: Arc<dyn DeviceDriver>) -> Self {
        Self {
            store: Arc::new(ObjectStore::new(config, driver)),
        }
    }

    /// Creates a switch context for device objects to live under.
    pub fn create_switch(&self) -> SwitchOid {
        SwitchOid::from_raw_unchecked(self.store.create_switch())
    }

    /// Removes an empty switch context.
    pub fn remove_switch(&self, switch: SwitchOid) -> Result<()> {
        self.store.remove_switch(switch.as_raw())
    }

    /// The attenuator dispatch table.
    pub fn attenuator_api(&self) -> VsApi<AttenuatorClass> {
        VsApi::new(Arc::clone(&self.store))
    }

    /// The amplifier dispatch table.
    pub fn amplifier_api(&self) -> VsApi<AmplifierClass> {
        VsApi::new(Arc::clone(&self.store))
    }

    /// The backing store, for enumeration and diagnostics.
    pub fn store(&self) -> &Arc<ObjectStore> {
        &self.store
    }
}

impl Default for Vs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonic_otai::api::attenuator::AttenuatorConfig;
    use sonic_otai::types::ObjectType;

    #[test]
    fn test_api_query_per_class() {
        let vs = Vs::new();
        let switch = vs.create_switch();

        let voa = vs
            .attenuator_api()
            .create(switch, &AttenuatorConfig::new(1).to_attrs())
            .unwrap();
        assert!(voa.is_valid());
        assert_eq!(vs.store().objects_of(ObjectType::Attenuator), vec![voa.as_raw()]);
        assert!(vs.store().objects_of(ObjectType::Amplifier).is_empty());
    }

    #[test]
    fn test_null_handle_is_invalid() {
        let vs = Vs::new();
        assert!(vs.attenuator_api().remove(Default::default()).is_err());
    }
}
