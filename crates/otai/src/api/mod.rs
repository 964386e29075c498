//! The per-class dispatch contract.
//!
//! The C form of this layer is a struct of seven function pointers per
//! device class, obtained through a capability lookup keyed by class. In
//! Rust that table is the [`DeviceApi`] trait: one object-safe interface a
//! vendor adapter implements per class, with the handle kind and attribute
//! set bound through associated types.
//!
//! Every operation is a single synchronous request/response, atomic from
//! the caller's perspective, with no partial application on failure.
//!
//! # Available device classes
//!
//! - [`attenuator`]: Variable optical attenuator
//! - [`amplifier`]: Optical amplifier

pub mod amplifier;
pub mod attenuator;

use crate::attr::{Attr, AttrId, AttrValue, StandardAttr};
use crate::error::Result;
use crate::stats::{StatId, StatsMode};
use crate::types::{ObjectId, ObjectKind, SwitchOid};

/// The seven-operation dispatch table of a device class.
pub trait DeviceApi {
    /// Handle kind of the objects this API manages.
    type Kind: ObjectKind;
    /// Standard attribute set of the class.
    type Attr: StandardAttr;

    /// Creates an object under `switch` from an attribute list.
    ///
    /// Every mandatory-on-create attribute must appear exactly once;
    /// omitted settable attributes take their documented defaults. On
    /// failure no object is left behind.
    fn create(&self, switch: SwitchOid, attrs: &[Attr<Self::Attr>])
        -> Result<ObjectId<Self::Kind>>;

    /// Removes an object. Its handle is invalid for all later operations.
    fn remove(&self, id: ObjectId<Self::Kind>) -> Result<()>;

    /// Replaces one settable attribute's value atomically.
    fn set_attribute(&self, id: ObjectId<Self::Kind>, attr: Attr<Self::Attr>) -> Result<()>;

    /// Reads current values for the requested ids, in request order.
    ///
    /// Fails as a whole if the handle or any requested id is invalid;
    /// an empty request yields an empty response.
    fn get_attribute(
        &self,
        id: ObjectId<Self::Kind>,
        ids: &[AttrId<Self::Attr>],
    ) -> Result<Vec<AttrValue>>;

    /// Reads counter values for the requested ids, in request order.
    fn get_stats(&self, id: ObjectId<Self::Kind>, counters: &[StatId]) -> Result<Vec<u64>>;

    /// As [`get_stats`](Self::get_stats), under an explicit accounting mode.
    fn get_stats_ext(
        &self,
        id: ObjectId<Self::Kind>,
        counters: &[StatId],
        mode: StatsMode,
    ) -> Result<Vec<u64>>;

    /// Resets the named counters to their baseline.
    fn clear_stats(&self, id: ObjectId<Self::Kind>, counters: &[StatId]) -> Result<()>;
}
