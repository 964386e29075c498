//! Virtual (in-memory) implementation of the OTAI device-class contract.
//!
//! This crate realizes the dispatch tables defined by `sonic-otai` against
//! a registry-backed object store, with hardware effects delegated to a
//! pluggable [`DeviceDriver`]. It is the implementation used for
//! development and testing; production deployments substitute a vendor
//! driver behind the same seam.
//!
//! # Example
//!
//! ```
//! use sonic_otai::api::attenuator::{AttenuatorAttrId, AttenuatorConfig};
//! use sonic_otai::{Attr, AttrId, AttrValue, DeviceApi};
//! use sonic_otai_vs::Vs;
//!
//! let vs = Vs::new();
//! let switch = vs.create_switch();
//! let api = vs.attenuator_api();
//!
//! let voa = api.create(switch, &AttenuatorConfig::new(1).to_attrs()).unwrap();
//! api.set_attribute(voa, Attr::new(AttenuatorAttrId::Attenuation, AttrValue::Uint(1234)))
//!     .unwrap();
//!
//! let values = api
//!     .get_attribute(voa, &[AttrId::Standard(AttenuatorAttrId::Attenuation)])
//!     .unwrap();
//! assert_eq!(values, vec![AttrValue::Uint(1234)]);
//! ```

pub mod api;
pub mod driver;
pub mod store;

pub use api::{AmplifierClass, AttenuatorClass, Vs, VsApi, VsClass};
pub use driver::{DeviceDriver, NullDriver, STAT_INPUT_LOS_EVENTS, STAT_OUTPUT_LOS_EVENTS};
pub use store::{ObjectStore, StoreConfig};
