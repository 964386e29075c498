//! OTAI (Optical Transport Abstraction Interface) device-class contract.
//!
//! This crate defines the managed-object contract for optical network
//! elements — currently the variable optical attenuator and the optical
//! amplifier — as consumed by orchestration daemons and implemented by
//! vendor adapters.
//!
//! # Architecture
//!
//! - [`types`]: Type-safe object IDs and the device-class enumeration
//! - [`error`]: Status codes and structured error handling
//! - [`attr`]: The attribute model (value types, access discipline,
//!   standard/custom id ranges, create-list validation)
//! - [`units`]: Scaled-integer fixed-point optical units
//! - [`stats`]: Statistics counter ids and accounting modes
//! - [`api`]: The per-class seven-operation dispatch trait and the
//!   attribute tables of each device class
//!
//! # Example
//!
//! ```
//! use sonic_otai::api::attenuator::{AttenuatorConfig, AttenuatorAttrId};
//! use sonic_otai::attr::{build_create_map, AttrValue, StandardAttr};
//! use sonic_otai::units::Db;
//!
//! let mut config = AttenuatorConfig::new(1);
//! config.attenuation = Db::from_hundredths(1234);
//!
//! let initial = build_create_map(&config.to_attrs()).unwrap();
//! assert_eq!(
//!     initial[&AttenuatorAttrId::Attenuation.raw()],
//!     AttrValue::Uint(1234),
//! );
//! ```

pub mod api;
pub mod attr;
pub mod error;
pub mod stats;
pub mod types;
pub mod units;

// Re-export commonly used types
pub use api::DeviceApi;
pub use attr::{
    Attr, AttrAccess, AttrId, AttrKind, AttrMap, AttrProperty, AttrValue, RawAttrId, StandardAttr,
    CUSTOM_RANGE_END, CUSTOM_RANGE_START,
};
pub use error::{Error, Result, Status};
pub use stats::{StatId, StatsMode};
pub use types::{
    AmplifierKind, AmplifierOid, AttenuatorKind, AttenuatorOid, ObjectId, ObjectKind, ObjectType,
    RawObjectId, SwitchKind, SwitchOid,
};
pub use units::{Db, Dbm};
