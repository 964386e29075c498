//! Type-safe OTAI object ID wrappers.
//!
//! This module provides strongly-typed wrappers for OTAI object IDs,
//! preventing accidental mixing of different object types (e.g., passing an
//! attenuator OID where an amplifier OID is expected). The raw bits of an
//! OID are assigned by the owning adapter and are opaque to callers.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

/// Raw OTAI object ID type (matches the C `sai_object_id_t` width).
pub type RawObjectId = u64;

/// Device-class discriminator for managed objects.
///
/// The numeric codes are part of the wire contract: they key capability
/// lookup and are persisted by consumers, so they must stay stable across
/// versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum ObjectType {
    /// The owning switch/linecard context.
    Switch = 1,
    /// Variable optical attenuator.
    Attenuator = 2,
    /// Optical amplifier.
    Amplifier = 3,
}

impl ObjectType {
    /// Stable numeric code for this class.
    pub const fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(ObjectType::Switch),
            2 => Some(ObjectType::Attenuator),
            3 => Some(ObjectType::Amplifier),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ObjectType::Switch => "switch",
            ObjectType::Attenuator => "attenuator",
            ObjectType::Amplifier => "amplifier",
        };
        write!(f, "{}", s)
    }
}

/// Marker trait for OTAI object kinds.
///
/// Each managed-object class implements this trait to enable compile-time
/// type checking of object IDs.
pub trait ObjectKind: Send + Sync + 'static {
    /// The device class this kind belongs to.
    const OBJECT_TYPE: ObjectType;

    /// Returns the object type name for debugging.
    fn type_name() -> &'static str;
}

/// A type-safe OTAI object ID.
///
/// The phantom type parameter `T` indicates what kind of managed object
/// this ID refers to, so IDs of different classes cannot be mixed.
///
/// # Examples
///
/// ```
/// use sonic_otai::{AttenuatorOid, AmplifierOid};
///
/// let voa: AttenuatorOid = AttenuatorOid::from_raw(0x2000000000001).unwrap();
/// let oa: AmplifierOid = AmplifierOid::from_raw(0x3000000000001).unwrap();
///
/// // This would fail to compile:
/// // fn takes_voa(id: AttenuatorOid) {}
/// // takes_voa(oa);  // Error: expected AttenuatorOid, found AmplifierOid
/// ```
#[derive(Clone, Copy)]
pub struct ObjectId<T: ObjectKind> {
    raw: RawObjectId,
    _marker: PhantomData<T>,
}

impl<T: ObjectKind> ObjectId<T> {
    /// The null object ID.
    pub const NULL: Self = Self {
        raw: 0,
        _marker: PhantomData,
    };

    /// Creates a new object ID from a raw value.
    ///
    /// Returns `None` if the raw value is 0 (null object ID).
    /// Use the `NULL` constant for explicitly null IDs.
    pub fn from_raw(raw: RawObjectId) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(Self {
                raw,
                _marker: PhantomData,
            })
        }
    }

    /// Creates a new object ID from a raw value, including null.
    pub const fn from_raw_unchecked(raw: RawObjectId) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    /// Returns the raw object ID value.
    pub const fn as_raw(&self) -> RawObjectId {
        self.raw
    }

    /// Returns true if this is a null object ID.
    pub const fn is_null(&self) -> bool {
        self.raw == 0
    }

    /// Returns true if this is a valid (non-null) object ID.
    pub const fn is_valid(&self) -> bool {
        self.raw != 0
    }
}

impl<T: ObjectKind> fmt::Debug for ObjectId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:016x})", T::type_name(), self.raw)
    }
}

impl<T: ObjectKind> fmt::Display for ObjectId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.raw)
    }
}

impl<T: ObjectKind> PartialEq for ObjectId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T: ObjectKind> Eq for ObjectId<T> {}

impl<T: ObjectKind> Hash for ObjectId<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T: ObjectKind> Default for ObjectId<T> {
    fn default() -> Self {
        Self::NULL
    }
}

macro_rules! define_object_kind {
    ($name:ident, $object_type:expr, $type_name:literal, $oid_alias:ident) => {
        /// Marker type for $type_name objects.
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl ObjectKind for $name {
            const OBJECT_TYPE: ObjectType = $object_type;

            fn type_name() -> &'static str {
                $type_name
            }
        }

        /// Type alias for $type_name object IDs.
        pub type $oid_alias = ObjectId<$name>;
    };
}

define_object_kind!(SwitchKind, ObjectType::Switch, "Switch", SwitchOid);
define_object_kind!(AttenuatorKind, ObjectType::Attenuator, "Attenuator", AttenuatorOid);
define_object_kind!(AmplifierKind, ObjectType::Amplifier, "Amplifier", AmplifierOid);
