//! Attribute model shared by every device class.
//!
//! An attribute is a named, typed property of a managed object, identified
//! by a stable numeric id. Each class publishes a static table of
//! [`AttrProperty`] rows describing its closed standard attribute set: the
//! value type, the access discipline, and the default applied when a
//! settable attribute is omitted at create time.
//!
//! Standard ids for a class are contiguous from zero; ids from
//! [`CUSTOM_RANGE_START`] up are reserved for vendor extensions and pass
//! through this layer unvalidated. Ids outside the union of the two ranges
//! are rejected.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::ObjectType;

/// Raw attribute id type.
pub type RawAttrId = u32;

/// First id of the vendor-extension range.
pub const CUSTOM_RANGE_START: RawAttrId = 0x1000_0000;

/// One past the last id of the vendor-extension range.
pub const CUSTOM_RANGE_END: RawAttrId = 0x2000_0000;

/// Returns true if `id` lies in the vendor-extension range.
pub const fn is_custom_attr(id: RawAttrId) -> bool {
    id >= CUSTOM_RANGE_START && id < CUSTOM_RANGE_END
}

/// Access discipline of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttrAccess {
    /// Settable only at object creation, immutable thereafter.
    CreateOnly,
    /// Settable at creation and afterwards.
    CreateAndSet,
    /// Derived by the device; never writable by the caller.
    ReadOnly,
}

impl fmt::Display for AttrAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AttrAccess::CreateOnly => "create-only",
            AttrAccess::CreateAndSet => "create-and-set",
            AttrAccess::ReadOnly => "read-only",
        };
        write!(f, "{}", s)
    }
}

/// Static value-type descriptor of an attribute.
///
/// `decimals` is the number of implied fixed-point digits carried by the
/// scaled integer (0 for plain counts); enum attributes list their variant
/// names, and a discriminant is valid iff it indexes into that list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    Bool,
    Uint { decimals: u8 },
    Int { decimals: u8 },
    Enum { values: &'static [&'static str] },
}

impl AttrKind {
    const fn type_name(&self) -> &'static str {
        match self {
            AttrKind::Bool => "bool",
            AttrKind::Uint { .. } => "uint",
            AttrKind::Int { .. } => "int",
            AttrKind::Enum { .. } => "enum",
        }
    }
}

/// Runtime attribute value.
///
/// Fixed-point quantities travel as scaled integers, never as floats, so
/// values interchange bit-exactly. Enum values carry the raw discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttrValue {
    Bool(bool),
    Uint(u32),
    Int(i32),
    Enum(u32),
}

impl AttrValue {
    const fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Bool(_) => "bool",
            AttrValue::Uint(_) => "uint",
            AttrValue::Int(_) => "int",
            AttrValue::Enum(_) => "enum",
        }
    }

    /// The zero value for a kind, used when a read-only attribute has no
    /// driver-supplied reading yet.
    pub const fn zero_of(kind: &AttrKind) -> AttrValue {
        match kind {
            AttrKind::Bool => AttrValue::Bool(false),
            AttrKind::Uint { .. } => AttrValue::Uint(0),
            AttrKind::Int { .. } => AttrValue::Int(0),
            AttrKind::Enum { .. } => AttrValue::Enum(0),
        }
    }
}

/// One row of a class's static attribute table.
#[derive(Debug, Clone, Copy)]
pub struct AttrProperty {
    /// Stable numeric id within the class's standard range.
    pub id: RawAttrId,
    /// Attribute name, for diagnostics.
    pub name: &'static str,
    /// Declared value type.
    pub kind: AttrKind,
    /// Access discipline.
    pub access: AttrAccess,
    /// Must be supplied at create time.
    pub mandatory_on_create: bool,
    /// Applied when a settable attribute is omitted at create time.
    pub default: Option<AttrValue>,
}

impl AttrProperty {
    /// Validates a value against this attribute's declared type and range.
    pub fn check_value(&self, value: &AttrValue) -> Result<()> {
        match (&self.kind, value) {
            (AttrKind::Bool, AttrValue::Bool(_)) => Ok(()),
            (AttrKind::Uint { .. }, AttrValue::Uint(_)) => Ok(()),
            (AttrKind::Int { .. }, AttrValue::Int(_)) => Ok(()),
            (AttrKind::Enum { values }, AttrValue::Enum(v)) => {
                if (*v as usize) < values.len() {
                    Ok(())
                } else {
                    Err(Error::ValueOutOfRange {
                        name: self.name,
                        value: i64::from(*v),
                    })
                }
            }
            _ => Err(Error::WrongValueType {
                name: self.name,
                expected: self.kind.type_name(),
                got: value.type_name(),
            }),
        }
    }
}

/// Implemented by each class's standard attribute-id enum.
///
/// Binds the enum to its static property table and gives raw-id
/// round-tripping. Raw ids are stable across versions.
pub trait StandardAttr: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// The device class this attribute set belongs to.
    const OBJECT_TYPE: ObjectType;

    /// The class's static attribute table, ordered by id.
    const ATTRS: &'static [AttrProperty];

    /// Returns the stable numeric id.
    fn raw(self) -> RawAttrId;

    /// Looks up a standard attribute by raw id.
    fn from_raw(raw: RawAttrId) -> Option<Self>;

    /// Returns this attribute's table row.
    fn property(self) -> &'static AttrProperty {
        // Tables are indexed by id; enforced by tests on each class.
        &Self::ATTRS[self.raw() as usize]
    }
}

/// An attribute id: a member of the class's closed standard set, or a
/// vendor-extension id from the custom range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrId<A: StandardAttr> {
    Standard(A),
    Custom(RawAttrId),
}

impl<A: StandardAttr> AttrId<A> {
    /// Classifies a raw id against the class's standard and custom ranges.
    ///
    /// Ids outside the union of the two ranges are invalid for the class.
    pub fn from_raw(raw: RawAttrId) -> Result<Self> {
        if let Some(attr) = A::from_raw(raw) {
            return Ok(AttrId::Standard(attr));
        }
        if is_custom_attr(raw) {
            return Ok(AttrId::Custom(raw));
        }
        Err(Error::InvalidAttribute {
            class: A::OBJECT_TYPE,
            id: raw,
        })
    }

    /// Returns the stable numeric id.
    pub fn raw(&self) -> RawAttrId {
        match self {
            AttrId::Standard(a) => a.raw(),
            AttrId::Custom(raw) => *raw,
        }
    }
}

/// An (attribute id, value) pair, the unit of Create and Set payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attr<A: StandardAttr> {
    pub id: AttrId<A>,
    pub value: AttrValue,
}

impl<A: StandardAttr> Attr<A> {
    pub fn new(attr: A, value: AttrValue) -> Self {
        Self {
            id: AttrId::Standard(attr),
            value,
        }
    }

    pub fn custom(raw: RawAttrId, value: AttrValue) -> Self {
        Self {
            id: AttrId::Custom(raw),
            value,
        }
    }
}

/// Initial attribute state produced by a validated create list.
pub type AttrMap = HashMap<RawAttrId, AttrValue>;

/// Applies the create-time attribute discipline for a class.
///
/// Rejects duplicate ids, read-only targets, and type/range violations;
/// requires every mandatory-on-create attribute; fills omitted settable
/// attributes with their documented defaults. Custom-range pairs are
/// stored as supplied, their semantics being the vendor's business.
///
/// On any error the whole create fails and no state is produced.
pub fn build_create_map<A: StandardAttr>(attrs: &[Attr<A>]) -> Result<AttrMap> {
    let mut map = AttrMap::with_capacity(A::ATTRS.len());

    for attr in attrs {
        match attr.id {
            AttrId::Standard(a) => {
                let prop = a.property();
                if prop.access == AttrAccess::ReadOnly {
                    return Err(Error::ReadOnlyAttribute { name: prop.name });
                }
                prop.check_value(&attr.value)?;
                if map.insert(prop.id, attr.value).is_some() {
                    return Err(Error::DuplicateAttribute { name: prop.name });
                }
            }
            AttrId::Custom(raw) => {
                if !is_custom_attr(raw) {
                    return Err(Error::InvalidAttribute {
                        class: A::OBJECT_TYPE,
                        id: raw,
                    });
                }
                if map.insert(raw, attr.value).is_some() {
                    return Err(Error::DuplicateAttribute { name: "custom" });
                }
            }
        }
    }

    for prop in A::ATTRS {
        if prop.mandatory_on_create && !map.contains_key(&prop.id) {
            return Err(Error::MandatoryAttributeMissing { name: prop.name });
        }
        if let Some(default) = prop.default {
            map.entry(prop.id).or_insert(default);
        }
    }

    Ok(map)
}
