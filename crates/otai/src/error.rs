//! OTAI status codes and error types.
//!
//! Every operation in this contract reports a single discrete status to the
//! immediate caller. Inside the crate, failures are structured [`Error`]
//! values carrying context; at the wire boundary each maps onto a stable
//! numeric [`Status`] code drawn from the SAI status space.

use std::fmt;
use thiserror::Error;

use crate::attr::RawAttrId;
use crate::stats::StatId;
use crate::types::{ObjectType, RawObjectId};

/// Wire status codes.
///
/// Numeric values are stable and match the corresponding `sai_status_t`
/// constants; consumers may persist them across versions.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success = 0,
    Failure = -1,
    NotSupported = -2,
    InsufficientResources = -4,
    InvalidParameter = -5,
    ItemAlreadyExists = -6,
    ItemNotFound = -7,
    TableFull = -13,
    MandatoryAttributeMissing = -14,
    ObjectInUse = -17,
    InvalidObjectId = -19,
    InvalidAttribute = -24,
}

impl Status {
    /// Creates a Status from a raw i32 value.
    pub fn from_raw(status: i32) -> Self {
        match status {
            0 => Status::Success,
            -2 => Status::NotSupported,
            -4 => Status::InsufficientResources,
            -5 => Status::InvalidParameter,
            -6 => Status::ItemAlreadyExists,
            -7 => Status::ItemNotFound,
            -13 => Status::TableFull,
            -14 => Status::MandatoryAttributeMissing,
            -17 => Status::ObjectInUse,
            -19 => Status::InvalidObjectId,
            -24 => Status::InvalidAttribute,
            _ => Status::Failure,
        }
    }

    /// Returns true if the status indicates success.
    pub fn is_success(&self) -> bool {
        *self == Status::Success
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Success => "STATUS_SUCCESS",
            Status::Failure => "STATUS_FAILURE",
            Status::NotSupported => "STATUS_NOT_SUPPORTED",
            Status::InsufficientResources => "STATUS_INSUFFICIENT_RESOURCES",
            Status::InvalidParameter => "STATUS_INVALID_PARAMETER",
            Status::ItemAlreadyExists => "STATUS_ITEM_ALREADY_EXISTS",
            Status::ItemNotFound => "STATUS_ITEM_NOT_FOUND",
            Status::TableFull => "STATUS_TABLE_FULL",
            Status::MandatoryAttributeMissing => "STATUS_MANDATORY_ATTRIBUTE_MISSING",
            Status::ObjectInUse => "STATUS_OBJECT_IN_USE",
            Status::InvalidObjectId => "STATUS_INVALID_OBJECT_ID",
            Status::InvalidAttribute => "STATUS_INVALID_ATTRIBUTE",
        };
        write!(f, "{}", s)
    }
}

/// Error type for OTAI operations.
///
/// A failed operation leaves no partial state behind: a failed create
/// produces no object, a failed set leaves the prior value, a failed
/// batched get returns no values.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The handle does not reference a live object.
    #[error("invalid {class} object id 0x{oid:016x}")]
    InvalidObjectId { class: ObjectType, oid: RawObjectId },

    /// The switch context handle is invalid.
    #[error("invalid switch id 0x{oid:016x}")]
    InvalidSwitchId { oid: RawObjectId },

    /// The attribute id is outside the class's standard and custom ranges,
    /// or unknown for the object.
    #[error("invalid attribute id 0x{id:x} for {class}")]
    InvalidAttribute { class: ObjectType, id: RawAttrId },

    /// The same attribute id appeared more than once in a create list.
    #[error("duplicate attribute {name} in attribute list")]
    DuplicateAttribute { name: &'static str },

    /// A mandatory-on-create attribute was not supplied.
    #[error("mandatory attribute {name} missing at create")]
    MandatoryAttributeMissing { name: &'static str },

    /// Attempted to write a read-only attribute.
    #[error("attribute {name} is read-only")]
    ReadOnlyAttribute { name: &'static str },

    /// Attempted to write a create-only attribute after creation.
    #[error("attribute {name} is create-only and cannot be set")]
    CreateOnlyAttribute { name: &'static str },

    /// The supplied value does not satisfy the attribute's declared type.
    #[error("attribute {name} expects {expected}, got {got}")]
    WrongValueType {
        name: &'static str,
        expected: &'static str,
        got: &'static str,
    },

    /// The supplied value is outside the attribute's declared range.
    #[error("value {value} out of range for attribute {name}")]
    ValueOutOfRange { name: &'static str, value: i64 },

    /// The counter id is not supported by the object.
    #[error("invalid counter id 0x{id:x} for {class}")]
    InvalidCounter { class: ObjectType, id: StatId },

    /// The implementation cannot allocate a new object.
    #[error("object table full ({capacity} objects)")]
    TableFull { capacity: usize },

    /// The object is still referenced and cannot be removed.
    #[error("{class} object 0x{oid:016x} is in use")]
    ObjectInUse { class: ObjectType, oid: RawObjectId },

    /// The driver rejected the operation.
    #[error("driver rejected {operation}: {message}")]
    DriverRejected {
        operation: &'static str,
        message: String,
    },
}

impl Error {
    /// Maps this error onto its wire status code.
    pub fn status(&self) -> Status {
        match self {
            Error::InvalidObjectId { .. } | Error::InvalidSwitchId { .. } => {
                Status::InvalidObjectId
            }
            Error::InvalidAttribute { .. }
            | Error::ReadOnlyAttribute { .. }
            | Error::CreateOnlyAttribute { .. } => Status::InvalidAttribute,
            Error::DuplicateAttribute { .. }
            | Error::WrongValueType { .. }
            | Error::ValueOutOfRange { .. }
            | Error::InvalidCounter { .. } => Status::InvalidParameter,
            Error::MandatoryAttributeMissing { .. } => Status::MandatoryAttributeMissing,
            Error::TableFull { .. } => Status::TableFull,
            Error::ObjectInUse { .. } => Status::ObjectInUse,
            Error::DriverRejected { .. } => Status::Failure,
        }
    }
}

/// Result type for OTAI operations.
pub type Result<T> = std::result::Result<T, Error>;
