//! Newtype wrappers around the server's numeric keys for every entity.
//!
//! The remote API sends ids sometimes as JSON numbers and sometimes as
//! numeric strings. Each id type accepts both on deserialization, so the
//! coercion happens exactly once at ingestion and the rest of the
//! workspace compares typed values. Distinct types prevent passing a
//! `DepartmentId` where a `UnitId` is expected.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Error returned when a raw value cannot be read as an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier: '{0}'")]
pub struct ParseIdError(pub String);

/// Parse a raw id cell. Blank strings are rejected here; callers that
/// treat blanks as "absent" use [`opt_id`].
pub fn parse_raw_id(raw: &str) -> Result<i64, ParseIdError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| ParseIdError(raw.to_string()))
}

struct RawIdVisitor;

impl<'de> Visitor<'de> for RawIdVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer id or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| E::custom(format!("id {v} out of range")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
            Ok(v as i64)
        } else {
            Err(E::custom(format!("id {v} is not an integer")))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        parse_raw_id(v).map_err(E::custom)
    }
}

/// Macro to define a newtype ID wrapper around `i64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub i64);

        impl $name {
            /// Create an identifier from a raw server key.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Return the raw server key.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_raw_id(s).map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_i64(self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_any(RawIdVisitor).map(Self)
            }
        }
    };
}

define_id!(
    /// Identifier of a company (organization root).
    CompanyId
);

define_id!(
    /// Identifier of a department.
    DepartmentId
);

define_id!(
    /// Identifier of a unit.
    UnitId
);

define_id!(
    /// Identifier of an employee.
    UserId
);

define_id!(
    /// Identifier of an asset category (classification root).
    CategoryId
);

define_id!(
    /// Identifier of an asset subcategory.
    SubcategoryId
);

define_id!(
    /// Identifier of an asset type.
    AssetTypeId
);

define_id!(
    /// Identifier of a subcategory-to-type mapping row.
    MappedTypeId
);

define_id!(
    /// Identifier of an asset condition.
    ConditionId
);

define_id!(
    /// Identifier of an asset lifecycle status.
    StatusId
);

define_id!(
    /// Identifier of a repair urgency level.
    UrgencyId
);

define_id!(
    /// Identifier of an asset.
    AssetId
);

define_id!(
    /// Identifier of a borrow transaction.
    BorrowId
);

define_id!(
    /// Identifier of a repair request.
    RepairId
);

define_id!(
    /// Identifier of an issuance record.
    IssuanceId
);

define_id!(
    /// Identifier of an insurance policy.
    InsurancePolicyId
);

/// Serde helpers for optional id fields.
///
/// The server writes "no parent" as `null`, an empty string, or zero.
/// All three deserialize to `None`. Use with
/// `#[serde(default, with = "itam_core::types::id::opt_id")]`.
pub mod opt_id {
    use super::*;

    struct OptVisitor;

    impl<'de> Visitor<'de> for OptVisitor {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an optional integer id")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(self)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok((v != 0).then_some(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            RawIdVisitor.visit_u64(v).map(|v| (v != 0).then_some(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            RawIdVisitor.visit_f64(v).map(|v| (v != 0).then_some(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            if v.trim().is_empty() {
                return Ok(None);
            }
            RawIdVisitor.visit_str(v).map(|v| (v != 0).then_some(v))
        }
    }

    /// Deserialize an optional id, mapping blanks and zero to `None`.
    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: From<i64>,
    {
        deserializer
            .deserialize_option(OptVisitor)
            .map(|raw| raw.map(T::from))
    }

    /// Serialize an optional id as a number or `null`.
    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Copy + Into<i64>,
    {
        match value {
            Some(id) => serializer.serialize_i64((*id).into()),
            None => serializer.serialize_none(),
        }
    }
}
