//! Trait definitions for nspath-core
//!
//! This module contains the conversion seams between caller data and the
//! [`GenericValue`] model: [`ToGeneric`] for anything that can be flattened,
//! and [`Record`] for struct-like types that expose a field-descriptor list.

use crate::{GenericValue, RecordField, RecordValue, Terminal};
use alloc::{
    boxed::Box,
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};

/// Conversion into the generic value model
///
/// Scalars become terminals, string-keyed maps become mappings and ordered
/// collections become sequences. Types registered with [`record!`](crate::record)
/// become records.
pub trait ToGeneric {
    /// Build a fresh [`GenericValue`] tree for this value
    fn to_generic(&self) -> GenericValue;
}

/// Whether a record field is addressable from outside its type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    /// Never emitted, regardless of naming policy
    Private,
}

impl Visibility {
    pub fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }
}

/// Descriptor for a single record field
///
/// Descriptors are built once per type as part of [`Record::FIELDS`]. The
/// accessor produces the field's current value on demand.
pub struct Field<R> {
    name: &'static str,
    tag: Option<&'static str>,
    visibility: Visibility,
    get: fn(&R) -> GenericValue,
}

impl<R> Field<R> {
    /// Public field identified by its declared name
    pub const fn new(name: &'static str, get: fn(&R) -> GenericValue) -> Self {
        Self {
            name,
            tag: None,
            visibility: Visibility::Public,
            get,
        }
    }

    /// Attach a naming annotation such as `"bar"` or `"bar,omitempty"`
    pub const fn tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Mark the field as not externally visible
    pub const fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn raw_tag(&self) -> Option<&'static str> {
        self.tag
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Read the field from `record` and package it with its descriptor
    pub fn resolve(&self, record: &R) -> RecordField {
        RecordField {
            name: self.name,
            tag: self.tag,
            visibility: self.visibility,
            value: (self.get)(record),
        }
    }
}

impl<R> Clone for Field<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Field<R> {}

impl<R> core::fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("visibility", &self.visibility)
            .finish()
    }
}

/// Struct-like types with a static field-descriptor list
///
/// Implement by hand or through [`record!`](crate::record):
///
/// ```rust
/// use nspath_core::{Field, Record, ToGeneric};
///
/// struct Endpoint {
///     host: String,
///     port: u16,
/// }
///
/// impl Record for Endpoint {
///     const TYPE_NAME: &'static str = "Endpoint";
///     const FIELDS: &'static [Field<Self>] = &[
///         Field::new("host", |e: &Endpoint| e.host.to_generic()).tag("Host"),
///         Field::new("port", |e: &Endpoint| e.port.to_generic()),
///     ];
/// }
/// ```
pub trait Record: Sized + 'static {
    /// Type name used in diagnostics
    const TYPE_NAME: &'static str;
    /// Fields in declaration order
    const FIELDS: &'static [Field<Self>];

    /// Resolve every field into a [`RecordValue`]
    fn to_record(&self) -> RecordValue {
        RecordValue {
            type_name: Self::TYPE_NAME,
            fields: Self::FIELDS.iter().map(|field| field.resolve(self)).collect(),
        }
    }
}

/// Register a struct as a [`Record`] and implement [`ToGeneric`] for it
///
/// Each entry is a field identifier, optionally followed by `= "tag"` and
/// optionally preceded by `#[private]`:
///
/// ```rust
/// use nspath_core::record;
///
/// struct Bar {
///     qaz: Vec<i32>,
///     faz: i32,
///     token: String,
/// }
///
/// record!(Bar {
///     qaz = "Qaz",
///     faz = "Faz,omitempty",
///     #[private] token,
/// });
///
/// let mut ns: Vec<String> = Vec::new();
/// let bar = Bar { qaz: vec![1, 2], faz: 2, token: "s3cr3t".into() };
/// nspath_core::from_record_tags(&bar, "root", &mut ns);
/// assert_eq!(ns, ["root/Qaz/0", "root/Qaz/1", "root/Faz"]);
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ident { $( $(#[$vis:ident])? $field:ident $(= $tag:literal)? ),* $(,)? }) => {
        impl $crate::Record for $ty {
            const TYPE_NAME: &'static str = ::core::stringify!($ty);
            const FIELDS: &'static [$crate::Field<Self>] = &[
                $( $crate::record!(@field $ty, $field $(, $tag)? $(; $vis)?) ),*
            ];
        }

        impl $crate::ToGeneric for $ty {
            fn to_generic(&self) -> $crate::GenericValue {
                $crate::GenericValue::Record($crate::Record::to_record(self))
            }
        }
    };
    (@field $ty:ident, $field:ident) => {
        $crate::Field::new(::core::stringify!($field), |r: &$ty| $crate::ToGeneric::to_generic(&r.$field))
    };
    (@field $ty:ident, $field:ident, $tag:literal) => {
        $crate::record!(@field $ty, $field).tag($tag)
    };
    (@field $ty:ident, $field:ident; private) => {
        $crate::record!(@field $ty, $field).private()
    };
    (@field $ty:ident, $field:ident, $tag:literal; private) => {
        $crate::record!(@field $ty, $field).tag($tag).private()
    };
}

impl ToGeneric for GenericValue {
    fn to_generic(&self) -> GenericValue {
        self.clone()
    }
}

impl ToGeneric for Terminal {
    fn to_generic(&self) -> GenericValue {
        GenericValue::Terminal(self.clone())
    }
}

impl ToGeneric for serde_json::Value {
    fn to_generic(&self) -> GenericValue {
        GenericValue::from(self.clone())
    }
}

impl ToGeneric for bool {
    fn to_generic(&self) -> GenericValue {
        GenericValue::Terminal(Terminal::Bool(*self))
    }
}

macro_rules! impl_signed {
    ($($t:ty),*) => {
        $(impl ToGeneric for $t {
            fn to_generic(&self) -> GenericValue {
                GenericValue::Terminal(Terminal::Int(*self as i64))
            }
        })*
    };
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {
        $(impl ToGeneric for $t {
            fn to_generic(&self) -> GenericValue {
                GenericValue::Terminal(Terminal::UInt(*self as u64))
            }
        })*
    };
}

impl_signed!(i8, i16, i32, i64, isize);
impl_unsigned!(u8, u16, u32, u64, usize);

impl ToGeneric for f32 {
    fn to_generic(&self) -> GenericValue {
        GenericValue::Terminal(Terminal::Float(f64::from(*self)))
    }
}

impl ToGeneric for f64 {
    fn to_generic(&self) -> GenericValue {
        GenericValue::Terminal(Terminal::Float(*self))
    }
}

impl ToGeneric for char {
    fn to_generic(&self) -> GenericValue {
        GenericValue::Terminal(Terminal::String(self.to_string()))
    }
}

impl ToGeneric for str {
    fn to_generic(&self) -> GenericValue {
        GenericValue::Terminal(Terminal::String(self.to_string()))
    }
}

impl ToGeneric for String {
    fn to_generic(&self) -> GenericValue {
        GenericValue::Terminal(Terminal::String(self.clone()))
    }
}

impl<T: ToGeneric + ?Sized> ToGeneric for &T {
    fn to_generic(&self) -> GenericValue {
        (**self).to_generic()
    }
}

impl<T: ToGeneric + ?Sized> ToGeneric for Box<T> {
    fn to_generic(&self) -> GenericValue {
        (**self).to_generic()
    }
}

impl<T: ToGeneric> ToGeneric for Option<T> {
    fn to_generic(&self) -> GenericValue {
        match self {
            Some(value) => value.to_generic(),
            None => GenericValue::null(),
        }
    }
}

impl<T: ToGeneric> ToGeneric for [T] {
    fn to_generic(&self) -> GenericValue {
        GenericValue::Sequence(self.iter().map(ToGeneric::to_generic).collect())
    }
}

impl<T: ToGeneric, const N: usize> ToGeneric for [T; N] {
    fn to_generic(&self) -> GenericValue {
        self.as_slice().to_generic()
    }
}

impl<T: ToGeneric> ToGeneric for Vec<T> {
    fn to_generic(&self) -> GenericValue {
        self.as_slice().to_generic()
    }
}

impl<K: AsRef<str>, V: ToGeneric> ToGeneric for BTreeMap<K, V> {
    fn to_generic(&self) -> GenericValue {
        mapping_from_pairs(self.iter())
    }
}

#[cfg(feature = "std")]
impl<K: AsRef<str>, V: ToGeneric, S> ToGeneric for std::collections::HashMap<K, V, S> {
    fn to_generic(&self) -> GenericValue {
        mapping_from_pairs(self.iter())
    }
}

/// Collect borrowed key/value pairs into a mapping
pub(crate) fn mapping_from_pairs<'a, K, V, I>(pairs: I) -> GenericValue
where
    I: IntoIterator<Item = (&'a K, &'a V)>,
    K: AsRef<str> + ?Sized + 'a,
    V: ToGeneric + ?Sized + 'a,
{
    GenericValue::Mapping(
        pairs
            .into_iter()
            .map(|(key, value)| (key.as_ref().to_string(), value.to_generic()))
            .collect(),
    )
}
