//! Generic value model
//!
//! Every adapter normalizes its input into a [`GenericValue`] before the
//! traversal core sees it. The core then matches exhaustively over four
//! shapes instead of inspecting types at runtime.

use alloc::{collections::BTreeMap, string::String, vec::Vec};

/// The unifying tagged representation all adapters normalize into
///
/// Mappings use a `BTreeMap` so that iteration is deterministic; callers must
/// still treat key order as semantically irrelevant.
#[derive(Debug, Clone, PartialEq)]
pub enum GenericValue {
    /// String-keyed collection, keys unique within one mapping
    Mapping(BTreeMap<String, GenericValue>),
    /// Ordered, 0-indexed list
    Sequence(Vec<GenericValue>),
    /// Composite with named fields in declaration order
    Record(RecordValue),
    /// Leaf value, never descended into
    Terminal(Terminal),
}

/// Leaf values
///
/// Traversal treats these as opaque; the payload is kept so that callers can
/// inspect what a path points at.
#[derive(Debug, Clone, PartialEq)]
pub enum Terminal {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
}

/// A record (struct-like composite) with its field descriptors resolved
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
    /// Name of the originating type, for diagnostics only
    pub type_name: &'static str,
    /// Fields in declaration order
    pub fields: Vec<RecordField>,
}

/// One field of a [`RecordValue`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    /// Declared field identifier
    pub name: &'static str,
    /// Raw naming annotation, e.g. `"bar,omitempty"`
    pub tag: Option<&'static str>,
    /// Whether the field is addressable from outside its type
    pub visibility: crate::Visibility,
    /// Current value of the field
    pub value: GenericValue,
}

impl GenericValue {
    /// Empty mapping
    pub fn mapping() -> Self {
        GenericValue::Mapping(BTreeMap::new())
    }

    /// Null terminal
    pub fn null() -> Self {
        GenericValue::Terminal(Terminal::Null)
    }

    /// True for mappings, sequences and records
    pub fn is_container(&self) -> bool {
        !matches!(self, GenericValue::Terminal(_))
    }

    /// Number of terminals [`traverse`](crate::traverse) emits for this value
    ///
    /// Counts under [`NamingPolicy::Declared`](crate::NamingPolicy::Declared),
    /// so private fields are skipped and `-`-tagged fields are counted. Use
    /// [`leaf_count_with`](Self::leaf_count_with) for the tagged policy.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count_with(crate::NamingPolicy::Declared)
    }

    /// Number of paths a flatten under `policy` emits for this value
    pub fn leaf_count_with(&self, policy: crate::NamingPolicy) -> usize {
        match self {
            GenericValue::Mapping(map) => map.values().map(|v| v.leaf_count_with(policy)).sum(),
            GenericValue::Sequence(items) => items.iter().map(|v| v.leaf_count_with(policy)).sum(),
            GenericValue::Record(record) => record
                .fields
                .iter()
                .filter(|field| policy.segment(field).is_some())
                .map(|field| field.value.leaf_count_with(policy))
                .sum(),
            GenericValue::Terminal(_) => 1,
        }
    }

    /// Borrow the terminal payload if this is a leaf
    pub fn as_terminal(&self) -> Option<&Terminal> {
        match self {
            GenericValue::Terminal(terminal) => Some(terminal),
            _ => None,
        }
    }
}

impl From<Terminal> for GenericValue {
    fn from(terminal: Terminal) -> Self {
        GenericValue::Terminal(terminal)
    }
}

impl From<RecordValue> for GenericValue {
    fn from(record: RecordValue) -> Self {
        GenericValue::Record(record)
    }
}

impl From<serde_json::Number> for Terminal {
    fn from(number: serde_json::Number) -> Self {
        if let Some(n) = number.as_u64() {
            Terminal::UInt(n)
        } else if let Some(n) = number.as_i64() {
            Terminal::Int(n)
        } else {
            // Without arbitrary_precision every Number fits one of the three
            Terminal::Float(number.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl From<serde_json::Value> for GenericValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Object(map) => GenericValue::Mapping(
                map.into_iter()
                    .map(|(key, child)| (key, GenericValue::from(child)))
                    .collect(),
            ),
            Value::Array(items) => {
                GenericValue::Sequence(items.into_iter().map(GenericValue::from).collect())
            }
            Value::Null => GenericValue::Terminal(Terminal::Null),
            Value::Bool(b) => GenericValue::Terminal(Terminal::Bool(b)),
            Value::Number(n) => GenericValue::Terminal(n.into()),
            Value::String(s) => GenericValue::Terminal(Terminal::String(s)),
        }
    }
}

#[cfg(feature = "toml")]
impl From<toml::Value> for GenericValue {
    fn from(value: toml::Value) -> Self {
        use alloc::string::ToString;
        use toml::Value;

        match value {
            Value::Table(table) => GenericValue::Mapping(
                table
                    .into_iter()
                    .map(|(key, child)| (key, GenericValue::from(child)))
                    .collect(),
            ),
            Value::Array(items) => {
                GenericValue::Sequence(items.into_iter().map(GenericValue::from).collect())
            }
            Value::Boolean(b) => GenericValue::Terminal(Terminal::Bool(b)),
            Value::Integer(i) => GenericValue::Terminal(Terminal::Int(i)),
            Value::Float(f) => GenericValue::Terminal(Terminal::Float(f)),
            Value::String(s) => GenericValue::Terminal(Terminal::String(s)),
            Value::Datetime(dt) => GenericValue::Terminal(Terminal::String(dt.to_string())),
        }
    }
}

/// YAML mappings may use any value as a key. Scalar keys become segments
/// the way they print; sequence or mapping keys, and distinct keys that
/// print the same (`1` and `"1"`), fail with
/// [`NamespaceError::Deserialization`] rather than dropping a leaf.
#[cfg(feature = "yaml")]
impl TryFrom<serde_yaml::Value> for GenericValue {
    type Error = crate::NamespaceError;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        use serde_yaml::Value;

        Ok(match value {
            Value::Mapping(map) => {
                let mut mapping = BTreeMap::new();
                for (key, child) in map {
                    let key = yaml_key(key)?;
                    let child = GenericValue::try_from(child)?;
                    if mapping.contains_key(&key) {
                        return Err(crate::NamespaceError::Deserialization(alloc::format!(
                            "duplicate YAML mapping key '{}' after conversion to string",
                            key
                        )));
                    }
                    mapping.insert(key, child);
                }
                GenericValue::Mapping(mapping)
            }
            Value::Sequence(items) => GenericValue::Sequence(
                items
                    .into_iter()
                    .map(GenericValue::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Null => GenericValue::Terminal(Terminal::Null),
            Value::Bool(b) => GenericValue::Terminal(Terminal::Bool(b)),
            Value::Number(n) => GenericValue::Terminal(yaml_number(&n)),
            Value::String(s) => GenericValue::Terminal(Terminal::String(s)),
            Value::Tagged(tagged) => GenericValue::try_from(tagged.value)?,
        })
    }
}

/// Render a scalar YAML mapping key as a path segment
#[cfg(feature = "yaml")]
fn yaml_key(key: serde_yaml::Value) -> Result<String, crate::NamespaceError> {
    use alloc::string::ToString;
    use serde_yaml::Value;

    match key {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::from("null")),
        Value::Tagged(tagged) => yaml_key(tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => Err(crate::NamespaceError::Deserialization(
            String::from("YAML mapping keys must be scalars"),
        )),
    }
}

#[cfg(feature = "yaml")]
fn yaml_number(n: &serde_yaml::Number) -> Terminal {
    if let Some(u) = n.as_u64() {
        Terminal::UInt(u)
    } else if let Some(i) = n.as_i64() {
        Terminal::Int(i)
    } else {
        Terminal::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

impl core::fmt::Display for Terminal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Terminal::Null => f.write_str("null"),
            Terminal::Bool(b) => write!(f, "{}", b),
            Terminal::Int(i) => write!(f, "{}", i),
            Terminal::UInt(u) => write!(f, "{}", u),
            Terminal::Float(x) => write!(f, "{}", x),
            Terminal::String(s) => f.write_str(s),
        }
    }
}
