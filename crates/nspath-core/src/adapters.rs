//! Entry adapters
//!
//! Each adapter normalizes one input representation into a [`GenericValue`]
//! and runs the traversal core on it:
//!
//! - native string-keyed mappings ([`from_mapping`])
//! - serialized interchange-format bytes ([`from_json`], [`from_serialized`])
//! - registered record types ([`from_record`], [`from_record_tags`])

use crate::{
    traits::mapping_from_pairs, traverse, traverse_with, GenericValue, NamespaceError,
    NamingPolicy, Record, ToGeneric,
};
use alloc::string::{String, ToString};
use tracing::debug;

/// Interchange formats understood by [`from_serialized`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    #[default]
    Json,
    /// Requires the `toml` feature
    Toml,
    /// Requires the `yaml` feature
    Yaml,
}

impl Format {
    /// Guess the format from a file extension, case-insensitively
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Toml => "toml",
            Format::Yaml => "yaml",
        }
    }

    /// Deserialize `data` into a generic value
    ///
    /// Objects/tables become mappings, arrays become sequences and scalars
    /// become terminals.
    pub fn parse(&self, data: &[u8]) -> Result<GenericValue, NamespaceError> {
        let parsed = match self {
            Format::Json => serde_json::from_slice::<serde_json::Value>(data)
                .map(GenericValue::from)
                .map_err(NamespaceError::from),
            #[cfg(feature = "toml")]
            Format::Toml => core::str::from_utf8(data)
                .map_err(|e| NamespaceError::Deserialization(e.to_string()))
                .and_then(|text| {
                    text.parse::<toml::Table>()
                        .map(|table| GenericValue::from(toml::Value::Table(table)))
                        .map_err(NamespaceError::from)
                }),
            #[cfg(feature = "yaml")]
            Format::Yaml => serde_yaml::from_slice::<serde_yaml::Value>(data)
                .map_err(NamespaceError::from)
                .and_then(GenericValue::try_from),
            #[allow(unreachable_patterns)]
            other => Err(NamespaceError::UnsupportedFormat(other.name().to_string())),
        };

        if let Err(err) = &parsed {
            debug!(format = self.name(), error = %err, "failed to deserialize input");
        }
        parsed
    }
}

impl core::str::FromStr for Format {
    type Err = NamespaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::from_extension(s).ok_or_else(|| NamespaceError::UnsupportedFormat(s.to_string()))
    }
}

impl core::fmt::Display for Format {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Flatten a native string-keyed mapping
///
/// Values are classified by their [`ToGeneric`] impl: nested maps become
/// mappings, vectors and slices become sequences, scalars become terminals.
/// Use [`GenericValue`] or `serde_json::Value` as the value type to mix
/// shapes in one map.
///
/// ```rust
/// use std::collections::HashMap;
///
/// let mut m: HashMap<&str, &str> = HashMap::new();
/// m.insert("Foo", "foo");
/// m.insert("Bar", "bar");
///
/// let mut ns: Vec<String> = Vec::new();
/// nspath_core::from_mapping(&m, "root", &mut ns);
/// ns.sort();
/// assert_eq!(ns, ["root/Bar", "root/Foo"]);
/// ```
pub fn from_mapping<'a, M, K, V, E>(map: &'a M, current: &str, out: &mut E)
where
    &'a M: IntoIterator<Item = (&'a K, &'a V)>,
    K: AsRef<str> + 'a,
    V: ToGeneric + 'a,
    E: Extend<String>,
{
    debug!(prefix = current, "flattening mapping");
    let value = mapping_from_pairs(map);
    traverse(&value, current, out);
}

/// Flatten JSON bytes
///
/// Malformed input fails with [`NamespaceError::Deserialization`] before any
/// path is appended.
///
/// ```rust
/// let data = br#"{"bar": {"qaz": 1, "faz": 2}, "baz": ["x", "y", "z"]}"#;
/// let mut ns: Vec<String> = Vec::new();
/// nspath_core::from_json(data, "root", &mut ns).unwrap();
/// assert_eq!(ns.len(), 5);
///
/// let mut ns: Vec<String> = Vec::new();
/// assert!(nspath_core::from_json(b"{bar", "root", &mut ns).is_err());
/// assert!(ns.is_empty());
/// ```
pub fn from_json<E>(data: &[u8], current: &str, out: &mut E) -> Result<(), NamespaceError>
where
    E: Extend<String>,
{
    from_serialized(data, Format::Json, current, out)
}

/// Flatten serialized bytes in the given format
pub fn from_serialized<E>(
    data: &[u8],
    format: Format,
    current: &str,
    out: &mut E,
) -> Result<(), NamespaceError>
where
    E: Extend<String>,
{
    debug!(prefix = current, %format, bytes = data.len(), "flattening serialized input");
    let value = format.parse(data)?;
    traverse(&value, current, out);
    Ok(())
}

/// Flatten a record using declared field identifiers
pub fn from_record<R, E>(value: &R, current: &str, out: &mut E)
where
    R: Record,
    E: Extend<String>,
{
    flatten_record(value, NamingPolicy::Declared, current, out);
}

/// Flatten a record using tag aliases where present
pub fn from_record_tags<R, E>(value: &R, current: &str, out: &mut E)
where
    R: Record,
    E: Extend<String>,
{
    flatten_record(value, NamingPolicy::Tagged, current, out);
}

fn flatten_record<R, E>(value: &R, policy: NamingPolicy, current: &str, out: &mut E)
where
    R: Record,
    E: Extend<String>,
{
    debug!(
        prefix = current,
        record = R::TYPE_NAME,
        ?policy,
        "flattening record"
    );
    let record = GenericValue::Record(value.to_record());
    traverse_with(policy, &record, current, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{collections::BTreeMap, vec, vec::Vec};

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_extension("JSON"), Some(Format::Json));
        assert_eq!(Format::from_extension("yml"), Some(Format::Yaml));
        assert_eq!(Format::from_extension("toml"), Some(Format::Toml));
        assert_eq!(Format::from_extension("ini"), None);
        assert!("xml".parse::<Format>().is_err());
    }

    #[test]
    fn test_mapping_adapter_nested_sequences() {
        let mut m: BTreeMap<String, GenericValue> = BTreeMap::new();
        m.insert(
            "Bar".to_string(),
            vec![vec![1, 2], vec![3]].to_generic(),
        );
        let mut ns: Vec<String> = Vec::new();
        from_mapping(&m, "root", &mut ns);
        assert_eq!(ns, ["root/Bar/0/0", "root/Bar/0/1", "root/Bar/1/0"]);
    }

    #[test]
    fn test_json_malformed_leaves_output_untouched() {
        let mut ns: Vec<String> = vec!["keep".to_string()];
        let err = from_json(b"{\"a\": [1, 2", "root", &mut ns).unwrap_err();
        assert!(matches!(err, NamespaceError::Deserialization(_)));
        assert_eq!(ns, ["keep"]);
    }

    #[test]
    fn test_json_scalar_root() {
        let mut ns: Vec<String> = Vec::new();
        from_json(b"42", "root", &mut ns).unwrap();
        assert_eq!(ns, ["root"]);
    }

    #[cfg(not(feature = "toml"))]
    #[test]
    fn test_toml_disabled() {
        let mut ns: Vec<String> = Vec::new();
        let err = from_serialized(b"a = 1", Format::Toml, "root", &mut ns).unwrap_err();
        assert_eq!(err, NamespaceError::UnsupportedFormat("toml".to_string()));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_input() {
        let data = b"title = \"x\"\n[owner]\nname = \"y\"\ndob = 1979-05-27T07:32:00Z\n";
        let mut ns: Vec<String> = Vec::new();
        from_serialized(data, Format::Toml, "root", &mut ns).unwrap();
        assert_eq!(ns, ["root/owner/dob", "root/owner/name", "root/title"]);
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_yaml_input() {
        let data = b"bar:\n  qaz: 1\n  faz: 2\nbaz: [x, y]\n";
        let mut ns: Vec<String> = Vec::new();
        from_serialized(data, Format::Yaml, "root", &mut ns).unwrap();
        assert_eq!(ns, ["root/bar/faz", "root/bar/qaz", "root/baz/0", "root/baz/1"]);
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_yaml_ambiguous_keys_fail_without_output() {
        let mut ns: Vec<String> = vec!["keep".to_string()];
        let err = from_serialized(b"1: a\n\"1\": b\n", Format::Yaml, "root", &mut ns).unwrap_err();
        assert!(matches!(err, NamespaceError::Deserialization(_)));
        assert!(from_serialized(b"? [a, b]\n: 1\n", Format::Yaml, "root", &mut ns).is_err());
        assert_eq!(ns, ["keep"]);
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_yaml_malformed() {
        let mut ns: Vec<String> = Vec::new();
        let err = from_serialized(b"a: [1, 2", Format::Yaml, "root", &mut ns).unwrap_err();
        assert!(matches!(err, NamespaceError::Deserialization(_)));
        assert!(ns.is_empty());
    }
}
