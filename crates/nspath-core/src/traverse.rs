//! Traversal core
//!
//! Recursive descent over a [`GenericValue`], emitting one slash-delimited
//! path per terminal. Containers never receive a path of their own.
//!
//! Segments are joined with [`SEPARATOR`] and are not escaped: a key or field
//! name containing `/` yields a path that cannot be split back unambiguously.

use crate::{GenericValue, NamespaceError, RecordField, Visibility};
use alloc::{string::String, vec::Vec};
use core::convert::Infallible;
use core::fmt::{self, Write};
use tracing::{trace, warn};

/// Delimiter between path segments
pub const SEPARATOR: char = '/';

/// Rule for choosing a record field's path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NamingPolicy {
    /// Always use the declared field identifier
    #[default]
    Declared,
    /// Use the tag's name portion when present, else the declared identifier
    Tagged,
}

impl NamingPolicy {
    /// Path segment for `field`, or `None` if the field is not visible
    ///
    /// Under [`NamingPolicy::Tagged`] the name portion is everything before
    /// the first `,` of the tag. An empty name portion falls back to the
    /// declared identifier and a tag of exactly `-` hides the field.
    pub fn segment<'a>(self, field: &'a RecordField) -> Option<&'a str> {
        if field.visibility == Visibility::Private {
            return None;
        }

        match (self, field.tag) {
            (NamingPolicy::Tagged, Some("-")) => None,
            (NamingPolicy::Tagged, Some(tag)) => {
                let alias = tag.split(',').next().unwrap_or_default();
                if alias.is_empty() {
                    Some(field.name)
                } else {
                    Some(alias)
                }
            }
            _ => Some(field.name),
        }
    }
}

/// Configurable traversal
///
/// The default configuration uses declared field names and no depth limit,
/// which is what [`traverse`] runs.
///
/// ```rust
/// use nspath_core::{Flattener, GenericValue, NamespaceError};
/// use serde_json::json;
///
/// let value = GenericValue::from(json!({"a": {"b": {"c": 1}}}));
/// let mut ns: Vec<String> = Vec::new();
///
/// let err = Flattener::new().max_depth(2).flatten(&value, "root", &mut ns).unwrap_err();
/// assert!(matches!(err, NamespaceError::DepthExceeded { limit: 2, .. }));
/// assert!(ns.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flattener {
    policy: NamingPolicy,
    max_depth: Option<usize>,
}

impl Flattener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the naming policy applied to every record in the tree
    pub fn policy(mut self, policy: NamingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Shorthand for [`NamingPolicy::Tagged`]
    pub fn with_tags(self) -> Self {
        self.policy(NamingPolicy::Tagged)
    }

    /// Limit how many container levels may be nested below the root
    ///
    /// The root container itself is depth 1, so `max_depth(1)` accepts a flat
    /// mapping and rejects anything nested inside it.
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// Remove any depth limit
    pub fn unbounded(mut self) -> Self {
        self.max_depth = None;
        self
    }

    pub fn naming_policy(&self) -> NamingPolicy {
        self.policy
    }

    pub fn depth_limit(&self) -> Option<usize> {
        self.max_depth
    }

    /// Append the path of every terminal under `value` to `out`
    ///
    /// When a depth limit is set and crossed, nothing is appended and
    /// [`NamespaceError::DepthExceeded`] is returned. Without a limit this
    /// never fails.
    pub fn flatten<E>(
        &self,
        value: &GenericValue,
        prefix: &str,
        out: &mut E,
    ) -> Result<(), NamespaceError>
    where
        E: Extend<String>,
    {
        match self.max_depth {
            Some(limit) => {
                let mut paths = Vec::new();
                let mut path = String::from(prefix);
                Walker::new(self.policy, DepthLimit(limit)).walk(value, &mut path, 0, &mut paths)?;
                out.extend(paths);
            }
            None => traverse_with(self.policy, value, prefix, out),
        }
        Ok(())
    }
}

/// Decides whether a container may be entered at a given depth
trait DepthGuard {
    type Error;

    fn enter(&self, depth: usize, path: &str) -> Result<(), Self::Error>;
}

struct Unbounded;

impl DepthGuard for Unbounded {
    type Error = Infallible;

    fn enter(&self, _depth: usize, _path: &str) -> Result<(), Infallible> {
        Ok(())
    }
}

struct DepthLimit(usize);

impl DepthGuard for DepthLimit {
    type Error = NamespaceError;

    fn enter(&self, depth: usize, path: &str) -> Result<(), NamespaceError> {
        let limit = self.0;
        if depth >= limit {
            warn!(limit, path = %path, "namespace depth limit exceeded");
            return Err(NamespaceError::DepthExceeded {
                limit,
                path: path.into(),
            });
        }
        Ok(())
    }
}

/// Recursive four-way dispatch shared by bounded and unbounded runs
struct Walker<G> {
    policy: NamingPolicy,
    guard: G,
}

impl<G: DepthGuard> Walker<G> {
    fn new(policy: NamingPolicy, guard: G) -> Self {
        Self { policy, guard }
    }

    fn walk(
        &self,
        value: &GenericValue,
        path: &mut String,
        depth: usize,
        out: &mut Vec<String>,
    ) -> Result<(), G::Error> {
        if value.is_container() {
            self.guard.enter(depth, path)?;
        }

        match value {
            GenericValue::Mapping(map) => {
                for (key, child) in map {
                    self.descend(child, path, key, depth, out)?;
                }
            }
            GenericValue::Sequence(items) => {
                for (index, child) in items.iter().enumerate() {
                    self.descend(child, path, index, depth, out)?;
                }
            }
            GenericValue::Record(record) => {
                for field in &record.fields {
                    if let Some(segment) = self.policy.segment(field) {
                        self.descend(&field.value, path, segment, depth, out)?;
                    } else {
                        trace!(record = record.type_name, field = field.name, "skipping hidden field");
                    }
                }
            }
            GenericValue::Terminal(_) => {
                trace!(path = %path, "leaf");
                out.push(path.clone());
            }
        }

        Ok(())
    }

    /// Push `segment`, recurse, then restore `path` to its previous length
    fn descend(
        &self,
        child: &GenericValue,
        path: &mut String,
        segment: impl fmt::Display,
        depth: usize,
        out: &mut Vec<String>,
    ) -> Result<(), G::Error> {
        let mark = path.len();
        // Formatting into a String only fails if a Display impl does
        let _ = write!(path, "{}{}", SEPARATOR, segment);
        let result = self.walk(child, path, depth + 1, out);
        path.truncate(mark);
        result
    }
}

/// Flatten `value` under `prefix`, appending one path per terminal to `out`
///
/// Uses declared field names for records and has no depth limit, so it
/// cannot fail. Empty containers contribute nothing.
///
/// ```rust
/// use nspath_core::{traverse, GenericValue};
/// use serde_json::json;
///
/// let value = GenericValue::from(json!({"Foo": {"Foos": "foos"}, "Bar": []}));
/// let mut ns: Vec<String> = Vec::new();
/// traverse(&value, "root", &mut ns);
/// assert_eq!(ns, ["root/Foo/Foos"]);
/// ```
pub fn traverse<E>(value: &GenericValue, prefix: &str, out: &mut E)
where
    E: Extend<String>,
{
    traverse_with(NamingPolicy::Declared, value, prefix, out);
}

/// [`traverse`] with an explicit naming policy for records
pub fn traverse_with<E>(policy: NamingPolicy, value: &GenericValue, prefix: &str, out: &mut E)
where
    E: Extend<String>,
{
    let mut paths = Vec::new();
    let mut path = String::from(prefix);
    match Walker::new(policy, Unbounded).walk(value, &mut path, 0, &mut paths) {
        Ok(()) => {}
        Err(never) => match never {},
    }
    out.extend(paths);
}

/// Split a path back into its segments
///
/// Inverse of the join only when no segment contains [`SEPARATOR`].
pub fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR)
}
