//! Structural type references.
//!
//! A [`TypeRef`] describes a type the way the compiled client project declares
//! it: a simple name, the declaring namespace, and zero or more generic type
//! arguments (themselves [`TypeRef`]s).
//!
//! ## Generic Name Encoding
//!
//! Generic definitions carry an arity marker in their simple name: a back-tick
//! followed by the number of type parameters (`List`1`, `Dictionary`2`).
//! [`TypeRef::base_name`] strips the marker. Non-generic names never contain a
//! back-tick.

use serde::{Deserialize, Serialize};

/// Separator between a generic type's base name and its arity.
pub const GENERIC_ARITY_MARKER: char = '`';

/// Namespace that declares the asynchronous operation types.
pub const TASK_NAMESPACE: &str = "System.Threading.Tasks";

/// Simple name of the asynchronous operation type.
const TASK_BASE_NAME: &str = "Task";

/// A reference to a (possibly generic) type.
///
/// ## Examples
///
/// ```
/// use proxygen_define::TypeRef;
///
/// let task = TypeRef::generic(
///     "System.Threading.Tasks",
///     "Task`1",
///     vec![TypeRef::new("System", "Int32")],
/// );
///
/// assert!(task.is_async());
/// assert_eq!(task.async_payload().map(|t| t.name.as_str()), Some("Int32"));
/// assert_eq!(task.full_name(), "System.Threading.Tasks.Task`1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    /// Simple name, including the arity marker for generic definitions.
    pub name: String,
    /// Declaring namespace. `None` for generic parameters and global types.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Generic type arguments in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_arguments: Vec<TypeRef>,
}

impl TypeRef {
    /// Creates a non-generic type reference.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
            generic_arguments: vec![],
        }
    }

    /// Creates a closed generic type reference.
    pub fn generic(
        namespace: impl Into<String>,
        name: impl Into<String>,
        generic_arguments: Vec<TypeRef>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
            generic_arguments,
        }
    }

    /// The bare `System.Threading.Tasks.Task`.
    pub fn task() -> Self {
        Self::new(TASK_NAMESPACE, TASK_BASE_NAME)
    }

    /// `System.Threading.Tasks.Task<payload>`.
    pub fn task_of(payload: TypeRef) -> Self {
        Self::generic(TASK_NAMESPACE, "Task`1", vec![payload])
    }

    /// Returns `true` if this reference has generic arguments.
    pub fn is_generic(&self) -> bool {
        !self.generic_arguments.is_empty()
    }

    /// Returns the simple name with any generic arity marker removed.
    ///
    /// ```
    /// use proxygen_define::TypeRef;
    ///
    /// assert_eq!(TypeRef::new("System", "Dictionary`2").base_name(), "Dictionary");
    /// assert_eq!(TypeRef::new("System", "String").base_name(), "String");
    /// ```
    pub fn base_name(&self) -> &str {
        match self.name.split_once(GENERIC_ARITY_MARKER) {
            Some((base, _)) => base,
            None => &self.name,
        }
    }

    /// Returns `namespace.name`, or just the name when there is no namespace.
    pub fn full_name(&self) -> String {
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.name),
            _ => self.name.clone(),
        }
    }

    /// Returns `true` if this is `Task` or `Task<T>` from `System.Threading.Tasks`.
    ///
    /// `ValueTask` does not count: it is not assignable to `Task`, so methods
    /// returning it are treated as synchronous.
    pub fn is_async(&self) -> bool {
        self.namespace.as_deref() == Some(TASK_NAMESPACE) && self.base_name() == TASK_BASE_NAME
    }

    /// Returns the payload type of an asynchronous shape.
    ///
    /// `None` for a bare `Task` and for anything that is not asynchronous.
    pub fn async_payload(&self) -> Option<&TypeRef> {
        if !self.is_async() {
            return None;
        }
        self.generic_arguments.first()
    }
}
