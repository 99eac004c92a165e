//! Type name resolution for generated C# source.
//!
//! [`TypeNameContext`] turns a [`TypeRef`] into the text that names the type
//! in source (`PagedResultDto<BookDto>`, `int`, ...) and, as a side effect,
//! records the `using` statement each namespace it meets requires. One context
//! is created per generated file.
//!
//! ## Import Deduplication
//!
//! A namespace is not added when an existing `using` statement is a raw string
//! prefix of the new one. Since statements are stored terminated by `;`, this
//! collapses exact repeats; a namespace and its sub-namespace are both kept.
//! The rule is a plain `starts_with` on the rendered statement, not a
//! namespace-segment comparison.

use proxygen_define::TypeRef;

/// Ordered, deduplicated `using` statements plus the name-resolution function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeNameContext {
    usings: Vec<String>,
}

impl TypeNameContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context pre-seeded with `namespaces`, in order.
    pub fn with_namespaces<I, S>(namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut context = Self::new();
        for namespace in namespaces {
            context.add_namespace(namespace.as_ref());
        }
        context
    }

    /// Registers the `using` statement for `namespace`.
    ///
    /// Returns `true` if a statement was added. Empty namespaces are ignored.
    pub fn add_namespace(&mut self, namespace: &str) -> bool {
        if namespace.is_empty() {
            return false;
        }

        let statement = using_statement(namespace);
        let present = self.usings.iter().any(|existing| {
            existing == namespace || statement.starts_with(existing.as_str())
        });
        if present {
            return false;
        }

        self.usings.push(statement);
        true
    }

    /// The collected statements in first-seen order.
    pub fn usings(&self) -> &[String] {
        &self.usings
    }

    /// Resolves `ty` to its source-level spelling.
    ///
    /// Registers the namespace of `ty` and of every nested generic argument.
    ///
    /// ## Examples
    ///
    /// ```
    /// use proxygen_define::TypeRef;
    /// use proxygen_gen::type_names::TypeNameContext;
    ///
    /// let mut ctx = TypeNameContext::new();
    /// let ty = TypeRef::generic(
    ///     "System.Collections.Generic",
    ///     "Dictionary`2",
    ///     vec![TypeRef::new("System", "String"), TypeRef::new("Acme.Books", "BookDto")],
    /// );
    ///
    /// assert_eq!(ctx.resolve(&ty), "Dictionary<string,BookDto>");
    /// assert_eq!(
    ///     ctx.usings(),
    ///     ["using System.Collections.Generic;", "using System;", "using Acme.Books;"]
    /// );
    /// ```
    pub fn resolve(&mut self, ty: &TypeRef) -> String {
        if let Some(namespace) = ty.namespace.as_deref() {
            self.add_namespace(namespace);
        }

        if !ty.is_generic() {
            return normalize_type_name(&ty.name).to_string();
        }

        let arguments: Vec<String> = ty
            .generic_arguments
            .iter()
            .map(|argument| self.resolve(argument))
            .collect();

        format!("{}<{}>", ty.base_name(), arguments.join(","))
    }
}

/// Renders `using {namespace};`.
pub fn using_statement(namespace: &str) -> String {
    format!("using {};", namespace)
}

/// Maps a framework type name to its C# keyword alias.
///
/// Names outside the alias table are returned unchanged.
///
/// ```
/// use proxygen_gen::type_names::normalize_type_name;
///
/// assert_eq!(normalize_type_name("Int32"), "int");
/// assert_eq!(normalize_type_name("BookDto"), "BookDto");
/// ```
pub fn normalize_type_name(name: &str) -> &str {
    match name {
        "Void" => "void",
        "Boolean" => "bool",
        "String" => "string",
        "Int32" => "int",
        "Int64" => "long",
        "Int16" => "short",
        "Byte" => "byte",
        "SByte" => "sbyte",
        "UInt16" => "ushort",
        "UInt32" => "uint",
        "UInt64" => "ulong",
        "Single" => "float",
        "Double" => "double",
        "Decimal" => "decimal",
        "Char" => "char",
        "Object" => "object",
        other => other,
    }
}
