//! Metadata index of a compiled client project.
//!
//! The generator never loads compiled binaries itself. The build of the client
//! project emits a metadata index next to its output assembly describing, per
//! assembly, the interfaces it declares (with their method signatures and
//! inherited interfaces) and the module types it declares (with their module
//! dependencies). This module models that index and answers the capability
//! queries discovery needs.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::DefineError;
use crate::type_ref::TypeRef;

/// Marker interface that every remote-capable service interface extends.
pub const REMOTE_SERVICE_INTERFACE: &str = "Volo.Abp.IRemoteService";

/// Every assembly reachable from the client project's build output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyIndex {
    #[serde(default)]
    pub assemblies: Vec<AssemblyMetadata>,
}

/// One compiled unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyMetadata {
    pub name: String,
    #[serde(default)]
    pub interfaces: Vec<InterfaceDescriptor>,
    #[serde(default)]
    pub modules: Vec<ModuleDescriptor>,
}

/// An interface type and the methods it declares.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceDescriptor {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    /// Interfaces this one extends, each with its own (closed) method list.
    #[serde(default)]
    pub base_interfaces: Vec<InterfaceDescriptor>,
    /// Methods declared directly on this interface.
    #[serde(default)]
    pub methods: Vec<MethodSignature>,
}

impl InterfaceDescriptor {
    /// Returns `namespace.name`.
    pub fn full_name(&self) -> String {
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.name),
            _ => self.name.clone(),
        }
    }

    /// Returns `true` if this interface is, or extends, the remote service marker.
    pub fn is_remote_service(&self) -> bool {
        self.full_name() == REMOTE_SERVICE_INTERFACE
            || self.base_interfaces.iter().any(InterfaceDescriptor::is_remote_service)
    }

    /// Returns every interface this one extends, transitively.
    ///
    /// Depth-first in declaration order, deduplicated by full name, never
    /// including `self`.
    pub fn all_base_interfaces(&self) -> Vec<&InterfaceDescriptor> {
        let mut seen = HashSet::from([self.full_name()]);
        let mut result = Vec::new();
        let mut stack: Vec<&InterfaceDescriptor> = self.base_interfaces.iter().rev().collect();

        while let Some(current) = stack.pop() {
            if !seen.insert(current.full_name()) {
                continue;
            }
            result.push(current);
            stack.extend(current.base_interfaces.iter().rev());
        }

        result
    }

    /// Returns inherited methods followed by the interface's own methods.
    pub fn all_methods(&self) -> impl Iterator<Item = &MethodSignature> {
        self.all_base_interfaces()
            .into_iter()
            .flat_map(|base| base.methods.iter())
            .chain(self.methods.iter())
    }
}

/// A method as declared on an interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSignature {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterSignature>,
    pub return_type: TypeRef,
}

/// One method parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSignature {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: TypeRef,
}

impl ParameterSignature {
    pub fn new(name: impl Into<String>, parameter_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            parameter_type,
        }
    }
}

/// A module type and the modules it depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    /// Fully qualified names of depended-on module types.
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl ModuleDescriptor {
    /// Returns `namespace.name`.
    pub fn full_name(&self) -> String {
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.name),
            _ => self.name.clone(),
        }
    }
}

/// Returns the segment after the last `.` of a fully qualified name.
///
/// ```
/// use proxygen_define::assembly::simple_name;
///
/// assert_eq!(simple_name("Acme.BookStore.BookStoreHttpApiClientModule"), "BookStoreHttpApiClientModule");
/// assert_eq!(simple_name("Standalone"), "Standalone");
/// ```
pub fn simple_name(full_name: &str) -> &str {
    full_name.rsplit('.').next().unwrap_or(full_name)
}

impl AssemblyIndex {
    /// Returns the assembly named `name`.
    pub fn assembly(&self, name: &str) -> Option<&AssemblyMetadata> {
        self.assemblies.iter().find(|a| a.name == name)
    }

    /// Finds a module by its fully qualified name, with its owning assembly.
    pub fn find_module(&self, full_name: &str) -> Option<(&AssemblyMetadata, &ModuleDescriptor)> {
        self.assemblies.iter().find_map(|assembly| {
            assembly
                .modules
                .iter()
                .find(|module| module.full_name() == full_name)
                .map(|module| (assembly, module))
        })
    }

    /// Returns the assembly that declares `module`.
    pub fn owning_assembly(&self, module: &ModuleDescriptor) -> Option<&AssemblyMetadata> {
        self.find_module(&module.full_name()).map(|(assembly, _)| assembly)
    }

    /// Returns the single module declared by the assembly named `assembly_name`.
    ///
    /// ## Errors
    ///
    /// - [`DefineError::AssemblyNotFound`] if the assembly is not indexed
    /// - [`DefineError::NoStartupModule`] if it declares no module
    /// - [`DefineError::MultipleStartupModules`] if it declares several
    pub fn startup_module(&self, assembly_name: &str) -> Result<&ModuleDescriptor, DefineError> {
        let assembly = self
            .assembly(assembly_name)
            .ok_or_else(|| DefineError::AssemblyNotFound(assembly_name.to_string()))?;

        match assembly.modules.as_slice() {
            [] => Err(DefineError::NoStartupModule(assembly_name.to_string())),
            [module] => Ok(module),
            modules => Err(DefineError::MultipleStartupModules {
                assembly: assembly_name.to_string(),
                modules: modules.iter().map(ModuleDescriptor::full_name).collect(),
            }),
        }
    }
}
