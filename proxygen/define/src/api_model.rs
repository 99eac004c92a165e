//! The server-published API description.
//!
//! These types mirror the JSON document a server exposes at
//! `/api/abp/api-definition`. Field names are serialized in `camelCase` and
//! every map preserves insertion order, so deserializing and re-serializing a
//! document is stable and "first match" lookups follow the server's order.
//!
//! The structure is:
//!
//! ```text
//! ApplicationApiDescriptionModel
//! └── modules: { "app" => ModuleApiDescriptionModel }
//!     └── controllers: { "Acme.BookStore.Books.BookController" => ControllerApiDescriptionModel }
//!         ├── interfaces: [ { type: "Acme.BookStore.Books.IBookAppService" } ]
//!         └── actions: { "GetAsyncById" => ActionApiDescriptionModel }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Snapshot of everything a server exposes remotely, keyed by module name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationApiDescriptionModel {
    #[serde(default)]
    pub modules: IndexMap<String, ModuleApiDescriptionModel>,
}

impl ApplicationApiDescriptionModel {
    /// Returns the module registered under `name`.
    pub fn module(&self, name: &str) -> Option<&ModuleApiDescriptionModel> {
        self.modules.get(name)
    }

    /// Returns the names of all modules in declaration order.
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }
}

/// One server module and its controllers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleApiDescriptionModel {
    #[serde(default)]
    pub root_path: String,
    #[serde(default)]
    pub remote_service_name: String,
    #[serde(default)]
    pub controllers: IndexMap<String, ControllerApiDescriptionModel>,
}

/// One controller: the server-side grouping of actions for a remote service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerApiDescriptionModel {
    pub controller_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller_group_name: Option<String>,
    #[serde(default)]
    pub is_remote_service: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Fully qualified name of the controller type.
    #[serde(rename = "type", default)]
    pub type_name: String,
    /// Implemented interfaces. The last one is the remote service interface.
    #[serde(default)]
    pub interfaces: Vec<ControllerInterfaceApiDescriptionModel>,
    /// Actions keyed by their unique name.
    #[serde(default)]
    pub actions: IndexMap<String, ActionApiDescriptionModel>,
}

impl ControllerApiDescriptionModel {
    /// Returns the authoritative remote service interface (the last declared one).
    pub fn service_interface(&self) -> Option<&ControllerInterfaceApiDescriptionModel> {
        self.interfaces.last()
    }

    /// Finds the first action whose simple name is `name`.
    ///
    /// Overloads cannot be told apart: the first action in declaration order
    /// wins.
    pub fn find_action(&self, name: &str) -> Option<&ActionApiDescriptionModel> {
        self.actions.values().find(|action| action.name == name)
    }
}

/// A reference to an interface implemented by a controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerInterfaceApiDescriptionModel {
    /// Fully qualified interface name.
    #[serde(rename = "type")]
    pub type_name: String,
}

impl ControllerInterfaceApiDescriptionModel {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

/// Server-declared metadata for one operation.
///
/// This is the value embedded, serialized, into every generated asynchronous
/// proxy method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionApiDescriptionModel {
    #[serde(default)]
    pub unique_name: String,
    /// Simple method name; what local interface methods are matched against.
    pub name: String,
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub supported_versions: Vec<String>,
    #[serde(default)]
    pub parameters_on_method: Vec<MethodParameterApiDescriptionModel>,
    #[serde(default)]
    pub parameters: Vec<ParameterApiDescriptionModel>,
    #[serde(default)]
    pub return_value: ReturnValueApiDescriptionModel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_anonymous: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implement_from: Option<String>,
}

/// A parameter as declared on the server-side method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodParameterApiDescriptionModel {
    pub name: String,
    #[serde(default)]
    pub type_as_string: String,
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default)]
    pub type_simple: String,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub default_value: serde_json::Value,
}

/// How a method parameter is bound to the HTTP request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterApiDescriptionModel {
    #[serde(default)]
    pub name_on_method: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_name: Option<String>,
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default)]
    pub type_simple: String,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub default_value: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint_types: Option<Vec<String>>,
    /// Where the value goes: `Path`, `Query`, `Body`, `Form`, `Header`, ...
    #[serde(default)]
    pub binding_source_id: String,
    #[serde(default)]
    pub descriptor_name: String,
}

/// Return type hint for an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnValueApiDescriptionModel {
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default)]
    pub type_simple: String,
}
