//! Proxygen Definition Library
//!
//! This crate provides the data model consumed by the `proxygen-gen` code
//! generator:
//!
//! - The server-published API description ([`ApplicationApiDescriptionModel`]
//!   and friends), exactly as the server serializes it.
//! - Structural type references ([`TypeRef`]) carrying a name, a namespace and
//!   nested generic arguments.
//! - A metadata index of the compiled client project ([`AssemblyIndex`]):
//!   declared interfaces, their method signatures, and the module dependency
//!   graph.
//!
//! ## Examples
//!
//! ```
//! use proxygen_define::TypeRef;
//!
//! let list = TypeRef::generic(
//!     "System.Collections.Generic",
//!     "List`1",
//!     vec![TypeRef::new("Acme.BookStore.Books", "BookDto")],
//! );
//!
//! assert_eq!(list.base_name(), "List");
//! assert!(list.is_generic());
//! assert!(!list.is_async());
//! ```

pub mod api_model;
pub mod assembly;
pub mod errors;
pub mod type_ref;

pub use api_model::{
    ActionApiDescriptionModel, ApplicationApiDescriptionModel, ControllerApiDescriptionModel,
    ControllerInterfaceApiDescriptionModel, MethodParameterApiDescriptionModel,
    ModuleApiDescriptionModel, ParameterApiDescriptionModel, ReturnValueApiDescriptionModel,
};
pub use assembly::{
    AssemblyIndex, AssemblyMetadata, InterfaceDescriptor, MethodSignature, ModuleDescriptor,
    ParameterSignature, REMOTE_SERVICE_INTERFACE,
};
pub use errors::DefineError;
pub use type_ref::TypeRef;
