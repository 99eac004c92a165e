//! Shared test utilities for proxygen-gen tests.
//!
//! Fixtures model a small book store: a `Book` controller exposing
//! `IBookAppService`, whose client project declares the interface plus a
//! contracts module.

use proxygen_define::{
    ActionApiDescriptionModel, AssemblyIndex, AssemblyMetadata, ControllerApiDescriptionModel,
    ControllerInterfaceApiDescriptionModel, InterfaceDescriptor, MethodSignature,
    ModuleDescriptor, ParameterApiDescriptionModel, ParameterSignature,
    ReturnValueApiDescriptionModel, TypeRef,
};

pub const BOOK_SERVICE: &str = "Acme.BookStore.Books.IBookAppService";

/// Creates a parameter signature.
pub fn param(name: &str, parameter_type: TypeRef) -> ParameterSignature {
    ParameterSignature::new(name, parameter_type)
}

/// Creates a method signature.
pub fn method(name: &str, parameters: Vec<ParameterSignature>, return_type: TypeRef) -> MethodSignature {
    MethodSignature {
        name: name.to_string(),
        parameters,
        return_type,
    }
}

/// Creates an action with the given unique and simple names.
pub fn action(unique_name: &str, name: &str, http_method: &str, url: &str) -> ActionApiDescriptionModel {
    ActionApiDescriptionModel {
        unique_name: unique_name.to_string(),
        name: name.to_string(),
        http_method: http_method.to_string(),
        url: url.to_string(),
        ..Default::default()
    }
}

/// The `GET api/app/book/{id}` action.
pub fn get_action() -> ActionApiDescriptionModel {
    ActionApiDescriptionModel {
        parameters: vec![ParameterApiDescriptionModel {
            name_on_method: "id".to_string(),
            name: "id".to_string(),
            type_name: "System.Int32".to_string(),
            type_simple: "number".to_string(),
            binding_source_id: "Path".to_string(),
            ..Default::default()
        }],
        return_value: ReturnValueApiDescriptionModel {
            type_name: "Acme.BookStore.Books.BookDto".to_string(),
            type_simple: "Acme.BookStore.Books.BookDto".to_string(),
        },
        implement_from: Some(BOOK_SERVICE.to_string()),
        ..action("GetAsyncById", "GetAsync", "GET", "api/app/book/{id}")
    }
}

/// Creates a controller whose last interface is `service_interface`.
pub fn controller(
    name: &str,
    service_interface: &str,
    actions: Vec<ActionApiDescriptionModel>,
) -> ControllerApiDescriptionModel {
    ControllerApiDescriptionModel {
        controller_name: name.to_string(),
        is_remote_service: true,
        type_name: format!("Acme.BookStore.Controllers.{}Controller", name),
        interfaces: vec![
            ControllerInterfaceApiDescriptionModel::new(
                "Volo.Abp.Application.Services.IApplicationService",
            ),
            ControllerInterfaceApiDescriptionModel::new(service_interface),
        ],
        actions: actions
            .into_iter()
            .map(|action| (action.unique_name.clone(), action))
            .collect(),
        ..Default::default()
    }
}

/// The `Book` controller with its single `GetAsync` action.
pub fn book_controller() -> ControllerApiDescriptionModel {
    controller("Book", BOOK_SERVICE, vec![get_action()])
}

/// `Volo.Abp.Application.Services.IApplicationService`, a remote service marker.
pub fn application_service_interface() -> InterfaceDescriptor {
    InterfaceDescriptor {
        name: "IApplicationService".to_string(),
        namespace: Some("Volo.Abp.Application.Services".to_string()),
        base_interfaces: vec![InterfaceDescriptor {
            name: "IRemoteService".to_string(),
            namespace: Some("Volo.Abp".to_string()),
            base_interfaces: vec![],
            methods: vec![],
        }],
        methods: vec![],
    }
}

/// Creates a remote service interface declaring `methods`.
pub fn service_interface(namespace: &str, name: &str, methods: Vec<MethodSignature>) -> InterfaceDescriptor {
    InterfaceDescriptor {
        name: name.to_string(),
        namespace: Some(namespace.to_string()),
        base_interfaces: vec![application_service_interface()],
        methods,
    }
}

/// `IBookAppService` with `Task<BookDto> GetAsync(int id)`.
pub fn book_interface() -> InterfaceDescriptor {
    service_interface(
        "Acme.BookStore.Books",
        "IBookAppService",
        vec![method(
            "GetAsync",
            vec![param("id", TypeRef::new("System", "Int32"))],
            TypeRef::task_of(TypeRef::new("Acme.BookStore.Books", "BookDto")),
        )],
    )
}

/// Creates a module descriptor.
pub fn module(namespace: &str, name: &str, depends_on: &[&str]) -> ModuleDescriptor {
    ModuleDescriptor {
        name: name.to_string(),
        namespace: Some(namespace.to_string()),
        depends_on: depends_on.iter().map(|d| d.to_string()).collect(),
    }
}

/// Client assembly depending on a contracts assembly that declares `IBookAppService`.
pub fn book_store_index() -> AssemblyIndex {
    AssemblyIndex {
        assemblies: vec![
            AssemblyMetadata {
                name: "Acme.BookStore.HttpApi.Client".to_string(),
                interfaces: vec![],
                modules: vec![module(
                    "Acme.BookStore",
                    "BookStoreHttpApiClientModule",
                    &[
                        "Acme.BookStore.BookStoreApplicationContractsModule",
                        "Volo.Abp.Http.Client.AbpHttpClientModule",
                    ],
                )],
            },
            AssemblyMetadata {
                name: "Acme.BookStore.Application.Contracts".to_string(),
                interfaces: vec![book_interface()],
                modules: vec![module(
                    "Acme.BookStore",
                    "BookStoreApplicationContractsModule",
                    &[],
                )],
            },
        ],
    }
}
