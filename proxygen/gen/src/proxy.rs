//! Proxy class assembly.
//!
//! For one controller of the API description, finds the matching local
//! service interface, synthesizes a method for every interface method the
//! server exposes, and renders two files:
//!
//! - `{Controller}ClientProxy.cs`: the proxy class, regenerated every run
//! - `{Controller}ClientProxy.extension.cs`: an empty partial class shell for
//!   user additions, also regenerated every run

use std::path::{Path, PathBuf};

use proxygen_define::{ControllerApiDescriptionModel, InterfaceDescriptor};

use crate::errors::GeneratorError;
use crate::method::synthesize_method;
use crate::template::Template;
use crate::type_names::TypeNameContext;

/// Output folder (and namespace suffix) used when none is configured.
pub const DEFAULT_FOLDER: &str = "ClientProxies";

/// Upper-cased suffix a service interface name must end with.
pub const SERVICE_POSTFIX: &str = "APPSERVICE";

/// Appended to the controller name to form the proxy class name.
pub const CLIENT_PROXY_SUFFIX: &str = "ClientProxy";

/// File extension of generated sources.
pub const SOURCE_EXTENSION: &str = "cs";

/// Marker inserted before the extension of the companion file.
pub const COMPANION_MARKER: &str = "extension";

/// Namespaces every proxy file imports, in order.
pub const DEFAULT_NAMESPACES: [&str; 4] = [
    "System",
    "Volo.Abp.Application.Dtos",
    "Volo.Abp.Http.Client",
    "Volo.Abp.Http.Modeling",
];

const PROXY_TEMPLATE: &str = "\
// This file is automatically generated by ABP framework to use MVC Controllers from CSharp
{{usings}}

namespace {{namespace}}
{
    public partial class {{class_name}} : ClientProxyBase<{{service_interface}}>, {{service_interface}}
    {
{{methods}}    }
}
";

const COMPANION_TEMPLATE: &str = "\
// This file is part of {{class_name}}, you can customize it here
namespace {{namespace}}
{
    public partial class {{class_name}}
    {
    }
}
";

/// The rendered files for one remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProxy {
    /// Proxy class name, e.g. `BookClientProxy`.
    pub class_name: String,
    /// Namespace both files declare.
    pub namespace: String,
    /// Proxy class source.
    pub proxy_source: String,
    /// Companion partial class source.
    pub companion_source: String,
    /// Number of methods emitted into the proxy class.
    pub method_count: usize,
}

impl GeneratedProxy {
    /// `{class_name}.cs`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.class_name, SOURCE_EXTENSION)
    }

    /// Path of the proxy file inside `output_dir`.
    pub fn proxy_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.file_name())
    }

    /// Path of the companion file inside `output_dir`.
    pub fn companion_path(&self, output_dir: &Path) -> PathBuf {
        companion_path(&self.proxy_path(output_dir))
    }
}

/// Derives the companion path by inserting the extension marker.
///
/// ```
/// use std::path::Path;
/// use proxygen_gen::proxy::companion_path;
///
/// assert_eq!(
///     companion_path(Path::new("ClientProxies/BookClientProxy.cs")),
///     Path::new("ClientProxies/BookClientProxy.extension.cs")
/// );
/// ```
pub fn companion_path(proxy_path: &Path) -> PathBuf {
    proxy_path.with_extension(format!("{}.{}", COMPANION_MARKER, SOURCE_EXTENSION))
}

/// Returns `true` if `controller` warrants a proxy.
///
/// The controller must declare at least one interface, and the last one must
/// end with `AppService` (case-insensitive).
pub fn should_generate_proxy(controller: &ControllerApiDescriptionModel) -> bool {
    controller
        .service_interface()
        .is_some_and(|iface| iface.type_name.to_uppercase().ends_with(SERVICE_POSTFIX))
}

/// Returns `{class}ClientProxy` for a controller name.
pub fn proxy_class_name(controller_name: &str) -> String {
    format!("{}{}", controller_name, CLIENT_PROXY_SUFFIX)
}

/// Namespace of the generated files: the root namespace plus the folder path.
///
/// ```
/// use proxygen_gen::proxy::file_namespace;
///
/// assert_eq!(file_namespace("Acme.BookStore", "ClientProxies"), "Acme.BookStore.ClientProxies");
/// assert_eq!(file_namespace("Acme.BookStore", "Proxies/Books"), "Acme.BookStore.Proxies.Books");
/// assert_eq!(file_namespace("", "ClientProxies"), "ClientProxies");
/// ```
pub fn file_namespace(root_namespace: &str, folder: &str) -> String {
    let folder = folder.trim_matches('/').replace('/', ".");
    if root_namespace.is_empty() {
        folder
    } else {
        format!("{}.{}", root_namespace, folder)
    }
}

/// Assembles the proxy and companion files for `controller`.
///
/// Returns `Ok(None)` when no discovered interface matches the controller's
/// service interface; that service is skipped without error. Interface methods
/// the server does not expose are skipped the same way.
///
/// ## Errors
///
/// Returns an error only if an action descriptor cannot be serialized.
pub fn assemble_proxy(
    controller: &ControllerApiDescriptionModel,
    discovered: &[&InterfaceDescriptor],
    root_namespace: &str,
    folder: &str,
) -> Result<Option<GeneratedProxy>, GeneratorError> {
    let Some(service_ref) = controller.service_interface() else {
        return Ok(None);
    };
    let Some(service) = discovered
        .iter()
        .find(|iface| iface.full_name() == service_ref.type_name)
    else {
        tracing::debug!(
            controller = %controller.controller_name,
            interface = %service_ref.type_name,
            "no discovered interface matches, skipping"
        );
        return Ok(None);
    };

    let class_name = proxy_class_name(&controller.controller_name);
    let namespace = file_namespace(root_namespace, folder);

    let mut context = TypeNameContext::with_namespaces(DEFAULT_NAMESPACES);
    if let Some(service_namespace) = service.namespace.as_deref() {
        context.add_namespace(service_namespace);
    }

    let mut methods = Vec::new();
    for signature in service.all_methods() {
        let Some(action) = controller.find_action(&signature.name) else {
            tracing::debug!(
                controller = %controller.controller_name,
                method = %signature.name,
                "server exposes no action for method, skipping"
            );
            continue;
        };
        methods.push(synthesize_method(&mut context, action, signature)?);
    }

    let proxy_source = Template::parse(PROXY_TEMPLATE)
        .fill()
        .slot("usings", context.usings().join("\n"))
        .slot("namespace", namespace.as_str())
        .slot("class_name", class_name.as_str())
        .slot("service_interface", service.name.as_str())
        .slot_with("methods", || methods.join("\n"))
        .render();

    let companion_source = render_companion(&class_name, &namespace);

    Ok(Some(GeneratedProxy {
        method_count: methods.len(),
        class_name,
        namespace,
        proxy_source,
        companion_source,
    }))
}

/// Renders the companion partial class shell.
pub fn render_companion(class_name: &str, namespace: &str) -> String {
    Template::parse(COMPANION_TEMPLATE)
        .fill()
        .slot("class_name", class_name)
        .slot("namespace", namespace)
        .render()
}
