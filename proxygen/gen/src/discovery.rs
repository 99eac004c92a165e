//! Remote service discovery.
//!
//! Starting from the client project's startup module, collects every
//! remote-capable interface declared in the module's assembly, then follows
//! module dependencies that are client or contracts modules and collects
//! theirs too.
//!
//! The walk is a worklist over module names with a visited set, so shared
//! dependencies are visited once and dependency cycles terminate.

use std::collections::HashSet;

use proxygen_define::assembly::simple_name;
use proxygen_define::{AssemblyIndex, InterfaceDescriptor, ModuleDescriptor};

/// Module name suffixes whose dependencies are followed.
pub const FOLLOWED_MODULE_SUFFIXES: [&str; 2] = ["HttpApiClientModule", "ApplicationContractsModule"];

/// Returns `true` if discovery should descend into the module `full_name`.
pub fn is_followed_module(full_name: &str) -> bool {
    let name = simple_name(full_name);
    FOLLOWED_MODULE_SUFFIXES
        .iter()
        .any(|suffix| name.ends_with(suffix))
}

/// Collects the remote service interfaces reachable from `root`.
///
/// Interfaces are deduplicated by full name and returned in first-seen order.
/// Dependencies missing from `index` are skipped.
pub fn discover_remote_services<'a>(
    index: &'a AssemblyIndex,
    root: &'a ModuleDescriptor,
) -> Vec<&'a InterfaceDescriptor> {
    let mut visited_modules: HashSet<String> = HashSet::new();
    let mut seen_interfaces: HashSet<String> = HashSet::new();
    let mut services = Vec::new();
    let mut worklist: Vec<&ModuleDescriptor> = vec![root];

    while let Some(module) = worklist.pop() {
        let module_name = module.full_name();
        if !visited_modules.insert(module_name.clone()) {
            continue;
        }

        match index.owning_assembly(module) {
            Some(assembly) => {
                for interface in assembly.interfaces.iter().filter(|i| i.is_remote_service()) {
                    if seen_interfaces.insert(interface.full_name()) {
                        services.push(interface);
                    }
                }
            }
            None => tracing::debug!(module = %module_name, "module has no indexed assembly"),
        }

        // Reversed so dependencies are visited in declaration order.
        for dependency in module.depends_on.iter().rev() {
            if !is_followed_module(dependency) || visited_modules.contains(dependency) {
                continue;
            }
            match index.find_module(dependency) {
                Some((_, dependency_module)) => worklist.push(dependency_module),
                None => tracing::debug!(
                    module = %module_name,
                    dependency = %dependency,
                    "dependency not found in metadata index, skipping"
                ),
            }
        }
    }

    services
}
