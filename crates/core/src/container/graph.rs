use crate::container::descriptor::ServiceId;
use crate::container::instancer::InstanceContainer;

/// Render the module tree with each module's providers and controllers and
/// their dependency lists, in discovery order.
///
/// Output is a plain string; where it goes (stdout, a log line, a debug
/// endpoint) is the host's call.
pub fn render_dependency_graph(
    modules: &[String],
    providers: &[ServiceId],
    controllers: &[ServiceId],
    container: &InstanceContainer,
) -> String {
    let mut out = String::from("[Application Graph]\n");

    for module in modules {
        out.push_str(&format!("Module: {}\n", module));

        for id in providers {
            if container.ownership(id) != Some(module.as_str()) {
                continue;
            }
            out.push_str(&format!("  ├─ Provider: {}\n", id.short_name()));
            if let Some(descriptor) = container.service_descriptor(id) {
                push_dependency_line(&mut out, "  │    ", &descriptor.dependencies);
            }
        }

        for id in controllers {
            if container.ownership(id) != Some(module.as_str()) {
                continue;
            }
            out.push_str(&format!("  └─ Controller: {}\n", id.short_name()));
            if let Some(descriptor) = container.controller_descriptor(id) {
                push_dependency_line(&mut out, "       ", &descriptor.dependencies);
            }
        }
    }

    out
}

fn push_dependency_line(out: &mut String, indent: &str, dependencies: &[ServiceId]) {
    if dependencies.is_empty() {
        return;
    }
    let names = dependencies
        .iter()
        .map(ServiceId::short_name)
        .collect::<Vec<_>>()
        .join(", ");
    out.push_str(&format!("{}└─ Depends on: {}\n", indent, names));
}
