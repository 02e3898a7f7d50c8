pub mod descriptor;
pub mod graph;
pub mod injectable;
pub mod instancer;
pub mod path;
pub mod visibility;

pub use descriptor::{
    ControllerDescriptor, Instance, ServiceDescriptor, ServiceFactory, ServiceId,
};
pub use graph::render_dependency_graph;
pub use injectable::{Injectable, ResolvedArgs};
pub use instancer::InstanceContainer;
pub use path::ResolutionPath;
pub use visibility::VisibilityRegistry;
