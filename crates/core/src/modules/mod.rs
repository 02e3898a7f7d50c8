pub mod descriptor;
pub mod walker;

pub use descriptor::{ModuleCatalog, ModuleDescriptor, ModuleSource};
pub use walker::{Discovery, ModuleGraphWalker};
