pub mod module_info;
pub mod scope;

pub use module_info::ModuleInfo;
pub use scope::ReformatScope;
