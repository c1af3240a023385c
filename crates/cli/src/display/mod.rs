pub mod formatter;

pub use formatter::{format_module, format_spec};
