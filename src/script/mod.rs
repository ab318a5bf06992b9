pub mod conversion;
pub mod definition;
pub mod registry;
pub mod validate;

pub use conversion::*;
pub use definition::*;
pub use registry::*;
