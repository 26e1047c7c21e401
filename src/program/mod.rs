pub mod conversion;
pub mod definition;
pub mod event;
pub mod raw;
pub mod template;

pub use conversion::*;
pub use definition::*;
pub use event::*;
pub use raw::*;
pub use template::*;
