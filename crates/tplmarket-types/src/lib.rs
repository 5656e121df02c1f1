pub mod error;
pub mod filter;
pub mod saved;
pub mod template;

pub use error::{Error, Result};
pub use filter::*;
pub use saved::*;
pub use template::*;
