pub mod config;
pub mod error;
pub mod narrative;
pub mod tier;
pub mod window;

pub use config::Config;
pub use error::*;
pub use narrative::*;
pub use tier::*;
pub use window::*;
