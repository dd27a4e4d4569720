pub mod events;
pub mod id;

pub use events::*;
pub use id::*;
