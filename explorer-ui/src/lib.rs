pub mod components;
pub mod interop;
pub mod signals;

pub use components::*;
pub use interop::*;
pub use signals::*;
