pub mod dispatch_handler;

pub use dispatch_handler::*;
