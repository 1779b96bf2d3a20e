mod client;
mod form;
mod format;
mod lifecycle;
mod request;

pub use client::*;
pub use form::*;
pub use format::*;
pub use lifecycle::*;
pub use request::*;
