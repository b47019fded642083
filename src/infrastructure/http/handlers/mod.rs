//! HTTP Handlers

mod options;
mod ping;
mod session;
mod voice;
mod websocket;

pub use options::*;
pub use ping::*;
pub use session::*;
pub use voice::*;
pub use websocket::*;
