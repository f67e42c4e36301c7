//! Sarcastic commentary for lost games: the proxy in front of the language-model API, the client the game uses
//! to reach it, and the detached task that delivers the result without holding up play.

pub use client::*;
pub use config::*;
pub use error::*;
pub use proxy::*;
pub use task::*;

mod client;
mod config;
mod error;
mod proxy;
mod task;
