//! # API crate: data access for the task backend
//!
//! Everything the app needs to reach the hosted `Users` and `Tasks` tables.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`backend`] | The [`Backend`] trait: the four calls the client makes |
//! | [`rest`] | [`RestClient`], the reqwest implementation against the REST endpoints |
//! | [`memory`] | [`MemoryBackend`], an in-process implementation for tests and demos |
//! | [`settings`] | Layered [`Settings`] (defaults, `taskdeck.toml`, environment) |
//! | [`error`] | The [`Error`] type every call returns |

pub mod backend;
pub mod error;
pub mod memory;
pub mod rest;
pub mod settings;

pub use backend::Backend;
pub use error::{Error, Result};
pub use memory::{MemoryBackend, Request};
pub use rest::RestClient;
pub use settings::Settings;

pub use store::{NewTask, NewUser, Priority, Task, User};
