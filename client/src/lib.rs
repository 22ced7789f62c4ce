//! Typed client for the recipes API: one request wrapper per operation,
//! plus the observable stores a UI subscribes to. The wrappers never touch
//! the stores; callers update them after successful calls.

mod api;
mod store;
mod types;

pub use api::{ApiClient, ClientError};
pub use store::{AppStores, Store};
pub use types::{GoogleLogin, NewRecipe, Recipe, SessionEstablished, UploadedImage};
