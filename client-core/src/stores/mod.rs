//! Client-side state: the child collection with its selection, and the
//! auth session. Stores are plain injected values owned by the app
//! shell; all mutation happens on the single UI task.

mod auth_store;
mod child_store;

pub use auth_store::AuthStore;
pub use child_store::{ChildStore, NewChild};
