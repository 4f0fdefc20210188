//! The store engine.
//!
//! A store owns the current state, the active reducer, and the listener set.
//! State changes only through `dispatch`; readers get independent copies.

mod action;
mod listener;
mod lock;
mod store;

pub use action::{Action, Dispatch, DispatchResult, Dispatched, Thunk};
pub use listener::{listener, Listener, Unsubscribe};
pub use store::{create_store, Enhancer, Store, StoreBuilder, StoreCreator};
