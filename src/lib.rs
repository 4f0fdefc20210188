//! # Tinflux
//!
//! A unidirectional-data-flow state container for Rust.
//!
//! State lives in a single [`Store`]. The only way to change it is to
//! dispatch an action; a pure [`Reducer`] computes the next state and every
//! subscribed listener is told about it.
//!
//! ## Store engine
//!
//! - [`create_store`] / [`Store::builder`] - build a store from a reducer
//! - [`Store::dispatch`] - reduce a plain action, or run a thunk
//! - [`Store::get_state`] - an independent copy of the current state
//! - [`Store::subscribe`] - listeners notified in subscription order
//! - [`Store::replace_reducer`] - swap the reducer at runtime
//!
//! ## Middleware
//!
//! - [`apply_middleware`] - turn a middleware list into an [`Enhancer`]
//! - [`middleware::logger`] - log every action through `tracing`
//!
//! ## Utilities
//!
//! - [`combine_reducers`] - one reducer per slice of a map-shaped state
//! - [`value_reducer`] - lift a typed slice reducer so mixed slice types combine
//! - [`bind_action_creators`] - action creators that dispatch what they create
//! - [`compose`] - right-to-left function composition
//!
//! ```
//! use tinflux::{create_store, listener, reducer};
//!
//! #[derive(Debug)]
//! enum Action {
//!     Increment,
//! }
//!
//! let store = create_store(
//!     reducer(|count: &u32, action: &Action| match action {
//!         Action::Increment => count + 1,
//!     }),
//!     None,
//!     None,
//! );
//!
//! let unsubscribe = store.subscribe(listener(|| println!("state changed")));
//! store.dispatch(Action::Increment).unwrap();
//! unsubscribe.unsubscribe();
//! assert_eq!(store.get_state(), 1);
//! ```

pub mod error;
pub mod middleware;
pub mod reducer;
pub mod store;
pub mod utils;

// Re-export main types for convenience
pub use error::{Result, StoreError};
pub use middleware::{apply_middleware, BoxedMiddleware, DispatchWrapper, Middleware, MiddlewareApi};
pub use reducer::{combine_reducers, reducer, value_reducer, Reducer};
pub use store::{
    create_store, listener, Action, Dispatch, DispatchResult, Dispatched, Enhancer, Listener,
    Store, StoreBuilder, StoreCreator, Thunk, Unsubscribe,
};
pub use utils::{
    action_creator, bind_action_creator, bind_action_creators, compose, ActionCreator,
    BoundActionCreator, Composable,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        // Basic smoke test
        let store = Store::new(reducer(|n: &i32, delta: &i32| n + delta));
        assert_eq!(store.get_state(), 0);
        store.dispatch(42_i32).unwrap();
        assert_eq!(store.get_state(), 42);
    }
}
