//! Small functional helpers used around the store.

mod bind;
mod compose;

pub use bind::{
    action_creator, bind_action_creator, bind_action_creators, ActionCreator, BoundActionCreator,
};
pub use compose::{compose, Composable};
