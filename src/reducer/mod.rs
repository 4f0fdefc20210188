//! Reducers and reducer composition.

mod combine;
mod value;

pub use combine::{combine_reducers, reducer, Reducer};
pub use value::value_reducer;
