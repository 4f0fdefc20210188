use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::reducer::Reducer;

/// Lift a typed slice reducer to one over [`serde_json::Value`].
///
/// [`combine_reducers`](crate::combine_reducers) needs one slice type per
/// map. Lifting every slice reducer lets a `bool` filter sit next to a
/// `Vec<String>` list in the same combined state.
///
/// A slice that is missing (`Value::Null`) or does not decode as `T` is
/// reduced from `T::default()`. If the next slice cannot be encoded, the
/// previous value is kept.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use serde_json::json;
/// use tinflux::{combine_reducers, reducer, value_reducer};
///
/// enum Msg {
///     Add(&'static str),
///     ToggleDone,
/// }
///
/// let todos = reducer(|todos: &Vec<String>, msg: &Msg| match msg {
///     Msg::Add(text) => {
///         let mut next = todos.clone();
///         next.push(text.to_string());
///         next
///     }
///     _ => todos.clone(),
/// });
/// let show_done = reducer(|flag: &bool, msg: &Msg| match msg {
///     Msg::ToggleDone => !*flag,
///     _ => *flag,
/// });
///
/// let root = combine_reducers(BTreeMap::from([
///     ("todos", value_reducer(todos)),
///     ("show_done", value_reducer(show_done)),
/// ]));
///
/// let state = root(&BTreeMap::new(), &Msg::Add("write docs"));
/// let state = root(&state, &Msg::ToggleDone);
/// assert_eq!(state["todos"], json!(["write docs"]));
/// assert_eq!(state["show_done"], json!(true));
/// ```
pub fn value_reducer<T, A>(slice: Reducer<T, A>) -> Reducer<Value, A>
where
    T: Serialize + DeserializeOwned + Default + 'static,
    A: 'static,
{
    Arc::new(move |state: &Value, action: &A| {
        let current = serde_json::from_value::<T>(state.clone()).unwrap_or_else(|error| {
            if !state.is_null() {
                tracing::debug!(%error, "Slice did not decode, reducing from default");
            }
            T::default()
        });

        match serde_json::to_value(slice(&current, action)) {
            Ok(next) => next,
            Err(error) => {
                tracing::warn!(%error, "Slice could not be encoded, keeping previous value");
                state.clone()
            }
        }
    })
}
