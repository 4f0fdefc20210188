use std::collections::BTreeMap;
use std::sync::Arc;

use crate::store::{Action, Dispatch, DispatchResult};

/// Produces an action (or a thunk) from its arguments.
///
/// Several arguments are passed as a tuple.
pub type ActionCreator<P, A> = Arc<dyn Fn(P) -> Action<A> + Send + Sync>;

/// An action creator that dispatches what it creates.
pub type BoundActionCreator<P, A> = Arc<dyn Fn(P) -> DispatchResult<A> + Send + Sync>;

/// Wrap a closure returning an action, or anything convertible to one, as an
/// [`ActionCreator`].
pub fn action_creator<P, A, R, F>(f: F) -> ActionCreator<P, A>
where
    F: Fn(P) -> R + Send + Sync + 'static,
    R: Into<Action<A>>,
{
    Arc::new(move |args: P| -> Action<A> { f(args).into() })
}

/// Bind a single action creator to `dispatch`.
pub fn bind_action_creator<P, A>(
    creator: ActionCreator<P, A>,
    dispatch: Dispatch<A>,
) -> BoundActionCreator<P, A>
where
    P: 'static,
    A: 'static,
{
    Arc::new(move |args: P| dispatch(creator(args)))
}

/// Bind every action creator in the map to `dispatch`, keeping the keys.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use tinflux::{action_creator, bind_action_creators, reducer, ActionCreator, Store};
///
/// let store = Store::new(reducer(|total: &i64, n: &i64| total + n));
///
/// let mut creators: BTreeMap<&str, ActionCreator<i64, i64>> = BTreeMap::new();
/// creators.insert("add", action_creator(|n: i64| n));
/// creators.insert("subtract", action_creator(|n: i64| -n));
///
/// let actions = bind_action_creators(creators, store.dispatcher());
/// actions["add"](10).unwrap();
/// actions["subtract"](3).unwrap();
/// assert_eq!(store.get_state(), 7);
/// ```
pub fn bind_action_creators<K, P, A>(
    creators: BTreeMap<K, ActionCreator<P, A>>,
    dispatch: Dispatch<A>,
) -> BTreeMap<K, BoundActionCreator<P, A>>
where
    K: Ord,
    P: 'static,
    A: 'static,
{
    creators
        .into_iter()
        .map(|(key, creator)| (key, bind_action_creator(creator, Arc::clone(&dispatch))))
        .collect()
}
