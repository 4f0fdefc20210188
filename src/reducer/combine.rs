use std::collections::BTreeMap;
use std::sync::Arc;

/// A pure state transition: previous state and action in, next state out.
///
/// The previous state is borrowed, so a reducer that panics leaves it
/// untouched.
pub type Reducer<S, A> = Arc<dyn Fn(&S, &A) -> S + Send + Sync>;

/// Wrap a closure as a [`Reducer`].
pub fn reducer<S, A, F>(f: F) -> Reducer<S, A>
where
    F: Fn(&S, &A) -> S + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Merge per-slice reducers into one reducer over a map of slices.
///
/// Each key's reducer sees only its own slice; a slice missing from the
/// incoming state starts from `S::default()`. The result holds exactly the
/// keys of `reducers`: slices present in the state but without a reducer are
/// dropped on every transition.
///
/// Every slice shares one state type. Lift slice reducers of different types
/// with [`value_reducer`](crate::value_reducer) to combine them.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use tinflux::{combine_reducers, reducer, Reducer};
///
/// let mut reducers: BTreeMap<&str, Reducer<i32, i32>> = BTreeMap::new();
/// reducers.insert("sum", reducer(|total: &i32, n: &i32| total + n));
/// reducers.insert("max", reducer(|best: &i32, n: &i32| *best.max(n)));
///
/// let root = combine_reducers(reducers);
/// let state = root(&BTreeMap::new(), &5);
/// let state = root(&state, &3);
/// assert_eq!(state["sum"], 8);
/// assert_eq!(state["max"], 5);
/// ```
pub fn combine_reducers<K, S, A>(
    reducers: BTreeMap<K, Reducer<S, A>>,
) -> Reducer<BTreeMap<K, S>, A>
where
    K: Ord + Clone + Send + Sync + 'static,
    S: Default + 'static,
    A: 'static,
{
    Arc::new(move |state: &BTreeMap<K, S>, action: &A| {
        reducers
            .iter()
            .map(|(key, slice_reducer)| {
                let next = match state.get(key) {
                    Some(slice) => slice_reducer(slice, action),
                    None => slice_reducer(&S::default(), action),
                };
                (key.clone(), next)
            })
            .collect()
    })
}
