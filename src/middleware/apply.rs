use std::sync::{Arc, OnceLock, Weak};

use crate::error::StoreError;
use crate::store::{Action, Dispatch, DispatchResult, Enhancer, Store, StoreCreator};
use crate::utils::{compose, Composable};

/// Wraps the next dispatch in the chain: the middle level of the middleware
/// curry.
pub type DispatchWrapper<A> = Composable<Dispatch<A>>;

pub type BoxedMiddleware<S, A> = Box<dyn Middleware<S, A>>;

/// A dispatch hook.
///
/// `wrap` receives the store facade once, when the chain is assembled, and
/// returns a function from `next` to the dispatch this middleware exposes.
/// The returned dispatch may forward the action (changed or not) to `next`,
/// act before and after it, or skip `next` entirely.
///
/// Closures of the right shape implement this trait.
pub trait Middleware<S, A>: Send + Sync {
    fn wrap(&self, api: MiddlewareApi<S, A>) -> DispatchWrapper<A>;
}

impl<S, A, F> Middleware<S, A> for F
where
    F: Fn(MiddlewareApi<S, A>) -> DispatchWrapper<A> + Send + Sync,
{
    fn wrap(&self, api: MiddlewareApi<S, A>) -> DispatchWrapper<A> {
        self(api)
    }
}

/// The store as seen from inside a middleware.
///
/// `dispatch` restarts the whole chain from the first middleware. It becomes
/// usable once the chain is assembled and stops working once every handle
/// to the enhanced store is gone.
pub struct MiddlewareApi<S, A> {
    store: Store<S, A>,
    dispatch: Weak<OnceLock<Dispatch<A>>>,
}

impl<S, A> MiddlewareApi<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Send + 'static,
{
    pub fn get_state(&self) -> S {
        self.store.get_state()
    }

    pub fn dispatch(&self, action: impl Into<Action<A>>) -> DispatchResult<A> {
        let dispatch = self
            .dispatch
            .upgrade()
            .and_then(|cell| cell.get().cloned())
            .ok_or(StoreError::DispatchUnavailable)?;
        dispatch(action.into())
    }
}

impl<S, A> Clone for MiddlewareApi<S, A> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            dispatch: Weak::clone(&self.dispatch),
        }
    }
}

/// Build an enhancer that threads every dispatch through `middlewares`.
///
/// The first middleware sees each action first and wraps all the others.
/// An empty list leaves the base dispatch untouched.
pub fn apply_middleware<S, A>(middlewares: Vec<BoxedMiddleware<S, A>>) -> Enhancer<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Send + 'static,
{
    Box::new(move |create_store: StoreCreator<S, A>| -> StoreCreator<S, A> {
        let middlewares = Arc::new(middlewares);
        Arc::new(move |reducer, preloaded_state| {
            let store = create_store(reducer, preloaded_state);

            let cell: Arc<OnceLock<Dispatch<A>>> = Arc::new(OnceLock::new());
            let api = MiddlewareApi {
                store: store.clone(),
                dispatch: Arc::downgrade(&cell),
            };

            let wrappers: Vec<DispatchWrapper<A>> = middlewares
                .iter()
                .map(|middleware| middleware.wrap(api.clone()))
                .collect();
            let Ok(chain) = compose(wrappers) else {
                tracing::debug!(store = store.name(), "No middleware to apply");
                return store;
            };

            cell.set(chain(store.dispatcher())).ok();
            tracing::debug!(
                store = store.name(),
                middlewares = middlewares.len(),
                "Middleware chain assembled"
            );

            let entry: Dispatch<A> = Arc::new(move |action| match cell.get() {
                Some(dispatch) => dispatch(action),
                None => Err(StoreError::DispatchUnavailable),
            });
            store.with_dispatch(entry)
        })
    })
}
