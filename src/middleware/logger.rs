use std::fmt::Debug;
use std::sync::Arc;

use crate::middleware::apply::{BoxedMiddleware, DispatchWrapper, MiddlewareApi};
use crate::store::{Action, Dispatch};

/// Middleware that logs every action and the state it produced.
///
/// Events go through `tracing` at `INFO`; failed dispatches are logged at
/// `WARN` and passed through unchanged.
pub fn logger<S, A>() -> BoxedMiddleware<S, A>
where
    S: Clone + Debug + Send + Sync + 'static,
    A: Debug + Send + 'static,
{
    Box::new(|api: MiddlewareApi<S, A>| -> DispatchWrapper<A> {
        Box::new(move |next: Dispatch<A>| -> Dispatch<A> {
            let api = api.clone();
            Arc::new(move |action: Action<A>| {
                tracing::info!(action = ?action, "Dispatching");
                let result = next(action);
                match &result {
                    Ok(dispatched) if dispatched.is_ignored() => {
                        tracing::info!("Action did not reach the reducer");
                    }
                    Ok(_) => tracing::info!(state = ?api.get_state(), "Next state"),
                    Err(error) => tracing::warn!(%error, "Dispatch failed"),
                }
                result
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::apply_middleware;
    use crate::reducer::reducer;
    use crate::store::{create_store, Dispatched};

    #[test]
    fn logger_is_transparent() {
        let store = create_store(
            reducer(|items: &Vec<String>, item: &String| {
                let mut next = items.clone();
                next.push(item.clone());
                next
            }),
            None,
            Some(apply_middleware(vec![logger()])),
        );

        let dispatched = store.dispatch("first".to_string()).unwrap();
        assert_eq!(dispatched, Dispatched::Action("first".to_string()));
        assert!(store.dispatch(Action::thunk(|| {})).unwrap().is_ignored());
        assert_eq!(store.get_state(), vec!["first".to_string()]);
    }
}
