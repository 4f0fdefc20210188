//! Demonstration of a store with middleware, listeners, and thunks

use std::collections::BTreeMap;

use tinflux::{
    action_creator, apply_middleware, bind_action_creators, combine_reducers, listener, middleware,
    reducer, Action, ActionCreator, Reducer, Store,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
enum CounterAction {
    Increment,
    Decrement,
    Reset,
}

fn counter() -> Reducer<i64, CounterAction> {
    reducer(|count: &i64, action: &CounterAction| match action {
        CounterAction::Increment => count + 1,
        CounterAction::Decrement => count - 1,
        CounterAction::Reset => 0,
    })
}

fn history() -> Reducer<i64, CounterAction> {
    reducer(|dispatched: &i64, _: &CounterAction| dispatched + 1)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Store Example: Counter ===\n");

    let mut reducers = BTreeMap::new();
    reducers.insert("count", counter());
    reducers.insert("dispatched", history());

    let store = Store::builder(combine_reducers(reducers))
        .name("counter")
        .enhancer(apply_middleware(vec![middleware::logger()]))
        .build();

    println!("1. Subscribing a listener");
    let render = {
        let store = store.clone();
        listener(move || {
            let state = store.get_state();
            println!(
                "   [Store Update] count = {}, dispatched = {}",
                state["count"], state["dispatched"]
            );
        })
    };
    let unsubscribe = store.subscribe(render);

    println!("\n2. Dispatching through bound action creators");
    let mut creators: BTreeMap<&str, ActionCreator<(), CounterAction>> = BTreeMap::new();
    creators.insert("increment", action_creator(|()| CounterAction::Increment));
    creators.insert("decrement", action_creator(|()| CounterAction::Decrement));
    let actions = bind_action_creators(creators, store.dispatcher());

    for name in ["increment", "increment", "increment", "decrement"] {
        if let Err(error) = actions[name](()) {
            eprintln!("   dispatch failed: {error}");
        }
    }

    println!("\n3. Dispatching a thunk that resets the counter");
    let handle = store.clone();
    let reset = Action::thunk(move || {
        println!("   [Thunk] resetting");
        if let Err(error) = handle.dispatch(CounterAction::Reset) {
            eprintln!("   reset failed: {error}");
        }
    });
    if let Err(error) = store.dispatch(reset) {
        eprintln!("   thunk failed: {error}");
    }

    println!("\n4. Unsubscribing and dispatching silently");
    unsubscribe.unsubscribe();
    if let Err(error) = store.dispatch(CounterAction::Increment) {
        eprintln!("   dispatch failed: {error}");
    }

    let state = store.get_state();
    println!("\n5. Final state: {:?}", state);
    println!("\n✓ Example complete!");
}
