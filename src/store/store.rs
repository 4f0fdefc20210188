use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{panic_message, Result, StoreError};
use crate::reducer::Reducer;
use crate::store::action::{Action, Dispatch, DispatchResult, Dispatched};
use crate::store::listener::{Listener, Listeners, Unsubscribe};
use crate::store::lock;

/// Builds a store from a reducer and optional preloaded state.
///
/// This is what an [`Enhancer`] receives and what it must hand back.
pub type StoreCreator<S, A> = Arc<dyn Fn(Reducer<S, A>, Option<S>) -> Store<S, A> + Send + Sync>;

/// Wraps store construction. The only way to install middleware.
pub type Enhancer<S, A> = Box<dyn FnOnce(StoreCreator<S, A>) -> StoreCreator<S, A> + Send>;

const DEFAULT_NAME: &str = "store";

thread_local! {
    /// Stores whose reducer is running on this thread, by core address.
    static REDUCING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks a store as reducing on the current thread until dropped.
struct ReducingGuard(usize);

impl ReducingGuard {
    fn enter(id: usize) -> Self {
        REDUCING.with(|reducing| reducing.borrow_mut().push(id));
        Self(id)
    }

    fn is_active(id: usize) -> bool {
        REDUCING.with(|reducing| reducing.borrow().contains(&id))
    }
}

impl Drop for ReducingGuard {
    fn drop(&mut self) {
        REDUCING.with(|reducing| {
            let mut reducing = reducing.borrow_mut();
            if let Some(position) = reducing.iter().rposition(|id| *id == self.0) {
                reducing.remove(position);
            }
        });
    }
}

/// State owned by one store. Only the store engine writes these fields.
struct StoreCore<S, A> {
    name: String,
    state: RwLock<S>,
    reducer: RwLock<Reducer<S, A>>,
    listeners: Arc<Listeners>,
}

impl<S, A> StoreCore<S, A>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
{
    fn id(&self) -> usize {
        self as *const Self as usize
    }

    /// Whether this store's reducer is running on the current thread. The
    /// state lock is held for the whole reduction, so touching it again from
    /// here would deadlock.
    fn is_reducing(&self) -> bool {
        ReducingGuard::is_active(self.id())
    }

    fn dispatch(&self, action: Action<A>) -> DispatchResult<A> {
        if self.is_reducing() {
            tracing::warn!(store = %self.name, "Dispatch from inside the reducer rejected");
            return Err(StoreError::ReducerReentry);
        }
        match action {
            Action::Thunk(thunk) => {
                tracing::trace!(store = %self.name, "Running thunk");
                thunk();
                Ok(Dispatched::Ignored)
            }
            Action::Plain(action) => {
                tracing::trace!(store = %self.name, "Reducing action");
                self.reduce(&action)?;
                self.listeners.notify()?;
                Ok(Dispatched::Action(action))
            }
        }
    }

    /// Run the reducer under the state write lock and swap in its result.
    fn reduce(&self, action: &A) -> Result<()> {
        let reducer = Arc::clone(&*lock::read(&self.reducer));
        let mut state = lock::write(&self.state);

        let guard = ReducingGuard::enter(self.id());
        let outcome = catch_unwind(AssertUnwindSafe(|| reducer(&*state, action)));
        drop(guard);

        match outcome {
            Ok(next) => {
                *state = next;
                Ok(())
            }
            Err(payload) => {
                let message = panic_message(payload);
                tracing::warn!(
                    store = %self.name,
                    error = %message,
                    "Reducer panicked, state unchanged"
                );
                Err(StoreError::ReducerFailure { message })
            }
        }
    }
}

/// The single source of truth for an application's state.
///
/// A `Store` is a cheap handle: clones share the same state, reducer, and
/// listeners. State only changes through [`Store::dispatch`].
///
/// # Examples
///
/// ```
/// use tinflux::{create_store, reducer};
///
/// enum Counter {
///     Inc,
///     Dec,
/// }
///
/// let store = create_store(
///     reducer(|count: &i32, action: &Counter| match action {
///         Counter::Inc => count + 1,
///         Counter::Dec => count - 1,
///     }),
///     None,
///     None,
/// );
///
/// store.dispatch(Counter::Inc).unwrap();
/// store.dispatch(Counter::Inc).unwrap();
/// store.dispatch(Counter::Dec).unwrap();
/// assert_eq!(store.get_state(), 1);
/// ```
pub struct Store<S, A> {
    core: Arc<StoreCore<S, A>>,
    dispatch: Dispatch<A>,
}

impl<S, A> Store<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Send + 'static,
{
    /// Create a store starting from `S::default()`, with no enhancer.
    pub fn new(reducer: Reducer<S, A>) -> Self
    where
        S: Default,
    {
        Self::builder(reducer).build()
    }

    /// Start configuring a store.
    pub fn builder(reducer: Reducer<S, A>) -> StoreBuilder<S, A> {
        StoreBuilder::new(reducer)
    }

    fn from_parts(name: String, reducer: Reducer<S, A>, initial: S) -> Self {
        let core = Arc::new(StoreCore {
            name,
            state: RwLock::new(initial),
            reducer: RwLock::new(reducer),
            listeners: Arc::new(Listeners::default()),
        });

        let engine = Arc::clone(&core);
        let dispatch: Dispatch<A> = Arc::new(move |action| engine.dispatch(action));

        Self { core, dispatch }
    }

    /// The same store with a different dispatch entry point.
    pub(crate) fn with_dispatch(mut self, dispatch: Dispatch<A>) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Dispatch an action.
    ///
    /// A plain action is reduced, every listener is notified in subscription
    /// order, and the action comes back as [`Dispatched::Action`]. A thunk is
    /// called once and yields [`Dispatched::Ignored`] without touching state.
    pub fn dispatch(&self, action: impl Into<Action<A>>) -> DispatchResult<A> {
        (self.dispatch)(action.into())
    }

    /// The dispatch function itself, middleware included.
    pub fn dispatcher(&self) -> Dispatch<A> {
        Arc::clone(&self.dispatch)
    }

    /// An independent copy of the current state.
    ///
    /// Owned data is deep-copied by `Clone`. State holding shared handles
    /// (`Arc<Mutex<_>>` and the like) still aliases through the copy; use
    /// [`Store::get_state_json`] to force a full round-trip.
    ///
    /// # Panics
    ///
    /// When called from inside this store's own reducer. The panic is caught
    /// by the dispatch in progress and reported as
    /// [`StoreError::ReducerFailure`].
    pub fn get_state(&self) -> S {
        self.read(S::clone)
    }

    /// Read state without cloning it.
    ///
    /// # Panics
    ///
    /// Under the same condition as [`Store::get_state`].
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&S) -> R,
    {
        if self.core.is_reducing() {
            panic!("{}", StoreError::ReducerReentry);
        }
        let state = lock::read(&self.core.state);
        f(&*state)
    }

    /// Register a listener to run after every state transition.
    ///
    /// Subscribing a listener that is already registered is a no-op; the
    /// returned handle still removes it.
    pub fn subscribe(&self, listener: Listener) -> Unsubscribe {
        if self.core.listeners.add(&listener) {
            tracing::debug!(
                store = %self.core.name,
                listeners = self.core.listeners.len(),
                "Listener subscribed"
            );
        }
        Unsubscribe::new(listener, &self.core.listeners)
    }

    /// Swap the active reducer. Does not dispatch or notify.
    pub fn replace_reducer(&self, reducer: Reducer<S, A>) {
        *lock::write(&self.core.reducer) = reducer;
        tracing::debug!(store = %self.core.name, "Reducer replaced");
    }

    pub fn name(&self) -> &str {
        &self.core.name
    }

    pub fn listener_count(&self) -> usize {
        self.core.listeners.len()
    }
}

impl<S, A> Store<S, A>
where
    S: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
    A: Send + 'static,
{
    /// Copy the state by serializing and reparsing it.
    ///
    /// Fails with [`StoreError::Snapshot`] when the state cannot be
    /// represented as JSON (non-string map keys, for instance).
    pub fn get_state_json(&self) -> Result<S> {
        let value = self.state_value()?;
        Ok(serde_json::from_value(value)?)
    }

    /// The current state as a JSON value.
    pub fn state_value(&self) -> Result<serde_json::Value> {
        if self.core.is_reducing() {
            return Err(StoreError::ReducerReentry);
        }
        let state = lock::read(&self.core.state);
        Ok(serde_json::to_value(&*state)?)
    }
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            dispatch: Arc::clone(&self.dispatch),
        }
    }
}

/// Configures and builds a [`Store`].
pub struct StoreBuilder<S, A> {
    name: String,
    reducer: Reducer<S, A>,
    preloaded_state: Option<S>,
    enhancer: Option<Enhancer<S, A>>,
}

impl<S, A> StoreBuilder<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Send + 'static,
{
    pub fn new(reducer: Reducer<S, A>) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            reducer,
            preloaded_state: None,
            enhancer: None,
        }
    }

    /// Name reported in log events. Defaults to `"store"`.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn preloaded_state(mut self, state: S) -> Self {
        self.preloaded_state = Some(state);
        self
    }

    pub fn enhancer(mut self, enhancer: Enhancer<S, A>) -> Self {
        self.enhancer = Some(enhancer);
        self
    }

    /// Build the store, handing construction to the enhancer if there is one.
    pub fn build(self) -> Store<S, A>
    where
        S: Default,
    {
        let creator = base_creator(self.name);
        match self.enhancer {
            Some(enhancer) => {
                tracing::debug!("Handing store construction to enhancer");
                enhancer(creator)(self.reducer, self.preloaded_state)
            }
            None => creator(self.reducer, self.preloaded_state),
        }
    }
}

/// The undecorated store constructor every enhancer ultimately calls.
fn base_creator<S, A>(name: String) -> StoreCreator<S, A>
where
    S: Clone + Default + Send + Sync + 'static,
    A: Send + 'static,
{
    Arc::new(move |reducer, preloaded_state: Option<S>| {
        tracing::debug!(store = %name, preloaded = preloaded_state.is_some(), "Creating store");
        Store::from_parts(name.clone(), reducer, preloaded_state.unwrap_or_default())
    })
}

/// Create a store.
///
/// Without preloaded state the store starts from `S::default()`. With an
/// enhancer, construction is handed off entirely: the result of
/// `enhancer(create)(reducer, preloaded_state)` is returned as is.
pub fn create_store<S, A>(
    reducer: Reducer<S, A>,
    preloaded_state: Option<S>,
    enhancer: Option<Enhancer<S, A>>,
) -> Store<S, A>
where
    S: Clone + Default + Send + Sync + 'static,
    A: Send + 'static,
{
    StoreBuilder {
        name: DEFAULT_NAME.to_string(),
        reducer,
        preloaded_state,
        enhancer,
    }
    .build()
}
