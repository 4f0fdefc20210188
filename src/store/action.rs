use std::fmt;
use std::sync::Arc;

use crate::error::StoreError;

/// A side-effecting callable dispatched in place of a plain action.
pub type Thunk = Box<dyn FnOnce() + Send>;

/// What can be handed to `dispatch`.
///
/// Plain actions go through the reducer. A thunk is run once, synchronously,
/// and never reaches the reducer; it is expected to dispatch real actions
/// itself through a store handle it captured.
pub enum Action<A> {
    Plain(A),
    Thunk(Thunk),
}

impl<A> Action<A> {
    /// Wrap a closure as a thunk action.
    pub fn thunk<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Action::Thunk(Box::new(f))
    }

    pub fn is_thunk(&self) -> bool {
        matches!(self, Action::Thunk(_))
    }

    /// The plain action, if this is one.
    pub fn as_plain(&self) -> Option<&A> {
        match self {
            Action::Plain(action) => Some(action),
            Action::Thunk(_) => None,
        }
    }

    /// Transform the plain action, leaving thunks untouched.
    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> Action<B> {
        match self {
            Action::Plain(action) => Action::Plain(f(action)),
            Action::Thunk(thunk) => Action::Thunk(thunk),
        }
    }
}

impl<A> From<A> for Action<A> {
    fn from(action: A) -> Self {
        Action::Plain(action)
    }
}

impl<A: fmt::Debug> fmt::Debug for Action<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Plain(action) => f.debug_tuple("Plain").field(action).finish(),
            Action::Thunk(_) => f.write_str("Thunk"),
        }
    }
}

/// The value a dispatch call resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched<A> {
    /// The action that was reduced, returned unchanged.
    Action(A),
    /// Nothing reached the reducer: a thunk ran, or a middleware
    /// short-circuited the chain.
    Ignored,
}

impl<A> Dispatched<A> {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Dispatched::Ignored)
    }

    pub fn into_action(self) -> Option<A> {
        match self {
            Dispatched::Action(action) => Some(action),
            Dispatched::Ignored => None,
        }
    }
}

pub type DispatchResult<A> = Result<Dispatched<A>, StoreError>;

/// A dispatch function: the innermost level of the middleware curry, and
/// what every store exposes.
pub type Dispatch<A> = Arc<dyn Fn(Action<A>) -> DispatchResult<A> + Send + Sync>;
