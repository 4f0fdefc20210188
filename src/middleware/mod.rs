//! Middleware: hooks around every dispatch.
//!
//! A middleware is curried in three levels, each with its own type:
//! [`Middleware`] receives the store facade and yields a [`DispatchWrapper`],
//! which receives the next dispatch and yields the [`Dispatch`] it exposes.
//! [`apply_middleware`] turns a list of them into an enhancer.
//!
//! [`Dispatch`]: crate::store::Dispatch

mod apply;
mod logger;

pub use apply::{apply_middleware, BoxedMiddleware, DispatchWrapper, Middleware, MiddlewareApi};
pub use logger::logger;
