use crate::error::{Result, StoreError};

/// A boxed unary function that can take part in a composition.
pub type Composable<T> = Box<dyn Fn(T) -> T + Send + Sync>;

/// Compose functions right to left.
///
/// `compose(vec![f, g, h])` yields `x -> f(g(h(x)))`. A single function is
/// handed back as-is. An empty list is rejected with
/// [`StoreError::InvalidArgument`] rather than silently becoming the identity.
///
/// # Examples
///
/// ```
/// use tinflux::{compose, Composable};
///
/// let double: Composable<i32> = Box::new(|x| x * 2);
/// let increment: Composable<i32> = Box::new(|x| x + 1);
///
/// let double_after_increment = compose(vec![double, increment]).unwrap();
/// assert_eq!(double_after_increment(3), 8);
/// ```
pub fn compose<T: 'static>(fns: Vec<Composable<T>>) -> Result<Composable<T>> {
    let mut fns = fns.into_iter().rev();
    let innermost = fns.next().ok_or_else(|| StoreError::InvalidArgument {
        reason: "compose requires at least one function".to_string(),
    })?;

    Ok(fns.fold(innermost, |inner, outer| -> Composable<T> {
        Box::new(move |value| outer(inner(value)))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_right_to_left() {
        let f: Composable<String> = Box::new(|s| format!("f({s})"));
        let g: Composable<String> = Box::new(|s| format!("g({s})"));
        let h: Composable<String> = Box::new(|s| format!("h({s})"));

        let composed = compose(vec![f, g, h]).unwrap();
        assert_eq!(composed("x".to_string()), "f(g(h(x)))");
    }

    #[test]
    fn single_function_is_unchanged() {
        let double: Composable<i32> = Box::new(|x| x * 2);
        let composed = compose(vec![double]).unwrap();
        assert_eq!(composed(21), 42);
    }

    #[test]
    fn empty_composition_is_rejected() {
        let err = compose::<i32>(Vec::new()).err().unwrap();
        assert!(matches!(err, StoreError::InvalidArgument { .. }));
    }
}
