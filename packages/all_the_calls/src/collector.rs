//! The wrap/activate contract implemented by every collector.

use std::fmt::Debug;

/// The contract shared by every metric collector in this package.
///
/// A collector owns an activation flag and a measurement routine. Wrapping a
/// callable produces a new callable with the identical input/output contract:
/// each invocation first checks the activation flag; if active, the
/// collector-specific [`measure`](Collector::measure) routine runs the
/// original callable exactly once with bookkeeping around it; if inactive, the
/// original callable runs unmodified and no state changes.
///
/// Collectors key all metrics by callable *name*. Two distinct callables
/// wrapped under the same name merge their metrics; this is intentional.
///
/// # Examples
///
/// ```
/// use all_the_calls::{Collector, Counter};
///
/// let counter = Counter::new();
/// let mut greet = counter.wrap("greet", |name: String| format!("hello {name}"));
///
/// assert_eq!(greet("world".to_string()), "hello world");
/// assert_eq!(counter.total_calls(), 1);
/// ```
pub trait Collector: Debug {
    /// Whether measurement currently happens on wrapped calls.
    fn is_active(&self) -> bool;

    /// Sets the activation state.
    ///
    /// Deactivating stops all bookkeeping on subsequent calls without
    /// clearing anything; reactivating resumes accumulation from the prior
    /// state.
    fn set_active(&self, active: bool);

    /// Clears all accumulated state. The activation flag is left unchanged.
    fn initialize(&self);

    /// The collector-specific measurement routine.
    ///
    /// Performs bookkeeping around exactly one invocation of `call`. A panic
    /// unwinding out of `call` propagates to the caller unchanged; the
    /// post-call update is not applied in that case, so an aborted call is
    /// never counted.
    fn measure(&self, name: &str, call: &mut dyn FnMut());

    /// Whether measurement is currently suppressed. Complement of
    /// [`is_active`](Collector::is_active).
    fn is_inactive(&self) -> bool {
        !self.is_active()
    }

    /// Sets the negated activation state; `set_inactive(true)` is equivalent
    /// to `set_active(false)`.
    fn set_inactive(&self, inactive: bool) {
        self.set_active(!inactive);
    }

    /// Wraps a callable so that every invocation is measured by this
    /// collector under the given name.
    ///
    /// The returned callable accepts the same arguments and returns the same
    /// value as the original; no signature transformation occurs. It owns a
    /// cloned handle of this collector, so the collector remains usable and
    /// queryable while wrapped callables are live.
    ///
    /// # Examples
    ///
    /// ```
    /// use all_the_calls::{Collector, Timer};
    ///
    /// let timer = Timer::new();
    /// let mut multiply = timer.wrap("multiply", |(x, y): (i64, i64)| x * y);
    ///
    /// assert_eq!(multiply((2, 3)), 6);
    /// ```
    fn wrap<Args, Ret, F>(
        &self,
        name: impl Into<String>,
        mut callable: F,
    ) -> impl FnMut(Args) -> Ret + 'static
    where
        Self: Sized + Clone + 'static,
        F: FnMut(Args) -> Ret + 'static,
        Args: 'static,
        Ret: 'static,
    {
        let collector = self.clone();
        let name = name.into();

        move |args: Args| {
            if collector.is_inactive() {
                return callable(args);
            }

            let mut args = Some(args);
            let mut result = None;
            collector.measure(&name, &mut || {
                let args = args
                    .take()
                    .expect("measurement routine invokes the callable exactly once");
                result = Some(callable(args));
            });

            result.expect("measurement routine invokes the callable exactly once")
        }
    }
}
