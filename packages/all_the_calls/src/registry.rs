//! Bulk instrumentation of the callable members of a composite type.

use std::collections::HashMap;
use std::fmt;

use crate::{Collector, Error};

type BoxedMethod<Args, Ret> = Box<dyn FnMut(Args) -> Ret>;

/// An explicit registration list for the callable members of a composite
/// type, with bulk instrumentation in one step.
///
/// This is the composition-time equivalent of rewriting a type definition:
/// the type registers its callable members by name, and
/// [`instrument`](MethodRegistry::instrument) substitutes the matching
/// members with wrapped equivalents before any of them is invoked. Members
/// registered after instrumentation are not affected.
///
/// All members of one registry share a single argument type and a single
/// return type; use tuples for multi-argument members.
///
/// # Examples
///
/// ```
/// use all_the_calls::{Counter, MethodRegistry};
///
/// let mut registry = MethodRegistry::new();
/// registry.register("double", |x: i64| x * 2);
/// registry.register("negate", |x: i64| -x);
/// registry.register("identity", |x: i64| x);
///
/// let counter = Counter::new();
/// registry
///     .instrument(&counter, Some(&["double", "negate"]))
///     .unwrap();
///
/// assert_eq!(registry.invoke("double", 4).unwrap(), 8);
/// assert_eq!(registry.invoke("identity", 4).unwrap(), 4);
///
/// // Only the listed members feed the collector.
/// assert_eq!(counter.calls("double"), 1);
/// assert_eq!(counter.calls("identity"), 0);
/// ```
pub struct MethodRegistry<Args, Ret> {
    methods: HashMap<String, BoxedMethod<Args, Ret>>,
}

impl<Args, Ret> MethodRegistry<Args, Ret>
where
    Args: 'static,
    Ret: 'static,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            methods: HashMap::new(),
        }
    }

    /// Registers a callable member under the given name.
    ///
    /// Registering a second member under an existing name replaces the first.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        method: impl FnMut(Args) -> Ret + 'static,
    ) {
        self.methods.insert(name.into(), Box::new(method));
    }

    /// Invokes the member registered under the given name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if no member is registered under
    /// the name.
    pub fn invoke(&mut self, name: &str, args: Args) -> crate::Result<Ret> {
        let method = self.methods.get_mut(name).ok_or_else(|| {
            Error::invalid_argument(name, "no callable member is registered under this name")
        })?;

        Ok(method(args))
    }

    /// The registered member names, sorted lexicographically.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.methods.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether the registry has no registered members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Rewraps registered members so that their invocations feed the given
    /// collector, each under its registered name.
    ///
    /// With `names` of `None`, every currently registered member is wrapped.
    /// With a list, exactly the listed members are wrapped and the rest are
    /// left untouched. This is a one-time transformation: members registered
    /// afterward are not affected, and instrumenting again stacks another
    /// wrapper around the first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if a listed name does not refer to
    /// a registered member. No member is rewrapped in that case.
    pub fn instrument<C>(&mut self, collector: &C, names: Option<&[&str]>) -> crate::Result<()>
    where
        C: Collector + Clone + 'static,
    {
        let selected: Vec<String> = match names {
            None => self.names(),
            Some(listed) => {
                // Validate the whole list up front so a bad name leaves the
                // registry fully untouched.
                for name in listed {
                    if !self.methods.contains_key(*name) {
                        return Err(Error::invalid_argument(
                            *name,
                            "no callable member is registered under this name",
                        ));
                    }
                }
                listed.iter().map(|name| (*name).to_owned()).collect()
            }
        };

        for name in selected {
            let method = self
                .methods
                .remove(&name)
                .expect("presence of every selected name was validated above");
            let wrapped = collector.wrap(name.clone(), method);
            self.methods.insert(name, Box::new(wrapped));
        }

        Ok(())
    }
}

impl<Args, Ret> Default for MethodRegistry<Args, Ret>
where
    Args: 'static,
    Ret: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Args, Ret> fmt::Debug for MethodRegistry<Args, Ret>
where
    Args: 'static,
    Ret: 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodRegistry")
            .field("names", &self.names())
            .finish_non_exhaustive()
    }
}
