use std::any::Any;
use std::sync::Arc;

use crate::container::descriptor::{Instance, ServiceId};
use crate::errors::CoreError;

/// Constructor contract for classes managed by the container.
///
/// `dependencies` declares the constructor signature explicitly, in parameter
/// order; `construct` receives the resolved instances in that exact order.
/// This replaces any runtime type introspection: what a class needs is stated
/// where the class is written.
///
/// ```
/// use std::sync::Arc;
/// use arbor_core::{CoreError, Injectable, ResolvedArgs, ServiceId};
///
/// struct UserRepository;
///
/// impl Injectable for UserRepository {
///     fn construct(_: &mut ResolvedArgs) -> Result<Self, CoreError> {
///         Ok(Self)
///     }
/// }
///
/// struct UserService {
///     repository: Arc<UserRepository>,
/// }
///
/// impl Injectable for UserService {
///     fn dependencies() -> Vec<ServiceId> {
///         vec![ServiceId::of::<UserRepository>()]
///     }
///
///     fn construct(args: &mut ResolvedArgs) -> Result<Self, CoreError> {
///         Ok(Self {
///             repository: args.take()?,
///         })
///     }
/// }
/// ```
pub trait Injectable: Send + Sync + 'static {
    /// Ordered constructor dependencies; empty by default.
    fn dependencies() -> Vec<ServiceId> {
        Vec::new()
    }

    /// Build the instance from the resolved dependencies.
    fn construct(args: &mut ResolvedArgs) -> Result<Self, CoreError>
    where
        Self: Sized;
}

/// Resolved constructor arguments, consumed positionally.
pub struct ResolvedArgs {
    class: &'static str,
    args: std::vec::IntoIter<Instance>,
}

impl ResolvedArgs {
    pub(crate) fn new(class: &'static str, args: Vec<Instance>) -> Self {
        Self {
            class,
            args: args.into_iter(),
        }
    }

    /// Take the next argument, downcast to the declared parameter type.
    pub fn take<T: Any + Send + Sync>(&mut self) -> Result<Arc<T>, CoreError> {
        let instance = self.args.next().ok_or_else(|| CoreError::MissingArgument {
            class: self.class.to_string(),
            expected: std::any::type_name::<T>().to_string(),
        })?;

        instance
            .downcast::<T>()
            .map_err(|_| CoreError::ArgumentMismatch {
                class: self.class.to_string(),
                expected: std::any::type_name::<T>().to_string(),
            })
    }

    /// Number of arguments not yet consumed
    pub fn remaining(&self) -> usize {
        self.args.len()
    }
}
