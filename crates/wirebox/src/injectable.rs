//! Injectable trait and abstract-type machinery
//!
//! Three pieces make the type-erased registries safe on stable Rust:
//!
//! - [`Injectable`] is the single designated construction entry point a
//!   concrete type exposes to the container. Dependencies are pulled from the
//!   container inside `construct`, so injection is transitive by construction
//!   rather than by post-hoc field mutation.
//! - [`Resolvable`] covers everything the container can be asked for. Every
//!   `Injectable` type is `Resolvable` (self-binding is the default); trait
//!   objects become `Resolvable` through [`contract!`](crate::contract), with
//!   a fallback that fails because an abstract type cannot build itself.
//! - [`Implements`] is the registration-time unsize glue `Arc<C> -> Arc<A>`,
//!   generated per (implementation, contract) pair by
//!   [`implements!`](crate::implements).

use crate::args::Args;
use crate::container::Container;
use crate::error::DiResult;
use std::any::Any;
use std::sync::Arc;

/// A freshly built instance, erased for storage in the registries.
///
/// Always holds an `Arc<T>` for the type the entry was registered under.
pub type BoxedInstance = Box<dyn Any + Send + Sync>;

/// The designated constructor a concrete type exposes to the container.
///
/// `construct` receives the container for dependency resolution and the
/// caller-supplied argument bundle. A type with several argument shapes
/// matches on `args` and fails with
/// [`DiError::no_constructor`](crate::DiError::no_constructor) for shapes it
/// does not accept.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use wirebox::{Args, Container, DiResult, Injectable};
///
/// struct Tuner;
///
/// impl Injectable for Tuner {
///     fn construct(_container: &Container, _args: &Args) -> DiResult<Self> {
///         Ok(Tuner)
///     }
/// }
///
/// struct Radio {
///     tuner: Arc<Tuner>,
/// }
///
/// impl Injectable for Radio {
///     fn construct(container: &Container, _args: &Args) -> DiResult<Self> {
///         Ok(Radio {
///             tuner: container.resolve::<Tuner>()?,
///         })
///     }
/// }
///
/// let container = Container::new();
/// let radio = container.resolve::<Radio>()?;
/// let shared = container.resolve::<Tuner>()?;
/// assert!(Arc::ptr_eq(&radio.tuner, &shared));
/// # wirebox::DiResult::Ok(())
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
	/// Builds an instance, resolving dependencies from `container`.
	fn construct(container: &Container, args: &Args) -> DiResult<Self>;
}

/// Anything the container can be asked to resolve or construct.
///
/// Do not implement this by hand: concrete types get it automatically via
/// [`Injectable`], trait objects via [`contract!`](crate::contract).
pub trait Resolvable: Send + Sync + 'static {
	/// Builds this type when no binding and no factory cover it.
	///
	/// Self-binding for concrete types; an error for abstract contracts.
	fn fallback_construct(container: &Container, args: &Args) -> DiResult<BoxedInstance>;
}

impl<T: Injectable> Resolvable for T {
	fn fallback_construct(container: &Container, args: &Args) -> DiResult<BoxedInstance> {
		T::construct(container, args).map(|value| Box::new(Arc::new(value)) as BoxedInstance)
	}
}

/// Registration-time unsize glue from a concrete type to a contract it backs.
///
/// `bind::<A, C>()` requires `C: Implements<A>`; the `upcast` impl is where
/// the `Arc<C> -> Arc<A>` coercion happens with both types statically known.
/// Reflexively implemented for every `Injectable` type, so a concrete type
/// can always be bound (or resolved with an override) as itself.
pub trait Implements<A: ?Sized + Resolvable>: Injectable {
	/// Unsizes a shared handle of the concrete type into the contract handle.
	fn upcast(this: Arc<Self>) -> Arc<A>;
}

impl<T: Injectable> Implements<T> for T {
	fn upcast(this: Arc<Self>) -> Arc<T> {
		this
	}
}

/// Declares trait-object types as resolvable contracts.
///
/// A contract resolves only through a binding, a factory, or a pre-bound
/// instance; requesting one without any of those fails with
/// [`DiError::NotInstantiable`](crate::DiError::NotInstantiable).
///
/// # Examples
///
/// ```
/// use wirebox::{contract, Container, DiError};
///
/// trait Horn: Send + Sync {
///     fn honk(&self) -> &'static str;
/// }
/// contract!(dyn Horn);
///
/// let container = Container::new();
/// let error = container.resolve::<dyn Horn>().err().unwrap();
/// assert!(matches!(error, DiError::NotInstantiable(_)));
/// ```
#[macro_export]
macro_rules! contract {
	($(dyn $contract:path),+ $(,)?) => {$(
		impl $crate::Resolvable for dyn $contract {
			fn fallback_construct(
				_container: &$crate::Container,
				_args: &$crate::Args,
			) -> $crate::DiResult<$crate::BoxedInstance> {
				Err($crate::DiError::not_instantiable(
					::std::any::type_name::<dyn $contract>(),
				))
			}
		}
	)+};
}

/// Declares which contracts a concrete type backs.
///
/// Expands to [`Implements`] impls, one per listed pair.
///
/// # Examples
///
/// ```
/// use wirebox::{contract, implements, Args, Container, DiResult, Injectable};
///
/// trait Horn: Send + Sync {
///     fn honk(&self) -> &'static str;
/// }
/// contract!(dyn Horn);
///
/// struct AirHorn;
///
/// impl Injectable for AirHorn {
///     fn construct(_container: &Container, _args: &Args) -> DiResult<Self> {
///         Ok(AirHorn)
///     }
/// }
///
/// impl Horn for AirHorn {
///     fn honk(&self) -> &'static str {
///         "HONK"
///     }
/// }
/// implements!(AirHorn => dyn Horn);
///
/// let container = Container::new();
/// container.bind::<dyn Horn, AirHorn>();
/// assert_eq!(container.resolve::<dyn Horn>()?.honk(), "HONK");
/// # wirebox::DiResult::Ok(())
/// ```
#[macro_export]
macro_rules! implements {
	($($concrete:ty => dyn $contract:path),+ $(,)?) => {$(
		impl $crate::Implements<dyn $contract> for $concrete {
			fn upcast(this: ::std::sync::Arc<Self>) -> ::std::sync::Arc<dyn $contract> {
				this
			}
		}
	)+};
}
