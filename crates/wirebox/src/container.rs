//! The service container
//!
//! [`Container`] is the single entry point for registration and resolution.
//! It owns three registries: bindings (abstract type -> concrete target),
//! factories (type -> zero-argument builder), and the singleton cache
//! (requested type -> shared instance). Each registry sits behind its own
//! `RwLock`, and no lock is ever held across a constructor or factory call,
//! so recursive dependency resolution re-enters the registries safely.
//!
//! Resolution of a requested type proceeds binding lookup, then singleton
//! cache (for `resolve`), then factory lookup with the post-binding target
//! consulted before the requested type, then the designated constructor.
//!
//! The singleton cache is keyed by the *requested* type, not the concrete
//! target: resolving a contract and resolving its bound implementation
//! directly yields two independently cached instances. That asymmetry is
//! intentional and covered by tests.

use crate::args::Args;
use crate::cycle_detection::{self, ResolutionGuard};
use crate::error::{DiError, DiResult};
use crate::injectable::{BoxedInstance, Implements, Resolvable};
use crate::logger::{ConsoleLogger, Logger};
use std::any::TypeId;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Declares "when asked for A, build this target instead".
///
/// The two closures are monomorphized at `bind` time, where both the
/// abstract and the concrete type are statically known; they carry the
/// unsize coercion a bare `TypeId -> TypeId` pair could not express.
#[derive(Clone)]
struct BindingEntry {
	target: TypeId,
	target_name: &'static str,
	/// Re-erases a factory-produced target instance as the requested type.
	coerce: Arc<dyn Fn(BoxedInstance) -> DiResult<BoxedInstance> + Send + Sync>,
	/// Builds through the target's designated constructor.
	construct: Arc<dyn Fn(&Container, &Args) -> DiResult<BoxedInstance> + Send + Sync>,
}

struct FactoryEntry {
	produce: Arc<dyn Fn() -> BoxedInstance + Send + Sync>,
}

/// Runtime service container: registration, lazy construction, singleton
/// caching and transitive dependency injection.
///
/// Containers are explicit values; create one per process (or per test) and
/// pass it where resolution happens. There is no ambient global instance.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use wirebox::{contract, implements, Args, Container, DiResult, Injectable};
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
/// contract!(dyn Greeter);
///
/// struct Friendly;
///
/// impl Injectable for Friendly {
///     fn construct(_container: &Container, _args: &Args) -> DiResult<Self> {
///         Ok(Friendly)
///     }
/// }
///
/// impl Greeter for Friendly {
///     fn greet(&self) -> String {
///         "hello".to_string()
///     }
/// }
/// implements!(Friendly => dyn Greeter);
///
/// let container = Container::new();
/// container.bind::<dyn Greeter, Friendly>();
///
/// let greeter = container.resolve::<dyn Greeter>()?;
/// assert_eq!(greeter.greet(), "hello");
///
/// // Repeated resolution returns the cached singleton.
/// let again = container.resolve::<dyn Greeter>()?;
/// assert!(Arc::ptr_eq(&greeter, &again));
/// # wirebox::DiResult::Ok(())
/// ```
pub struct Container {
	bindings: RwLock<HashMap<TypeId, BindingEntry>>,
	factories: RwLock<HashMap<TypeId, FactoryEntry>>,
	singletons: RwLock<HashMap<TypeId, BoxedInstance>>,
}

impl Container {
	/// Creates an empty container.
	pub fn new() -> Self {
		Self {
			bindings: RwLock::new(HashMap::new()),
			factories: RwLock::new(HashMap::new()),
			singletons: RwLock::new(HashMap::new()),
		}
	}

	/// Registers a class mapping: requests for `A` build `C` instead.
	///
	/// Re-registering `A` unconditionally overwrites the previous target;
	/// singletons already cached under `A` are unaffected.
	pub fn bind<A, C>(&self)
	where
		A: ?Sized + Resolvable,
		C: Implements<A>,
	{
		let entry = BindingEntry {
			target: TypeId::of::<C>(),
			target_name: std::any::type_name::<C>(),
			coerce: Arc::new(|boxed: BoxedInstance| match boxed.downcast::<Arc<C>>() {
				Ok(concrete) => {
					Ok(Box::new(<C as Implements<A>>::upcast(*concrete)) as BoxedInstance)
				}
				Err(_) => Err(DiError::construction_failed::<C>(
					"factory produced an instance of a different type",
				)),
			}),
			construct: Arc::new(|container: &Container, args: &Args| {
				let value = C::construct(container, args)?;
				Ok(Box::new(<C as Implements<A>>::upcast(Arc::new(value))) as BoxedInstance)
			}),
		};

		tracing::debug!(
			requested = std::any::type_name::<A>(),
			target = entry.target_name,
			"registered binding"
		);
		self.bindings
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.insert(TypeId::of::<A>(), entry);
	}

	/// Registers a ready-made singleton under the requested key `T`.
	///
	/// Later `resolve::<T>` calls return this instance without any
	/// construction; `construct::<T>` still builds fresh ones.
	pub fn bind_instance<T>(&self, instance: Arc<T>)
	where
		T: ?Sized + Resolvable,
	{
		tracing::debug!(requested = std::any::type_name::<T>(), "registered instance");
		self.singletons
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.insert(TypeId::of::<T>(), Box::new(instance));
	}

	/// Registers a zero-argument factory for `T`, bypassing the designated
	/// constructor whenever `T` is built.
	///
	/// A factory may be registered against a contract or against a concrete
	/// type; during resolution the post-binding target's factory is
	/// consulted first, so a contract-level factory acts as a default.
	pub fn bind_factory<T, F>(&self, factory: F)
	where
		T: ?Sized + Resolvable,
		F: Fn() -> Arc<T> + Send + Sync + 'static,
	{
		let entry = FactoryEntry {
			produce: Arc::new(move || Box::new(factory()) as BoxedInstance),
		};
		tracing::debug!(requested = std::any::type_name::<T>(), "registered factory");
		self.factories
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.insert(TypeId::of::<T>(), entry);
	}

	/// Get-or-create the singleton for `T` with no constructor arguments.
	pub fn resolve<T>(&self) -> DiResult<Arc<T>>
	where
		T: ?Sized + Resolvable,
	{
		self.resolve_with(Args::none())
	}

	/// Get-or-create the singleton for `T`.
	///
	/// `args` are used only when this call performs the first construction;
	/// on a cache hit they are ignored entirely.
	pub fn resolve_with<T>(&self, args: Args) -> DiResult<Arc<T>>
	where
		T: ?Sized + Resolvable,
	{
		if let Some(cached) = self.cached::<T>() {
			return Ok(cached);
		}
		let built = self.create::<T>(&args)?;
		Ok(self.cache_first::<T>(built))
	}

	/// Builds a fresh instance of `T` with no constructor arguments.
	pub fn construct<T>(&self) -> DiResult<Arc<T>>
	where
		T: ?Sized + Resolvable,
	{
		self.construct_with(Args::none())
	}

	/// Builds a fresh instance of `T`, never reading or writing the
	/// singleton cache.
	pub fn construct_with<T>(&self, args: Args) -> DiResult<Arc<T>>
	where
		T: ?Sized + Resolvable,
	{
		self.create::<T>(&args)
	}

	/// Resolves contract `A` through a per-call concrete override `C`,
	/// ignoring any global binding for `A`.
	///
	/// The instance is cached under `C`'s key, exactly as if the caller had
	/// resolved `C` directly and upcast the result.
	pub fn resolve_as<A, C>(&self) -> DiResult<Arc<A>>
	where
		A: ?Sized + Resolvable,
		C: Implements<A>,
	{
		self.resolve::<C>().map(<C as Implements<A>>::upcast)
	}

	/// Freshly constructs contract `A` through a concrete override `C`.
	pub fn construct_as<A, C>(&self) -> DiResult<Arc<A>>
	where
		A: ?Sized + Resolvable,
		C: Implements<A>,
	{
		self.construct::<C>().map(<C as Implements<A>>::upcast)
	}

	fn cached<T>(&self) -> Option<Arc<T>>
	where
		T: ?Sized + Resolvable,
	{
		let singletons = self.singletons.read().unwrap_or_else(PoisonError::into_inner);
		singletons
			.get(&TypeId::of::<T>())
			.and_then(|boxed| boxed.downcast_ref::<Arc<T>>())
			.cloned()
	}

	/// Inserts `built` under `T`'s key unless another resolution got there
	/// first, in which case the earlier instance wins and is returned.
	fn cache_first<T>(&self, built: Arc<T>) -> Arc<T>
	where
		T: ?Sized + Resolvable,
	{
		let mut singletons = self.singletons.write().unwrap_or_else(PoisonError::into_inner);
		match singletons.entry(TypeId::of::<T>()) {
			Entry::Occupied(existing) => existing
				.get()
				.downcast_ref::<Arc<T>>()
				.cloned()
				.unwrap_or(built),
			Entry::Vacant(slot) => {
				slot.insert(Box::new(Arc::clone(&built)));
				built
			}
		}
	}

	/// Builds an instance of `T` inside a cycle-detection frame and reports
	/// failures that concern this frame.
	fn create<T>(&self, args: &Args) -> DiResult<Arc<T>>
	where
		T: ?Sized + Resolvable,
	{
		let type_name = std::any::type_name::<T>();
		let _guard: ResolutionGuard = match cycle_detection::begin_resolution(
			TypeId::of::<T>(),
			type_name,
		) {
			Ok(guard) => guard,
			Err(error) => {
				self.report_failure(type_name, &error);
				return Err(error);
			}
		};

		match self.build::<T>(args) {
			Ok(instance) => Ok(instance),
			Err(error) => {
				// Report once, at the frame the error is about; enclosing
				// frames propagate it silently. A binding target constructs
				// inside this frame rather than one of its own, so errors
				// naming the target belong here too.
				let names_target = self
					.binding_target(TypeId::of::<T>())
					.is_some_and(|target| error.concerns(target));
				if error.concerns(type_name) || names_target {
					self.report_failure(type_name, &error);
				}
				Err(error)
			}
		}
	}

	fn build<T>(&self, args: &Args) -> DiResult<Arc<T>>
	where
		T: ?Sized + Resolvable,
	{
		let requested = TypeId::of::<T>();
		let binding = {
			let bindings = self.bindings.read().unwrap_or_else(PoisonError::into_inner);
			bindings.get(&requested).cloned()
		};

		let boxed = match binding {
			Some(entry) => {
				tracing::trace!(
					requested = std::any::type_name::<T>(),
					target = entry.target_name,
					"building via binding"
				);
				if let Some(produce) = self.factory_for(entry.target) {
					(entry.coerce)(produce())?
				} else if let Some(produce) = self.factory_for(requested) {
					produce()
				} else {
					(entry.construct)(self, args)?
				}
			}
			None => {
				tracing::trace!(requested = std::any::type_name::<T>(), "building self-bound");
				if let Some(produce) = self.factory_for(requested) {
					produce()
				} else {
					T::fallback_construct(self, args)?
				}
			}
		};

		match boxed.downcast::<Arc<T>>() {
			Ok(instance) => Ok(*instance),
			Err(_) => Err(DiError::construction_failed::<T>(
				"factory produced an instance of a different type",
			)),
		}
	}

	fn factory_for(&self, type_id: TypeId) -> Option<Arc<dyn Fn() -> BoxedInstance + Send + Sync>> {
		let factories = self.factories.read().unwrap_or_else(PoisonError::into_inner);
		factories.get(&type_id).map(|entry| Arc::clone(&entry.produce))
	}

	fn binding_target(&self, type_id: TypeId) -> Option<&'static str> {
		let bindings = self.bindings.read().unwrap_or_else(PoisonError::into_inner);
		bindings.get(&type_id).map(|entry| entry.target_name)
	}

	/// Best-effort failure reporting: the bound `dyn Logger` singleton if
	/// one is cached, the built-in console logger otherwise. Never
	/// constructs a logger on its own.
	fn report_failure(&self, type_name: &str, error: &DiError) {
		tracing::error!(requested = type_name, %error, "construction failed");
		let message = format!("could not build an instance of `{type_name}`");
		match self.cached::<dyn Logger>() {
			Some(logger) => logger.log_exception(&message, error),
			None => ConsoleLogger.log_exception(&message, error),
		}
	}
}

impl Default for Container {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::injectable::Injectable;

	struct Bolt;

	impl Injectable for Bolt {
		fn construct(_container: &Container, _args: &Args) -> DiResult<Self> {
			Ok(Self)
		}
	}

	#[test]
	fn resolve_caches_by_requested_type() {
		let container = Container::new();

		let first = container.resolve::<Bolt>().unwrap();
		let second = container.resolve::<Bolt>().unwrap();
		assert!(Arc::ptr_eq(&first, &second));
	}

	#[test]
	fn construct_never_touches_the_cache() {
		let container = Container::new();

		let cached = container.resolve::<Bolt>().unwrap();
		let fresh = container.construct::<Bolt>().unwrap();
		assert!(!Arc::ptr_eq(&cached, &fresh));

		// The cache entry is still the original.
		let again = container.resolve::<Bolt>().unwrap();
		assert!(Arc::ptr_eq(&cached, &again));
	}

	#[test]
	fn bind_instance_short_circuits_construction() {
		let container = Container::new();
		let premade = Arc::new(Bolt);

		container.bind_instance::<Bolt>(Arc::clone(&premade));
		let resolved = container.resolve::<Bolt>().unwrap();
		assert!(Arc::ptr_eq(&premade, &resolved));
	}

	#[test]
	fn factory_result_is_returned_verbatim() {
		let container = Container::new();
		let premade = Arc::new(Bolt);
		let handout = Arc::clone(&premade);

		container.bind_factory::<Bolt, _>(move || Arc::clone(&handout));
		let resolved = container.resolve::<Bolt>().unwrap();
		assert!(Arc::ptr_eq(&premade, &resolved));
	}
}
