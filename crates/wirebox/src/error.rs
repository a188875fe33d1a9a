//! Container error types

use crate::args::Args;

/// Result alias used throughout the container.
pub type DiResult<T> = Result<T, DiError>;

/// Errors raised while registering or resolving services.
///
/// The first three variants mirror the classic failure modes of a runtime
/// container: an abstract type nobody taught the container to build, a
/// constructor that rejects the supplied arguments, and a constructor or
/// factory that fails while running. The remaining variants come from the
/// cycle detector, which fails fast instead of recursing unboundedly.
#[derive(Debug, thiserror::Error)]
pub enum DiError {
	/// The requested type is abstract and has neither a binding nor a factory.
	#[error("`{0}` is not instantiable: it is abstract and has neither a binding nor a factory")]
	NotInstantiable(&'static str),

	/// The designated constructor of `type_name` rejected the argument bundle.
	#[error("`{type_name}` has no constructor matching the supplied arguments {signature}")]
	ConstructorNotFound {
		/// The type whose construction was attempted
		type_name: &'static str,
		/// Rendered runtime types of the supplied arguments
		signature: String,
	},

	/// The constructor or factory itself failed while building the instance.
	#[error("construction of `{type_name}` failed")]
	ConstructionFailed {
		/// The type whose construction was attempted
		type_name: &'static str,
		/// The underlying failure
		#[source]
		source: Box<dyn std::error::Error + Send + Sync>,
	},

	/// A type was requested again before its own construction completed.
	#[error("circular dependency detected while resolving `{type_name}`\n  path: {path}")]
	CircularDependency {
		/// The type that closed the cycle
		type_name: &'static str,
		/// Resolution path in `A -> B -> A` form
		path: String,
	},

	/// The resolution call chain exceeded the depth cap.
	#[error("maximum resolution depth exceeded ({0})")]
	MaxDepthExceeded(usize),
}

impl DiError {
	/// Builds a [`DiError::NotInstantiable`] for the given type name.
	///
	/// Exposed for the `contract!` macro; user code normally never needs it.
	pub fn not_instantiable(type_name: &'static str) -> Self {
		Self::NotInstantiable(type_name)
	}

	/// Builds a [`DiError::ConstructorNotFound`] for type `T` against the
	/// supplied argument bundle.
	///
	/// Designated constructors call this when the bundle's arity or exact
	/// runtime types match none of the argument shapes they accept.
	///
	/// # Examples
	///
	/// ```
	/// use wirebox::{args, DiError};
	///
	/// struct Engine;
	///
	/// let bundle = args![12i32];
	/// let error = DiError::no_constructor::<Engine>(&bundle);
	/// assert!(matches!(error, DiError::ConstructorNotFound { .. }));
	/// ```
	pub fn no_constructor<T: ?Sized>(args: &Args) -> Self {
		Self::ConstructorNotFound {
			type_name: std::any::type_name::<T>(),
			signature: args.signature(),
		}
	}

	/// Wraps an underlying failure as [`DiError::ConstructionFailed`] for `T`.
	pub fn construction_failed<T: ?Sized>(
		source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
	) -> Self {
		Self::ConstructionFailed {
			type_name: std::any::type_name::<T>(),
			source: source.into(),
		}
	}

	/// Whether this error was raised for the given resolution frame.
	///
	/// Failure reporting happens once, at the frame the error is about;
	/// outer frames propagate it silently. Cycle errors are reported where
	/// the cycle closes, so they never match an enclosing frame.
	pub(crate) fn concerns(&self, frame: &str) -> bool {
		match self {
			Self::NotInstantiable(type_name) => *type_name == frame,
			Self::ConstructorNotFound { type_name, .. } => *type_name == frame,
			Self::ConstructionFailed { type_name, .. } => *type_name == frame,
			Self::CircularDependency { .. } | Self::MaxDepthExceeded(_) => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::args;

	struct Widget;

	#[test]
	fn no_constructor_names_type_and_signature() {
		let bundle = args!["text".to_string(), 3i32];
		let error = DiError::no_constructor::<Widget>(&bundle);

		let rendered = error.to_string();
		assert!(rendered.contains("Widget"));
		assert!(rendered.contains("i32"));
	}

	#[test]
	fn construction_failed_preserves_source() {
		let error = DiError::construction_failed::<Widget>("disk on fire");

		let source = std::error::Error::source(&error).expect("source must be kept");
		assert_eq!(source.to_string(), "disk on fire");
	}

	#[test]
	fn concerns_matches_only_the_named_frame() {
		let error = DiError::not_instantiable(std::any::type_name::<Widget>());

		assert!(error.concerns(std::any::type_name::<Widget>()));
		assert!(!error.concerns("some::outer::Frame"));
	}
}
