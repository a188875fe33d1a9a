//! Runtime constructor arguments
//!
//! An [`Args`] bundle carries the caller-supplied constructor arguments of a
//! `resolve_with`/`construct_with` call into the designated constructor.
//! Access is by exact runtime type: [`Args::get`] succeeds only when the
//! stored value is precisely the requested type, with no widening to
//! supertypes and no numeric conversion.

use std::any::Any;

struct ArgValue {
	value: Box<dyn Any + Send + Sync>,
	type_name: &'static str,
}

/// Type-erased bundle of constructor arguments.
///
/// # Examples
///
/// ```
/// use wirebox::args;
///
/// let bundle = args!["hello".to_string(), 5i32];
///
/// assert_eq!(bundle.len(), 2);
/// assert_eq!(bundle.get::<String>(0).map(String::as_str), Some("hello"));
/// assert_eq!(bundle.get::<i32>(1), Some(&5));
/// // Exact-type access: an i32 is not an i64.
/// assert_eq!(bundle.get::<i64>(1), None);
/// ```
#[derive(Default)]
pub struct Args {
	values: Vec<ArgValue>,
}

impl Args {
	/// An empty bundle, for constructors that take no arguments.
	pub fn none() -> Self {
		Self::default()
	}

	/// Appends one argument, recording its exact runtime type.
	pub fn with(mut self, value: impl Any + Send + Sync) -> Self {
		self.values.push(ArgValue {
			type_name: std::any::type_name_of_val(&value),
			value: Box::new(value),
		});
		self
	}

	/// Number of supplied arguments.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Whether no arguments were supplied.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Returns the argument at `index` if it is exactly of type `T`.
	pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
		self.values.get(index).and_then(|arg| arg.value.downcast_ref::<T>())
	}

	/// Renders the runtime types of the bundle, e.g. `(alloc::string::String, i32)`.
	///
	/// Used in [`ConstructorNotFound`](crate::DiError::ConstructorNotFound)
	/// messages to show what the caller actually passed.
	pub fn signature(&self) -> String {
		let names: Vec<&str> = self.values.iter().map(|arg| arg.type_name).collect();
		format!("({})", names.join(", "))
	}
}

/// Builds an [`Args`] bundle from a list of values.
///
/// # Examples
///
/// ```
/// use wirebox::{args, Args};
///
/// let empty = args![];
/// assert!(empty.is_empty());
///
/// let bundle = args![1u8, "label".to_string()];
/// assert_eq!(bundle.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
	() => {
		$crate::Args::none()
	};
	($($value:expr),+ $(,)?) => {{
		let mut bundle = $crate::Args::none();
		$(bundle = bundle.with($value);)+
		bundle
	}};
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn empty_bundle() {
		let bundle = Args::none();
		assert!(bundle.is_empty());
		assert_eq!(bundle.len(), 0);
		assert_eq!(bundle.signature(), "()");
	}

	#[test]
	fn exact_type_access() {
		let bundle = Args::none().with(7i32).with("name".to_string());

		assert_eq!(bundle.get::<i32>(0), Some(&7));
		assert_eq!(bundle.get::<String>(1).map(String::as_str), Some("name"));
	}

	#[rstest]
	#[case(0)] // an i32 is not a u32
	#[case(1)] // a String is not a &str
	fn no_widening_or_conversion(#[case] index: usize) {
		let bundle = Args::none().with(7i32).with("name".to_string());

		assert!(bundle.get::<u32>(index).is_none());
	}

	#[test]
	fn out_of_range_index() {
		let bundle = Args::none().with(1u8);
		assert!(bundle.get::<u8>(5).is_none());
	}

	#[test]
	fn signature_lists_runtime_types() {
		let bundle = args![true, 2u16];
		assert_eq!(bundle.signature(), "(bool, u16)");
	}
}
