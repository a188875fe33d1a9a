//! Logging contract consumed by the container on construction failure
//!
//! The container reports failed constructions through whatever `dyn Logger`
//! singleton is cached at that moment; when none has been registered it falls
//! back to the built-in [`ConsoleLogger`], so failure reporting works before
//! any registration has happened.

use crate::args::Args;
use crate::container::Container;
use crate::error::DiResult;
use crate::injectable::Injectable;
use crate::{contract, implements};

/// Message and exception sink, usually backed by a console.
pub trait Logger: Send + Sync {
	/// Writes one message line.
	fn log(&self, message: &str);

	/// Writes a message together with the error and its source chain.
	fn log_exception(&self, message: &str, error: &(dyn std::error::Error + 'static));
}

contract!(dyn Logger);

/// Logger that prints to standard output.
///
/// Doubles as the container's fallback sink and as a bindable implementation
/// of the [`Logger`] contract.
pub struct ConsoleLogger;

impl ConsoleLogger {
	fn render_exception(message: &str, error: &(dyn std::error::Error + 'static)) -> String {
		let mut rendered = format!("{message}\n  caused by: {error}");
		let mut cause = error.source();
		while let Some(current) = cause {
			rendered.push_str(&format!("\n  caused by: {current}"));
			cause = current.source();
		}
		rendered
	}
}

impl Logger for ConsoleLogger {
	fn log(&self, message: &str) {
		println!("{message}");
	}

	fn log_exception(&self, message: &str, error: &(dyn std::error::Error + 'static)) {
		self.log(&Self::render_exception(message, error));
	}
}

impl Injectable for ConsoleLogger {
	fn construct(_container: &Container, _args: &Args) -> DiResult<Self> {
		Ok(Self)
	}
}

implements!(ConsoleLogger => dyn Logger);

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::DiError;

	#[test]
	fn exception_rendering_walks_the_source_chain() {
		let error = DiError::construction_failed::<ConsoleLogger>("socket closed");

		let rendered = ConsoleLogger::render_exception("could not build logger", &error);

		assert!(rendered.starts_with("could not build logger"));
		assert!(rendered.contains("construction of"));
		assert!(rendered.ends_with("caused by: socket closed"));
	}
}
