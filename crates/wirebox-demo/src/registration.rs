//! Default registrations for the demo

use crate::behavior::{Drivable, FastDriving};
use wirebox::{ConsoleLogger, Container, Logger};

/// Binds the default logger and driving behavior.
///
/// Swapping a binding here changes the whole object graph without touching
/// any of the consuming types.
pub fn register_defaults(container: &Container) {
	container.bind::<dyn Logger, ConsoleLogger>();
	container.bind::<dyn Drivable, FastDriving>();
}
