//! Vehicle payloads
//!
//! `Car` takes optional constructor arguments (a greeting and a horsepower
//! figure) and gets its driving behavior from the global binding. `SlowCar`
//! pins its behavior to [`SlowDriving`] no matter what is bound globally.

use crate::behavior::{Drivable, SlowDriving};
use std::sync::Arc;
use wirebox::{contract, implements, Args, Container, DiError, DiResult, Injectable, Logger};

pub trait Vehicle: Send + Sync {
	fn drive(&self);
}

contract!(dyn Vehicle);

pub struct Car {
	driving: Arc<dyn Drivable>,
}

impl Injectable for Car {
	/// Accepts zero arguments, a greeting, or a greeting plus horsepower.
	/// Any other shape is rejected, mirroring a class with exactly three
	/// constructor overloads.
	fn construct(container: &Container, args: &Args) -> DiResult<Self> {
		let logger = container.resolve::<dyn Logger>()?;

		match args.len() {
			0 => {}
			1 | 2 => {
				let greeting = args
					.get::<String>(0)
					.ok_or_else(|| DiError::no_constructor::<Self>(args))?;
				logger.log(greeting);
				if args.len() == 2 {
					let horsepower = args
						.get::<i32>(1)
						.ok_or_else(|| DiError::no_constructor::<Self>(args))?;
					logger.log(&horsepower.to_string());
				}
			}
			_ => return Err(DiError::no_constructor::<Self>(args)),
		}

		Ok(Self {
			driving: container.resolve::<dyn Drivable>()?,
		})
	}
}

impl Vehicle for Car {
	fn drive(&self) {
		self.driving.drive();
	}
}

pub struct SlowCar {
	driving: Arc<dyn Drivable>,
}

impl Injectable for SlowCar {
	fn construct(container: &Container, args: &Args) -> DiResult<Self> {
		if !args.is_empty() {
			return Err(DiError::no_constructor::<Self>(args));
		}
		// Per-type override: always slow, regardless of the global binding.
		Ok(Self {
			driving: container.resolve_as::<dyn Drivable, SlowDriving>()?,
		})
	}
}

impl Vehicle for SlowCar {
	fn drive(&self) {
		self.driving.drive();
	}
}

implements!(Car => dyn Vehicle, SlowCar => dyn Vehicle);
