//! Driving behaviors
//!
//! The behaviors are deliberately trivial: each one logs a single line
//! through its injected logger. They exist to exercise the container, not
//! to do anything interesting.

use std::sync::Arc;
use wirebox::{contract, implements, Args, Container, DiResult, Injectable, Logger};

/// Something a vehicle can delegate its driving to.
pub trait Drivable: Send + Sync {
	fn drive(&self);
}

contract!(dyn Drivable);

pub struct FastDriving {
	logger: Arc<dyn Logger>,
}

impl Injectable for FastDriving {
	fn construct(container: &Container, _args: &Args) -> DiResult<Self> {
		Ok(Self {
			logger: container.resolve::<dyn Logger>()?,
		})
	}
}

impl Drivable for FastDriving {
	fn drive(&self) {
		self.logger.log("Drive really fast");
	}
}

pub struct SlowDriving {
	logger: Arc<dyn Logger>,
}

impl Injectable for SlowDriving {
	fn construct(container: &Container, _args: &Args) -> DiResult<Self> {
		Ok(Self {
			logger: container.resolve::<dyn Logger>()?,
		})
	}
}

impl Drivable for SlowDriving {
	fn drive(&self) {
		self.logger.log("Drive really slow");
	}
}

implements!(FastDriving => dyn Drivable, SlowDriving => dyn Drivable);
