//! Drives the demo vehicles against a recording logger and checks exactly
//! what they say.

use rstest::rstest;
use std::sync::{Arc, Mutex};
use wirebox::{args, Args, Container, DiError, Logger};
use wirebox_demo::behavior::{Drivable, FastDriving};
use wirebox_demo::vehicles::{Car, SlowCar, Vehicle};

#[derive(Default)]
struct RecordingLogger {
	lines: Mutex<Vec<String>>,
}

impl RecordingLogger {
	fn lines(&self) -> Vec<String> {
		self.lines.lock().unwrap().clone()
	}
}

impl Logger for RecordingLogger {
	fn log(&self, message: &str) {
		self.lines.lock().unwrap().push(message.to_string());
	}

	fn log_exception(&self, message: &str, error: &(dyn std::error::Error + 'static)) {
		self.lines.lock().unwrap().push(format!("{message}: {error}"));
	}
}

fn test_container() -> (Container, Arc<RecordingLogger>) {
	let container = Container::new();
	let logger = Arc::new(RecordingLogger::default());
	container.bind_instance::<dyn Logger>(Arc::clone(&logger) as Arc<dyn Logger>);
	container.bind::<dyn Drivable, FastDriving>();
	(container, logger)
}

#[test]
fn car_greets_on_construction_and_drives_fast() {
	let (container, logger) = test_container();

	let car = container
		.resolve_with::<Car>(args!["Lets gooooo!".to_string(), 5i32])
		.unwrap();
	car.drive();

	assert_eq!(logger.lines(), vec!["Lets gooooo!", "5", "Drive really fast"]);
}

#[test]
fn car_without_arguments_stays_quiet_until_driven() {
	let (container, logger) = test_container();

	let car = container.resolve::<Car>().unwrap();
	assert!(logger.lines().is_empty());

	car.drive();
	assert_eq!(logger.lines(), vec!["Drive really fast"]);
}

#[rstest]
#[case(args![42i32])] // greeting must be a String
#[case(args!["hi".to_string(), "5".to_string()])] // horsepower must be an i32
#[case(args!["hi".to_string(), 5i32, true])] // no three-argument shape
fn car_rejects_unknown_argument_shapes(#[case] bundle: Args) {
	let (container, _logger) = test_container();

	let Err(error) = container.resolve_with::<Car>(bundle) else {
		panic!("an unknown argument shape should not resolve");
	};
	assert!(matches!(error, DiError::ConstructorNotFound { .. }));
}

#[test]
fn slow_car_overrides_the_global_behavior() {
	let (container, logger) = test_container();

	// The global binding says fast; SlowCar pins its behavior anyway.
	let slow_car = container.resolve::<SlowCar>().unwrap();
	slow_car.drive();

	assert_eq!(logger.lines(), vec!["Drive really slow"]);
}

#[test]
fn vehicles_share_one_logger_singleton() {
	let (container, logger) = test_container();

	let car = container
		.resolve_with::<Car>(args!["hello".to_string()])
		.unwrap();
	let slow_car = container.resolve::<SlowCar>().unwrap();
	car.drive();
	slow_car.drive();

	// Every line, from every vehicle, landed in the single bound logger.
	assert_eq!(
		logger.lines(),
		vec!["hello", "Drive really fast", "Drive really slow"]
	);
}
