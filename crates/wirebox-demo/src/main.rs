use tracing_subscriber::EnvFilter;
use wirebox::{args, Container, DiResult};
use wirebox_demo::{register_defaults, Car, SlowCar, Vehicle};

fn main() -> DiResult<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.init();

	let container = Container::new();
	register_defaults(&container);

	let car = container.resolve_with::<Car>(args!["Lets gooooo!".to_string(), 5i32])?;
	car.drive();

	let slow_car = container.resolve::<SlowCar>()?;
	slow_car.drive();

	Ok(())
}
