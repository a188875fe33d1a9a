//! Demonstration payload for the `wirebox` container
//!
//! Trivial vehicle and driving-behavior types that consume the container
//! purely as injection targets. All the interesting machinery lives in
//! `wirebox` itself.

pub mod behavior;
pub mod registration;
pub mod vehicles;

pub use behavior::{Drivable, FastDriving, SlowDriving};
pub use registration::register_defaults;
pub use vehicles::{Car, SlowCar, Vehicle};
