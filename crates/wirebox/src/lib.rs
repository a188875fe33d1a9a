//! # Wirebox
//!
//! A minimal runtime service container: given an abstract type it resolves,
//! lazily constructs, caches and wires together concrete object graphs,
//! optionally overriding construction with a registered factory, and injects
//! dependencies transitively through each type's designated constructor.
//!
//! ## Concepts
//!
//! - **Binding**: `bind::<dyn Contract, Impl>()` declares "when asked for
//!   the contract, build this implementation". Self-binding is the default:
//!   a concrete type resolves without any registration.
//! - **Factory**: `bind_factory` registers a zero-argument builder that
//!   bypasses the designated constructor entirely.
//! - **Singleton cache**: `resolve` returns one shared instance per
//!   *requested* type; `construct` always builds fresh and never caches.
//! - **Injection**: a constructor pulls each dependency from the container:
//!   `resolve` for shared, `construct` for always-fresh, and the `_as`
//!   variants to pin a field to a concrete implementation regardless of the
//!   global binding.
//!
//! Cycles are detected: a dependency chain that re-enters itself fails with
//! [`DiError::CircularDependency`] instead of overflowing the stack.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use wirebox::{args, contract, implements, Args, Container, DiResult, Injectable};
//!
//! trait Engine: Send + Sync {
//!     fn output(&self) -> u32;
//! }
//! contract!(dyn Engine);
//!
//! struct TurboEngine;
//!
//! impl Injectable for TurboEngine {
//!     fn construct(_container: &Container, _args: &Args) -> DiResult<Self> {
//!         Ok(TurboEngine)
//!     }
//! }
//!
//! impl Engine for TurboEngine {
//!     fn output(&self) -> u32 {
//!         300
//!     }
//! }
//! implements!(TurboEngine => dyn Engine);
//!
//! struct Truck {
//!     engine: Arc<dyn Engine>,
//!     payload: u32,
//! }
//!
//! impl Injectable for Truck {
//!     fn construct(container: &Container, args: &Args) -> DiResult<Self> {
//!         let payload = args.get::<u32>(0).copied().unwrap_or(0);
//!         Ok(Truck {
//!             engine: container.resolve::<dyn Engine>()?,
//!             payload,
//!         })
//!     }
//! }
//!
//! let container = Container::new();
//! container.bind::<dyn Engine, TurboEngine>();
//!
//! let truck = container.resolve_with::<Truck>(args![12u32])?;
//! assert_eq!(truck.engine.output(), 300);
//! assert_eq!(truck.payload, 12);
//! # wirebox::DiResult::Ok(())
//! ```

mod args;
mod container;
mod cycle_detection;
mod error;
mod injectable;
mod logger;

pub use args::Args;
pub use container::Container;
pub use error::{DiError, DiResult};
pub use injectable::{BoxedInstance, Implements, Injectable, Resolvable};
pub use logger::{ConsoleLogger, Logger};
