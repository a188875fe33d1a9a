//! Thread-local circular dependency detection
//!
//! Tracks the set of types currently being resolved on this thread so a
//! dependency chain that re-enters itself fails fast with
//! [`DiError::CircularDependency`] instead of recursing until the stack
//! overflows. A depth cap backstops pathological non-cyclic chains.
//!
//! The state is `thread_local!` because resolution is synchronous: the whole
//! call chain of one `resolve`/`construct` runs on a single thread, and an
//! RAII guard removes each frame on unwind as well as on success.

use crate::error::{DiError, DiResult};
use std::any::TypeId;
use std::cell::RefCell;
use std::collections::HashSet;

/// Maximum resolution depth (prevents pathological cases)
const MAX_RESOLUTION_DEPTH: usize = 100;

struct CycleState {
	/// Types currently being resolved (O(1) cycle check)
	in_progress: HashSet<TypeId>,
	/// Resolution path, for error messages
	path: Vec<(TypeId, &'static str)>,
}

impl CycleState {
	fn new() -> Self {
		Self {
			in_progress: HashSet::new(),
			path: Vec::new(),
		}
	}
}

thread_local! {
	static CYCLE_STATE: RefCell<CycleState> = RefCell::new(CycleState::new());
}

/// Records the start of a resolution frame for `type_id`.
///
/// Fails when the type is already in progress on this thread (a cycle) or
/// when the chain is deeper than [`MAX_RESOLUTION_DEPTH`]. The returned
/// guard pops the frame on drop.
pub(crate) fn begin_resolution(
	type_id: TypeId,
	type_name: &'static str,
) -> DiResult<ResolutionGuard> {
	CYCLE_STATE.with(|state| {
		let mut state = state.borrow_mut();

		if state.path.len() >= MAX_RESOLUTION_DEPTH {
			return Err(DiError::MaxDepthExceeded(state.path.len() + 1));
		}
		if state.in_progress.contains(&type_id) {
			return Err(DiError::CircularDependency {
				type_name,
				path: render_cycle(&state, type_id, type_name),
			});
		}

		state.in_progress.insert(type_id);
		state.path.push((type_id, type_name));
		Ok(())
	})?;

	Ok(ResolutionGuard { type_id })
}

/// RAII frame marker: removes its type from the in-progress set on drop.
pub(crate) struct ResolutionGuard {
	type_id: TypeId,
}

impl Drop for ResolutionGuard {
	fn drop(&mut self) {
		// try_with: the thread-local may already be gone during thread teardown
		let _ = CYCLE_STATE.try_with(|state| {
			let mut state = state.borrow_mut();
			state.in_progress.remove(&self.type_id);
			if let Some(pos) = state.path.iter().rposition(|(id, _)| *id == self.type_id) {
				state.path.remove(pos);
			}
		});
	}
}

/// Renders the cycle as `A -> B -> A`, starting at the repeated type.
fn render_cycle(state: &CycleState, type_id: TypeId, type_name: &'static str) -> String {
	match state.path.iter().position(|(id, _)| *id == type_id) {
		Some(start) => {
			let mut names: Vec<&str> = state.path[start..].iter().map(|(_, name)| *name).collect();
			names.push(type_name);
			names.join(" -> ")
		}
		None => format!("cycle involving `{type_name}`"),
	}
}
