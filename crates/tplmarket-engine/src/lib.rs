// Engine module - pure view-derivation logic
// This layer sits between stored rows (types/store) and runtime orchestration.
// Nothing here performs I/O; time is always passed in by the caller.

mod filter;
mod reconcile;
mod reveal;

pub use filter::apply;
pub use reconcile::{ReconcilerState, SavedSetReconciler, Toggle};
pub use reveal::{PAGE_SIZE, PROXIMITY_DEBOUNCE_MS, RevealWindow};
