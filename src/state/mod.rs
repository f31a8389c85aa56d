// ============================================================================
// STATE MODULE - Rc<RefCell> state + change notifications
// ============================================================================

pub mod reactivity;
pub mod session_state;

#[cfg(target_arch = "wasm32")]
pub mod app_state;

pub use reactivity::*;
pub use session_state::*;

#[cfg(target_arch = "wasm32")]
pub use app_state::*;
