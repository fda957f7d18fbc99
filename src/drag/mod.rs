// Drag interaction: session data and the gesture state machine

pub mod machine;
pub mod session;

pub use machine::DragStateMachine;
pub use session::{DragMode, DragSession, Feedback};
