pub mod config;
pub mod session;

pub use session::{EditorSession, SliderHandle, Submission};
