pub mod gui_app;

pub use gui_app::ShellApp;
