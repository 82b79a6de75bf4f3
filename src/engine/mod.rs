pub mod controller;
pub mod events;
mod run_loop;

pub use controller::EngineController;
pub use events::UiNotification;
