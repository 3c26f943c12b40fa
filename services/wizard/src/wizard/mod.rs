pub mod controller;
pub mod generator;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

// Re-export the controller and the shared state bundle to make them easily
// accessible to the binary that drives the wizard.
pub use controller::WizardController;
pub use generator::UniquenessGenerator;
pub use state::{AppState, Screen};
