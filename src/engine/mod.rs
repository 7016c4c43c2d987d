pub mod settings;
pub mod simulator;
