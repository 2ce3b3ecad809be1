pub mod cli;
pub mod error;
pub mod logging;
pub mod services;
pub mod settings;
pub mod viewer;
pub mod widgets;
