pub mod api;
pub mod bootstrap;
pub mod cli;
pub mod events;
pub mod state;
