pub mod models;
pub mod ports;
pub mod roster;
pub mod services;
pub mod tally;
