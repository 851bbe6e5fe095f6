mod activities;
mod connection;
mod helpers;
mod migrations;
mod records;

pub use connection::Database;
