//! Query functions over the data model. Each takes the connection of the
//! caller's scope explicitly.

pub mod application;
pub mod employee;
