#![doc = "The `taskflow_api` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, authentication mechanisms, routing"]
#![doc = "configuration, motivational message provider, and error handling for the"]
#![doc = "TaskFlow API. It is used by the main binary (`main.rs`) to construct and"]
#![doc = "run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod motivation;
pub mod routes;
