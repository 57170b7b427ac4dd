pub mod engine;
pub mod intent;
pub mod registry;
pub mod resolver;
pub mod responses;
pub mod service;
pub mod store;
