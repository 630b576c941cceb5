//! API surface

pub mod rest;

pub use rest::create_router;
