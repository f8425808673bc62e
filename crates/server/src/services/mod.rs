//! Background services.

pub mod publisher;
