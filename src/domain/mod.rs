//! Domain layer
//!
//! Ports, value objects and pure services. Nothing here touches the disk.

pub mod ports;
pub mod services;
pub mod value_objects;
