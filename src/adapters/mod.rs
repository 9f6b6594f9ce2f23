// Adapters layer: concrete storage engines behind the DataEngine port.

pub mod yaml;

#[cfg(feature = "mongo")]
pub mod mongo;

#[cfg(feature = "mysql")]
pub mod mysql;
