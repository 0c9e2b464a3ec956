pub mod error;
pub mod param;
pub mod topology;
