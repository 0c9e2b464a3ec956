pub mod device;
pub mod facade;
pub mod matching;
