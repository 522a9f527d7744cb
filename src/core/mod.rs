pub mod data;
pub mod probe;
pub mod settings;
pub mod storage;
