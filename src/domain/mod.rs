pub mod amount;
pub mod charity;
pub mod donation;
pub mod gateway;
pub mod policy;
pub mod ports;
