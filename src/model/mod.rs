pub mod account;
pub mod algorithm;
pub mod events;
pub mod gate;
pub mod policy;
pub mod similarity;
