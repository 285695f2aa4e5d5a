pub mod angles;
pub mod catalog;
pub mod clustering;
pub mod constants;
pub mod elements;
pub mod passes;
pub mod propagation;
pub mod sattrain;
pub mod sattrain_errors;
pub mod time;
pub mod tle;
