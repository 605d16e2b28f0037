pub mod admin;
pub mod content;
pub mod gate;
pub mod ops;
