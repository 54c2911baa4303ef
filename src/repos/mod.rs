pub mod drink_store;
pub mod error;
pub mod memory;
pub mod pg;
