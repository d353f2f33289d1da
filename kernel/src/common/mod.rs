pub mod types;

pub use types::TaskId;
