//! Command implementations.

pub mod codes;
pub mod import;

pub use self::codes::execute_codes;
pub use self::import::{execute_import, execute_paste};
