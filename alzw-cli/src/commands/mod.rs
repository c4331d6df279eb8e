//! Command implementations for the alzw CLI.

pub mod compress;
pub mod expand;
pub mod inspect;

pub use compress::cmd_compress;
pub use expand::cmd_expand;
pub use inspect::cmd_inspect;
