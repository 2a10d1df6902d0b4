pub mod errors;
pub mod router;
pub mod types;

pub use errors::*;
pub use router::*;
pub use types::*;
