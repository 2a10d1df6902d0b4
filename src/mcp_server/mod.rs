mod router;
mod server;
mod transport;


pub use router::MemoryRouter;
pub use server::*;
pub use transport::*;
