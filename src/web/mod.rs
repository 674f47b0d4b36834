pub mod server;
pub mod api;
pub mod state;
pub mod page;

pub use server::*;
pub use api::*;
pub use state::*;
pub use page::*;
