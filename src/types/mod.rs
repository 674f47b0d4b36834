pub mod series;
pub mod table;
pub mod news;

pub use series::*;
pub use table::*;
pub use news::*;
