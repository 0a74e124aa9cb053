pub mod cache;
pub mod checker;
pub mod result;

pub use cache::*;
pub use checker::*;
pub use result::*;
