pub mod assignment;
pub mod effective;
pub mod run;
pub mod user;

pub use assignment::*;
pub use effective::*;
pub use run::*;
pub use user::{EditableConfiguration, UserConfiguration};
