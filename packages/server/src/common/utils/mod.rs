pub mod email;
pub mod filename;
pub mod password;

pub use email::*;
pub use filename::*;
pub use password::*;
