pub mod identifiers;
pub mod literals;
pub mod utils;

pub use identifiers::*;
pub use literals::*;
pub use utils::*;
