pub mod error;
pub mod traits;
pub mod trend;

pub use error::*;
pub use traits::*;
pub use trend::*;
