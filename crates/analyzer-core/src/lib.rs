pub mod error;
mod float_serde;
pub mod records;
pub mod rubric;
pub mod traits;
pub mod types;

pub use error::*;
pub use records::*;
pub use rubric::*;
pub use traits::*;
pub use types::*;
