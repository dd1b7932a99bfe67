pub mod reduce;
pub mod traits;

pub use traits::Number;
