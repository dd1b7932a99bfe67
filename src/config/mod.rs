pub mod options;

pub use options::MulRule;
