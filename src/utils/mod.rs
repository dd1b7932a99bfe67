pub mod counter;

pub use counter::live_count;
