pub mod classifier;
pub mod index;

pub use classifier::{MooringSummary, aggregate, classify};
pub use index::{ClassifiedMooring, MooringIndex};
