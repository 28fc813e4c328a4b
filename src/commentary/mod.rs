pub mod insight;
pub mod labels;

pub use insight::Commentary;
pub use labels::GaugeBand;
