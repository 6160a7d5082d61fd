pub use aurum_types::primitives::*;
