//! Core data structures for the Biota engine.

pub mod ecology;
pub mod genome;
pub mod notification;
pub mod organism;

pub use ecology::*;
pub use genome::*;
pub use notification::*;
pub use organism::*;
