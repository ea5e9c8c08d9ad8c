pub mod loader;
pub mod types;
pub mod validation;


// Re-export main types for easier access
pub use types::*;
pub use validation::Features;
