pub mod derivation;
pub mod key_material;

#[cfg(test)]
mod tests;

pub use derivation::derive_private_key;
pub use key_material::DerivedKey;
