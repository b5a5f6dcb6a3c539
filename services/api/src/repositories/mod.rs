//! Database repositories

pub mod cart;
pub mod user;

pub use cart::{CartRepository, CartStoreError};
pub use user::{UserRepository, UserStoreError};
