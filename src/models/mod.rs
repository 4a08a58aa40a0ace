pub mod product;
pub mod selector;
pub mod store;

pub use product::*;
pub use selector::*;
pub use store::*;

// Size label that means "notify for any size".
pub const ANY_SIZE: &str = "hepsi";
