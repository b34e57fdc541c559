//! Cache Module
//!
//! Scalar values stored under generated keys, with recorded `store` calls.

mod stored;
mod value;

pub use stored::{StoreOperation, StoredCache, STORE_OPERATION};
pub use value::StoreValue;
