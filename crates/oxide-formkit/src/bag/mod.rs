//! Bags: the attribute, error and option containers owned by fields.

mod attribute;
mod error;
mod option;

pub use attribute::{AttrValue, AttributeBag, RESERVED};
pub use error::ErrorBag;
pub use option::OptionBag;
