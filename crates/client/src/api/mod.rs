//! Typed resource façades over [`crate::ApiClient`], one module per backend
//! resource. List endpoints that paginate go through [`page`] so consumers
//! only ever see the normalized [`page::Page`] shape.

pub mod categories;
pub mod movements;
pub mod page;
pub mod products;
pub mod suppliers;
pub mod warehouses;

pub use page::{Page, PageQuery};
