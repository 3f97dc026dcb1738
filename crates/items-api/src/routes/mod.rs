//! # API Route Modules
//!
//! - `items`: the `/api/items` CRUD surface.

pub mod items;
