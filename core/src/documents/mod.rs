// catalogo/src/documents/mod.rs

//! The two stored document types and the payloads they are built from.

pub mod categoria;
pub mod producto;

pub use categoria::{Categoria, CategoriaPayload};
pub use producto::{parse_created_at, Producto, ProductoPayload};
