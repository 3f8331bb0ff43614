// catalogo/src/lib.rs

//! Catalogo: the document-backed core of the product catalogue.
//!
//!  - `documents`: `Producto` and `Categoria`, plus the payloads clients send.
//!  - `validation`: field-level checks that turn payloads into valid input.
//!  - `store`: the `DocumentStore` port, a typed `Collection<D>` on top of it
//!    and an in-memory backend.
//!  - `service`: `CatalogService`, the façade the transport adapters call.
//!  - `upload`: photo renaming and storage under a configured directory.
//!  - `pipeline`: a named-step async pipeline used to compose request flows.

pub mod documents;
pub mod error;
pub mod pipeline;
pub mod service;
pub mod store;
pub mod upload;
pub mod validation;

pub use crate::documents::{Categoria, CategoriaPayload, Producto, ProductoPayload};
pub use crate::error::{CatalogoError, CatalogoResult, FieldError, PipelineError};
pub use crate::pipeline::context_data::ContextData;
pub use crate::pipeline::control::{PipelineControl, PipelineResult};
pub use crate::pipeline::definition::Pipeline;
pub use crate::pipeline::step::{Handler, SkipCondition};
pub use crate::service::CatalogService;
pub use crate::store::{Collection, Document, DocumentStore, MemoryDocumentStore};
pub use crate::upload::{sanitize_filename, UploadDir};
pub use crate::validation::ValidProducto;
