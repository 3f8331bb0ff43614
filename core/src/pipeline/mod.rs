// catalogo/src/pipeline/mod.rs

//! A small named-step async pipeline.
//!
//! Request flows that need several dependent store calls (validate, look up,
//! resolve, write, persist) are declared once as a `Pipeline<TData, Err>`
//! and run against a fresh `ContextData<TData>` per request.

pub mod context_data;
pub mod control;
pub mod definition;
pub mod execution;
pub mod step;
