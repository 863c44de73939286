//! Inventory module: the product catalog and its JSON persistence.
//!
//! The catalog is plain in-memory domain logic; file IO is confined to
//! [`persistence`].

pub mod inventory;
pub mod persistence;

pub use inventory::Inventory;
pub use persistence::{
    DecodedDocument, LoadReport, MalformedRecord, PersistenceError, ProductRecord,
    decode_document, encode_document,
};
