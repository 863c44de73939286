//! JSON persistence for the catalog.
//!
//! A document is a JSON array with one record per product, tagged by `"type"`:
//!
//! ```json
//! [
//!     { "type": "Grocery", "id": "G1", "name": "Milk", "price": 1.25, "stock": 4, "expiry": "2025-02-01" }
//! ]
//! ```
//!
//! Loading is lenient per record: unknown kinds and malformed records are
//! skipped and reported, the rest of the document still loads.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use stockroom_core::{DomainError, Entity, ProductId};
use stockroom_products::{Product, ProductKind, ProductType, UnitPrice};

use crate::inventory::Inventory;

/// Fatal persistence failure. The in-memory catalog is left untouched.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Not valid JSON, or not a JSON array.
    #[error("malformed inventory document: {0}")]
    Document(#[source] serde_json::Error),

    #[error("failed to encode inventory document: {0}")]
    Encode(#[source] serde_json::Error),
}

/// A single record that could not be turned into a product (non-fatal).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record {index}: {reason}")]
pub struct MalformedRecord {
    /// Zero-based position in the document.
    pub index: usize,
    pub reason: String,
}

impl MalformedRecord {
    fn new(index: usize, reason: impl Into<String>) -> Self {
        Self {
            index,
            reason: reason.into(),
        }
    }
}

/// Persisted form of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProductRecord {
    Electronics {
        id: ProductId,
        name: String,
        #[serde(with = "rust_decimal::serde::float")]
        price: Decimal,
        stock: u64,
        warranty: u32,
        brand: String,
    },
    Grocery {
        id: ProductId,
        name: String,
        #[serde(with = "rust_decimal::serde::float")]
        price: Decimal,
        stock: u64,
        expiry: NaiveDate,
    },
    Clothing {
        id: ProductId,
        name: String,
        #[serde(with = "rust_decimal::serde::float")]
        price: Decimal,
        stock: u64,
        size: String,
        material: String,
    },
}

impl From<&Product> for ProductRecord {
    fn from(p: &Product) -> Self {
        let (id, name, price, stock) = (
            p.id().clone(),
            p.name().to_string(),
            p.unit_price().amount(),
            p.quantity_in_stock(),
        );
        match p.kind() {
            ProductKind::Electronics(e) => ProductRecord::Electronics {
                id,
                name,
                price,
                stock,
                warranty: e.warranty_years,
                brand: e.brand.clone(),
            },
            ProductKind::Grocery(g) => ProductRecord::Grocery {
                id,
                name,
                price,
                stock,
                expiry: g.expiry_date,
            },
            ProductKind::Clothing(c) => ProductRecord::Clothing {
                id,
                name,
                price,
                stock,
                size: c.size.clone(),
                material: c.material.clone(),
            },
        }
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = DomainError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        match record {
            ProductRecord::Electronics {
                id,
                name,
                price,
                stock,
                warranty,
                brand,
            } => Product::electronics(id, name, UnitPrice::new(price)?, stock, warranty, brand),
            ProductRecord::Grocery {
                id,
                name,
                price,
                stock,
                expiry,
            } => Product::grocery(id, name, UnitPrice::new(price)?, stock, expiry),
            ProductRecord::Clothing {
                id,
                name,
                price,
                stock,
                size,
                material,
            } => Product::clothing(id, name, UnitPrice::new(price)?, stock, size, material),
        }
    }
}

/// Result of decoding a document, before it is applied to a catalog.
#[derive(Debug, Clone, Default)]
pub struct DecodedDocument {
    pub products: Vec<Product>,
    /// Records whose `"type"` names no known variant.
    pub unknown_kind: usize,
    pub malformed: Vec<MalformedRecord>,
}

/// Outcome of [`Inventory::load_from_file`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Catalog size after the load.
    pub loaded: usize,
    pub unknown_kind: usize,
    pub malformed: Vec<MalformedRecord>,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.unknown_kind + self.malformed.len()
    }
}

/// Serialize every product, in catalog order, as a pretty-printed document.
pub fn encode_document(inventory: &Inventory) -> Result<Vec<u8>, PersistenceError> {
    let records: Vec<ProductRecord> = inventory.iter().map(ProductRecord::from).collect();

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    records
        .serialize(&mut serializer)
        .map_err(PersistenceError::Encode)?;
    out.push(b'\n');
    Ok(out)
}

/// Parse a document, skipping records that cannot be loaded.
pub fn decode_document(input: &str) -> Result<DecodedDocument, PersistenceError> {
    let values: Vec<Value> = serde_json::from_str(input).map_err(PersistenceError::Document)?;

    let mut decoded = DecodedDocument::default();
    for (index, value) in values.into_iter().enumerate() {
        match decode_record(index, value) {
            Ok(Some(product)) => decoded.products.push(product),
            Ok(None) => decoded.unknown_kind += 1,
            Err(malformed) => {
                warn!(index, reason = %malformed.reason, "skipping malformed record");
                decoded.malformed.push(malformed);
            }
        }
    }
    Ok(decoded)
}

fn decode_record(index: usize, value: Value) -> Result<Option<Product>, MalformedRecord> {
    let Some(object) = value.as_object() else {
        return Err(MalformedRecord::new(index, "record is not a JSON object"));
    };
    let Some(kind) = object.get("type").and_then(Value::as_str) else {
        return Err(MalformedRecord::new(index, "missing field `type`"));
    };
    if !ProductType::ALL.iter().any(|t| t.as_str() == kind) {
        debug!(index, kind, "skipping record of unknown type");
        return Ok(None);
    }

    let record: ProductRecord =
        serde_json::from_value(value).map_err(|e| MalformedRecord::new(index, e.to_string()))?;
    Product::try_from(record)
        .map(Some)
        .map_err(|e| MalformedRecord::new(index, e.to_string()))
}

impl Inventory {
    /// Write the whole catalog to `path` (last write wins).
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        let bytes = encode_document(self)?;
        fs::write(path, bytes).map_err(|source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), products = self.len(), "inventory saved");
        Ok(())
    }

    /// Replace the catalog with the contents of `path`.
    ///
    /// The document is fully decoded first; a read or document-level failure
    /// returns an error and leaves the current contents in place.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<LoadReport, PersistenceError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let decoded = decode_document(&contents)?;

        let report = LoadReport {
            loaded: self.replace_all(decoded.products),
            unknown_kind: decoded.unknown_kind,
            malformed: decoded.malformed,
        };

        info!(
            path = %path.display(),
            loaded = report.loaded,
            skipped = report.skipped(),
            "inventory loaded"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pid(raw: &str) -> ProductId {
        raw.parse().unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Inventory {
        let mut inv = Inventory::new();
        inv.add_product(
            Product::electronics(pid("E1"), "TV", "499.50".parse().unwrap(), 3, 2, "Vizio").unwrap(),
        )
        .unwrap();
        inv.add_product(
            Product::grocery(pid("G1"), "Milk", "1.25".parse().unwrap(), 4, date(2025, 2, 1)).unwrap(),
        )
        .unwrap();
        inv.add_product(
            Product::clothing(pid("C1"), "Tee", "12".parse().unwrap(), 9, "S", "Cotton").unwrap(),
        )
        .unwrap();
        inv
    }

    #[test]
    fn encoded_records_carry_variant_fields() {
        let bytes = encode_document(&sample()).unwrap();
        let doc: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(
            doc,
            json!([
                { "type": "Electronics", "id": "E1", "name": "TV", "price": 499.5, "stock": 3,
                  "warranty": 2, "brand": "Vizio" },
                { "type": "Grocery", "id": "G1", "name": "Milk", "price": 1.25, "stock": 4,
                  "expiry": "2025-02-01" },
                { "type": "Clothing", "id": "C1", "name": "Tee", "price": 12.0, "stock": 9,
                  "size": "S", "material": "Cotton" },
            ])
        );
    }

    #[test]
    fn encoding_uses_four_space_indent() {
        let text = String::from_utf8(encode_document(&sample()).unwrap()).unwrap();
        assert!(text.starts_with("[\n    {\n        \"type\": \"Electronics\""));
    }

    #[test]
    fn decode_reverses_encode() {
        let original = sample();
        let bytes = encode_document(&original).unwrap();
        let decoded = decode_document(std::str::from_utf8(&bytes).unwrap()).unwrap();

        let originals: Vec<&Product> = original.iter().collect();
        let decoded_refs: Vec<&Product> = decoded.products.iter().collect();
        assert_eq!(originals, decoded_refs);
        assert!(decoded.malformed.is_empty());
    }

    #[test]
    fn unknown_type_is_skipped_and_counted() {
        let doc = json!([
            { "type": "Furniture", "id": "F1", "name": "Chair", "price": 10, "stock": 1 },
            { "type": "Clothing", "id": "C1", "name": "Tee", "price": 5, "stock": 1,
              "size": "M", "material": "Linen" },
        ]);
        let decoded = decode_document(&doc.to_string()).unwrap();
        assert_eq!(decoded.products.len(), 1);
        assert_eq!(decoded.unknown_kind, 1);
        assert!(decoded.malformed.is_empty());
    }

    #[test]
    fn record_missing_price_is_skipped_not_fatal() {
        let doc = json!([
            { "type": "Electronics", "id": "E1", "name": "Radio", "stock": 1,
              "warranty": 1, "brand": "Sony" },
            { "type": "Electronics", "id": "E2", "name": "Phone", "price": 300, "stock": 2,
              "warranty": 1, "brand": "Nokia" },
        ]);
        let decoded = decode_document(&doc.to_string()).unwrap();
        assert_eq!(decoded.products.len(), 1);
        assert_eq!(decoded.products[0].id(), &pid("E2"));
        assert_eq!(decoded.malformed.len(), 1);
        assert_eq!(decoded.malformed[0].index, 0);
        assert!(decoded.malformed[0].reason.contains("price"));
    }

    #[test]
    fn unparseable_values_are_malformed() {
        let doc = json!([
            { "type": "Grocery", "id": "G1", "name": "Eggs", "price": 3, "stock": 1,
              "expiry": "31/12/2025" },
            { "type": "Clothing", "id": "C1", "name": "Tee", "price": -1, "stock": 1,
              "size": "M", "material": "Linen" },
            { "type": "Clothing", "id": "C2", "name": "Tee", "price": 1, "stock": -5,
              "size": "M", "material": "Linen" },
            { "type": "Clothing", "id": "", "name": "Tee", "price": 1, "stock": 5,
              "size": "M", "material": "Linen" },
            { "id": "X", "name": "No type" },
            "not an object",
        ]);
        let decoded = decode_document(&doc.to_string()).unwrap();
        assert!(decoded.products.is_empty());
        let indices: Vec<usize> = decoded.malformed.iter().map(|m| m.index).collect();
        assert_eq!(indices, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn integer_prices_are_accepted() {
        let doc = r#"[{"type":"Clothing","id":"C1","name":"Tee","price":7,"stock":2,"size":"XL","material":"Wool"}]"#;
        let decoded = decode_document(doc).unwrap();
        assert_eq!(decoded.products[0].unit_price().amount(), Decimal::from(7));
    }

    #[test]
    fn non_array_document_is_fatal() {
        assert!(matches!(
            decode_document(r#"{"type":"Grocery"}"#),
            Err(PersistenceError::Document(_))
        ));
        assert!(matches!(decode_document("[{"), Err(PersistenceError::Document(_))));
    }

    #[test]
    fn load_report_counts_skipped_records() {
        let report = LoadReport {
            loaded: 2,
            unknown_kind: 1,
            malformed: vec![MalformedRecord::new(3, "missing field `price`")],
        };
        assert_eq!(report.skipped(), 2);
        assert_eq!(report.malformed[0].to_string(), "record 3: missing field `price`");
    }
}
