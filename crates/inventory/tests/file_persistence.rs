use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::TempDir;

use stockroom_core::{Entity, ProductId};
use stockroom_inventory::{Inventory, PersistenceError};
use stockroom_products::{Product, ProductKind, Stockable, UnitPrice, today};

fn pid(raw: &str) -> ProductId {
    raw.parse().unwrap()
}

fn price(raw: &str) -> UnitPrice {
    raw.parse().unwrap()
}

fn populated() -> Inventory {
    let mut inv = Inventory::new();
    inv.add_product(Product::electronics(pid("E-1"), "Headphones", price("89.50"), 12, 1, "Bose").unwrap())
        .unwrap();
    inv.add_product(
        Product::grocery(
            pid("G-1"),
            "Sourdough",
            price("4.75"),
            6,
            NaiveDate::from_ymd_opt(2031, 5, 17).unwrap(),
        )
        .unwrap(),
    )
    .unwrap();
    inv.add_product(Product::clothing(pid("C-1"), "Parka", price("149"), 3, "XL", "Down").unwrap())
        .unwrap();
    inv
}

#[test]
fn save_then_load_reproduces_catalog() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inventory.json");

    let original = populated();
    original.save_to_file(&path).unwrap();

    let mut restored = Inventory::new();
    let report = restored.load_from_file(&path).unwrap();

    assert_eq!(report.loaded, 3);
    assert_eq!(report.skipped(), 0);
    for product in original.iter() {
        let twin = restored.get(product.id()).expect("product survives round-trip");
        assert_eq!(twin.name(), product.name());
        assert_eq!(twin.unit_price(), product.unit_price());
        assert_eq!(twin.quantity_in_stock(), product.quantity_in_stock());
        assert_eq!(twin.kind(), product.kind());
    }
    let order: Vec<&str> = restored.iter().map(|p| p.id().as_str()).collect();
    assert_eq!(order, ["E-1", "G-1", "C-1"]);
}

#[test]
fn load_replaces_rather_than_merges() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inventory.json");
    populated().save_to_file(&path).unwrap();

    let mut inv = Inventory::new();
    inv.add_product(Product::clothing(pid("OLD"), "Gloves", price("9"), 1, "S", "Wool").unwrap())
        .unwrap();
    inv.load_from_file(&path).unwrap();

    assert_eq!(inv.len(), 3);
    assert!(!inv.contains(&pid("OLD")));
}

#[test]
fn one_bad_record_does_not_abort_the_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.json");
    let doc = json!([
        { "type": "Clothing", "id": "C-1", "name": "Beanie", "price": 14.5, "stock": 8,
          "size": "One", "material": "Acrylic" },
        { "type": "Clothing", "id": "C-2", "name": "Scarf", "stock": 2,
          "size": "One", "material": "Silk" },
    ]);
    std::fs::write(&path, doc.to_string()).unwrap();

    let mut inv = Inventory::new();
    let report = inv.load_from_file(&path).unwrap();

    assert_eq!(inv.len(), 1);
    assert!(inv.contains(&pid("C-1")));
    assert_eq!(report.malformed.len(), 1);
    assert_eq!(report.malformed[0].index, 1);
}

#[test]
fn missing_file_is_io_error_and_catalog_untouched() {
    let dir = TempDir::new().unwrap();
    let mut inv = populated();

    let err = inv.load_from_file(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, PersistenceError::Io { .. }));
    assert_eq!(inv.len(), 3);
}

#[test]
fn malformed_document_is_fatal_and_catalog_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    let mut inv = populated();
    let err = inv.load_from_file(&path).unwrap_err();
    assert!(matches!(err, PersistenceError::Document(_)));
    assert_eq!(inv.len(), 3);
}

#[test]
fn save_to_unwritable_path_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing-dir").join("inventory.json");

    let err = populated().save_to_file(&path).unwrap_err();
    match err {
        PersistenceError::Io { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("Expected Io error, got {other:?}"),
    }
}

#[test]
fn expiry_cleanup_after_load_uses_current_date() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("groceries.json");
    let yesterday = today() - Duration::days(1);
    let doc = json!([
        { "type": "Grocery", "id": "G-old", "name": "Yogurt", "price": 1, "stock": 5,
          "expiry": yesterday.format("%Y-%m-%d").to_string() },
        { "type": "Grocery", "id": "G-ok", "name": "Rice", "price": 2, "stock": 5,
          "expiry": "2999-01-01" },
    ]);
    std::fs::write(&path, doc.to_string()).unwrap();

    let mut inv = Inventory::new();
    inv.load_from_file(&path).unwrap();
    assert_eq!(inv.remove_expired_groceries(), 1);

    let remaining = inv.list_all();
    assert_eq!(remaining.len(), 1);
    assert!(matches!(remaining[0].kind(), ProductKind::Grocery(_)));
    assert_eq!(remaining[0].total_value(), Decimal::from(10));
}
