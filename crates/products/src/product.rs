use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use stockroom_core::{DomainError, DomainResult, Entity, ProductId};

use crate::price::UnitPrice;

/// Current local calendar date, used for expiry checks.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Fieldless tag of a product variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductType {
    Electronics,
    Grocery,
    Clothing,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [
        ProductType::Electronics,
        ProductType::Grocery,
        ProductType::Clothing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProductType::Electronics => "Electronics",
            ProductType::Grocery => "Grocery",
            ProductType::Clothing => "Clothing",
        }
    }
}

impl core::fmt::Display for ProductType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for ProductType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::validation(format!("unknown product type: {s}")))
    }
}

/// Electronics-specific attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Electronics {
    pub warranty_years: u32,
    pub brand: String,
}

/// Grocery-specific attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grocery {
    pub expiry_date: NaiveDate,
}

impl Grocery {
    /// Expired once `today` is strictly after the expiry date.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        today > self.expiry_date
    }
}

/// Clothing-specific attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clothing {
    pub size: String,
    pub material: String,
}

/// Variant payload of a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductKind {
    Electronics(Electronics),
    Grocery(Grocery),
    Clothing(Clothing),
}

impl ProductKind {
    pub fn product_type(&self) -> ProductType {
        match self {
            ProductKind::Electronics(_) => ProductType::Electronics,
            ProductKind::Grocery(_) => ProductType::Grocery,
            ProductKind::Clothing(_) => ProductType::Clothing,
        }
    }
}

/// Shared capability set of every stocked product.
pub trait Stockable: Entity<Id = ProductId> {
    /// Increase stock by `amount`. Fails with `InvalidRestock` unless `amount > 0`.
    fn restock(&mut self, amount: i64) -> DomainResult<()>;

    /// Decrease stock by `quantity`. Fails with `InsufficientStock` unless
    /// `0 < quantity <= stock`.
    fn sell(&mut self, quantity: i64) -> DomainResult<()>;

    /// `unit price * quantity in stock`.
    fn total_value(&self) -> Decimal;

    /// Human-readable one-line summary including variant fields.
    fn describe(&self) -> String;
}

/// A stocked product.
///
/// The identifier and variant attributes are fixed at construction; only the
/// stock level (via [`Stockable`]) and the name (via [`Product::rename`]) change
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    unit_price: UnitPrice,
    quantity_in_stock: u64,
    kind: ProductKind,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        unit_price: UnitPrice,
        quantity_in_stock: u64,
        kind: ProductKind,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: validate_name(name.into())?,
            unit_price,
            quantity_in_stock,
            kind,
        })
    }

    pub fn electronics(
        id: ProductId,
        name: impl Into<String>,
        unit_price: UnitPrice,
        quantity_in_stock: u64,
        warranty_years: u32,
        brand: impl Into<String>,
    ) -> DomainResult<Self> {
        let kind = ProductKind::Electronics(Electronics {
            warranty_years,
            brand: brand.into(),
        });
        Self::new(id, name, unit_price, quantity_in_stock, kind)
    }

    pub fn grocery(
        id: ProductId,
        name: impl Into<String>,
        unit_price: UnitPrice,
        quantity_in_stock: u64,
        expiry_date: NaiveDate,
    ) -> DomainResult<Self> {
        let kind = ProductKind::Grocery(Grocery { expiry_date });
        Self::new(id, name, unit_price, quantity_in_stock, kind)
    }

    pub fn clothing(
        id: ProductId,
        name: impl Into<String>,
        unit_price: UnitPrice,
        quantity_in_stock: u64,
        size: impl Into<String>,
        material: impl Into<String>,
    ) -> DomainResult<Self> {
        let kind = ProductKind::Clothing(Clothing {
            size: size.into(),
            material: material.into(),
        });
        Self::new(id, name, unit_price, quantity_in_stock, kind)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> UnitPrice {
        self.unit_price
    }

    pub fn quantity_in_stock(&self) -> u64 {
        self.quantity_in_stock
    }

    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    pub fn product_type(&self) -> ProductType {
        self.kind.product_type()
    }

    /// Replace the product name.
    pub fn rename(&mut self, name: impl Into<String>) -> DomainResult<()> {
        self.name = validate_name(name.into())?;
        Ok(())
    }

    /// Whether this is a grocery past its expiry date as of `today`.
    ///
    /// Always `false` for non-perishable variants.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        match &self.kind {
            ProductKind::Grocery(g) => g.is_expired_on(today),
            ProductKind::Electronics(_) | ProductKind::Clothing(_) => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_on(today())
    }

    /// Sell `quantity` units, evaluating expiry as of `today`.
    ///
    /// Expiry is checked before stock, so an expired grocery always fails with
    /// `ExpiredProduct`. Stock is untouched on failure.
    pub fn sell_on(&mut self, quantity: i64, today: NaiveDate) -> DomainResult<()> {
        if let ProductKind::Grocery(g) = &self.kind {
            if g.is_expired_on(today) {
                return Err(DomainError::ExpiredProduct {
                    id: self.id.clone(),
                    expired_on: g.expiry_date,
                });
            }
        }

        let available = self.quantity_in_stock;
        let requested = u64::try_from(quantity)
            .ok()
            .filter(|q| *q > 0 && *q <= available)
            .ok_or_else(|| DomainError::InsufficientStock {
                id: self.id.clone(),
                requested: quantity,
                available,
            })?;

        self.quantity_in_stock = available - requested;
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Stockable for Product {
    fn restock(&mut self, amount: i64) -> DomainResult<()> {
        let restocked = u64::try_from(amount)
            .ok()
            .filter(|a| *a > 0)
            .and_then(|a| self.quantity_in_stock.checked_add(a))
            .ok_or_else(|| DomainError::InvalidRestock {
                id: self.id.clone(),
                amount,
            })?;

        self.quantity_in_stock = restocked;
        Ok(())
    }

    fn sell(&mut self, quantity: i64) -> DomainResult<()> {
        self.sell_on(quantity, today())
    }

    fn total_value(&self) -> Decimal {
        self.unit_price
            .amount()
            .saturating_mul(Decimal::from(self.quantity_in_stock))
    }

    fn describe(&self) -> String {
        let (id, name, price, stock) = (
            &self.id,
            &self.name,
            self.unit_price,
            self.quantity_in_stock,
        );
        match &self.kind {
            ProductKind::Electronics(e) => format!(
                "Electronics - ID: {id}, Name: {name}, Brand: {}, Price: ${price}, Stock: {stock}, Warranty: {} years",
                e.brand, e.warranty_years
            ),
            ProductKind::Grocery(g) => format!(
                "Grocery - ID: {id}, Name: {name}, Price: ${price}, Stock: {stock}, Expiry: {}",
                g.expiry_date.format("%Y-%m-%d")
            ),
            ProductKind::Clothing(c) => format!(
                "Clothing - ID: {id}, Name: {name}, Size: {}, Material: {}, Price: ${price}, Stock: {stock}",
                c.size, c.material
            ),
        }
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.describe())
    }
}

fn validate_name(name: String) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(trimmed.to_string())
}
