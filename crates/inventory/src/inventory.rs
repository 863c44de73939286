use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use stockroom_core::{DomainError, DomainResult, Entity, ProductId};
use stockroom_products::{Product, ProductType, Stockable, today};

/// The product catalog.
///
/// Owns every product exclusively, keyed by id. Iteration (listing, searching,
/// valuation, export) follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    products: HashMap<ProductId, Product>,
    order: Vec<ProductId>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.products.contains_key(id)
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    /// Products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.order.iter().filter_map(|id| self.products.get(id))
    }

    /// Insert a new product. Fails with `DuplicateProduct` if the id is taken.
    pub fn add_product(&mut self, product: Product) -> DomainResult<()> {
        let id = product.id().clone();
        if self.products.contains_key(&id) {
            return Err(DomainError::duplicate(&id));
        }

        debug!(product_id = %id, product_type = %product.product_type(), "product added");
        self.order.push(id.clone());
        self.products.insert(id, product);
        Ok(())
    }

    /// Remove a product; returns whether anything was removed.
    pub fn remove_product(&mut self, id: &ProductId) -> bool {
        if self.products.remove(id).is_none() {
            return false;
        }
        self.order.retain(|k| k != id);
        debug!(product_id = %id, "product removed");
        true
    }

    /// Case-insensitive substring match on the product name.
    pub fn search_by_name(&self, needle: &str) -> Vec<&Product> {
        let needle = needle.to_lowercase();
        self.iter()
            .filter(|p| p.name().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn search_by_type(&self, product_type: ProductType) -> Vec<&Product> {
        self.iter()
            .filter(|p| p.product_type() == product_type)
            .collect()
    }

    pub fn list_all(&self) -> Vec<&Product> {
        self.iter().collect()
    }

    pub fn sell_product(&mut self, id: &ProductId, quantity: i64) -> DomainResult<()> {
        self.sell_product_on(id, quantity, today())
    }

    /// [`Inventory::sell_product`] with expiry evaluated as of `today`.
    pub fn sell_product_on(
        &mut self,
        id: &ProductId,
        quantity: i64,
        today: NaiveDate,
    ) -> DomainResult<()> {
        let product = self.product_mut(id)?;
        product.sell_on(quantity, today)?;
        debug!(product_id = %id, quantity, remaining = product.quantity_in_stock(), "product sold");
        Ok(())
    }

    pub fn restock_product(&mut self, id: &ProductId, quantity: i64) -> DomainResult<()> {
        let product = self.product_mut(id)?;
        product.restock(quantity)?;
        debug!(product_id = %id, quantity, stock = product.quantity_in_stock(), "product restocked");
        Ok(())
    }

    /// Sum of `total_value()` over all products (zero when empty).
    pub fn total_inventory_value(&self) -> Decimal {
        self.iter()
            .map(Stockable::total_value)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    pub fn remove_expired_groceries(&mut self) -> usize {
        self.remove_expired_groceries_as_of(today())
    }

    /// Remove every grocery expired as of `today`; returns how many were removed.
    pub fn remove_expired_groceries_as_of(&mut self, today: NaiveDate) -> usize {
        let expired: Vec<ProductId> = self
            .iter()
            .filter(|p| p.is_expired_on(today))
            .map(|p| p.id().clone())
            .collect();

        for id in &expired {
            self.products.remove(id);
        }
        self.order.retain(|id| self.products.contains_key(id));

        if !expired.is_empty() {
            debug!(count = expired.len(), %today, "expired groceries removed");
        }
        expired.len()
    }

    /// Discard the current contents and insert `products` in order.
    ///
    /// A repeated id replaces the earlier product in place (last one wins,
    /// first position kept). Returns the resulting catalog size.
    pub fn replace_all(&mut self, products: impl IntoIterator<Item = Product>) -> usize {
        self.products.clear();
        self.order.clear();

        for product in products {
            let id = product.id().clone();
            if self.products.insert(id.clone(), product).is_some() {
                warn!(product_id = %id, "duplicate product id; later entry replaces earlier one");
            } else {
                self.order.push(id);
            }
        }
        self.products.len()
    }

    fn product_mut(&mut self, id: &ProductId) -> DomainResult<&mut Product> {
        self.products
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(id))
    }
}
