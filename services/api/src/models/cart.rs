//! Cart model and line-item mutations
//!
//! The mutation rules live here as pure methods so the repository only has
//! to load, apply, and save. Invariants: items are unique by `product_id`,
//! insertion order is preserved, and a quantity never persists at or
//! below zero.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A line item in a cart
///
/// Name, price, and image are snapshotted at add-time and not re-synced
/// to the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub quantity: i64,
}

/// One cart per user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub user_id: Uuid,
    pub items: Vec<CartItem>,
}

/// Payload for adding an item to the cart
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub product_id: String,
    pub name: String,
    pub price: i64,
    pub image_url: String,
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// Item-level cart mutation error
#[derive(Debug, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Item not found in cart.")]
    ItemNotFound,
}

impl Cart {
    /// An empty cart for a user; not persisted until the first mutation
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            items: Vec::new(),
        }
    }

    /// Add an item, merging with an existing line for the same product
    ///
    /// An existing line has its quantity incremented by the incoming
    /// quantity; otherwise the item is appended. An omitted or zero
    /// quantity counts as one unit. A merge that lands at or below zero
    /// drops the line.
    pub fn upsert_item(&mut self, item: NewCartItem) {
        let quantity = item.quantity.filter(|q| *q != 0).unwrap_or(1);

        match self
            .items
            .iter()
            .position(|i| i.product_id == item.product_id)
        {
            Some(index) => {
                self.items[index].quantity += quantity;
                if self.items[index].quantity <= 0 {
                    self.items.remove(index);
                }
            }
            None if quantity > 0 => self.items.push(CartItem {
                product_id: item.product_id,
                name: item.name,
                price: item.price,
                image_url: item.image_url,
                quantity,
            }),
            None => {}
        }
    }

    /// Overwrite an item's quantity; zero or negative removes the item
    pub fn set_item_quantity(&mut self, product_id: &str, quantity: i64) -> Result<(), CartError> {
        let index = self
            .items
            .iter()
            .position(|i| i.product_id == product_id)
            .ok_or(CartError::ItemNotFound)?;

        if quantity <= 0 {
            self.items.remove(index);
        } else {
            self.items[index].quantity = quantity;
        }

        Ok(())
    }

    /// Remove an item entirely
    pub fn remove_item(&mut self, product_id: &str) -> Result<(), CartError> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == initial_len {
            return Err(CartError::ItemNotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item(product_id: &str, quantity: Option<i64>) -> NewCartItem {
        NewCartItem {
            product_id: product_id.to_string(),
            name: format!("Product {}", product_id),
            price: 1999,
            image_url: format!("http://localhost:5000/images/{}.jpeg", product_id),
            quantity,
        }
    }

    #[test]
    fn test_upsert_appends_new_item() {
        let mut cart = Cart::empty(Uuid::new_v4());
        cart.upsert_item(new_item("p1", Some(2)));

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product_id, "p1");
        assert_eq!(cart.items[0].quantity, 2);
    }

    #[test]
    fn test_upsert_merges_quantities_for_same_product() {
        let mut cart = Cart::empty(Uuid::new_v4());
        cart.upsert_item(new_item("p1", Some(2)));
        cart.upsert_item(new_item("p1", Some(3)));

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 5);
    }

    #[test]
    fn test_upsert_defaults_missing_quantity_to_one() {
        let mut cart = Cart::empty(Uuid::new_v4());
        cart.upsert_item(new_item("p1", None));
        cart.upsert_item(new_item("p1", None));

        assert_eq!(cart.items[0].quantity, 2);
    }

    #[test]
    fn test_upsert_treats_zero_quantity_as_one() {
        let mut cart = Cart::empty(Uuid::new_v4());
        cart.upsert_item(new_item("p1", Some(0)));

        assert_eq!(cart.items[0].quantity, 1);
    }

    #[test]
    fn test_upsert_drops_item_when_merge_reaches_zero() {
        let mut cart = Cart::empty(Uuid::new_v4());
        cart.upsert_item(new_item("p1", Some(2)));
        cart.upsert_item(new_item("p1", Some(-2)));

        assert!(cart.items.is_empty());
    }

    #[test]
    fn test_upsert_preserves_insertion_order() {
        let mut cart = Cart::empty(Uuid::new_v4());
        cart.upsert_item(new_item("p1", Some(1)));
        cart.upsert_item(new_item("p2", Some(1)));
        cart.upsert_item(new_item("p3", Some(1)));
        cart.upsert_item(new_item("p1", Some(4)));

        let ids: Vec<&str> = cart.items.iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
        assert_eq!(cart.items[0].quantity, 5);
    }

    #[test]
    fn test_upsert_keeps_snapshotted_price() {
        let mut cart = Cart::empty(Uuid::new_v4());
        cart.upsert_item(new_item("p1", Some(1)));

        let mut repriced = new_item("p1", Some(1));
        repriced.price = 2999;
        cart.upsert_item(repriced);

        assert_eq!(cart.items[0].price, 1999);
    }

    #[test]
    fn test_set_quantity_overwrites_not_increments() {
        let mut cart = Cart::empty(Uuid::new_v4());
        cart.upsert_item(new_item("p1", Some(5)));

        cart.set_item_quantity("p1", 2).unwrap();
        assert_eq!(cart.items[0].quantity, 2);
    }

    #[test]
    fn test_set_quantity_zero_removes_item() {
        let mut cart = Cart::empty(Uuid::new_v4());
        cart.upsert_item(new_item("p1", Some(5)));

        cart.set_item_quantity("p1", 0).unwrap();
        assert!(cart.items.is_empty());
    }

    #[test]
    fn test_set_quantity_negative_removes_item() {
        let mut cart = Cart::empty(Uuid::new_v4());
        cart.upsert_item(new_item("p1", Some(5)));

        cart.set_item_quantity("p1", -3).unwrap();
        assert!(cart.items.is_empty());
    }

    #[test]
    fn test_set_quantity_missing_item_fails() {
        let mut cart = Cart::empty(Uuid::new_v4());
        cart.upsert_item(new_item("p1", Some(1)));

        let result = cart.set_item_quantity("p2", 3);
        assert_eq!(result, Err(CartError::ItemNotFound));
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::empty(Uuid::new_v4());
        cart.upsert_item(new_item("p1", Some(1)));
        cart.upsert_item(new_item("p2", Some(1)));

        cart.remove_item("p1").unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product_id, "p2");
    }

    #[test]
    fn test_remove_missing_item_leaves_cart_unchanged() {
        let mut cart = Cart::empty(Uuid::new_v4());
        cart.upsert_item(new_item("p1", Some(2)));

        let result = cart.remove_item("p9");
        assert_eq!(result, Err(CartError::ItemNotFound));
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
    }

    #[test]
    fn test_product_id_matching_is_exact() {
        let mut cart = Cart::empty(Uuid::new_v4());
        cart.upsert_item(new_item("p1", Some(1)));
        cart.upsert_item(new_item("P1", Some(1)));

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.remove_item("p10"), Err(CartError::ItemNotFound));
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let mut cart = Cart::empty(Uuid::new_v4());
        cart.upsert_item(new_item("p1", Some(1)));

        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.get("userId").is_some());
        let item = &json["items"][0];
        assert!(item.get("productId").is_some());
        assert!(item.get("imageUrl").is_some());
    }
}
