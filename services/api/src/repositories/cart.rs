//! Cart repository for database operations
//!
//! Carts are stored one row per user with the line items in a JSONB
//! column. Every mutation is a load, an in-memory change via the pure
//! methods on [`Cart`], and an upsert of the whole row; concurrent
//! mutations of the same cart resolve as last write wins.

use sqlx::{PgPool, Row};
use thiserror::Error;
use uuid::Uuid;

use crate::models::cart::{Cart, CartError, NewCartItem};

/// Errors from the cart store
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The user has no cart row yet
    #[error("Cart not found.")]
    CartNotFound,

    /// The product is not among the cart's items
    #[error("Item not found in cart.")]
    ItemNotFound,

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Cart items serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<CartError> for CartStoreError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::ItemNotFound => CartStoreError::ItemNotFound,
        }
    }
}

/// Cart repository
#[derive(Clone)]
pub struct CartRepository {
    pool: PgPool,
}

impl CartRepository {
    /// Create a new cart repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a user's cart, or an empty unpersisted cart if none exists
    pub async fn get(&self, user_id: Uuid) -> Result<Cart, CartStoreError> {
        Ok(self
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| Cart::empty(user_id)))
    }

    /// Add an item to the user's cart, creating the cart lazily
    ///
    /// An existing line for the same product has its quantity merged; the
    /// full updated cart is persisted and returned.
    pub async fn upsert_item(
        &self,
        user_id: Uuid,
        item: NewCartItem,
    ) -> Result<Cart, CartStoreError> {
        let mut cart = self
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| Cart::empty(user_id));

        cart.upsert_item(item);
        self.save(&cart).await?;

        Ok(cart)
    }

    /// Overwrite an item's quantity; zero or negative removes the item
    pub async fn set_quantity(
        &self,
        user_id: Uuid,
        product_id: &str,
        quantity: i64,
    ) -> Result<Cart, CartStoreError> {
        let mut cart = self
            .find_by_user(user_id)
            .await?
            .ok_or(CartStoreError::CartNotFound)?;

        cart.set_item_quantity(product_id, quantity)?;
        self.save(&cart).await?;

        Ok(cart)
    }

    /// Remove an item from the user's cart
    pub async fn remove_item(
        &self,
        user_id: Uuid,
        product_id: &str,
    ) -> Result<Cart, CartStoreError> {
        let mut cart = self
            .find_by_user(user_id)
            .await?
            .ok_or(CartStoreError::CartNotFound)?;

        cart.remove_item(product_id)?;
        self.save(&cart).await?;

        Ok(cart)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Cart>, CartStoreError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, items
            FROM carts
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let items: serde_json::Value = row.get("items");
                Ok(Some(Cart {
                    user_id: row.get("user_id"),
                    items: serde_json::from_value(items)?,
                }))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        let items = serde_json::to_value(&cart.items)?;

        sqlx::query(
            r#"
            INSERT INTO carts (user_id, items)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET items = EXCLUDED.items, updated_at = now()
            "#,
        )
        .bind(cart.user_id)
        .bind(items)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
