//! The cart store: an ordered list of line items with three mutations.
//!
//! `CartStore` is the single owner of cart state. Every successful mutation
//! is serialized to the persistent mirror before in-memory state is updated,
//! so the two never diverge: a mirror write failure leaves the cart exactly
//! as it was. Readers that need change notification subscribe to a
//! [`tokio::sync::watch`] channel instead of sharing the store itself.
//!
//! Operations return typed errors; mapping an error to user-facing text is
//! the presentation layer's job (see [`crate::notify`]).

use thiserror::Error;
use tokio::sync::watch;
use tracing::instrument;

use crate::catalog::{Catalog, CatalogError};
use crate::mirror::{CartMirror, MirrorError};
use crate::types::{CartItem, ProductId};

/// Stock level below which a product cannot be added or re-quantified.
///
/// Storefront stock policy: a product with fewer than two units available is
/// treated as out of stock for every cart mutation, including a first add of
/// a single unit and a quantity decrease.
const MIN_AVAILABLE_STOCK: i64 = 2;

/// Errors returned by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested quantity exceeds what the catalog has available.
    #[error("requested quantity out of stock for product {product_id}")]
    OutOfStock { product_id: ProductId },

    /// The requested quantity is not a valid line amount.
    #[error("invalid quantity: {amount}")]
    InvalidAmount { amount: i64 },

    /// The product is not in the cart.
    #[error("product {product_id} is not in the cart")]
    NotInCart { product_id: ProductId },

    /// The persisted cart could not be deserialized.
    #[error("stored cart is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// The cart could not be serialized for persistence.
    #[error("failed to serialize cart: {0}")]
    Encode(#[source] serde_json::Error),

    /// Catalog lookup failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persistent mirror read or write failed.
    #[error("mirror error: {0}")]
    Mirror(#[from] MirrorError),
}

/// Shopping cart state bound to a catalog and a persistent mirror.
///
/// Mutations take `&mut self`, so overlapping operations on the same cart
/// are excluded at compile time rather than racing on shared state.
#[derive(Debug)]
pub struct CartStore<C, M> {
    catalog: C,
    mirror: M,
    storage_key: String,
    items: Vec<CartItem>,
    watch: watch::Sender<Vec<CartItem>>,
}

impl<C: Catalog, M: CartMirror> CartStore<C, M> {
    /// Open a cart store, restoring any previously persisted cart.
    ///
    /// An absent key yields an empty cart; a present but unparseable value
    /// is surfaced as [`CartError::Corrupt`] rather than silently discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the mirror cannot be read or holds corrupt data.
    pub fn open(catalog: C, mirror: M, storage_key: impl Into<String>) -> Result<Self, CartError> {
        let storage_key = storage_key.into();

        let items: Vec<CartItem> = match mirror.get(&storage_key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(CartError::Corrupt)?,
            None => Vec::new(),
        };
        tracing::debug!(lines = items.len(), "cart restored from mirror");

        let (watch, _) = watch::channel(items.clone());

        Ok(Self {
            catalog,
            mirror,
            storage_key,
            items,
            watch,
        })
    }

    /// Current cart contents, in the order products were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Subscribe to cart changes.
    ///
    /// The receiver observes the full item list after every successful
    /// mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.watch.subscribe()
    }

    /// Add one unit of a product to the cart.
    ///
    /// A product not yet in the cart is appended as a new line with amount 1
    /// (metadata fetched from the catalog); a product already present has
    /// its amount incremented. Stock is checked first and the cart is left
    /// untouched when fewer than two units are available.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutOfStock`] on insufficient stock, or a catalog
    /// or mirror error. On any error the cart is unchanged.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let stock = self.catalog.stock(product_id).await?;
        if stock.amount < MIN_AVAILABLE_STOCK {
            return Err(CartError::OutOfStock { product_id });
        }

        let mut next = self.items.clone();
        if let Some(item) = next.iter_mut().find(|item| item.id == product_id) {
            item.amount += 1;
        } else {
            let product = self.catalog.product(product_id).await?;
            next.push(CartItem {
                id: product.id,
                title: product.title,
                price: product.price,
                image: product.image,
                amount: 1,
            });
        }

        self.commit(next)
    }

    /// Remove a product's line from the cart entirely.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] if the product has no line, or a
    /// mirror error. On any error the cart is unchanged.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        if !self.items.iter().any(|item| item.id == product_id) {
            return Err(CartError::NotInCart { product_id });
        }

        let next = self
            .items
            .iter()
            .filter(|item| item.id != product_id)
            .cloned()
            .collect();

        self.commit(next)
    }

    /// Set the quantity of a product's line to `amount`.
    ///
    /// A product id with no line in the cart leaves the list untouched, but
    /// the (unchanged) cart is still re-persisted.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidAmount`] for amounts below 1,
    /// [`CartError::OutOfStock`] on insufficient stock, or a catalog or
    /// mirror error. On any error the cart is unchanged.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn update_product_amount(
        &mut self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<(), CartError> {
        if amount < 1 {
            return Err(CartError::InvalidAmount { amount });
        }
        let amount = u32::try_from(amount).map_err(|_| CartError::InvalidAmount { amount })?;

        let stock = self.catalog.stock(product_id).await?;
        if stock.amount < MIN_AVAILABLE_STOCK {
            return Err(CartError::OutOfStock { product_id });
        }

        let mut next = self.items.clone();
        if let Some(item) = next.iter_mut().find(|item| item.id == product_id) {
            item.amount = amount;
        }

        self.commit(next)
    }

    /// Persist `next` to the mirror, then make it the in-memory state and
    /// publish it to subscribers. Mirror failure leaves the cart unchanged.
    fn commit(&mut self, next: Vec<CartItem>) -> Result<(), CartError> {
        let raw = serde_json::to_string(&next).map_err(CartError::Encode)?;
        self.mirror.set(&self.storage_key, &raw)?;

        self.items = next;
        self.watch.send_replace(self.items.clone());
        Ok(())
    }
}
