//! RocketShoes cart - client-side shopping cart state.
//!
//! Holds an ordered list of cart line items, exposes the three mutations the
//! storefront UI needs (add, remove, set quantity), and keeps a persistent
//! mirror in sync with in-memory state. Every mutation checks current stock
//! against the remote catalog first; nothing is cached.
//!
//! # Architecture
//!
//! - [`cart::CartStore`] - single owner of cart state; mutations take
//!   `&mut self`, readers subscribe to a watch channel
//! - [`catalog`] - `reqwest` client for the stock/product API behind a trait
//!   seam, so tests run against an in-memory fake
//! - [`mirror`] - synchronous key-value persistence (in-memory or JSON file)
//! - [`notify`] - maps typed cart errors to fixed user-facing messages;
//!   surfacing them is the presentation layer's decision
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_cart::cart::CartStore;
//! use rocketshoes_cart::catalog::CatalogClient;
//! use rocketshoes_cart::config::CartConfig;
//! use rocketshoes_cart::mirror::FileMirror;
//! use rocketshoes_cart::types::ProductId;
//!
//! let config = CartConfig::from_env()?;
//! let catalog = CatalogClient::new(&config.catalog)?;
//! let mirror = FileMirror::new(&config.storage_path);
//!
//! let mut store = CartStore::open(catalog, mirror, config.storage_key)?;
//! store.add_product(ProductId::new(1)).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod mirror;
pub mod notify;
pub mod types;
