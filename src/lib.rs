// cw_seeder/src/lib.rs
// This file will contain the public API for the cw_seeder module.

pub mod batch;
pub mod classify;
pub mod cli;
pub mod error;
pub mod fetch;
pub mod gateway;
pub mod loader;
pub mod mongo;
pub mod records;

pub const DEFAULT_DATABASE_NAME: &str = "cosmic_works";
pub const PRODUCTS_COLLECTION: &str = "products";
pub const CUSTOMERS_COLLECTION: &str = "customers";
pub const SALES_COLLECTION: &str = "sales";

pub const DEFAULT_PRODUCT_FEED_URL: &str =
    "https://cosmosdbcosmicworks.blob.core.windows.net/cosmic-works-small/product.json";
pub const DEFAULT_CUSTOMER_FEED_URL: &str =
    "https://cosmosdbcosmicworks.blob.core.windows.net/cosmic-works-small/customer.json";

/// Discriminator field and the recognized values in the mixed customer feed.
pub const DISCRIMINATOR_FIELD: &str = "type";
pub const CUSTOMER_DISCRIMINATOR: &str = "customer";
pub const SALES_ORDER_DISCRIMINATOR: &str = "salesOrder";
