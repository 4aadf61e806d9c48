use crate::{
    db_types::{Product, ProductNumber, SellingStatus},
    traits::KioskError,
};

/// Read access to the product catalog.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    /// Fetches every product whose number appears in `numbers`, in a single batched lookup.
    ///
    /// Numbers that do not exist in the catalog are simply absent from the result. Duplicates in `numbers` do not
    /// produce duplicate products.
    async fn fetch_products_by_numbers(&self, numbers: &[ProductNumber]) -> Result<Vec<Product>, KioskError>;

    /// Returns the highest product number currently in the catalog, or `None` if the catalog is empty.
    async fn fetch_latest_product_number(&self) -> Result<Option<ProductNumber>, KioskError>;

    /// Fetches all products with one of the given selling statuses, ordered by product number.
    async fn fetch_products_by_status(&self, statuses: &[SellingStatus]) -> Result<Vec<Product>, KioskError>;
}
