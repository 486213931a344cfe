use serde::{Deserialize, Serialize};

use kebab_core::{DomainError, DomainResult, ValueObject};

/// Products tracked by the reference build, in display order.
pub const REFERENCE_PRODUCTS: [&str; 6] = [
    "کباب کوبیده",
    "فیله زعفرانی",
    "فیله ماستی",
    "با استخوان",
    "شیشلیک",
    "برگ",
];

/// Name of a trackable product.
///
/// Never empty and never contains `:` or a line break, so it can be written
/// into a persisted record without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductName(String);

impl ValueObject for ProductName {}

impl ProductName {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if name.contains([':', '\n', '\r']) {
            return Err(DomainError::validation(format!(
                "product name cannot contain ':' or line breaks: {name:?}"
            )));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered, duplicate-free list of products, fixed for the lifetime of a ledger.
///
/// Every table is indexed by catalog position, so iteration order is always
/// catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<ProductName>,
}

impl Catalog {
    pub fn new<I, S>(names: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut products: Vec<ProductName> = Vec::new();
        for name in names {
            let product = ProductName::new(name)?;
            if products.contains(&product) {
                return Err(DomainError::validation(format!(
                    "duplicate product in catalog: {product}"
                )));
            }
            products.push(product);
        }
        if products.is_empty() {
            return Err(DomainError::validation("catalog cannot be empty"));
        }
        Ok(Self { products })
    }

    /// The six-product catalog of the reference build.
    pub fn reference() -> Self {
        Self {
            products: REFERENCE_PRODUCTS
                .iter()
                .map(|name| ProductName((*name).to_string()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Catalog position of `name`, if it is a tracked product.
    pub fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.products.iter().position(|p| p.as_str() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, index: usize) -> Option<&ProductName> {
        self.products.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductName> {
        self.products.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::reference()
    }
}
