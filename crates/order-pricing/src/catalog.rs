//! # Catalog Lookup
//!
//! The catalog is reference data owned by the host (a database, a product
//! feed, a fixture list). The engine only needs one capability from it:
//! resolve a product id to a product, or report that there is none.
//!
//! A missing product is not an error anywhere in the engine. Calculators
//! skip the line: it contributes nothing to subtotal, weight or bonus points.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::cart::CartLine;
use crate::types::Product;

/// Read-only product lookup supplied with each pricing request.
pub trait Catalog {
    /// Returns the product with this id, if the catalog has one.
    fn product(&self, id: &str) -> Option<&Product>;
}

impl Catalog for [Product] {
    fn product(&self, id: &str) -> Option<&Product> {
        self.iter().find(|p| p.id == id)
    }
}

impl Catalog for Vec<Product> {
    fn product(&self, id: &str) -> Option<&Product> {
        self.as_slice().product(id)
    }
}

impl Catalog for HashMap<String, Product> {
    fn product(&self, id: &str) -> Option<&Product> {
        self.get(id)
    }
}

impl Catalog for BTreeMap<String, Product> {
    fn product(&self, id: &str) -> Option<&Product> {
        self.get(id)
    }
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn product(&self, id: &str) -> Option<&Product> {
        (**self).product(id)
    }
}

/// Pairs each cart line with its product, dropping lines the catalog cannot
/// resolve.
pub fn resolve_lines<'l, 'c, I, C>(
    lines: I,
    catalog: &'c C,
) -> impl Iterator<Item = (&'l CartLine, &'c Product)>
where
    I: IntoIterator<Item = &'l CartLine>,
    C: Catalog + ?Sized,
{
    lines
        .into_iter()
        .filter_map(move |line| match catalog.product(&line.product_id) {
            Some(product) => Some((line, product)),
            None => {
                debug!(product_id = %line.product_id, "Product not in catalog, skipping line");
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Money, Weight};

    fn product(id: &str) -> Product {
        Product::new(id, id, Money::from_cents(100), Weight::zero(), "other")
    }

    #[test]
    fn test_slice_and_map_lookup() {
        let list = vec![product("a"), product("b")];
        assert_eq!(list.product("b").map(|p| p.id.as_str()), Some("b"));
        assert!(list.product("z").is_none());

        let map: HashMap<String, Product> =
            list.iter().cloned().map(|p| (p.id.clone(), p)).collect();
        assert!(map.product("a").is_some());
        assert!(map.product("z").is_none());
    }

    #[test]
    fn test_resolve_lines_skips_unknown_products() {
        let catalog = vec![product("a")];
        let lines = vec![CartLine::new("a", 2), CartLine::new("ghost", 1)];

        let resolved: Vec<_> = resolve_lines(&lines, &catalog).collect();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].0.quantity, 2);
        assert_eq!(resolved[0].1.id, "a");
    }
}
