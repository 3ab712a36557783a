//! Immutable favorite toggling.

use storefront_api::{Product, ProductId};

/// Return a copy of `products` with the favorite flag of `id` flipped.
///
/// The input is never touched. Unknown ids yield an equal copy.
pub fn toggle_favorite(products: &[Product], id: ProductId) -> Vec<Product> {
    products
        .iter()
        .map(|product| {
            if product.id == id {
                Product {
                    favorite: !product.favorite,
                    ..product.clone()
                }
            } else {
                product.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "Product 1", 10.0),
            Product {
                favorite: true,
                ..Product::new(2, "Product 2", 20.0)
            },
            Product::new(3, "Product 3", 30.0),
        ]
    }

    #[test]
    fn toggles_false_to_true() {
        let updated = toggle_favorite(&catalog(), ProductId(1));
        assert!(updated[0].favorite);
    }

    #[test]
    fn toggles_true_to_false() {
        let updated = toggle_favorite(&catalog(), ProductId(2));
        assert!(!updated[1].favorite);
    }

    #[test]
    fn leaves_other_products_alone() {
        let original = catalog();
        let updated = toggle_favorite(&original, ProductId(1));
        assert_eq!(updated.len(), original.len());
        assert_eq!(updated[1], original[1]);
        assert_eq!(updated[2], original[2]);
    }

    #[test]
    fn unknown_id_returns_equal_copy() {
        let original = catalog();
        assert_eq!(toggle_favorite(&original, ProductId(999)), original);
    }

    #[test]
    fn input_is_not_mutated() {
        let original = catalog();
        let snapshot = original.clone();
        let _ = toggle_favorite(&original, ProductId(1));
        assert_eq!(original, snapshot);
    }

    #[test]
    fn toggling_twice_restores_original() {
        let original = catalog();
        for id in original.iter().map(|p| p.id) {
            let twice = toggle_favorite(&toggle_favorite(&original, id), id);
            assert_eq!(twice, original);
        }
    }

    #[test]
    fn order_is_preserved() {
        let updated = toggle_favorite(&catalog(), ProductId(3));
        let ids: Vec<u64> = updated.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, [1, 2, 3]);
    }
}
