//! Product search for the `query` argument of product connections.

use crate::models::Product;

/// Keep the products matching `query` and score them for `RELEVANCE`.
///
/// Terms are whitespace separated and case-insensitive. A product matches
/// when every term occurs in its title or description. Title hits weigh
/// twice as much as description hits. A blank query keeps every product
/// unscored.
pub fn rank_products(products: Vec<Product>, query: &str) -> Vec<Product> {
    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if terms.is_empty() {
        return products;
    }

    products
        .into_iter()
        .filter_map(|mut product| {
            let title = product.title.to_lowercase();
            let description = product.description.as_deref().unwrap_or_default().to_lowercase();

            let mut score = 0usize;
            for term in &terms {
                let in_title = title.matches(term.as_str()).count();
                let in_description = description.matches(term.as_str()).count();
                if in_title + in_description == 0 {
                    return None;
                }
                score += 2 * in_title + in_description;
            }

            product.relevance = Some(score as f64);
            Some(product)
        })
        .collect()
}
