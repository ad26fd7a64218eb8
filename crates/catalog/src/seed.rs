//! Sample catalog used whenever no stored collection can be read

use chrono::{DateTime, TimeZone, Utc};
use domain::{Product, ProductStatus};

fn created(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn sample(
    id: &str,
    name: &str,
    description: &str,
    category: &str,
    price: f64,
    status: ProductStatus,
    created_at: DateTime<Utc>,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        price,
        status,
        image_url: Some(format!("https://picsum.photos/seed/{id}/400/300")),
        created_at,
    }
}

/// The fixed three-product sample catalog
pub fn sample_products() -> Vec<Product> {
    vec![
        sample(
            "prod_1",
            "AI-Powered Code Assistant",
            "Boost your development workflow with an intelligent code completion and suggestion tool. Writes boilerplate, finds bugs, and explains complex code in plain English.",
            "SaaS / Developer Tool",
            19.99,
            ProductStatus::Published,
            created(2023, 10, 26, 10, 0),
        ),
        sample(
            "prod_2",
            "The Ultimate Productivity Course",
            "A comprehensive online course designed to help you master time management, focus, and goal setting. Includes video lessons, worksheets, and a private community.",
            "Online Course",
            249.00,
            ProductStatus::Published,
            created(2023, 11, 15, 14, 30),
        ),
        sample(
            "prod_3",
            "Minimalist Icon Pack",
            "A set of 500+ professionally designed, pixel-perfect icons for your web and mobile projects. Available in SVG and Figma formats for easy customization.",
            "Digital Asset",
            49.00,
            ProductStatus::Draft,
            created(2024, 1, 20, 9, 0),
        ),
    ]
}
