//! Static product catalog
//!
//! The catalog is a fixed in-process list; there is no persistence layer
//! behind it and no filtering or pagination.

use std::sync::OnceLock;

use crate::models::product::Product;

static PRODUCTS: OnceLock<Vec<Product>> = OnceLock::new();

fn product(id: &str, name: &str, price: i64, image_url: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        image_url: image_url.to_string(),
    }
}

/// The full catalog, identical on every call
pub fn products() -> &'static [Product] {
    PRODUCTS
        .get_or_init(|| {
            vec![
                product(
                    "p1",
                    "Smartphone Pro",
                    69999,
                    "http://localhost:5000/images/smartphone-pro.jpeg",
                ),
                product(
                    "p2",
                    "Laptop Ultra",
                    99999,
                    "http://localhost:5000/images/laptop-ultra.jpeg",
                ),
                product(
                    "p3",
                    "Smartwatch X",
                    12999,
                    "http://localhost:5000/images/smartwatch-x.jpeg",
                ),
                product(
                    "p4",
                    "Wireless Earbuds",
                    4999,
                    "http://localhost:5000/images/wireless-earbuds.jpeg",
                ),
                product(
                    "p5",
                    "4K Smart TV",
                    45999,
                    "http://localhost:5000/images/4k-smart-tv.jpeg",
                ),
                product(
                    "p6",
                    "Gaming Console",
                    35999,
                    "http://localhost:5000/images/gaming-console.jpeg",
                ),
                product(
                    "p7",
                    "Digital Camera",
                    28999,
                    "http://localhost:5000/images/digital-camera.jpeg",
                ),
                product(
                    "p8",
                    "Bluetooth Speaker",
                    3499,
                    "http://localhost:5000/images/bluetooth-speaker.jpeg",
                ),
                product(
                    "p9",
                    "Fitness Tracker",
                    2999,
                    "http://localhost:5000/images/fitness-tracker.jpeg",
                ),
                product(
                    "p10",
                    "External Hard Drive",
                    7999,
                    "http://localhost:5000/images/external-hard-drive.jpeg",
                ),
                product(
                    "p11",
                    "Robot Vacuum",
                    18999,
                    "http://localhost:5000/images/robot-vacuum.jpeg",
                ),
                product(
                    "p12",
                    "Coffee Maker",
                    5499,
                    "http://localhost:5000/images/coffee-maker.jpeg",
                ),
            ]
        })
        .as_slice()
}
