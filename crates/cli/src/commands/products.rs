//! Product catalog commands.

use std::path::{Path, PathBuf};

use clap::Subcommand;

use neszi_client::ApiClient;
use neszi_client::types::{NewProduct, Product, ProductImage, ProductUpdate};
use neszi_core::{Price, ProductId};

use super::parse_item;

#[derive(Subcommand)]
pub enum ProductsAction {
    /// List the product catalog
    List,
    /// Add a product (multipart upload with image and initial inventory)
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        brand: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Rich HTML description
        #[arg(long, default_value = "")]
        rich_description: String,

        /// Price in cents (e.g. 1999 for 19.99)
        #[arg(long)]
        price_cents: i64,

        /// Feature this product on the storefront
        #[arg(long)]
        featured: bool,

        /// Search keyword; repeatable
        #[arg(long = "keyword")]
        keywords: Vec<String>,

        /// Path to the product image file
        #[arg(long)]
        image: PathBuf,

        /// Stocked unit as barcode:serial; repeatable
        #[arg(long = "item", value_parser = parse_item)]
        items: Vec<neszi_client::types::InventoryItem>,
    },
    /// Update a product's editable fields
    Update {
        id: i64,

        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long)]
        price_cents: i64,

        #[arg(long)]
        stock_quantity: i64,

        /// Existing image URL to pass through unchanged
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a product
    Delete { id: i64 },
}

pub async fn run(
    client: &ApiClient,
    action: ProductsAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProductsAction::List => {
            let products = client.list_products().await?;
            print_products(&products);
        }
        ProductsAction::Add {
            name,
            brand,
            description,
            rich_description,
            price_cents,
            featured,
            keywords,
            image,
            items,
        } => {
            let product = NewProduct {
                name,
                description,
                rich_description,
                brand,
                price_cents: Price::from_cents(price_cents),
                is_featured: featured,
                keywords,
                image: read_image(&image)?,
                inventory_items: items,
            };
            let ack = client.create_product(&product).await?;
            println!(
                "{}",
                ack.message.as_deref().unwrap_or("Product added successfully!")
            );
        }
        ProductsAction::Update {
            id,
            name,
            description,
            price_cents,
            stock_quantity,
            image,
        } => {
            let update = ProductUpdate {
                name,
                description,
                price_cents: Price::from_cents(price_cents),
                stock_quantity,
                image,
            };
            let ack = client.update_product(ProductId::new(id), &update).await?;
            println!("{}", ack.message.as_deref().unwrap_or("Product updated."));
        }
        ProductsAction::Delete { id } => {
            let ack = client.delete_product(ProductId::new(id)).await?;
            println!("{}", ack.message.as_deref().unwrap_or("Product deleted."));
        }
    }
    Ok(())
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products.");
        return;
    }
    for product in products {
        println!(
            "#{:<5} {:<30} {:>10}  stock: {}",
            product.id,
            product.name,
            product.price_cents.display(),
            product.stock_quantity
        );
    }
}

/// Read the image file, inferring the MIME type from the extension.
fn read_image(path: &Path) -> Result<ProductImage, std::io::Error> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());
    let mime_type = match path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
    .to_string();

    Ok(ProductImage {
        bytes,
        file_name,
        mime_type,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_read_image_infers_mime_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.PNG");
        std::fs::write(&path, [0x89, 0x50, 0x4E, 0x47]).unwrap();

        let image = read_image(&path).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.file_name, "photo.PNG");
        assert_eq!(image.bytes, vec![0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn test_read_image_falls_back_for_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [1, 2, 3]).unwrap();

        let image = read_image(&path).unwrap();
        assert_eq!(image.mime_type, "application/octet-stream");
    }
}
