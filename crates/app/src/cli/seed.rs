use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Args;
use gallery::totals::ShippingSettings;
use gallery_app::domain::{
    settings::{PgSettingsService, SettingsService},
    variants::{
        PgVariantsService, VariantsService, VariantsServiceError,
        data::{NewVariant, VariantUpdate},
    },
};
use serde::Deserialize;

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Catalog file to load
    #[arg(long)]
    file: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    shipping: Option<ShippingSettings>,

    #[serde(default)]
    variants: Vec<NewVariant>,
}

fn parse_catalog(contents: &str) -> Result<CatalogFile, String> {
    serde_norway::from_str(contents).map_err(|error| format!("invalid catalog file: {error}"))
}

fn read_catalog(path: &Path) -> Result<CatalogFile, String> {
    let contents = fs::read_to_string(path)
        .map_err(|error| format!("failed to read {}: {error}", path.display()))?;

    parse_catalog(&contents)
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let catalog = read_catalog(&args.file)?;

    let db = super::connect(&args.database_url).await?;
    let variants = PgVariantsService::new(db.clone());
    let settings = PgSettingsService::new(db);

    let mut created = 0_usize;
    let mut updated = 0_usize;

    for variant in catalog.variants {
        let uuid = variant.uuid;
        let update = VariantUpdate::from(&variant);

        match variants.create_variant(variant).await {
            Ok(_) => created += 1,
            Err(VariantsServiceError::AlreadyExists) => {
                variants
                    .update_variant(uuid, update)
                    .await
                    .map_err(|error| format!("failed to update variant {uuid}: {error}"))?;

                updated += 1;
            }
            Err(error) => return Err(format!("failed to create variant {uuid}: {error}")),
        }
    }

    println!("variants_created: {created}");
    println!("variants_updated: {updated}");

    if let Some(shipping) = catalog.shipping {
        settings
            .update_shipping(shipping)
            .await
            .map_err(|error| format!("failed to update shipping settings: {error}"))?;

        println!(
            "shipping: {} (free from {})",
            shipping.standard_rate, shipping.free_shipping_threshold
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_variants_and_shipping() -> TestResult {
        let catalog = parse_catalog(
            r"
shipping:
  standardRate: 700
  freeShippingThreshold: 10000
variants:
  - uuid: 0190a8e4-7f1c-7d3e-9a55-3b8e5f0c1a01
    product_uuid: 0190a8e4-7f1c-7d3e-9a55-3b8e5f0c1a00
    title: Blue Hour, A3
    slug: blue-hour-a3
    price: 4500
    stock: 3
",
        )?;

        assert_eq!(
            catalog.shipping,
            Some(ShippingSettings {
                standard_rate: 700,
                free_shipping_threshold: 10_000,
            })
        );
        assert_eq!(catalog.variants.len(), 1);
        assert_eq!(
            catalog.variants.first().map(|variant| variant.slug.as_str()),
            Some("blue-hour-a3")
        );

        Ok(())
    }

    #[test]
    fn shipping_is_optional() -> TestResult {
        let catalog = parse_catalog("variants: []")?;

        assert!(catalog.shipping.is_none());
        assert!(catalog.variants.is_empty());

        Ok(())
    }

    #[test]
    fn reads_catalog_from_disk() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;

        writeln!(file, "shipping:\n  standardRate: 0\n  freeShippingThreshold: 0")?;

        let catalog = read_catalog(file.path())?;

        assert_eq!(catalog.shipping.map(|shipping| shipping.standard_rate), Some(0));

        Ok(())
    }

    #[test]
    fn missing_files_name_the_path() {
        let result = read_catalog(Path::new("/nonexistent/catalog.yaml"));

        assert!(result.is_err_and(|error| error.contains("/nonexistent/catalog.yaml")));
    }

    #[test]
    fn rejects_negative_prices() {
        let result = parse_catalog(
            r"
variants:
  - uuid: 0190a8e4-7f1c-7d3e-9a55-3b8e5f0c1a01
    product_uuid: 0190a8e4-7f1c-7d3e-9a55-3b8e5f0c1a00
    title: Blue Hour, A3
    slug: blue-hour-a3
    price: -1
    stock: 3
",
        );

        assert!(result.is_err());
    }
}
