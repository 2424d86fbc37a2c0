//! Resets the `plants` table to a small set of sample records.

use plant_catalog::infra::{config, telemetry};
use plant_catalog::{CatalogService, NewPlant};

fn sample_plants() -> Vec<NewPlant> {
    vec![
        NewPlant::new("Aloe", "./images/aloe.jpg", 11.50),
        NewPlant::new("ZZ Plant", "./images/zz-plant.jpg", 25.98),
        NewPlant::new("Snake Plant", "./images/snake-plant.jpg", 18.00),
        NewPlant::new("Fiddle Leaf Fig", "./images/fiddle-leaf-fig.jpg", 42.00).with_stock(false),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    telemetry::init();

    let catalog = CatalogService::new().await?;
    let seeded = catalog.replace_all(&sample_plants()).await?;
    for plant in &seeded {
        tracing::info!(id = plant.id, name = %plant.name, price = plant.price, "seeded plant");
    }
    tracing::info!(count = seeded.len(), "seeding complete");
    Ok(())
}
