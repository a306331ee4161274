// cw_seeder/src/bin/crud_demo.rs
// Ad-hoc single-document CRUD walkthrough against the seeded store: insert,
// read back, update, delete, bulk-upsert a small catalog and run pattern
// queries. Destructive: drops the demo database at the end.

use clap::Parser;
use cw_seeder::PRODUCTS_COLLECTION;
use cw_seeder::batch::build_upsert_batch;
use cw_seeder::cli::resolve_connection_uri;
use cw_seeder::error::{Result, SeederError};
use cw_seeder::gateway::StoreGateway;
use cw_seeder::mongo::{GatewayConfig, MongoGateway};
use cw_seeder::records::{Product, Record};
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc, from_document};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug,)]
#[clap(author, version, about = "CRUD walkthrough against the Cosmic Works store")]
struct DemoArgs {
    /// Connection string for the target document store.
    #[clap(long, env = "DB_CONNECTION_STRING")]
    uri: String,

    #[clap(long, env = "DB_USER")]
    db_user: Option<String,>,

    #[clap(long, env = "DB_PW", hide_env_values = true)]
    db_password: Option<String,>,

    /// Database to run the walkthrough in. Dropped on exit.
    #[clap(long, default_value = "cosmic_works_demo")]
    database: String,
}

fn sample_product() -> Product {
    Product {
        id:            "2BA4A26C-A8DB-4645-BEB9-F7D42F50262E".to_string(),
        category_id:   "56400CF3-446D-4C3F-B9B2-68286DA3BB99".to_string(),
        category_name: "Bikes, Mountain Bikes".to_string(),
        sku:           "BK-M18S-42".to_string(),
        name:          "Mountain-100 Silver, 42".to_string(),
        description:   "The product called \"Mountain-500 Silver, 42\"".to_string(),
        price:         742.42,
    }
}

fn sample_catalog() -> Vec<Product,> {
    vec![
        sample_product(),
        Product {
            id:            "027D0B9A-F9D9-4C96-8213-C8546C4AAE71".to_string(),
            category_id:   "26C74104-40BC-4541-8EF5-9892F7F03D72".to_string(),
            category_name: "Components, Saddles".to_string(),
            sku:           "SE-R581".to_string(),
            name:          "LL Road Seat/Saddle".to_string(),
            description:   "The product called \"LL Road Seat/Saddle\"".to_string(),
            price:         27.12,
        },
        Product {
            id:            "4E4B38CB-0D82-43E5-89AF-20270CD28A04".to_string(),
            category_id:   "75BF1ACB-168D-469C-9AA3-1FD26BB4EA4C".to_string(),
            category_name: "Bikes, Touring Bikes".to_string(),
            sku:           "BK-T44U-60".to_string(),
            name:          "Touring-2000 Blue, 60".to_string(),
            description:   "The product called Touring-2000 Blue, 60\"".to_string(),
            price:         1214.85,
        },
    ]
}

#[tokio::main]
async fn main() -> Result<(),> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn",),),
        )
        .init();

    let args = DemoArgs::parse();
    let uri = resolve_connection_uri(
        &args.uri,
        args.db_user.as_deref(),
        args.db_password.as_deref(),
    )?;
    let gateway = MongoGateway::connect(&GatewayConfig {
        uri,
        database_name: args.database.clone(),
    },)
    .await?;

    let collection = gateway.collection(PRODUCTS_COLLECTION,);

    // CREATE
    let product = sample_product();
    collection.insert_one(product.to_document()?, None,).await?;
    println!("Inserted product with ID: {}", product.id);

    // READ, then cast the raw document back into the typed record
    let retrieved: Document = collection
        .find_one(doc! {"_id": &product.id}, None,)
        .await?
        .ok_or_else(|| SeederError::Other("inserted product not found".to_string(),),)?;
    println!("Document retrieved from the database:\n{:#?}", retrieved);

    let retrieved_product: Product =
        from_document(retrieved,).map_err(|e| SeederError::Other(e.to_string(),),)?;
    println!("\nCast Product from document:\n{:?}", retrieved_product);

    // UPDATE a single field in place
    let updated = collection
        .find_one_and_update(
            doc! {"_id": &product.id},
            doc! {"$set": {"name": "Mountain-100 Silver, 48\""}},
            FindOneAndUpdateOptions::builder()
                .return_document(ReturnDocument::After,)
                .build(),
        )
        .await?
        .ok_or_else(|| SeederError::Other("updated product not found".to_string(),),)?;
    println!("Updated document:\n{:#?}", updated);

    // DELETE
    let delete_result = collection.delete_one(doc! {"_id": &product.id}, None,).await?;
    println!("Deleted documents count: {}", delete_result.deleted_count);
    println!(
        "Number of documents in the collection: {}",
        gateway.count(PRODUCTS_COLLECTION,).await?
    );

    // BULK UPSERT a small catalog through the same batch path the seeder uses
    let catalog = sample_catalog();
    let batch = build_upsert_batch(&catalog,)?;
    gateway.apply_batch(PRODUCTS_COLLECTION, &batch,).await?;

    // QUERY by exact category name
    println!("\nProducts in category 'Components, Saddles':");
    let mut cursor = collection
        .find(doc! {"categoryName": "Components, Saddles"}, None,)
        .await?;
    while let Some(document,) = cursor.try_next().await? {
        println!("{:#?}", document);
    }

    // QUERY by category-name pattern
    println!("\nProducts whose category matches 'Bikes':");
    let mut cursor = collection
        .find(doc! {"categoryName": {"$regex": "Bikes"}}, None,)
        .await?;
    while let Some(document,) = cursor.try_next().await? {
        println!("{:#?}", document);
    }

    // CLEAN UP RESOURCES
    gateway.drop_database().await?;
    gateway.close().await;
    Ok((),)
}
