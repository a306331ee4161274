// cw_seeder/tests/pipeline_tests.rs
// Pure pipeline-stage tests: classification, validation/mapping, aliasing
// and batch building. No I/O.

use cw_seeder::batch::build_upsert_batch;
use cw_seeder::classify::partition_by;
use cw_seeder::error::SeederError;
use cw_seeder::records::{
    Customer, CustomerList, Product, ProductList, Record, SalesOrder, SalesOrderList,
    ValidationMode,
};
use cw_seeder::{CUSTOMER_DISCRIMINATOR, DISCRIMINATOR_FIELD, SALES_ORDER_DISCRIMINATOR};
use serde_json::{Value, json};

fn product_json(id: &str, name: &str, price: f64,) -> Value {
    json!({
        "id": id,
        "categoryId": "56400CF3-446D-4C3F-B9B2-68286DA3BB99",
        "categoryName": "Bikes, Mountain Bikes",
        "sku": "BK-M18S-42",
        "name": name,
        "description": format!("The product called \"{}\"", name),
        "price": price,
    })
}

#[test]
fn classifier_partitions_every_recognized_entry_exactly_once() {
    let entries = vec![
        json!({"id": "c1", "type": "customer"}),
        json!({"id": "s1", "type": "salesOrder", "customerId": "c1"}),
        json!({"id": "c2", "type": "customer"}),
        json!({"id": "s2", "type": "salesOrder", "customerId": "c2"}),
    ];
    let total = entries.len();

    let mut partitions = partition_by(
        entries,
        DISCRIMINATOR_FIELD,
        &[CUSTOMER_DISCRIMINATOR, SALES_ORDER_DISCRIMINATOR],
    );

    let customers = partitions.take(CUSTOMER_DISCRIMINATOR,);
    let sales = partitions.take(SALES_ORDER_DISCRIMINATOR,);
    assert_eq!(customers.len() + sales.len(), total);
    assert!(partitions.skipped.is_empty());

    // Original order is preserved within each partition.
    let ids: Vec<&str,> = customers
        .iter()
        .map(|c| c["id"].as_str().unwrap(),)
        .collect();
    assert_eq!(ids, ["c1", "c2"]);
    let ids: Vec<&str,> = sales.iter().map(|s| s["id"].as_str().unwrap(),).collect();
    assert_eq!(ids, ["s1", "s2"]);
}

#[test]
fn classifier_collects_unrecognized_and_untagged_entries() {
    let entries = vec![
        json!({"id": "c1", "type": "customer"}),
        json!({"id": "x1", "type": "unknown"}),
        json!({"id": "x2"}),
        json!({"id": "x3", "type": 7}),
    ];

    let mut partitions = partition_by(
        entries,
        DISCRIMINATOR_FIELD,
        &[CUSTOMER_DISCRIMINATOR, SALES_ORDER_DISCRIMINATOR],
    );

    assert_eq!(partitions.take(CUSTOMER_DISCRIMINATOR,).len(), 1);
    assert_eq!(partitions.take(SALES_ORDER_DISCRIMINATOR,).len(), 0);
    let skipped: Vec<&str,> = partitions
        .skipped
        .iter()
        .map(|e| e["id"].as_str().unwrap(),)
        .collect();
    assert_eq!(skipped, ["x1", "x2", "x3"]);
}

#[test]
fn mapper_fails_fast_on_one_bad_record() {
    let mut raws = vec![
        product_json("p1", "Widget", 9.99,),
        product_json("p2", "Sprocket", 14.50,),
    ];
    let mut bad = product_json("p3", "Gadget", 1.0,);
    bad.as_object_mut().unwrap().remove("sku",);
    raws.push(bad,);
    raws.push(product_json("p4", "Flange", 3.25,),);

    let err = ProductList::from_raw(&raws, ValidationMode::FailFast,)
        .expect_err("one bad record must abort the whole list",);
    match err {
        SeederError::Validation { field, value, .. } => {
            assert_eq!(field, "sku");
            assert_eq!(value, "<missing>");
        },
        other => panic!("expected a validation error, got {other}"),
    }
}

#[test]
fn mapper_collect_mode_keeps_valid_records_and_reports_failures() {
    let mut raws = vec![
        product_json("p1", "Widget", 9.99,),
        product_json("p2", "Sprocket", 14.50,),
    ];
    let mut bad = product_json("p3", "Gadget", 1.0,);
    bad.as_object_mut().unwrap().remove("sku",);
    raws.push(bad,);

    let list = ProductList::from_raw(&raws, ValidationMode::Collect,).unwrap();
    assert_eq!(list.items.len(), 2);
    assert_eq!(list.rejected.len(), 1);
    let ids: Vec<&str,> = list.items.iter().map(Record::id,).collect();
    assert_eq!(ids, ["p1", "p2"]);
}

#[test]
fn negative_price_is_rejected_by_name() {
    let raws = vec![product_json("p1", "Widget", -0.01,)];
    let err = ProductList::from_raw(&raws, ValidationMode::FailFast,).unwrap_err();
    match err {
        SeederError::Validation { field, .. } => assert_eq!(field, "price"),
        other => panic!("expected a validation error, got {other}"),
    }
}

#[test]
fn mistyped_field_is_rejected_by_name() {
    let mut raw = product_json("p1", "Widget", 9.99,);
    raw["price"] = json!("9.99");
    let err = Product::from_value(&raw,).unwrap_err();
    match err {
        SeederError::Validation { field, value, .. } => {
            assert_eq!(field, "price");
            assert_eq!(value, "\"9.99\"");
        },
        other => panic!("expected a validation error, got {other}"),
    }
}

#[test]
fn product_serialization_round_trips_through_storage_aliases() {
    let product = Product::from_value(&product_json("p1", "Widget", 9.99,),).unwrap();

    let stored = serde_json::to_value(&product,).unwrap();
    // Storage form uses the store-reserved identifier key and camelCase.
    assert_eq!(stored["_id"], "p1");
    assert_eq!(stored["categoryName"], "Bikes, Mountain Bikes");
    assert!(stored.get("id",).is_none());

    let reparsed = Product::from_value(&stored,).unwrap();
    assert_eq!(reparsed, product);
}

#[test]
fn customer_round_trip_preserves_feed_defined_extras() {
    let raw = json!({
        "id": "c1",
        "type": "customer",
        "title": "Mr.",
        "firstName": "Orlando",
        "lastName": "Gee",
        "emailAddress": "orlando0@adventure-works.com",
        "phoneNumber": "245-555-0173",
        "creationDate": "2011-05-21T00:00:00",
        "addresses": [
            {"addressLine1": "8713 Yosemite Ct.", "city": "Bothell", "zipCode": "98011"}
        ],
        "password": {"hash": "...", "salt": "..."}
    });

    let mut list = CustomerList::from_raw(&[raw.clone()], ValidationMode::FailFast,).unwrap();
    assert_eq!(list.items.len(), 1);
    let customer = list.items.remove(0,);
    assert_eq!(customer.id, "c1");
    assert_eq!(customer.first_name.as_deref(), Some("Orlando",));
    assert!(customer.extra.contains_key("addresses",));

    let stored = serde_json::to_value(&customer,).unwrap();
    assert_eq!(stored["_id"], "c1");
    assert_eq!(stored["type"], "customer");
    assert_eq!(stored["addresses"], raw["addresses"]);

    let reparsed = Customer::from_value(&stored,).unwrap();
    assert_eq!(reparsed, customer);
}

#[test]
fn sales_order_round_trip_keeps_line_items() {
    let raw = json!({
        "id": "s1",
        "type": "salesOrder",
        "customerId": "c1",
        "orderDate": "2011-06-01T00:00:00",
        "details": [
            {"sku": "BK-M18S-42", "name": "Mountain-100 Silver, 42", "price": 742.42, "quantity": 1}
        ]
    });

    let order = SalesOrder::from_value(&raw,).unwrap();
    assert_eq!(order.customer_id, "c1");
    assert_eq!(order.details.len(), 1);
    assert_eq!(order.details[0].quantity, 1);

    let stored = serde_json::to_value(&order,).unwrap();
    assert_eq!(stored["_id"], "s1");
    assert_eq!(stored["customerId"], "c1");

    let reparsed = SalesOrder::from_value(&stored,).unwrap();
    assert_eq!(reparsed, order);
}

#[test]
fn sales_order_requires_a_customer_reference() {
    let raws = vec![json!({"id": "s1", "type": "salesOrder"})];
    let err = SalesOrderList::from_raw(&raws, ValidationMode::FailFast,).unwrap_err();
    match err {
        SeederError::Validation { field, .. } => assert_eq!(field, "customerId"),
        other => panic!("expected a validation error, got {other}"),
    }
}

#[test]
fn upsert_batch_has_one_full_document_op_per_record() {
    let raws = vec![
        product_json("p1", "Widget", 9.99,),
        product_json("p2", "Sprocket", 14.50,),
    ];
    let list = ProductList::from_raw(&raws, ValidationMode::FailFast,).unwrap();

    let batch = build_upsert_batch(&list.items,).unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].id, "p1");
    assert_eq!(batch[0].replacement.get_str("_id",).unwrap(), "p1");
    assert_eq!(batch[0].replacement.get_str("name",).unwrap(), "Widget");
    assert_eq!(batch[0].replacement.get_f64("price",).unwrap(), 9.99);
    assert_eq!(batch[1].id, "p2");
}
