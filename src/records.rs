// cw_seeder/src/records.rs
// Typed record schema for the Cosmic Works feeds, plus the raw-to-typed mapper.

use mongodb::bson::Document;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{Result, SeederError};

/// How the mapper reacts to an invalid raw entry.
///
/// The default is `FailFast`: one bad record aborts the whole list, matching
/// the single-shot batch semantics of the loader. `Collect` keeps every valid
/// record and reports the failures alongside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default,)]
pub enum ValidationMode {
    #[default]
    FailFast,
    Collect,
}

/// A feed record that can be validated from raw JSON and written to a store
/// collection keyed on its identifier.
pub trait Record: DeserializeOwned + Serialize {
    /// Target collection for this record kind.
    const COLLECTION: &'static str;

    /// The upsert key. Never generated at write time.
    fn id(&self,) -> &str;

    /// Check required fields and primitive types on the raw object, naming
    /// the offending field on failure.
    fn check(raw: &Map<String, Value,>,) -> Result<(),>;

    /// Validate and construct a typed record from a decoded JSON value.
    fn from_value(raw: &Value,) -> Result<Self,> {
        let map = raw.as_object().ok_or_else(|| {
            SeederError::validation("<root>", preview(raw,), "expected a JSON object",)
        },)?;
        Self::check(map,)?;
        serde_json::from_value(raw.clone(),).map_err(|e| {
            let id = raw_id(map,).unwrap_or("<unknown>",);
            SeederError::validation(Self::COLLECTION, id, e.to_string(),)
        },)
    }

    /// Serialize with the aliased key names used for storage (identifier
    /// emitted under `_id`).
    fn to_document(&self,) -> Result<Document,> {
        mongodb::bson::to_document(self,).map_err(|e| {
            SeederError::Other(format!("Failed to serialize record to BSON: {}", e),)
        },)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize,)]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id:            String,
    #[serde(rename = "categoryId")]
    pub category_id:   String,
    #[serde(rename = "categoryName")]
    pub category_name: String,
    pub sku:           String,
    pub name:          String,
    pub description:   String,
    pub price:         f64,
}

impl Record for Product {
    const COLLECTION: &'static str = crate::PRODUCTS_COLLECTION;

    fn id(&self,) -> &str {
        &self.id
    }

    fn check(raw: &Map<String, Value,>,) -> Result<(),> {
        raw_id(raw,)?;
        for field in ["categoryId", "categoryName", "sku", "name", "description"] {
            require_str(raw, field,)?;
        }
        let price = require_number(raw, "price",)?;
        if price < 0.0 {
            return Err(SeederError::validation(
                "price",
                price.to_string(),
                "price must be non-negative",
            ),);
        }
        Ok((),)
    }
}

/// Customer profile out of the mixed feed. Beyond the identifier and the
/// discriminator the attribute set is feed-defined, so the common profile
/// fields are typed as optionals and everything else (addresses, password
/// material) rides along in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize,)]
pub struct Customer {
    #[serde(rename = "_id", alias = "id")]
    pub id:            String,
    #[serde(rename = "type")]
    pub kind:          String,
    #[serde(rename = "customerId", default, skip_serializing_if = "Option::is_none")]
    pub customer_id:   Option<String,>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title:         Option<String,>,
    #[serde(rename = "firstName", default, skip_serializing_if = "Option::is_none")]
    pub first_name:    Option<String,>,
    #[serde(rename = "lastName", default, skip_serializing_if = "Option::is_none")]
    pub last_name:     Option<String,>,
    #[serde(rename = "emailAddress", default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String,>,
    #[serde(rename = "phoneNumber", default, skip_serializing_if = "Option::is_none")]
    pub phone_number:  Option<String,>,
    #[serde(rename = "creationDate", default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String,>,
    #[serde(flatten)]
    pub extra:         Map<String, Value,>,
}

impl Record for Customer {
    const COLLECTION: &'static str = crate::CUSTOMERS_COLLECTION;

    fn id(&self,) -> &str {
        &self.id
    }

    fn check(raw: &Map<String, Value,>,) -> Result<(),> {
        raw_id(raw,)?;
        require_str(raw, crate::DISCRIMINATOR_FIELD,)?;
        Ok((),)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize,)]
pub struct SalesOrder {
    #[serde(rename = "_id", alias = "id")]
    pub id:          String,
    #[serde(rename = "type")]
    pub kind:        String,
    /// Identifier of the ordering customer. A reference by value only; no
    /// live link to a `Customer` record is ever held.
    #[serde(rename = "customerId")]
    pub customer_id: String,
    #[serde(rename = "orderDate", default, skip_serializing_if = "Option::is_none")]
    pub order_date:  Option<String,>,
    #[serde(rename = "shipDate", default, skip_serializing_if = "Option::is_none")]
    pub ship_date:   Option<String,>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details:     Vec<OrderDetail,>,
    #[serde(flatten)]
    pub extra:       Map<String, Value,>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize,)]
pub struct OrderDetail {
    pub sku:      String,
    pub name:     String,
    pub price:    f64,
    pub quantity: i64,
    #[serde(flatten)]
    pub extra:    Map<String, Value,>,
}

impl Record for SalesOrder {
    const COLLECTION: &'static str = crate::SALES_COLLECTION;

    fn id(&self,) -> &str {
        &self.id
    }

    fn check(raw: &Map<String, Value,>,) -> Result<(),> {
        raw_id(raw,)?;
        require_str(raw, crate::DISCRIMINATOR_FIELD,)?;
        require_str(raw, "customerId",)?;
        Ok((),)
    }
}

/// In-memory validation/batching envelope for one record kind. Never
/// persisted as such.
#[derive(Debug,)]
pub struct RecordList<T,> {
    pub items:    Vec<T,>,
    /// Validation failures, only ever populated in `Collect` mode.
    pub rejected: Vec<SeederError,>,
}

pub type ProductList = RecordList<Product,>;
pub type CustomerList = RecordList<Customer,>;
pub type SalesOrderList = RecordList<SalesOrder,>;

impl<T: Record,> RecordList<T,> {
    /// Lift a sequence of raw feed objects into validated records.
    pub fn from_raw(raws: &[Value], mode: ValidationMode,) -> Result<Self,> {
        let mut items = Vec::with_capacity(raws.len(),);
        let mut rejected = Vec::new();
        for raw in raws {
            match T::from_value(raw,) {
                Ok(record,) => items.push(record,),
                Err(err,) => match mode {
                    ValidationMode::FailFast => return Err(err,),
                    ValidationMode::Collect => {
                        warn!("Skipping invalid '{}' record: {}", T::COLLECTION, err);
                        rejected.push(err,);
                    },
                },
            }
        }
        Ok(RecordList { items, rejected, },)
    }
}

/// The identifier may arrive under the public `id` key (feed form) or the
/// store-reserved `_id` key (storage form).
fn raw_id<'a,>(raw: &'a Map<String, Value,>,) -> Result<&'a str,> {
    match raw.get("id",).or_else(|| raw.get("_id",),) {
        Some(Value::String(s,),) => Ok(s,),
        Some(other,) => Err(SeederError::validation(
            "id",
            preview(other,),
            "expected a string",
        ),),
        None => Err(SeederError::validation(
            "id",
            "<missing>",
            "required field is missing",
        ),),
    }
}

fn require_str<'a,>(raw: &'a Map<String, Value,>, field: &str,) -> Result<&'a str,> {
    match raw.get(field,) {
        Some(Value::String(s,),) => Ok(s,),
        Some(other,) => Err(SeederError::validation(
            field,
            preview(other,),
            "expected a string",
        ),),
        None => Err(SeederError::validation(
            field,
            "<missing>",
            "required field is missing",
        ),),
    }
}

fn require_number(raw: &Map<String, Value,>, field: &str,) -> Result<f64,> {
    match raw.get(field,) {
        Some(Value::Number(n,),) => n.as_f64().ok_or_else(|| {
            SeederError::validation(field, n.to_string(), "number is not representable",)
        },),
        Some(other,) => Err(SeederError::validation(
            field,
            preview(other,),
            "expected a number",
        ),),
        None => Err(SeederError::validation(
            field,
            "<missing>",
            "required field is missing",
        ),),
    }
}

fn preview(value: &Value,) -> String {
    let s = value.to_string();
    if s.chars().count() > 60 {
        let head: String = s.chars().take(57,).collect();
        format!("{}...", head)
    } else {
        s
    }
}
