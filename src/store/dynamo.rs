use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
    ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;
use serde_json::{Map, Number, Value};

use crate::config::StoreConfig;

use super::{Item, ItemStore, StoreError};

/// DynamoDB-backed [`ItemStore`]. One table per entity collection, partition
/// key `id` (string), no secondary indexes; non-key lookups are full scans.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
}

impl DynamoStore {
    /// Build a client and verify the store is reachable. An endpoint in the
    /// config means a local instance with static credentials; otherwise the
    /// default AWS credential chain applies.
    pub async fn connect(cfg: &StoreConfig) -> Result<Self, StoreError> {
        let client = match &cfg.endpoint {
            Some(endpoint) => {
                let conf = aws_sdk_dynamodb::Config::builder()
                    .behavior_version(BehaviorVersion::latest())
                    .region(Region::new(cfg.region.clone()))
                    .endpoint_url(endpoint)
                    .credentials_provider(Credentials::new("dummy", "dummy", None, None, "static"))
                    .build();
                Client::from_conf(conf)
            }
            None => {
                let sdk_config = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(cfg.region.clone()))
                    .load()
                    .await;
                Client::new(&sdk_config)
            }
        };

        let store = Self { client };
        store.ping().await?;
        Ok(store)
    }

    /// Create any missing entity tables (pay-per-request, `id` hash key).
    pub async fn ensure_collections(
        &self,
        table_prefix: &str,
        collections: &[&str],
    ) -> Result<(), StoreError> {
        for name in collections {
            self.ensure_collection(&format!("{}{}", table_prefix, name))
                .await?;
        }
        Ok(())
    }

    async fn ensure_collection(&self, table: &str) -> Result<(), StoreError> {
        if self
            .client
            .describe_table()
            .table_name(table)
            .send()
            .await
            .is_ok()
        {
            tracing::debug!(table, "table already exists");
            return Ok(());
        }

        tracing::info!(table, "table does not exist, creating");
        let key_schema = KeySchemaElement::builder()
            .attribute_name("id")
            .key_type(KeyType::Hash)
            .build()
            .map_err(|e| StoreError::Request(e.to_string()))?;
        let key_attribute = AttributeDefinition::builder()
            .attribute_name("id")
            .attribute_type(ScalarAttributeType::S)
            .build()
            .map_err(|e| StoreError::Request(e.to_string()))?;

        self.client
            .create_table()
            .table_name(table)
            .key_schema(key_schema)
            .attribute_definitions(key_attribute)
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await
            .map_err(|e| {
                StoreError::Request(format!("failed to create table {}: {}", table, e))
            })?;
        Ok(())
    }
}

#[async_trait]
impl ItemStore for DynamoStore {
    #[tracing::instrument(skip(self, item))]
    async fn put_new(&self, collection: &str, id: &str, item: Item) -> Result<(), StoreError> {
        match self
            .client
            .put_item()
            .table_name(collection)
            .set_item(Some(to_attribute_map(item)))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_conditional_check_failed_exception() {
                    Err(StoreError::AlreadyExists)
                } else {
                    Err(StoreError::Request(service_err.to_string()))
                }
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Item>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(collection)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Request(e.into_service_error().to_string()))?;

        match output.item {
            Some(attrs) => Ok(Some(from_attribute_map(attrs)?)),
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self, item))]
    async fn put_existing(
        &self,
        collection: &str,
        id: &str,
        item: Item,
    ) -> Result<(), StoreError> {
        match self
            .client
            .put_item()
            .table_name(collection)
            .set_item(Some(to_attribute_map(item)))
            .condition_expression("attribute_exists(id)")
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_conditional_check_failed_exception() {
                    Err(StoreError::NotFound)
                } else {
                    Err(StoreError::Request(service_err.to_string()))
                }
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        match self
            .client
            .delete_item()
            .table_name(collection)
            .key("id", AttributeValue::S(id.to_string()))
            .condition_expression("attribute_exists(id)")
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_conditional_check_failed_exception() {
                    Err(StoreError::NotFound)
                } else {
                    Err(StoreError::Request(service_err.to_string()))
                }
            }
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .list_tables()
            .limit(1)
            .send()
            .await
            .map_err(|e| StoreError::Request(format!("store unreachable: {}", e)))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn scan(&self, collection: &str) -> Result<Vec<Item>, StoreError> {
        let mut items = Vec::new();
        let mut last_evaluated_key: Option<HashMap<String, AttributeValue>> = None;

        // Loop until all pages are consumed
        loop {
            let output = self
                .client
                .scan()
                .table_name(collection)
                .set_exclusive_start_key(last_evaluated_key.take())
                .send()
                .await
                .map_err(|e| StoreError::Request(e.into_service_error().to_string()))?;

            if let Some(page) = output.items {
                for attrs in page {
                    items.push(from_attribute_map(attrs)?);
                }
            }

            last_evaluated_key = output.last_evaluated_key;
            if last_evaluated_key.is_none() {
                break;
            }
        }

        Ok(items)
    }
}

fn to_attribute_map(item: Item) -> HashMap<String, AttributeValue> {
    item.into_iter().map(|(k, v)| (k, to_attr(v))).collect()
}

fn from_attribute_map(attrs: HashMap<String, AttributeValue>) -> Result<Item, StoreError> {
    attrs
        .into_iter()
        .map(|(k, v)| Ok((k, from_attr(v)?)))
        .collect::<Result<Map<String, Value>, StoreError>>()
}

fn to_attr(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(values) => AttributeValue::L(values.into_iter().map(to_attr).collect()),
        Value::Object(map) => {
            AttributeValue::M(map.into_iter().map(|(k, v)| (k, to_attr(v))).collect())
        }
    }
}

fn from_attr(attr: AttributeValue) -> Result<Value, StoreError> {
    Ok(match attr {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(b),
        AttributeValue::S(s) => Value::String(s),
        AttributeValue::N(n) => {
            if let Ok(i) = n.parse::<i64>() {
                Value::Number(i.into())
            } else {
                let f: f64 = n
                    .parse()
                    .map_err(|_| StoreError::Request(format!("invalid numeric attribute: {}", n)))?;
                Number::from_f64(f).map(Value::Number).ok_or_else(|| {
                    StoreError::Request(format!("non-finite numeric attribute: {}", n))
                })?
            }
        }
        AttributeValue::L(list) => Value::Array(
            list.into_iter()
                .map(from_attr)
                .collect::<Result<Vec<Value>, StoreError>>()?,
        ),
        AttributeValue::M(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| Ok((k, from_attr(v)?)))
                .collect::<Result<Map<String, Value>, StoreError>>()?,
        ),
        other => {
            return Err(StoreError::Request(format!(
                "unsupported attribute type: {:?}",
                other
            )))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attribute_conversion_round_trips_nested_values() {
        let value = json!({
            "id": "inv-1",
            "total_amount": 210.5,
            "quantity": 2,
            "issued": true,
            "notes": null,
            "items": [{ "description": "Cleaning", "unit_price": 120.0 }],
        });
        let item = match value.clone() {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let attrs = to_attribute_map(item);
        assert_eq!(attrs["id"], AttributeValue::S("inv-1".into()));
        assert_eq!(attrs["quantity"], AttributeValue::N("2".into()));

        let back = from_attribute_map(attrs).unwrap();
        assert_eq!(Value::Object(back), value);
    }
}
