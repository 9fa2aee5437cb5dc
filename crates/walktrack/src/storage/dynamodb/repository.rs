//! DynamoDB repository implementation.
//!
//! Implements the repository traits from `walktrack_core::storage` using DynamoDB.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use uuid::Uuid;

use walktrack_core::records::{KeyKind, RecordId, UserRecord, WalkRecord};
use walktrack_core::storage::{Result, StorageBackend, UserRepository, WalkRepository};

use super::conversions::{
    item_to_user, item_to_walk, user_to_item, walk_to_item, ENTITY_TYPE_USER,
};
use super::error::{
    is_delete_condition_failure, is_put_condition_failure, map_delete_item_error,
    map_get_item_error, map_put_item_error, map_query_error, map_scan_error,
};
use super::keys;

type Item = HashMap<String, AttributeValue>;

/// DynamoDB-based repository implementation.
///
/// Issues opaque keys: a random 32-character hex token per created record.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new repository from environment configuration.
    ///
    /// Uses AWS SDK default credential chain. `endpoint_url` points the client
    /// at a local emulator instead of AWS.
    pub async fn from_env(table_name: &str, endpoint_url: Option<&str>) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(endpoint) = endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let config = loader.load().await;

        Ok(Self::new(Client::new(&config), table_name))
    }

    fn new_key() -> String {
        Uuid::new_v4().simple().to_string()
    }

    async fn get_item(&self, pk: String, sk: String) -> Result<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(pk))
            .key("SK", AttributeValue::S(sk))
            .send()
            .await
            .map_err(map_get_item_error)?;

        Ok(result.item)
    }

    /// Writes `item` only if nothing is stored under its key yet.
    async fn insert_item(&self, item: Item, entity_type: &'static str, id: &str) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(PK)")
            .send()
            .await
            .map_err(|e| map_put_item_error(e, entity_type, id))?;

        Ok(())
    }

    /// Replaces `item` only if something is already stored under its key.
    async fn replace_item(&self, item: Item, entity_type: &'static str, id: &str) -> Result<bool> {
        match self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_exists(PK)")
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if is_put_condition_failure(&e) => Ok(false),
            Err(e) => Err(map_put_item_error(e, entity_type, id)),
        }
    }

    /// Deletes the item under `pk`/`sk`, reporting whether it existed.
    async fn remove_item(&self, pk: String, sk: String) -> Result<bool> {
        match self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(pk))
            .key("SK", AttributeValue::S(sk))
            .condition_expression("attribute_exists(PK)")
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if is_delete_condition_failure(&e) => Ok(false),
            Err(e) => Err(map_delete_item_error(e)),
        }
    }
}

impl StorageBackend for DynamoDbRepository {
    fn name(&self) -> &'static str {
        "dynamodb"
    }

    fn key_kind(&self) -> KeyKind {
        KeyKind::Opaque
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for DynamoDbRepository {
    async fn create_user(&self, user: &mut UserRecord) -> Result<RecordId> {
        let key = Self::new_key();
        self.insert_item(user_to_item(&key, user), "User", &key)
            .await?;

        let id = RecordId::Opaque(key);
        user.id = Some(id.clone());
        Ok(id)
    }

    async fn get_user(&self, id: &RecordId) -> Result<Option<UserRecord>> {
        let Some(key) = id.as_opaque() else {
            return Ok(None);
        };

        match self.get_item(keys::user_pk(key), keys::user_sk(key)).await? {
            Some(item) => Ok(Some(item_to_user(&item)?)),
            None => Ok(None),
        }
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        let mut users = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let result = self
                .client
                .scan()
                .table_name(&self.table_name)
                .filter_expression("entityType = :entity_type")
                .expression_attribute_values(
                    ":entity_type",
                    AttributeValue::S(ENTITY_TYPE_USER.to_string()),
                )
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(map_scan_error)?;

            for item in result.items.unwrap_or_default() {
                users.push(item_to_user(&item)?);
            }

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(users)
    }

    async fn update_user(&self, id: &RecordId, user: &UserRecord) -> Result<bool> {
        let Some(key) = id.as_opaque() else {
            return Ok(false);
        };

        self.replace_item(user_to_item(key, user), "User", key)
            .await
    }

    async fn delete_user(&self, id: &RecordId) -> Result<bool> {
        let Some(key) = id.as_opaque() else {
            return Ok(false);
        };

        self.remove_item(keys::user_pk(key), keys::user_sk(key))
            .await
    }
}

// ============================================================================
// WalkRepository implementation
// ============================================================================

#[async_trait]
impl WalkRepository for DynamoDbRepository {
    async fn create_walk(&self, walk: &mut WalkRecord) -> Result<RecordId> {
        let key = Self::new_key();
        self.insert_item(walk_to_item(&key, walk), "Walk", &key)
            .await?;

        let id = RecordId::Opaque(key);
        walk.id = Some(id.clone());
        Ok(id)
    }

    async fn get_walk(&self, id: &RecordId) -> Result<Option<WalkRecord>> {
        let Some(key) = id.as_opaque() else {
            return Ok(None);
        };

        match self.get_item(keys::walk_pk(key), keys::walk_sk(key)).await? {
            Some(item) => Ok(Some(item_to_walk(&item)?)),
            None => Ok(None),
        }
    }

    async fn list_walks_by_user(&self, user_id: &str) -> Result<Vec<WalkRecord>> {
        let mut walks = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let result = self
                .client
                .query()
                .table_name(&self.table_name)
                .index_name(keys::GSI1)
                .key_condition_expression("GSI1PK = :pk AND begins_with(GSI1SK, :prefix)")
                .expression_attribute_values(":pk", AttributeValue::S(keys::walk_gsi1_pk(user_id)))
                .expression_attribute_values(
                    ":prefix",
                    AttributeValue::S(keys::WALK_PREFIX.to_string()),
                )
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(map_query_error)?;

            for item in result.items.unwrap_or_default() {
                walks.push(item_to_walk(&item)?);
            }

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(walks)
    }

    async fn update_walk(&self, id: &RecordId, walk: &WalkRecord) -> Result<bool> {
        let Some(key) = id.as_opaque() else {
            return Ok(false);
        };

        self.replace_item(walk_to_item(key, walk), "Walk", key)
            .await
    }

    async fn delete_walk(&self, id: &RecordId) -> Result<bool> {
        let Some(key) = id.as_opaque() else {
            return Ok(false);
        };

        self.remove_item(keys::walk_pk(key), keys::walk_sk(key))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keys_are_unique_hex_tokens() {
        let a = DynamoDbRepository::new_key();
        let b = DynamoDbRepository::new_key();

        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
