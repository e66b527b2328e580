use std::collections::BTreeMap;

use super::SeaOrmStorage;
use crate::entity::settings::{ActiveModel, Column, Entity as Settings};
use crate::errors::{ExamAdminError, Result};
use crate::models::settings::entities::Setting;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder, Set, TransactionTrait};

impl SeaOrmStorage {
    pub async fn list_settings_impl(&self) -> Result<Vec<Setting>> {
        let models = Settings::find()
            .order_by_asc(Column::Key)
            .all(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to list settings", e))?;

        Ok(models.into_iter().map(|m| m.into_setting()).collect())
    }

    pub async fn get_setting_impl(&self, key: &str) -> Result<Option<Setting>> {
        let model = Settings::find_by_id(key.to_string())
            .one(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to query setting", e))?;

        Ok(model.map(|m| m.into_setting()))
    }

    pub async fn upsert_setting_impl(
        &self,
        key: &str,
        value: serde_json::Value,
        updated_by: Option<i64>,
    ) -> Result<Setting> {
        upsert_on(&self.db, key, &value, updated_by).await
    }

    /// 批量写入，任一失败整体回滚
    pub async fn upsert_settings_impl(
        &self,
        values: BTreeMap<String, serde_json::Value>,
        updated_by: Option<i64>,
    ) -> Result<Vec<Setting>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to begin transaction", e))?;

        let mut saved = Vec::with_capacity(values.len());
        for (key, value) in &values {
            saved.push(upsert_on(&txn, key, value, updated_by).await?);
        }

        txn.commit()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to commit settings", e))?;

        Ok(saved)
    }
}

async fn upsert_on<C: ConnectionTrait>(
    conn: &C,
    key: &str,
    value: &serde_json::Value,
    updated_by: Option<i64>,
) -> Result<Setting> {
    let model = ActiveModel {
        key: Set(key.to_string()),
        value: Set(serde_json::to_string(value)?),
        updated_by: Set(updated_by),
        updated_at: Set(chrono::Utc::now().timestamp()),
    };

    Settings::insert(model)
        .on_conflict(
            OnConflict::column(Column::Key)
                .update_columns([Column::Value, Column::UpdatedBy, Column::UpdatedAt])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(|e| ExamAdminError::from_db("Failed to save setting", e))?;

    let saved = Settings::find_by_id(key.to_string())
        .one(conn)
        .await
        .map_err(|e| ExamAdminError::from_db("Failed to reload setting", e))?
        .ok_or_else(|| ExamAdminError::database_operation(format!("Setting {key} missing after save")))?;

    Ok(saved.into_setting())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_upsert_overwrites_any_json() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let seeded = storage.list_settings_impl().await.unwrap().len();

        let first = storage
            .upsert_setting_impl("site.title", json!("Exam Portal"), None)
            .await
            .unwrap();
        assert_eq!(first.value, json!("Exam Portal"));

        let second = storage
            .upsert_setting_impl("site.title", json!({ "en": "Exam Portal", "ml": "പരീക്ഷ" }), Some(1))
            .await
            .unwrap();
        assert_eq!(second.value["en"], "Exam Portal");
        assert_eq!(second.updated_by, Some(1));

        assert_eq!(storage.list_settings_impl().await.unwrap().len(), seeded + 1);
        assert!(storage.get_setting_impl("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_batch_upsert() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .upsert_setting_impl("results.page_size", json!(20), None)
            .await
            .unwrap();

        let mut values = BTreeMap::new();
        values.insert("results.page_size".to_string(), json!(50));
        values.insert("registration.open".to_string(), json!(false));
        let saved = storage.upsert_settings_impl(values, Some(1)).await.unwrap();
        assert_eq!(saved.len(), 2);

        // 迁移预置的默认项同样可以被覆盖
        let page_size = storage.get_setting_impl("results.page_size").await.unwrap().unwrap();
        assert_eq!(page_size.value, json!(50));
        let registration = storage.get_setting_impl("registration.open").await.unwrap().unwrap();
        assert_eq!(registration.value, json!(false));
        assert_eq!(registration.updated_by, Some(1));

        let all = storage.list_settings_impl().await.unwrap();
        let keys: Vec<_> = all.iter().map(|s| s.key.as_str()).collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(keys.iter().filter(|k| **k == "registration.open").count(), 1);
    }
}
