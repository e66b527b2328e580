use super::SeaOrmStorage;
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{ExamAdminError, Result};
use crate::models::subjects::entities::Subject;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn list_subjects_impl(&self) -> Result<Vec<Subject>> {
        let models = Subjects::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to list subjects", e))?;

        Ok(models.into_iter().map(|m| m.into_subject()).collect())
    }

    pub async fn get_subject_impl(&self, id: i64) -> Result<Option<Subject>> {
        let model = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to query subject", e))?;

        Ok(model.map(|m| m.into_subject()))
    }

    pub async fn create_subject_impl(
        &self,
        name: &str,
        code: Option<String>,
        description: Option<String>,
    ) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            name: Set(name.to_string()),
            code: Set(code),
            description: Set(description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to create subject", e))?;

        Ok(result.into_subject())
    }

    pub async fn update_subject_impl(
        &self,
        id: i64,
        name: Option<String>,
        code: Option<String>,
        description: Option<String>,
    ) -> Result<Option<Subject>> {
        let Some(existing) = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to query subject", e))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(name) = name {
            model.name = Set(name);
        }
        if let Some(code) = code {
            model.code = Set(Some(code));
        }
        if let Some(description) = description {
            model.description = Set(Some(description));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to update subject", e))?;

        Ok(Some(result.into_subject()))
    }

    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to delete subject", e))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_subject_impl("Physics", Some("PHY".into()), None)
            .await
            .unwrap();

        let err = storage
            .create_subject_impl("Physics", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ExamAdminError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_partial_update_and_delete() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let chemistry = storage
            .create_subject_impl("Chemistry", Some("CHE".into()), Some("Inorganic and organic".into()))
            .await
            .unwrap();
        storage.create_subject_impl("Biology", None, None).await.unwrap();

        let updated = storage
            .update_subject_impl(chemistry.id, None, Some("CHEM".into()), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Chemistry");
        assert_eq!(updated.code.as_deref(), Some("CHEM"));
        assert_eq!(updated.description.as_deref(), Some("Inorganic and organic"));

        let err = storage
            .update_subject_impl(chemistry.id, Some("Biology".into()), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ExamAdminError::Conflict(_)));

        let names: Vec<_> = storage
            .list_subjects_impl()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Biology", "Chemistry"]);

        assert!(storage.delete_subject_impl(chemistry.id).await.unwrap());
        assert!(storage.update_subject_impl(chemistry.id, None, None, None).await.unwrap().is_none());
    }
}
