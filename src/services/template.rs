//! Template service boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ServiceResult;
use crate::template::Template;

/// Payload for creating a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub natural_language_template: String,
    pub sql_template: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default)]
    pub is_public: bool,
}

/// Partial update of a template; unset fields are left as stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natural_language_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

/// Trait for the template store.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn list_templates(&self, limit: u32) -> ServiceResult<Vec<Template>>;

    async fn create_template(&self, template: &NewTemplate) -> ServiceResult<Template>;

    async fn update_template(&self, id: i64, update: &TemplateUpdate) -> ServiceResult<Template>;

    async fn delete_template(&self, id: i64) -> ServiceResult<()>;
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::services::ServiceError;

    #[derive(Default)]
    struct MemoryStore {
        templates: Mutex<Vec<Template>>,
    }

    #[async_trait]
    impl TemplateStore for MemoryStore {
        async fn list_templates(&self, limit: u32) -> ServiceResult<Vec<Template>> {
            let templates = self.templates.lock().map_err(poisoned)?;
            Ok(templates.iter().take(limit as usize).cloned().collect())
        }

        async fn create_template(&self, template: &NewTemplate) -> ServiceResult<Template> {
            let mut templates = self.templates.lock().map_err(poisoned)?;
            let created = Template {
                id: templates.len() as i64 + 1,
                name: template.name.clone(),
                description: Some(template.description.clone()),
                category: Some(template.category.clone()),
                natural_language_template: template.natural_language_template.clone(),
                sql_template: template.sql_template.clone(),
                parameters: template.parameters.clone(),
                is_public: template.is_public,
            };
            templates.push(created.clone());
            Ok(created)
        }

        async fn update_template(
            &self,
            id: i64,
            update: &TemplateUpdate,
        ) -> ServiceResult<Template> {
            let mut templates = self.templates.lock().map_err(poisoned)?;
            let template = templates
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| ServiceError::Status {
                    status: 404,
                    message: format!("template {id} not found"),
                })?;
            if let Some(name) = &update.name {
                template.name = name.clone();
            }
            if let Some(sql_template) = &update.sql_template {
                template.sql_template = sql_template.clone();
            }
            if let Some(parameters) = &update.parameters {
                template.parameters = parameters.clone();
            }
            Ok(template.clone())
        }

        async fn delete_template(&self, id: i64) -> ServiceResult<()> {
            let mut templates = self.templates.lock().map_err(poisoned)?;
            templates.retain(|t| t.id != id);
            Ok(())
        }
    }

    fn poisoned<T>(_: std::sync::PoisonError<T>) -> ServiceError {
        ServiceError::Transport("store lock poisoned".to_string())
    }

    #[tokio::test]
    async fn test_store_round_trip() {
        let store = MemoryStore::default();
        let created = store
            .create_template(&NewTemplate {
                name: "近7天GMV".to_string(),
                natural_language_template: "近{{start_days}}天GMV".to_string(),
                sql_template: "SELECT SUM(gmv) FROM orders WHERE d >= {{start_days}}".to_string(),
                parameters: serde_json::from_value(serde_json::json!({
                    "start_days": {"type": "number", "value": 7}
                }))
                .unwrap(),
                ..NewTemplate::default()
            })
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        let updated = store
            .update_template(
                1,
                &TemplateUpdate {
                    name: Some("近N天GMV".to_string()),
                    ..TemplateUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "近N天GMV");
        // Unset fields keep their stored values.
        assert_eq!(updated.sql_template, created.sql_template);

        assert_eq!(store.list_templates(50).await.unwrap().len(), 1);
        store.delete_template(1).await.unwrap();
        assert!(store.list_templates(50).await.unwrap().is_empty());

        let missing = store.update_template(9, &TemplateUpdate::default()).await;
        assert!(matches!(missing, Err(ServiceError::Status { status: 404, .. })));
    }
}
