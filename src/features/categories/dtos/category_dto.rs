use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::categories::models::Category;

/// Read-only snapshot of a category as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub display_order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            parent_id: c.parent_id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            image_url: c.image_url,
            display_order: c.display_order,
            active: c.active,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::category;

    #[test]
    fn test_serializes_every_field() {
        let model = category("Rings", true);
        let dto = CategoryResponseDto::from(model.clone());
        let value = serde_json::to_value(&dto).unwrap();

        assert_eq!(value["id"], model.id.to_string());
        assert_eq!(value["name"], "Rings");
        assert_eq!(value["slug"], model.slug);
        assert_eq!(value["active"], true);
        assert_eq!(value["display_order"], model.display_order);
        assert!(value["parent_id"].is_null());
        assert!(value.get("created_at").is_some());
        assert!(value.get("updated_at").is_some());
        assert_eq!(value.as_object().unwrap().len(), 10);
    }
}
