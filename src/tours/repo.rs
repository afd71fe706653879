use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Tour record, always bound to the account that created it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tour {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub info: String,
    pub image: String,
    pub price: String, // kept verbatim as sent, no numeric parsing
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Fields persisted for a new tour; id and timestamp are store-assigned.
#[derive(Debug, Clone)]
pub struct NewTour {
    pub user_id: Uuid,
    pub name: String,
    pub info: String,
    pub image: String,
    pub price: String,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct TourPatch {
    pub name: Option<String>,
    pub info: Option<String>,
    pub image: Option<String>,
    pub price: Option<String>,
}

/// Tour storage scoped by owner. Lookups take the owner id alongside the
/// tour id so records of other accounts behave exactly like missing ones.
#[async_trait]
pub trait TourStore: Send + Sync {
    async fn create(&self, tour: NewTour) -> anyhow::Result<Tour>;
    async fn list_by_owner(&self, owner: Uuid) -> anyhow::Result<Vec<Tour>>;
    async fn get_owned(&self, owner: Uuid, id: Uuid) -> anyhow::Result<Option<Tour>>;
    async fn update_owned(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: TourPatch,
    ) -> anyhow::Result<Option<Tour>>;
    async fn delete_owned(&self, owner: Uuid, id: Uuid) -> anyhow::Result<bool>;
}
