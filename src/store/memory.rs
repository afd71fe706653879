use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::repo::{NewUser, User, UserStore};
use crate::tours::repo::{NewTour, Tour, TourPatch, TourStore};

/// In-process store keeping records in insertion order. Backs the test
/// suite and local runs without a database.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    tours: RwLock<Vec<Tour>>,
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: NewUser) -> anyhow::Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            phone_number: user.phone_number,
            gender: user.gender,
            date_of_birth: user.date_of_birth,
            membership_status: user.membership_status,
            created_at: OffsetDateTime::now_utc(),
        };
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl TourStore for MemoryStore {
    async fn create(&self, tour: NewTour) -> anyhow::Result<Tour> {
        let tour = Tour {
            id: Uuid::new_v4(),
            user_id: tour.user_id,
            name: tour.name,
            info: tour.info,
            image: tour.image,
            price: tour.price,
            created_at: OffsetDateTime::now_utc(),
        };
        self.tours.write().await.push(tour.clone());
        Ok(tour)
    }

    async fn list_by_owner(&self, owner: Uuid) -> anyhow::Result<Vec<Tour>> {
        let tours = self.tours.read().await;
        Ok(tours
            .iter()
            .filter(|t| t.user_id == owner)
            .cloned()
            .collect())
    }

    async fn get_owned(&self, owner: Uuid, id: Uuid) -> anyhow::Result<Option<Tour>> {
        let tours = self.tours.read().await;
        Ok(tours
            .iter()
            .find(|t| t.user_id == owner && t.id == id)
            .cloned())
    }

    async fn update_owned(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: TourPatch,
    ) -> anyhow::Result<Option<Tour>> {
        let mut tours = self.tours.write().await;
        let Some(tour) = tours.iter_mut().find(|t| t.user_id == owner && t.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            tour.name = name;
        }
        if let Some(info) = patch.info {
            tour.info = info;
        }
        if let Some(image) = patch.image {
            tour.image = image;
        }
        if let Some(price) = patch.price {
            tour.price = price;
        }
        Ok(Some(tour.clone()))
    }

    async fn delete_owned(&self, owner: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let mut tours = self.tours.write().await;
        let before = tours.len();
        tours.retain(|t| !(t.user_id == owner && t.id == id));
        Ok(tours.len() < before)
    }
}
