use anyhow::Context;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::auth::repo::{Gender, MembershipStatus, NewUser, User, UserStore};
use crate::tours::repo::{NewTour, Tour, TourPatch, TourStore};

pub async fn connect(database_url: &str) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("connect to database")
}

/// Postgres-backed implementation of both stores.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw user row; enums travel as text and are parsed on the way out.
#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    name: String,
    phone_number: String,
    gender: String,
    date_of_birth: Date,
    membership_status: String,
    created_at: OffsetDateTime,
}

impl TryFrom<UserRow> for User {
    type Error = anyhow::Error;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let gender = Gender::parse(&row.gender)
            .with_context(|| format!("unknown gender value {:?}", row.gender))?;
        let membership_status = MembershipStatus::parse(&row.membership_status)
            .with_context(|| format!("unknown membership value {:?}", row.membership_status))?;
        Ok(User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            name: row.name,
            phone_number: row.phone_number,
            gender,
            date_of_birth: row.date_of_birth,
            membership_status,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct TourRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    info: String,
    image: String,
    price: String,
    created_at: OffsetDateTime,
}

impl From<TourRow> for Tour {
    fn from(row: TourRow) -> Self {
        Tour {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            info: row.info,
            image: row.image,
            price: row.price,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create(&self, user: NewUser) -> anyhow::Result<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, email, password_hash, name, phone_number,
                               gender, date_of_birth, membership_status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, email, password_hash, name, phone_number,
                      gender, date_of_birth, membership_status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.phone_number)
        .bind(user.gender.as_str())
        .bind(user.date_of_birth)
        .bind(user.membership_status.as_str())
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, name, phone_number,
                   gender, date_of_birth, membership_status, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, name, phone_number,
                   gender, date_of_birth, membership_status, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(User::try_from).transpose()
    }
}

#[async_trait]
impl TourStore for PgStore {
    async fn create(&self, tour: NewTour) -> anyhow::Result<Tour> {
        let row = sqlx::query_as::<_, TourRow>(
            r#"
            INSERT INTO tours (id, user_id, name, info, image, price)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, name, info, image, price, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(tour.user_id)
        .bind(&tour.name)
        .bind(&tour.info)
        .bind(&tour.image)
        .bind(&tour.price)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn list_by_owner(&self, owner: Uuid) -> anyhow::Result<Vec<Tour>> {
        let rows = sqlx::query_as::<_, TourRow>(
            r#"
            SELECT id, user_id, name, info, image, price, created_at
            FROM tours
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Tour::from).collect())
    }

    async fn get_owned(&self, owner: Uuid, id: Uuid) -> anyhow::Result<Option<Tour>> {
        let row = sqlx::query_as::<_, TourRow>(
            r#"
            SELECT id, user_id, name, info, image, price, created_at
            FROM tours
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Tour::from))
    }

    async fn update_owned(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: TourPatch,
    ) -> anyhow::Result<Option<Tour>> {
        let row = sqlx::query_as::<_, TourRow>(
            r#"
            UPDATE tours
            SET name = COALESCE($3, name),
                info = COALESCE($4, info),
                image = COALESCE($5, image),
                price = COALESCE($6, price)
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, info, image, price, created_at
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(patch.name)
        .bind(patch.info)
        .bind(patch.image)
        .bind(patch.price)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Tour::from))
    }

    async fn delete_owned(&self, owner: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM tours
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
