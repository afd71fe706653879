use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Wire format for `date_of_birth` values.
pub const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Serde adapter keeping dates in `YYYY-MM-DD` form on the wire.
pub mod date_format {
    use serde::{de::Error as _, ser::Error as _, Deserialize, Deserializer, Serializer};
    use time::Date;

    use super::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = date.format(&DATE_FORMAT).map_err(S::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Date::parse(&raw, DATE_FORMAT).map_err(D::Error::custom)
    }
}

/// Gender values accepted at signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

/// Membership tier; new accounts start on `standard`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    #[default]
    Standard,
    Premium,
}

impl MembershipStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "standard" => Some(Self::Standard),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Premium => "premium",
        }
    }
}

/// User record held by the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String, // stored trimmed and lowercased
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub phone_number: String,
    pub gender: Gender,
    #[serde(with = "date_format")]
    pub date_of_birth: Date,
    pub membership_status: MembershipStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Fields persisted for a new user; id and timestamp are store-assigned.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub phone_number: String,
    pub gender: Gender,
    pub date_of_birth: Date,
    pub membership_status: MembershipStatus,
}

/// Directory of user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: NewUser) -> anyhow::Result<User>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn gender_parses_known_values_only() {
        assert_eq!(Gender::parse("male"), Some(Gender::Male));
        assert_eq!(Gender::parse("female"), Some(Gender::Female));
        assert_eq!(Gender::parse("other"), Some(Gender::Other));
        assert_eq!(Gender::parse("Female"), None);
        assert_eq!(Gender::parse(""), None);
    }

    #[test]
    fn membership_defaults_to_standard() {
        assert_eq!(MembershipStatus::default(), MembershipStatus::Standard);
        assert_eq!(
            MembershipStatus::parse("premium"),
            Some(MembershipStatus::Premium)
        );
        assert_eq!(MembershipStatus::parse("gold"), None);
    }

    #[test]
    fn user_json_hides_password_hash_and_formats_dates() {
        let user = User {
            id: Uuid::new_v4(),
            email: "ada@example.com".into(),
            password_hash: "secret-hash".into(),
            name: "Ada".into(),
            phone_number: "0123456789".into(),
            gender: Gender::Female,
            date_of_birth: date!(1990 - 01 - 05),
            membership_status: MembershipStatus::Standard,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };

        let value = serde_json::to_value(&user).expect("serialize user");
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["date_of_birth"], "1990-01-05");
        assert_eq!(value["membership_status"], "standard");
        assert_eq!(value["created_at"], "1970-01-01T00:00:00Z");
    }
}
