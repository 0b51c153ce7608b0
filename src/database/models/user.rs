use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full administrator row, including the password hash. Never serialized to
/// clients; convert to [`UserOut`] first.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub firstname: String,
    pub middlename: String,
    pub lastname: String,
    pub gender: String,
    pub phonenumber: String,
    pub emailaddress: String,
    pub password: String,
    pub disabled: bool,
    pub createdon: DateTime<Utc>,
    pub modifiedon: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct UserInput {
    pub firstname: String,
    pub middlename: String,
    pub lastname: String,
    pub gender: String,
    pub phonenumber: String,
    pub emailaddress: String,
    pub password: String,
    #[serde(default)]
    pub disabled: bool,
}

/// Patch payload: only fields that are present and non-empty overwrite the
/// stored row.
#[derive(Debug, Default, Deserialize)]
pub struct UserPatch {
    pub firstname: Option<String>,
    pub middlename: Option<String>,
    pub lastname: Option<String>,
    pub gender: Option<String>,
    pub phonenumber: Option<String>,
    pub emailaddress: Option<String>,
    pub disabled: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserListFilter {
    pub firstname: Option<String>,
    pub middlename: Option<String>,
    pub lastname: Option<String>,
    pub gender: Option<String>,
    pub emailaddress: Option<String>,
    pub phonenumber: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserOut {
    pub id: i64,
    pub firstname: String,
    pub middlename: String,
    pub lastname: String,
    pub gender: String,
    pub phonenumber: String,
    pub emailaddress: String,
    pub disabled: bool,
    pub createdon: DateTime<Utc>,
    pub modifiedon: Option<DateTime<Utc>>,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname,
            middlename: user.middlename,
            lastname: user.lastname,
            gender: user.gender,
            phonenumber: user.phonenumber,
            emailaddress: user.emailaddress,
            disabled: user.disabled,
            createdon: user.createdon,
            modifiedon: user.modifiedon,
        }
    }
}
