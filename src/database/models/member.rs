use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::b64;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Member {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub middlename: String,
    pub gender: String,
    pub emailaddress: String,
    pub phonenumber: String,
    pub dob: NaiveDate,
    #[serde(serialize_with = "b64::serialize")]
    pub profile_picture: Option<Vec<u8>>,
    pub house_address: String,
    pub title_id: i64,
    pub createdby: i64,
    pub createdon: DateTime<Utc>,
    pub modifiedon: Option<DateTime<Utc>>,
    pub modifiedby: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct MemberInput {
    pub firstname: String,
    pub lastname: String,
    pub middlename: String,
    pub gender: String,
    pub emailaddress: String,
    pub phonenumber: String,
    pub dob: NaiveDate,
    #[serde(default, deserialize_with = "b64::deserialize")]
    pub profile_picture: Option<Vec<u8>>,
    pub house_address: String,
    pub title_id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct MemberPatch {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub middlename: Option<String>,
    pub gender: Option<String>,
    pub emailaddress: Option<String>,
    pub phonenumber: Option<String>,
    pub dob: Option<NaiveDate>,
    #[serde(default, deserialize_with = "b64::deserialize")]
    pub profile_picture: Option<Vec<u8>>,
    pub house_address: Option<String>,
    pub title_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MemberListFilter {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub middlename: Option<String>,
    pub gender: Option<String>,
    pub emailaddress: Option<String>,
    pub phonenumber: Option<String>,
}
