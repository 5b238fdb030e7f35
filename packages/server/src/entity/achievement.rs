use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "achievement")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub usn: String, // student identifier, not unique
    pub event_type: String,
    pub level: String,
    pub year: i32,
    pub prize: Option<String>,
}

impl ActiveModelBehavior for ActiveModel {}
