use sea_orm::entity::prelude::*;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "shipments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub reference: String,
    pub user_id: Uuid,
    pub tracking_number: String,
    pub customer_name: String,
    pub destination: String,
    pub request_date: DateTimeWithTimeZone,
    pub estimated_delivery: Option<DateTimeWithTimeZone>,
    pub status: String,
    pub price_details_added: bool,
    pub invoice_generated: bool,
    pub payment_requested: bool,
    pub payment_received: bool,
    pub ready_to_ship: bool,
    pub dispatched: bool,
    pub payment_proof: Option<String>,
    pub details: Value,
    pub price_details: Option<Value>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(has_many = "super::notifications::Entity")]
    Notifications,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::notifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
