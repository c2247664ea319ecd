use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "alumni")]
pub struct Model {
    /// Same value as the owning `users.id`.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub graduation_year: Option<i32>,
    pub degree: Option<String>,
    pub major: Option<String>,
    pub current_role: Option<String>,
    pub current_company: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub years_experience: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub linkedin_url: Option<String>,
    pub availability_status: String,
    pub max_requests_per_month: i32,
    pub current_month_requests: i32,
    #[sea_orm(column_type = "Double")]
    pub helpfulness_score: f64,
    pub total_introductions: i32,
    #[sea_orm(column_type = "Double")]
    pub response_rate: f64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Id",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
