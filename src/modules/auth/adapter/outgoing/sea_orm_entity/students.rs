use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    /// Same value as the owning `users.id`.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub graduation_year: Option<i32>,
    pub major: Option<String>,
    pub secondary_major: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub career_interests: Json,
    pub current_location: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub linkedin_url: Option<String>,
    pub resume_url: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub reputation_score: f64,
    pub total_requests: i32,
    pub successful_introductions: i32,
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
