pub mod account_repository_postgres;
pub mod jwt;
pub mod sea_orm_entity;
pub mod security;

pub use account_repository_postgres::AccountRepositoryPostgres;
