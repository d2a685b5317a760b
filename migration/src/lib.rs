pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20261001_000001_links_and_categories;
mod m20261001_000002_users_and_sessions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_links_and_categories::Migration),
            Box::new(m20261001_000002_users_and_sessions::Migration),
        ]
    }
}
