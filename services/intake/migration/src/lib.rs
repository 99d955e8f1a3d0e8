use sea_orm_migration::prelude::*;

mod m20261001_000001_create_employees;
mod m20261001_000002_create_visitors;
mod m20261001_000003_create_visits;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_employees::Migration),
            Box::new(m20261001_000002_create_visitors::Migration),
            Box::new(m20261001_000003_create_visits::Migration),
        ]
    }
}
