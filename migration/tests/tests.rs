use licensing_test_context::LicensingContext;
use migration::{Migrator, MigratorTrait};
use test_context::test_context;
use test_log::test;

#[test_context(LicensingContext)]
#[test(tokio::test)]
async fn migrations_refresh(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    // the context already applied all migrations
    let applied = Migrator::get_applied_migrations(&*ctx.db).await?;
    assert_eq!(applied.len(), Migrator::migrations().len());

    ctx.db.refresh().await?;

    let reapplied = Migrator::get_applied_migrations(&*ctx.db).await?;
    assert_eq!(reapplied.len(), Migrator::migrations().len());

    Ok(())
}
