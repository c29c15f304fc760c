use super::SoftwareService;
use crate::{
    common::StatusFilter,
    software::model::{SoftwareCreate, SoftwareUpdate},
    Error,
};
use bytes::Bytes;
use futures::{stream, TryStreamExt};
use licensing_common::{db::query::Query, model::Paginated};
use licensing_entity::status::Status;
use licensing_module_storage::service::{StorageBackend, StorageKey};
use licensing_test_context::LicensingContext;
use std::convert::Infallible;
use test_context::test_context;
use test_log::test;

fn software(name: &str) -> SoftwareCreate {
    SoftwareCreate {
        name: name.into(),
        specification: Some("Runs on anything".into()),
        ..Default::default()
    }
}

fn body(content: &'static str) -> impl futures::Stream<Item = Result<Bytes, Infallible>> {
    stream::iter([Ok(Bytes::from_static(content.as_bytes()))])
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn create_update_delete(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let service = SoftwareService::new(ctx.db.clone(), ctx.storage.clone());

    let created = service.create_software(software("Editor")).await?;
    assert_eq!(created.name, "Editor");
    assert_eq!(created.status, Status::Active);

    let updated = service
        .update_software(
            created.id,
            SoftwareUpdate {
                indemnity: Some("Patent pending".into()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.name, "Editor");
    assert_eq!(updated.indemnity.as_deref(), Some("Patent pending"));

    // nothing to change
    let same = service
        .update_software(created.id, SoftwareUpdate::default())
        .await?;
    assert_eq!(same, updated);

    service.delete_software(created.id).await?;
    assert!(matches!(
        service.fetch_software(created.id).await,
        Err(Error::NotFound(_))
    ));
    assert_eq!(service.count().await?, 0);

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn name_is_required(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let service = SoftwareService::new(ctx.db.clone(), ctx.storage.clone());

    let result = service.create_software(software("   ")).await;
    let Err(Error::Validation(errors)) = result else {
        panic!("must fail validation: {result:?}");
    };
    assert_eq!(errors.get("name"), ["This field may not be blank."]);

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn search_and_sort(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let service = SoftwareService::new(ctx.db.clone(), ctx.storage.clone());

    for name in ["Compiler", "Debugger", "Code Browser"] {
        service.create_software(software(name)).await?;
    }

    let found = service
        .fetch_softwares(Query::q("co"), Paginated::default(), StatusFilter::default())
        .await?;
    assert_eq!(found.total, 2);

    let found = service
        .fetch_softwares(
            Query::sort("name:desc"),
            Paginated::default(),
            StatusFilter::default(),
        )
        .await?;
    assert_eq!(
        found
            .items
            .iter()
            .map(|item| item.name.as_str())
            .collect::<Vec<_>>(),
        ["Debugger", "Compiler", "Code Browser"]
    );

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn user_guide(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let service = SoftwareService::new(ctx.db.clone(), ctx.storage.clone());
    let created = service.create_software(software("Spreadsheet")).await?;

    assert!(matches!(
        service.download_user_guide(created.id).await,
        Err(Error::NotFound(_))
    ));

    let first = service
        .upload_user_guide(created.id, "guide.pdf", body("version one"))
        .await?;
    let first_path = first.user_guide_document.clone().expect("must be stored");
    assert!(first_path.starts_with("user_guide_docs/"), "{first_path}");
    assert!(first_path.ends_with("-guide.pdf"), "{first_path}");

    let second = service
        .upload_user_guide(created.id, "../guide.pdf", body("version two"))
        .await?;
    assert_ne!(second.user_guide_document, first.user_guide_document);

    let (filename, content) = service.download_user_guide(created.id).await?;
    assert_eq!(filename, "guide.pdf");
    let content: Vec<Bytes> = content.try_collect().await?;
    assert_eq!(content.concat(), b"version two");

    // the replaced document is gone
    assert!(ctx
        .storage
        .retrieve(&StorageKey(first_path))
        .await?
        .is_none());

    Ok(())
}
