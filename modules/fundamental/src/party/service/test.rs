use super::PartyService;
use crate::{
    common::{address::AddressInput, StatusFilter},
    party::{
        model::{PartyCreate, PartyUpdate},
        PartyKind,
    },
    Error,
};
use licensing_common::{db::query::Query, model::Paginated};
use licensing_entity::{address, licensee, licensor, status::Status};
use licensing_test_context::LicensingContext;
use sea_orm::{EntityTrait, PaginatorTrait};
use test_context::test_context;
use test_log::test;

fn licensor(first_name: &str, mobile: &str) -> PartyCreate {
    PartyCreate {
        first_name: first_name.into(),
        last_name: "Licensor".into(),
        mobile: mobile.into(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        ..Default::default()
    }
}

fn licensee(first_name: &str, mobile: &str) -> PartyCreate {
    PartyCreate {
        first_name: first_name.into(),
        last_name: "Licensee".into(),
        organization_name: Some("ACME".into()),
        mobile: mobile.into(),
        email: format!("{}@example.org", first_name.to_lowercase()),
        ..Default::default()
    }
}

fn full_address() -> AddressInput {
    AddressInput {
        line1: Some("1 Main Street".into()),
        line2: None,
        city_or_village: Some("Springfield".into()),
        state: Some("IL".into()),
        country: Some("USA".into()),
        zip_code: Some(62701),
    }
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn create_with_address(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let service = PartyService::new(ctx.db.clone());

    let created = service
        .create_party(
            PartyKind::Licensor,
            PartyCreate {
                address: Some(full_address()),
                ..licensor("Alice", "+14155550101")
            },
        )
        .await?;

    assert_eq!(created.full_name, "Alice Licensor");
    assert_eq!(created.status, Status::Active);

    let address = created.address.expect("must have an address");
    assert_eq!(address.city_or_village, "Springfield");
    assert_eq!(address.zip_code, 62701);
    assert_eq!(address::Entity::find().count(&ctx.db).await?, 1);

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn incomplete_address_is_skipped(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let service = PartyService::new(ctx.db.clone());

    let created = service
        .create_party(
            PartyKind::Licensor,
            PartyCreate {
                address: Some(AddressInput {
                    country: Some("   ".into()),
                    ..full_address()
                }),
                ..licensor("Bob", "+14155550102")
            },
        )
        .await?;

    assert_eq!(created.address, None);
    assert_eq!(address::Entity::find().count(&ctx.db).await?, 0);

    // still nothing to link on update
    let updated = service
        .update_party(
            PartyKind::Licensor,
            created.id,
            PartyUpdate {
                address: Some(AddressInput {
                    zip_code: Some(62702),
                    ..Default::default()
                }),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.address, None);
    assert_eq!(address::Entity::find().count(&ctx.db).await?, 0);

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn update_keeps_address(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let service = PartyService::new(ctx.db.clone());

    let created = service
        .create_party(
            PartyKind::Licensor,
            PartyCreate {
                address: Some(full_address()),
                ..licensor("Carol", "+14155550103")
            },
        )
        .await?;
    let address_id = created.address.as_ref().map(|a| a.id);

    let updated = service
        .update_party(
            PartyKind::Licensor,
            created.id,
            PartyUpdate {
                designation: Some("CTO".into()),
                address: Some(AddressInput {
                    city_or_village: Some("Shelbyville".into()),
                    ..full_address()
                }),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.first_name, "Carol");
    assert_eq!(updated.designation.as_deref(), Some("CTO"));
    assert_eq!(updated.address.as_ref().map(|a| a.id), address_id);
    assert_eq!(
        updated.address.map(|a| a.city_or_village).as_deref(),
        Some("Shelbyville")
    );
    assert_eq!(address::Entity::find().count(&ctx.db).await?, 1);

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn update_zip_code_only(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let service = PartyService::new(ctx.db.clone());

    let created = service
        .create_party(
            PartyKind::Licensor,
            PartyCreate {
                address: Some(full_address()),
                ..licensor("Carl", "+14155550113")
            },
        )
        .await?;
    let before = created.address.expect("must have an address");

    let updated = service
        .update_party(
            PartyKind::Licensor,
            created.id,
            PartyUpdate {
                address: Some(AddressInput {
                    zip_code: Some(62704),
                    ..Default::default()
                }),
                ..Default::default()
            },
        )
        .await?;

    let after = updated.address.expect("must still have an address");
    assert_eq!(after.id, before.id);
    assert_eq!(after.zip_code, 62704);
    assert_eq!(after.line1.as_deref(), Some("1 Main Street"));
    assert_eq!(after.city_or_village, "Springfield");
    assert_eq!(address::Entity::find().count(&ctx.db).await?, 1);

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn update_without_line1_keeps_it(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let service = PartyService::new(ctx.db.clone());

    let created = service
        .create_party(
            PartyKind::Licensor,
            PartyCreate {
                address: Some(AddressInput {
                    line2: Some("Suite 5".into()),
                    ..full_address()
                }),
                ..licensor("Cleo", "+14155550114")
            },
        )
        .await?;

    let updated = service
        .update_party(
            PartyKind::Licensor,
            created.id,
            PartyUpdate {
                address: Some(AddressInput {
                    line1: None,
                    line2: None,
                    city_or_village: Some("Capital City".into()),
                    ..full_address()
                }),
                ..Default::default()
            },
        )
        .await?;

    let address = updated.address.expect("must still have an address");
    assert_eq!(address.line1.as_deref(), Some("1 Main Street"));
    assert_eq!(address.line2.as_deref(), Some("Suite 5"));
    assert_eq!(address.city_or_village, "Capital City");

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn update_links_new_address(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let service = PartyService::new(ctx.db.clone());

    let created = service
        .create_party(PartyKind::Licensor, licensor("Dave", "+14155550104"))
        .await?;
    assert_eq!(created.address, None);

    let updated = service
        .update_party(
            PartyKind::Licensor,
            created.id,
            PartyUpdate {
                address: Some(full_address()),
                ..Default::default()
            },
        )
        .await?;

    assert!(updated.address.is_some());

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn duplicate_mobile(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let service = PartyService::new(ctx.db.clone());

    service
        .create_party(PartyKind::Licensor, licensor("Erin", "+14155550105"))
        .await?;

    let result = service
        .create_party(
            PartyKind::Licensor,
            PartyCreate {
                address: Some(full_address()),
                ..licensor("Frank", "+14155550105")
            },
        )
        .await;

    let Err(Error::Uniqueness(errors)) = result else {
        panic!("must fail with a uniqueness error: {result:?}");
    };
    assert_eq!(
        errors.get("mobile"),
        ["licensor with this mobile already exists."]
    );

    // nothing was written, not even the address
    assert_eq!(licensor::Entity::find().count(&ctx.db).await?, 1);
    assert_eq!(address::Entity::find().count(&ctx.db).await?, 0);

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn same_mobile_for_both_kinds(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let service = PartyService::new(ctx.db.clone());

    service
        .create_party(PartyKind::Licensor, licensor("Quinn", "+14155550120"))
        .await?;
    service
        .create_party(PartyKind::Licensee, licensee("Quinn", "+14155550120"))
        .await?;

    assert_eq!(service.count(PartyKind::Licensor).await?, 1);
    assert_eq!(service.count(PartyKind::Licensee).await?, 1);
    assert_eq!(licensee::Entity::find().count(&ctx.db).await?, 1);

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn update_to_taken_email(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let service = PartyService::new(ctx.db.clone());

    service
        .create_party(PartyKind::Licensor, licensor("Gina", "+14155550106"))
        .await?;
    let other = service
        .create_party(PartyKind::Licensor, licensor("Hank", "+14155550107"))
        .await?;

    // keeping its own email is fine
    service
        .update_party(
            PartyKind::Licensor,
            other.id,
            PartyUpdate {
                email: Some("hank@example.com".into()),
                ..Default::default()
            },
        )
        .await?;

    let result = service
        .update_party(
            PartyKind::Licensor,
            other.id,
            PartyUpdate {
                email: Some("gina@example.com".into()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(Error::Uniqueness(_))), "{result:?}");

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn soft_delete(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let service = PartyService::new(ctx.db.clone());
    let kind = PartyKind::Licensor;

    let kept = service
        .create_party(kind, licensor("Ivan", "+14155550108"))
        .await?;
    let deleted = service
        .create_party(kind, licensor("Judy", "+14155550109"))
        .await?;

    service.delete_party(kind, deleted.id).await?;

    let all = service
        .fetch_parties(
            kind,
            Query::default(),
            Paginated::default(),
            StatusFilter::default(),
        )
        .await?;
    assert_eq!(all.total, 1);
    assert_eq!(all.items[0].id, kept.id);

    assert!(matches!(
        service.fetch_party(kind, deleted.id).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        service.delete_party(kind, deleted.id).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        service
            .update_party(kind, deleted.id, PartyUpdate::default())
            .await,
        Err(Error::NotFound(_))
    ));

    // the row is still there, holding on to its mobile number
    let row = licensor::Entity::find_by_id(deleted.id).one(&ctx.db).await?;
    assert_eq!(row.map(|row| row.status), Some(Status::Delete));
    assert!(matches!(
        service
            .create_party(kind, licensor("Judith", "+14155550109"))
            .await,
        Err(Error::Uniqueness(_))
    ));

    assert_eq!(service.count(kind).await?, 1);

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn search_filter_and_sort(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let service = PartyService::new(ctx.db.clone());
    let kind = PartyKind::Licensor;

    service
        .create_party(kind, licensor("Mallory", "+14155550110"))
        .await?;
    service
        .create_party(
            kind,
            PartyCreate {
                status: Status::Inactive,
                ..licensor("Niaj", "+14155550111")
            },
        )
        .await?;
    service
        .create_party(kind, licensor("Oscar", "+14155550112"))
        .await?;

    let found = service
        .fetch_parties(
            kind,
            Query::q("NIAJ"),
            Paginated::default(),
            StatusFilter::default(),
        )
        .await?;
    assert_eq!(found.total, 1);
    assert_eq!(found.items[0].first_name, "Niaj");

    let found = service
        .fetch_parties(
            kind,
            Query::default(),
            Paginated::default(),
            StatusFilter {
                status: Some(Status::Active),
            },
        )
        .await?;
    assert_eq!(found.total, 2);

    let found = service
        .fetch_parties(
            kind,
            Query::sort("first_name:desc"),
            Paginated {
                offset: 0,
                limit: 2,
            },
            StatusFilter::default(),
        )
        .await?;
    assert_eq!(found.total, 3);
    assert_eq!(
        found
            .items
            .iter()
            .map(|item| item.first_name.as_str())
            .collect::<Vec<_>>(),
        ["Oscar", "Niaj"]
    );

    assert!(matches!(
        service
            .fetch_parties(
                kind,
                Query::sort("mobile"),
                Paginated::default(),
                StatusFilter::default()
            )
            .await,
        Err(Error::Query(_))
    ));

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn licensee_lifecycle(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let service = PartyService::new(ctx.db.clone());
    let kind = PartyKind::Licensee;

    let created = service
        .create_party(
            kind,
            PartyCreate {
                address: Some(AddressInput {
                    city_or_village: Some("Lyon".into()),
                    state: Some("Rhone".into()),
                    country: Some("France".into()),
                    zip_code: Some(69001),
                    ..Default::default()
                }),
                ..licensee("Peggy", "+33612345678")
            },
        )
        .await?;
    assert_eq!(created.organization_name.as_deref(), Some("ACME"));
    let address_id = created.address.as_ref().map(|a| a.id);
    assert!(address_id.is_some());

    // a partial address updates the linked one
    let updated = service
        .update_party(
            kind,
            created.id,
            PartyUpdate {
                status: Some(Status::Inactive),
                organization_name: Some(" ".into()),
                address: Some(AddressInput {
                    city_or_village: Some("Paris".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.status, Status::Inactive);
    assert_eq!(updated.organization_name, None);
    let address = updated.address.expect("must still have an address");
    assert_eq!(Some(address.id), address_id);
    assert_eq!(address.city_or_village, "Paris");
    assert_eq!(address.zip_code, 69001);

    service.delete_party(kind, created.id).await?;

    let all = service
        .fetch_parties(
            kind,
            Query::default(),
            Paginated::default(),
            StatusFilter::default(),
        )
        .await?;
    assert_eq!(all.total, 0);
    assert_eq!(service.count(kind).await?, 0);

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn duplicate_email(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let service = PartyService::new(ctx.db.clone());

    service
        .create_party(PartyKind::Licensee, licensee("Rupert", "+14155550201"))
        .await?;

    let result = service
        .create_party(
            PartyKind::Licensee,
            PartyCreate {
                email: "rupert@example.org".into(),
                ..licensee("Sybil", "+14155550202")
            },
        )
        .await;

    let Err(Error::Uniqueness(errors)) = result else {
        panic!("must fail with a uniqueness error: {result:?}");
    };
    assert_eq!(errors.get("email"), ["licensee with this email already exists."]);
    assert!(errors.get("mobile").is_empty());

    Ok(())
}

#[test_context(LicensingContext)]
#[test(actix_web::test)]
async fn invalid_mobile(ctx: &LicensingContext) -> Result<(), anyhow::Error> {
    let service = PartyService::new(ctx.db.clone());

    let result = service
        .create_party(PartyKind::Licensee, licensee("Trent", "555-0100"))
        .await;

    let Err(Error::Validation(errors)) = result else {
        panic!("must fail with a validation error: {result:?}");
    };
    assert_eq!(
        errors.get("mobile"),
        [licensing_common::validation::MOBILE_MESSAGE]
    );

    Ok(())
}
