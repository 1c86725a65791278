//! Tests for the catalogue service.

use std::sync::Arc;

use chrono::Utc;

use super::*;
use crate::domain::ports::{MockProductRepository, MockUserRepository};
use crate::domain::{ErrorCode, FieldPatch};

fn sample_draft(author_id: UserId) -> NewProduct {
    NewProduct::try_new(
        "Kopi Kita",
        "Single-origin coffee",
        "https://kopikita.example.com",
        vec!["coffee".to_owned(), "drinks".to_owned()],
        Some("Kuala Lumpur".to_owned()),
        None,
        author_id,
    )
    .expect("valid draft")
}

fn stored_product(id: ProductId, draft: &NewProduct) -> Product {
    Product {
        id,
        title: draft.title().to_owned(),
        description: draft.description().to_owned(),
        url: draft.url().to_owned(),
        tags: draft.tags().to_vec(),
        location: draft.location().map(str::to_owned),
        is_made_in_my: draft.is_made_in_my(),
        created_at: Utc::now(),
        author_id: *draft.author_id(),
    }
}

#[tokio::test]
async fn submit_persists_when_author_exists() {
    let author_id = UserId::random();
    let mut users = MockUserRepository::new();
    users.expect_exists().times(1).return_once(|_| Ok(true));
    let mut products = MockProductRepository::new();
    products
        .expect_insert()
        .times(1)
        .return_once(|id, draft| Ok(stored_product(id, draft)));

    let service = CatalogueService::new(Arc::new(products), Arc::new(users));
    let product = service
        .submit(sample_draft(author_id))
        .await
        .expect("submission succeeds");

    assert_eq!(product.author_id, author_id);
    assert!(product.is_made_in_my);
}

#[tokio::test]
async fn submit_rejects_unknown_author_without_inserting() {
    let mut users = MockUserRepository::new();
    users.expect_exists().times(1).return_once(|_| Ok(false));
    let mut products = MockProductRepository::new();
    products.expect_insert().times(0);

    let service = CatalogueService::new(Arc::new(products), Arc::new(users));
    let error = service
        .submit(sample_draft(UserId::random()))
        .await
        .expect_err("unknown author");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert!(error.message().contains("author"));
}

#[tokio::test]
async fn submit_maps_racing_author_deletion_to_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_exists().times(1).return_once(|_| Ok(true));
    let mut products = MockProductRepository::new();
    products
        .expect_insert()
        .times(1)
        .return_once(|_, draft| {
            Err(ProductRepositoryError::author_missing(
                draft.author_id().to_string(),
            ))
        });

    let service = CatalogueService::new(Arc::new(products), Arc::new(users));
    let error = service
        .submit(sample_draft(UserId::random()))
        .await
        .expect_err("foreign key rejects the insert");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn empty_tag_filter_lists_everything() {
    let mut users = MockUserRepository::new();
    users.expect_exists().times(0);
    let mut products = MockProductRepository::new();
    products.expect_list_local_by_tags().times(0);
    products.expect_list_local().times(1).return_once(|| Ok(Vec::new()));

    let service = CatalogueService::new(Arc::new(products), Arc::new(users));
    let listed = service
        .list_by_tags(Vec::new())
        .await
        .expect("listing succeeds");
    assert!(listed.is_empty());
}

#[tokio::test]
async fn tag_filter_is_forwarded_when_non_empty() {
    let users = MockUserRepository::new();
    let mut products = MockProductRepository::new();
    products
        .expect_list_local_by_tags()
        .times(1)
        .withf(|tags| tags == ["coffee".to_owned()])
        .return_once(|_| Ok(Vec::new()));

    let service = CatalogueService::new(Arc::new(products), Arc::new(users));
    service
        .list_by_tags(vec!["coffee".to_owned()])
        .await
        .expect("listing succeeds");
}

#[tokio::test]
async fn update_merges_only_present_fields() {
    let id = ProductId::random();
    let patch = ProductPatch::try_new(
        None,
        None,
        None,
        Some(Vec::new()),
        FieldPatch::Keep,
        None,
    )
    .expect("valid patch");

    let users = MockUserRepository::new();
    let mut products = MockProductRepository::new();
    products
        .expect_update()
        .times(1)
        .withf(move |candidate, patch| {
            *candidate == id && patch.tags() == Some(&[][..]) && patch.title().is_none()
        })
        .return_once(move |candidate, _| {
            let mut product = stored_product(*candidate, &sample_draft(UserId::random()));
            product.tags = Vec::new();
            Ok(Some(product))
        });

    let service = CatalogueService::new(Arc::new(products), Arc::new(users));
    let product = service.update(id, patch).await.expect("update succeeds");
    assert!(product.tags.is_empty());
    assert_eq!(product.title, "Kopi Kita");
}

#[tokio::test]
async fn empty_update_returns_stored_product_untouched() {
    let id = ProductId::random();
    let users = MockUserRepository::new();
    let mut products = MockProductRepository::new();
    products.expect_update().times(0);
    products
        .expect_find_by_id()
        .times(1)
        .return_once(move |candidate| {
            Ok(Some(stored_product(*candidate, &sample_draft(UserId::random()))))
        });

    let service = CatalogueService::new(Arc::new(products), Arc::new(users));
    let product = service
        .update(id, ProductPatch::default())
        .await
        .expect("no-op update succeeds");
    assert_eq!(product.id, id);
}

#[tokio::test]
async fn update_reports_unknown_id_as_not_found() {
    let users = MockUserRepository::new();
    let mut products = MockProductRepository::new();
    products.expect_update().times(1).return_once(|_, _| Ok(None));

    let service = CatalogueService::new(Arc::new(products), Arc::new(users));
    let patch = ProductPatch::try_new(
        Some("New title".to_owned()),
        None,
        None,
        None,
        FieldPatch::Keep,
        None,
    )
    .expect("valid patch");
    let error = service
        .update(ProductId::random(), patch)
        .await
        .expect_err("unknown id");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn get_returns_none_for_unknown_id_without_error() {
    let users = MockUserRepository::new();
    let mut products = MockProductRepository::new();
    products.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let service = CatalogueService::new(Arc::new(products), Arc::new(users));
    let found = service
        .get(ProductId::random())
        .await
        .expect("lookup succeeds");
    assert!(found.is_none());
}
