//! Integration tests for the project repository.

mod common;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use sitebook_db::entities::sea_orm_active_enums::{PaymentType, ProjectStatus};
use sitebook_db::repositories::{
    CreateProjectInput, PaymentInput, PaymentRepository, ProjectError, ProjectRepository,
    UpdateProjectInput,
};

#[tokio::test]
async fn test_create_assigns_code_and_remaining() {
    let (_pg, db) = common::setup().await;
    let repo = ProjectRepository::new(db.clone());

    let project = repo
        .create(CreateProjectInput {
            name: "Luxury Villa Complex".to_string(),
            land_details: "5000 sq ft plot with garden area".to_string(),
            land_address: "123 Palm Avenue, Green Valley".to_string(),
            budget: dec!(25000000),
            duration_months: 18,
            status: ProjectStatus::Active,
            total_paid: dec!(5000000),
        })
        .await
        .expect("create should succeed");

    assert!(project.code.starts_with("PRJ-"));
    assert_eq!(project.code.len(), 8);
    assert_eq!(project.remaining_amount, dec!(20000000));
    assert_eq!(project.status, ProjectStatus::Active);
}

#[tokio::test]
async fn test_create_rejects_non_positive_budget() {
    let (_pg, db) = common::setup().await;
    let repo = ProjectRepository::new(db.clone());

    let result = repo
        .create(CreateProjectInput {
            name: "Bad".to_string(),
            land_details: String::new(),
            land_address: String::new(),
            budget: Decimal::ZERO,
            duration_months: 0,
            status: ProjectStatus::Active,
            total_paid: Decimal::ZERO,
        })
        .await;

    assert!(matches!(result, Err(ProjectError::Funds(_))));
}

#[tokio::test]
async fn test_create_rejects_paid_over_budget() {
    let (_pg, db) = common::setup().await;
    let repo = ProjectRepository::new(db.clone());

    let result = repo
        .create(CreateProjectInput {
            name: "Overpaid".to_string(),
            land_details: String::new(),
            land_address: String::new(),
            budget: dec!(1000),
            duration_months: 6,
            status: ProjectStatus::Active,
            total_paid: dec!(1000.01),
        })
        .await;

    assert!(matches!(result, Err(ProjectError::Funds(_))));
}

#[tokio::test]
async fn test_update_recomputes_remaining() {
    let (_pg, db) = common::setup().await;
    let repo = ProjectRepository::new(db.clone());
    let project = common::create_project(&db, dec!(100000)).await;

    let updated = repo
        .update(
            project.id,
            UpdateProjectInput {
                name: "Renamed".to_string(),
                land_details: project.land_details.clone(),
                land_address: project.land_address.clone(),
                budget: dec!(150000),
                duration_months: 24,
                status: ProjectStatus::OnHold,
            },
        )
        .await
        .expect("update should succeed");

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.budget, dec!(150000));
    assert_eq!(updated.remaining_amount, dec!(150000));
    assert_eq!(updated.status, ProjectStatus::OnHold);
}

#[tokio::test]
async fn test_update_rejects_budget_below_paid() {
    let (_pg, db) = common::setup().await;
    let repo = ProjectRepository::new(db.clone());
    let project = common::create_project(&db, dec!(100000)).await;

    let today = chrono::Utc::now().date_naive();
    PaymentRepository::new(db.clone())
        .create(PaymentInput {
            project_id: project.id,
            amount: dec!(60000),
            payment_date: today,
            payment_type: PaymentType::BankTransfer,
            description: String::new(),
        })
        .await
        .expect("payment should succeed");

    let result = repo
        .update(
            project.id,
            UpdateProjectInput {
                name: project.name.clone(),
                land_details: project.land_details.clone(),
                land_address: project.land_address.clone(),
                budget: dec!(50000),
                duration_months: project.duration_months,
                status: ProjectStatus::Active,
            },
        )
        .await;

    assert!(matches!(result, Err(ProjectError::Funds(_))));
}

#[tokio::test]
async fn test_delete_empty_project() {
    let (_pg, db) = common::setup().await;
    let repo = ProjectRepository::new(db.clone());
    let project = common::create_project(&db, dec!(100000)).await;

    repo.delete(project.id).await.expect("delete should succeed");

    assert!(matches!(
        repo.get(project.id).await,
        Err(ProjectError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_blocked_by_payment() {
    let (_pg, db) = common::setup().await;
    let repo = ProjectRepository::new(db.clone());
    let project = common::create_project(&db, dec!(100000)).await;

    let today = chrono::Utc::now().date_naive();
    PaymentRepository::new(db.clone())
        .create(PaymentInput {
            project_id: project.id,
            amount: dec!(1000),
            payment_date: today,
            payment_type: PaymentType::Cash,
            description: String::new(),
        })
        .await
        .expect("payment should succeed");

    let result = repo.delete(project.id).await;
    assert!(matches!(
        result,
        Err(ProjectError::HasRecords { payments: 1, .. })
    ));
}

#[tokio::test]
async fn test_get_unknown_project() {
    let (_pg, db) = common::setup().await;
    let repo = ProjectRepository::new(db.clone());

    let result = repo.get(Uuid::new_v4()).await;
    assert!(matches!(result, Err(ProjectError::NotFound(_))));
}

#[tokio::test]
async fn test_set_document_path() {
    let (_pg, db) = common::setup().await;
    let repo = ProjectRepository::new(db.clone());
    let project = common::create_project(&db, dec!(100000)).await;

    let updated = repo
        .set_document_path(project.id, Some("projects/x/plan.pdf".to_string()))
        .await
        .expect("set_document_path should succeed");

    assert_eq!(updated.document_path.as_deref(), Some("projects/x/plan.pdf"));
}
