//! Integration tests for the expense repository.
//!
//! Covers total recomputation, the available-funds ceiling, and the
//! "others" custom-name rule.

mod common;

use chrono::Utc;
use rust_decimal_macros::dec;

use sitebook_db::entities::sea_orm_active_enums::PaymentType;
use sitebook_db::repositories::{
    CatalogRepository, ExpenseError, ExpenseRepository, ManpowerExpenseInput,
    MaterialExpenseInput, PaymentInput, PaymentRepository,
};

async fn pay(db: &sea_orm::DatabaseConnection, project_id: uuid::Uuid, amount: rust_decimal::Decimal) {
    PaymentRepository::new(db.clone())
        .create(PaymentInput {
            project_id,
            amount,
            payment_date: Utc::now().date_naive(),
            payment_type: PaymentType::Cash,
            description: String::new(),
        })
        .await
        .expect("payment should succeed");
}

fn manpower(project_id: uuid::Uuid, people: i32, cost: rust_decimal::Decimal) -> ManpowerExpenseInput {
    ManpowerExpenseInput {
        project_id,
        work_type_id: None,
        date: Utc::now().date_naive(),
        number_of_people: people,
        per_person_cost: cost,
        description: "Day labor".to_string(),
    }
}

#[tokio::test]
async fn test_manpower_total_recomputed() {
    let (_pg, db) = common::setup().await;
    let project = common::create_project(&db, dec!(100000)).await;
    pay(&db, project.id, dec!(50000)).await;

    let expense = ExpenseRepository::new(db.clone())
        .create_manpower(manpower(project.id, 12, dec!(850)))
        .await
        .expect("expense should succeed");

    assert_eq!(expense.total_amount, dec!(10200));
}

#[tokio::test]
async fn test_manpower_with_work_type() {
    let (_pg, db) = common::setup().await;
    let project = common::create_project(&db, dec!(100000)).await;
    pay(&db, project.id, dec!(50000)).await;

    let work_types = CatalogRepository::new(db.clone())
        .list_work_types()
        .await
        .unwrap();
    let plumbing = work_types.iter().find(|wt| wt.name == "plumbing").unwrap();

    let mut input = manpower(project.id, 2, dec!(1200));
    input.work_type_id = Some(plumbing.id);

    let expense = ExpenseRepository::new(db.clone())
        .create_manpower(input)
        .await
        .expect("expense should succeed");

    assert_eq!(expense.work_type_id, Some(plumbing.id));
}

#[tokio::test]
async fn test_expense_rejected_without_payments() {
    // No payments received yet, so available funds are zero.
    let (_pg, db) = common::setup().await;
    let project = common::create_project(&db, dec!(100000)).await;

    let result = ExpenseRepository::new(db.clone())
        .create_manpower(manpower(project.id, 1, dec!(100)))
        .await;

    assert!(matches!(result, Err(ExpenseError::Funds(_))));
}

#[tokio::test]
async fn test_expense_rejected_over_available_funds() {
    let (_pg, db) = common::setup().await;
    let project = common::create_project(&db, dec!(100000)).await;
    pay(&db, project.id, dec!(10000)).await;

    let repo = ExpenseRepository::new(db.clone());
    repo.create_manpower(manpower(project.id, 8, dec!(1000)))
        .await
        .expect("first expense should succeed");

    // 2000 left; 2001 must be rejected
    let result = repo.create_manpower(manpower(project.id, 3, dec!(667)))
        .await;
    assert!(matches!(result, Err(ExpenseError::Funds(_))));

    // Exactly the remaining funds is fine
    repo.create_manpower(manpower(project.id, 2, dec!(1000)))
        .await
        .expect("exact-funds expense should succeed");
}

#[tokio::test]
async fn test_material_others_requires_custom_name() {
    let (_pg, db) = common::setup().await;
    let project = common::create_project(&db, dec!(100000)).await;
    pay(&db, project.id, dec!(50000)).await;

    let others = common::material_item(&db, "others").await;
    let repo = ExpenseRepository::new(db.clone());

    let input = MaterialExpenseInput {
        project_id: project.id,
        item_id: others.id,
        custom_item_name: None,
        date: Utc::now().date_naive(),
        quantity: dec!(10),
        per_unit_cost: dec!(50),
        description: String::new(),
    };

    let result = repo.create_material(input.clone()).await;
    assert!(matches!(result, Err(ExpenseError::CustomNameRequired)));

    let named = MaterialExpenseInput {
        custom_item_name: Some("Scaffolding rental".to_string()),
        ..input
    };
    let expense = repo
        .create_material(named)
        .await
        .expect("named others expense should succeed");
    assert_eq!(
        expense.custom_item_name.as_deref(),
        Some("Scaffolding rental")
    );
}

#[tokio::test]
async fn test_material_catalog_item_drops_custom_name() {
    let (_pg, db) = common::setup().await;
    let project = common::create_project(&db, dec!(100000)).await;
    pay(&db, project.id, dec!(50000)).await;

    let cement = common::material_item(&db, "cement").await;

    let expense = ExpenseRepository::new(db.clone())
        .create_material(MaterialExpenseInput {
            project_id: project.id,
            item_id: cement.id,
            custom_item_name: Some("ignored".to_string()),
            date: Utc::now().date_naive(),
            quantity: dec!(200),
            per_unit_cost: dec!(7.50),
            description: String::new(),
        })
        .await
        .expect("expense should succeed");

    assert_eq!(expense.total_amount, dec!(1500.00));
    assert_eq!(expense.custom_item_name, None);
}

#[tokio::test]
async fn test_update_excludes_own_amount_from_check() {
    // An expense consuming all available funds can be replaced by an
    // equal-sized record.
    let (_pg, db) = common::setup().await;
    let project = common::create_project(&db, dec!(100000)).await;
    pay(&db, project.id, dec!(5000)).await;

    let repo = ExpenseRepository::new(db.clone());
    let expense = repo
        .create_manpower(manpower(project.id, 5, dec!(1000)))
        .await
        .expect("expense should succeed");

    let updated = repo
        .update_manpower(expense.id, manpower(project.id, 4, dec!(1250)))
        .await
        .expect("replacement should succeed");

    assert_eq!(updated.total_amount, dec!(5000));
    assert_eq!(updated.number_of_people, 4);

    // Growing past available funds still fails
    let result = repo
        .update_manpower(expense.id, manpower(project.id, 6, dec!(1000)))
        .await;
    assert!(matches!(result, Err(ExpenseError::Funds(_))));
}

#[tokio::test]
async fn test_delete_expense_frees_funds() {
    let (_pg, db) = common::setup().await;
    let project = common::create_project(&db, dec!(100000)).await;
    pay(&db, project.id, dec!(5000)).await;

    let repo = ExpenseRepository::new(db.clone());
    let expense = repo
        .create_manpower(manpower(project.id, 5, dec!(1000)))
        .await
        .expect("expense should succeed");

    repo.delete_manpower(expense.id)
        .await
        .expect("delete should succeed");

    repo.create_manpower(manpower(project.id, 5, dec!(1000)))
        .await
        .expect("funds are free again");
}

#[tokio::test]
async fn test_unknown_work_type_rejected() {
    let (_pg, db) = common::setup().await;
    let project = common::create_project(&db, dec!(100000)).await;
    pay(&db, project.id, dec!(5000)).await;

    let mut input = manpower(project.id, 1, dec!(100));
    input.work_type_id = Some(uuid::Uuid::new_v4());

    let result = ExpenseRepository::new(db.clone()).create_manpower(input).await;
    assert!(matches!(result, Err(ExpenseError::WorkTypeNotFound(_))));
}

#[tokio::test]
async fn test_factor_validation() {
    let (_pg, db) = common::setup().await;
    let project = common::create_project(&db, dec!(100000)).await;
    pay(&db, project.id, dec!(5000)).await;

    let repo = ExpenseRepository::new(db.clone());

    let result = repo.create_manpower(manpower(project.id, 0, dec!(100))).await;
    assert!(matches!(result, Err(ExpenseError::Calc(_))));

    let result = repo.create_manpower(manpower(project.id, 5, dec!(0))).await;
    assert!(matches!(result, Err(ExpenseError::Calc(_))));
}
