//! Integration tests for the report repository.

mod common;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use uuid::Uuid;

use sitebook_core::reports::Granularity;
use sitebook_db::entities::sea_orm_active_enums::PaymentType;
use sitebook_db::repositories::{
    ExpenseRepository, ManpowerExpenseInput, MaterialExpenseInput, PaymentInput,
    PaymentRepository, ReportError, ReportRepository,
};

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, m, d).unwrap()
}

/// Seeds a project with two payments and three expenses across months.
async fn seed_activity(db: &sea_orm::DatabaseConnection) -> Uuid {
    let project = common::create_project(db, dec!(100000)).await;

    let payment_repo = PaymentRepository::new(db.clone());
    for (month, amount) in [(1, dec!(30000)), (2, dec!(20000))] {
        payment_repo
            .create(PaymentInput {
                project_id: project.id,
                amount,
                payment_date: date(month, 10),
                payment_type: PaymentType::BankTransfer,
                description: String::new(),
            })
            .await
            .unwrap();
    }

    let expense_repo = ExpenseRepository::new(db.clone());
    expense_repo
        .create_manpower(ManpowerExpenseInput {
            project_id: project.id,
            work_type_id: None,
            date: date(1, 15),
            number_of_people: 10,
            per_person_cost: dec!(800),
            description: String::new(),
        })
        .await
        .unwrap();

    let cement = common::material_item(db, "cement").await;
    expense_repo
        .create_material(MaterialExpenseInput {
            project_id: project.id,
            item_id: cement.id,
            custom_item_name: None,
            date: date(2, 5),
            quantity: dec!(400),
            per_unit_cost: dec!(7.50),
            description: String::new(),
        })
        .await
        .unwrap();

    let others = common::material_item(db, "others").await;
    expense_repo
        .create_material(MaterialExpenseInput {
            project_id: project.id,
            item_id: others.id,
            custom_item_name: Some("Crane rental".to_string()),
            date: date(4, 1),
            quantity: dec!(1),
            per_unit_cost: dec!(9000),
            description: String::new(),
        })
        .await
        .unwrap();

    project.id
}

#[tokio::test]
async fn test_project_report_totals() {
    let (_pg, db) = common::setup().await;
    let project_id = seed_activity(&db).await;

    let report = ReportRepository::new(db.clone())
        .project_report(project_id, Granularity::Month)
        .await
        .expect("report should succeed");

    assert_eq!(report.total_paid, dec!(50000));
    assert_eq!(report.remaining_amount, dec!(50000));
    assert_eq!(report.manpower_total, dec!(8000));
    assert_eq!(report.material_total, dec!(12000.00));
    assert_eq!(report.total_expenses, dec!(20000.00));
    assert_eq!(report.available_funds, dec!(30000.00));
    assert_eq!(report.utilization_percent, dec!(20.00));
}

#[tokio::test]
async fn test_project_report_monthly_trend() {
    let (_pg, db) = common::setup().await;
    let project_id = seed_activity(&db).await;

    let report = ReportRepository::new(db.clone())
        .project_report(project_id, Granularity::Month)
        .await
        .unwrap();

    let periods: Vec<&str> = report.trend.iter().map(|p| p.period.as_str()).collect();
    assert_eq!(periods, vec!["2026-01", "2026-02", "2026-04"]);

    assert_eq!(report.trend[0].expenses, dec!(8000));
    assert_eq!(report.trend[0].payments, dec!(30000));
    assert_eq!(report.trend[2].expenses, dec!(9000.00));
    assert_eq!(report.trend[2].payments, dec!(0));
}

#[tokio::test]
async fn test_project_report_quarterly_trend() {
    let (_pg, db) = common::setup().await;
    let project_id = seed_activity(&db).await;

    let report = ReportRepository::new(db.clone())
        .project_report(project_id, Granularity::Quarter)
        .await
        .unwrap();

    let periods: Vec<&str> = report.trend.iter().map(|p| p.period.as_str()).collect();
    assert_eq!(periods, vec!["2026-Q1", "2026-Q2"]);
    assert_eq!(report.trend[0].expenses, dec!(11000.00));
    assert_eq!(report.trend[0].payments, dec!(50000));
}

#[tokio::test]
async fn test_project_report_breakdowns() {
    let (_pg, db) = common::setup().await;
    let project_id = seed_activity(&db).await;

    let report = ReportRepository::new(db.clone())
        .project_report(project_id, Granularity::Month)
        .await
        .unwrap();

    assert_eq!(report.manpower_breakdown.len(), 1);
    assert_eq!(report.manpower_breakdown[0].label, "uncategorized");
    assert_eq!(report.manpower_breakdown[0].total, dec!(8000));

    // Others expenses surface under their custom name
    let labels: Vec<&str> = report
        .material_breakdown
        .iter()
        .map(|r| r.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Crane rental", "Cement"]);
}

#[tokio::test]
async fn test_portfolio_totals() {
    let (_pg, db) = common::setup().await;
    let project_id = seed_activity(&db).await;
    let idle = common::create_project(&db, dec!(40000)).await;

    let portfolio = ReportRepository::new(db.clone())
        .portfolio()
        .await
        .expect("portfolio should succeed");

    assert_eq!(portfolio.projects.len(), 2);
    assert_eq!(portfolio.totals.budget, dec!(140000));
    assert_eq!(portfolio.totals.total_paid, dec!(50000));
    assert_eq!(portfolio.totals.total_expenses, dec!(20000.00));
    assert_eq!(portfolio.totals.available_funds, dec!(30000.00));

    let active_row = portfolio
        .projects
        .iter()
        .find(|p| p.project_id == project_id)
        .unwrap();
    assert_eq!(active_row.utilization_percent, dec!(20.00));

    let idle_row = portfolio
        .projects
        .iter()
        .find(|p| p.project_id == idle.id)
        .unwrap();
    assert_eq!(idle_row.total_expenses, dec!(0));
}

#[tokio::test]
async fn test_unknown_project_report() {
    let (_pg, db) = common::setup().await;

    let result = ReportRepository::new(db.clone())
        .project_report(Uuid::new_v4(), Granularity::Month)
        .await;

    assert!(matches!(result, Err(ReportError::ProjectNotFound(_))));
}
