//! Database seeder for Sitebook development and testing.
//!
//! Seeds a portfolio of demo projects plus a few payments and expenses
//! on the first one. Work type and material catalogs are seeded by the
//! initial migration.
//!
//! Usage: cargo run --bin seeder

use chrono::{Days, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;

use sitebook_db::entities::sea_orm_active_enums::{PaymentType, ProjectStatus};
use sitebook_db::repositories::{
    CatalogRepository, CreateProjectInput, ExpenseRepository, ManpowerExpenseInput,
    MaterialExpenseInput, PaymentInput, PaymentRepository, ProjectRepository,
};

struct DemoProject {
    name: &'static str,
    land_details: &'static str,
    land_address: &'static str,
    budget: Decimal,
    duration_months: i32,
    status: ProjectStatus,
    total_paid: Decimal,
}

fn demo_projects() -> Vec<DemoProject> {
    vec![
        DemoProject {
            name: "Luxury Villa Complex",
            land_details: "5000 sq ft plot with garden area",
            land_address: "123 Palm Avenue, Green Valley, Hyderabad",
            budget: dec!(25000000.00),
            duration_months: 18,
            status: ProjectStatus::Active,
            total_paid: dec!(5000000.00),
        },
        DemoProject {
            name: "Commercial Plaza",
            land_details: "10000 sq ft commercial plot",
            land_address: "456 Business Park, Tech City, Bangalore",
            budget: dec!(50000000.00),
            duration_months: 24,
            status: ProjectStatus::Active,
            total_paid: dec!(15000000.00),
        },
        DemoProject {
            name: "Residential Apartments",
            land_details: "20000 sq ft residential plot",
            land_address: "789 Skyline Heights, Mumbai",
            budget: dec!(75000000.00),
            duration_months: 30,
            status: ProjectStatus::OnHold,
            total_paid: dec!(20000000.00),
        },
        DemoProject {
            name: "Shopping Mall",
            land_details: "30000 sq ft commercial plot",
            land_address: "321 Retail Hub, Delhi",
            budget: dec!(100000000.00),
            duration_months: 36,
            status: ProjectStatus::Active,
            total_paid: dec!(30000000.00),
        },
        DemoProject {
            name: "Office Complex",
            land_details: "15000 sq ft commercial plot",
            land_address: "654 Corporate Park, Chennai",
            budget: dec!(40000000.00),
            duration_months: 20,
            status: ProjectStatus::Completed,
            total_paid: dec!(40000000.00),
        },
        DemoProject {
            name: "Gated Community",
            land_details: "50000 sq ft residential plot",
            land_address: "987 Green Meadows, Pune",
            budget: dec!(150000000.00),
            duration_months: 42,
            status: ProjectStatus::Active,
            total_paid: dec!(45000000.00),
        },
        DemoProject {
            name: "Hotel Project",
            land_details: "25000 sq ft commercial plot",
            land_address: "147 Hospitality Lane, Goa",
            budget: dec!(80000000.00),
            duration_months: 28,
            status: ProjectStatus::Active,
            total_paid: dec!(25000000.00),
        },
        DemoProject {
            name: "Industrial Warehouse",
            land_details: "40000 sq ft industrial plot",
            land_address: "258 Industrial Zone, Ahmedabad",
            budget: dec!(60000000.00),
            duration_months: 16,
            status: ProjectStatus::Completed,
            total_paid: dec!(60000000.00),
        },
        DemoProject {
            name: "Educational Campus",
            land_details: "35000 sq ft institutional plot",
            land_address: "369 Education Hub, Kolkata",
            budget: dec!(90000000.00),
            duration_months: 32,
            status: ProjectStatus::Active,
            total_paid: dec!(35000000.00),
        },
        DemoProject {
            name: "Healthcare Center",
            land_details: "20000 sq ft institutional plot",
            land_address: "741 Medical District, Kochi",
            budget: dec!(55000000.00),
            duration_months: 22,
            status: ProjectStatus::OnHold,
            total_paid: dec!(18000000.00),
        },
    ]
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = sitebook_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo projects...");
    seed_projects(&db).await;

    println!("Seeding demo activity...");
    seed_activity(&db).await;

    println!("Seeding complete!");
}

/// Seeds the demo project portfolio, skipping projects that already exist.
async fn seed_projects(db: &DatabaseConnection) {
    let repo = ProjectRepository::new(db.clone());
    let existing = repo.list().await.expect("Failed to list projects");

    for demo in demo_projects() {
        if existing.iter().any(|p| p.name == demo.name) {
            println!("  {} already exists, skipping...", demo.name);
            continue;
        }

        match repo
            .create(CreateProjectInput {
                name: demo.name.to_string(),
                land_details: demo.land_details.to_string(),
                land_address: demo.land_address.to_string(),
                budget: demo.budget,
                duration_months: demo.duration_months,
                status: demo.status,
                total_paid: demo.total_paid,
            })
            .await
        {
            Ok(project) => println!("  Created {} ({})", project.name, project.code),
            Err(e) => eprintln!("  Failed to create {}: {e}", demo.name),
        }
    }
}

/// Records a payment and a couple of expenses on the first demo project.
async fn seed_activity(db: &DatabaseConnection) {
    let projects = ProjectRepository::new(db.clone())
        .list()
        .await
        .expect("Failed to list projects");
    let Some(villa) = projects.iter().find(|p| p.name == "Luxury Villa Complex") else {
        println!("  Demo project missing, skipping activity...");
        return;
    };

    let expense_repo = ExpenseRepository::new(db.clone());
    let has_activity = !expense_repo
        .list_manpower(Some(villa.id))
        .await
        .expect("Failed to list expenses")
        .is_empty();
    if has_activity {
        println!("  Demo activity already exists, skipping...");
        return;
    }

    let today = Utc::now().date_naive();
    let last_month = today.checked_sub_days(Days::new(30)).unwrap_or(today);

    PaymentRepository::new(db.clone())
        .create(PaymentInput {
            project_id: villa.id,
            amount: dec!(2000000.00),
            payment_date: last_month,
            payment_type: PaymentType::BankTransfer,
            description: "Second installment".to_string(),
        })
        .await
        .expect("Failed to seed payment");
    println!("  Recorded payment on {}", villa.name);

    let catalog = CatalogRepository::new(db.clone());
    let work_types = catalog
        .list_work_types()
        .await
        .expect("Failed to list work types");
    let construction = work_types
        .iter()
        .find(|wt| wt.name == "construction")
        .expect("Seeded work type missing");

    expense_repo
        .create_manpower(ManpowerExpenseInput {
            project_id: villa.id,
            work_type_id: Some(construction.id),
            date: last_month,
            number_of_people: 50,
            per_person_cost: dec!(900.00),
            description: "Foundation crew".to_string(),
        })
        .await
        .expect("Failed to seed manpower expense");
    println!("  Recorded manpower expense on {}", villa.name);

    let items = catalog
        .list_material_items(false)
        .await
        .expect("Failed to list material items");
    let cement = items
        .iter()
        .find(|i| i.name == "cement")
        .expect("Seeded material item missing");

    expense_repo
        .create_material(MaterialExpenseInput {
            project_id: villa.id,
            item_id: cement.id,
            custom_item_name: None,
            date: today,
            quantity: dec!(2000),
            per_unit_cost: dec!(8.50),
            description: "OPC 53 grade".to_string(),
        })
        .await
        .expect("Failed to seed material expense");
    println!("  Recorded material expense on {}", villa.name);
}
