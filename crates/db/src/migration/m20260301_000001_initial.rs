//! Initial database migration.
//!
//! Creates the enums, tables, indexes, triggers, and catalog seed data
//! for the construction-project financial tracker.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: CATALOG TABLES
        // ============================================================
        db.execute_unprepared(LABOR_WORK_TYPES_SQL).await?;
        db.execute_unprepared(MATERIAL_ITEMS_SQL).await?;

        // ============================================================
        // PART 3: PROJECTS
        // ============================================================
        db.execute_unprepared(PROJECTS_SQL).await?;

        // ============================================================
        // PART 4: EXPENSES & PAYMENTS
        // ============================================================
        db.execute_unprepared(MANPOWER_EXPENSES_SQL).await?;
        db.execute_unprepared(MATERIAL_EXPENSES_SQL).await?;
        db.execute_unprepared(PAYMENTS_SQL).await?;

        // ============================================================
        // PART 5: TRIGGERS & FUNCTIONS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        // ============================================================
        // PART 6: SEED DATA
        // ============================================================
        db.execute_unprepared(SEED_LABOR_WORK_TYPES_SQL).await?;
        db.execute_unprepared(SEED_MATERIAL_ITEMS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Project lifecycle status
CREATE TYPE project_status AS ENUM (
    'active',
    'completed',
    'on_hold',
    'cancelled'
);

-- Payment method
CREATE TYPE payment_type AS ENUM (
    'cash',
    'bank_transfer',
    'cheque',
    'upi',
    'other'
);
";

const LABOR_WORK_TYPES_SQL: &str = r"
CREATE TABLE labor_work_types (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(100) NOT NULL UNIQUE,
    description TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const MATERIAL_ITEMS_SQL: &str = r"
CREATE TABLE material_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(100) NOT NULL UNIQUE,
    display_name VARCHAR(100) NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const PROJECTS_SQL: &str = r"
CREATE TABLE projects (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(16) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    land_details TEXT NOT NULL DEFAULT '',
    land_address TEXT NOT NULL DEFAULT '',
    budget NUMERIC(14, 2) NOT NULL,
    duration_months INTEGER NOT NULL DEFAULT 0,
    status project_status NOT NULL DEFAULT 'active',
    total_paid NUMERIC(14, 2) NOT NULL DEFAULT 0,
    remaining_amount NUMERIC(14, 2) NOT NULL,
    document_path TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT projects_budget_positive CHECK (budget > 0),
    CONSTRAINT projects_duration_non_negative CHECK (duration_months >= 0),
    CONSTRAINT projects_total_paid_non_negative CHECK (total_paid >= 0),
    CONSTRAINT projects_paid_within_budget CHECK (total_paid <= budget)
);

CREATE INDEX idx_projects_status ON projects(status);
";

const MANPOWER_EXPENSES_SQL: &str = r"
CREATE TABLE manpower_expenses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    work_type_id UUID REFERENCES labor_work_types(id) ON DELETE RESTRICT,
    date DATE NOT NULL,
    number_of_people INTEGER NOT NULL,
    per_person_cost NUMERIC(14, 2) NOT NULL,
    total_amount NUMERIC(14, 2) NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT manpower_people_positive CHECK (number_of_people >= 1),
    CONSTRAINT manpower_cost_positive CHECK (per_person_cost > 0),
    CONSTRAINT manpower_total_positive CHECK (total_amount > 0)
);

CREATE INDEX idx_manpower_expenses_project ON manpower_expenses(project_id);
CREATE INDEX idx_manpower_expenses_date ON manpower_expenses(date);
";

const MATERIAL_EXPENSES_SQL: &str = r"
CREATE TABLE material_expenses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    item_id UUID NOT NULL REFERENCES material_items(id) ON DELETE RESTRICT,
    custom_item_name VARCHAR(100),
    date DATE NOT NULL,
    quantity NUMERIC(14, 2) NOT NULL,
    per_unit_cost NUMERIC(14, 2) NOT NULL,
    total_amount NUMERIC(14, 2) NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT material_quantity_positive CHECK (quantity > 0),
    CONSTRAINT material_cost_positive CHECK (per_unit_cost > 0),
    CONSTRAINT material_total_positive CHECK (total_amount > 0)
);

CREATE INDEX idx_material_expenses_project ON material_expenses(project_id);
CREATE INDEX idx_material_expenses_item ON material_expenses(item_id);
CREATE INDEX idx_material_expenses_date ON material_expenses(date);
";

const PAYMENTS_SQL: &str = r"
CREATE TABLE payments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    amount NUMERIC(14, 2) NOT NULL,
    payment_date DATE NOT NULL,
    payment_type payment_type NOT NULL DEFAULT 'cash',
    description TEXT NOT NULL DEFAULT '',
    receipt_path TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT payments_amount_positive CHECK (amount > 0)
);

CREATE INDEX idx_payments_project ON payments(project_id);
CREATE INDEX idx_payments_date ON payments(payment_date);
";

const TRIGGERS_SQL: &str = r"
-- Keep updated_at fresh on every row update
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = NOW();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_projects_updated_at
    BEFORE UPDATE ON projects
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_labor_work_types_updated_at
    BEFORE UPDATE ON labor_work_types
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_material_items_updated_at
    BEFORE UPDATE ON material_items
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_manpower_expenses_updated_at
    BEFORE UPDATE ON manpower_expenses
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_material_expenses_updated_at
    BEFORE UPDATE ON material_expenses
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_payments_updated_at
    BEFORE UPDATE ON payments
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const SEED_LABOR_WORK_TYPES_SQL: &str = r"
INSERT INTO labor_work_types (name, description) VALUES
    ('construction', 'General construction work'),
    ('electrical', 'Electrical wiring and fittings'),
    ('plumbing', 'Plumbing and sanitary work'),
    ('painting', 'Interior and exterior painting'),
    ('carpentry', 'Woodwork and fittings'),
    ('flooring', 'Tiling and flooring work'),
    ('welding', 'Steel and fabrication work'),
    ('helper', 'Unskilled site labor')
ON CONFLICT (name) DO NOTHING;
";

const SEED_MATERIAL_ITEMS_SQL: &str = r"
INSERT INTO material_items (name, display_name) VALUES
    ('brick', 'Brick'),
    ('cement', 'Cement'),
    ('steel', 'Steel'),
    ('sand', 'Sand'),
    ('aggregate', 'Jelly'),
    ('paint', 'Paint'),
    ('tiles', 'Tiles'),
    ('wood', 'Wood'),
    ('stone pebbles', 'Stone pebbles'),
    ('grinate', 'Grinate'),
    ('electrical', 'Electrical Items'),
    ('plumbing', 'Plumbing Items'),
    ('others', 'Others')
ON CONFLICT (name) DO NOTHING;
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS payments CASCADE;
DROP TABLE IF EXISTS material_expenses CASCADE;
DROP TABLE IF EXISTS manpower_expenses CASCADE;
DROP TABLE IF EXISTS projects CASCADE;
DROP TABLE IF EXISTS material_items CASCADE;
DROP TABLE IF EXISTS labor_work_types CASCADE;
DROP FUNCTION IF EXISTS set_updated_at CASCADE;
DROP TYPE IF EXISTS payment_type;
DROP TYPE IF EXISTS project_status;
";
