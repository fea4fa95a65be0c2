use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Demo data for a fresh database: three stores and their stock.
/// Skipped entirely when any store already exists.
const SEED: &str = r#"
WITH fresh AS (
    SELECT NOT EXISTS (SELECT 1 FROM stores) AS empty
),
seeded_stores AS (
    INSERT INTO stores (id, name, created_at)
    SELECT v.id, v.name, NOW() + v.ord * INTERVAL '1 millisecond'
    FROM (VALUES
        (1, 'a0000001-0000-4000-8000-000000000001'::uuid, 'Downtown Store'),
        (2, 'a0000002-0000-4000-8000-000000000002'::uuid, 'Mall Location'),
        (3, 'a0000003-0000-4000-8000-000000000003'::uuid, 'Airport Kiosk')
    ) AS v(ord, id, name), fresh
    WHERE fresh.empty
    RETURNING id
)
INSERT INTO products (id, store_id, name, category, price, quantity_in_stock, created_at)
SELECT gen_random_uuid(), p.store_id, p.name, p.category, p.price, p.quantity,
       NOW() + p.ord * INTERVAL '1 millisecond'
FROM (VALUES
    (1, 'a0000001-0000-4000-8000-000000000001'::uuid, 'Wireless Mouse', 'Electronics', 29.99, 45),
    (2, 'a0000001-0000-4000-8000-000000000001'::uuid, 'USB-C Cable', 'Electronics', 12.50, 120),
    (3, 'a0000001-0000-4000-8000-000000000001'::uuid, 'Organic Apples', 'Produce', 4.99, 80),
    (4, 'a0000001-0000-4000-8000-000000000001'::uuid, 'Whole Grain Bread', 'Bakery', 3.49, 3),
    (5, 'a0000002-0000-4000-8000-000000000002'::uuid, 'Laptop Stand', 'Electronics', 45.00, 22),
    (6, 'a0000002-0000-4000-8000-000000000002'::uuid, 'Desk Lamp', 'Home', 34.99, 15),
    (7, 'a0000002-0000-4000-8000-000000000002'::uuid, 'Notebook Pack', 'Office', 8.99, 200),
    (8, 'a0000003-0000-4000-8000-000000000003'::uuid, 'Travel Pillow', 'Travel', 19.99, 8),
    (9, 'a0000003-0000-4000-8000-000000000003'::uuid, 'Snack Bar Box', 'Grocery', 14.99, 50)
) AS p(ord, store_id, name, category, price, quantity)
JOIN seeded_stores s ON s.id = p.store_id
"#;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.get_connection().execute_unprepared(SEED).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // products go with their stores
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DELETE FROM stores WHERE id IN (
                    'a0000001-0000-4000-8000-000000000001',
                    'a0000002-0000-4000-8000-000000000002',
                    'a0000003-0000-4000-8000-000000000003'
                )
                "#,
            )
            .await?;
        Ok(())
    }
}
