//! Integration tests for quotations: numbering, status transitions, and their
//! effect on orders and payments.

use assert_matches::assert_matches;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use studio_core::catalog::{PaymentType, SessionType};
use studio_core::numbering::{year_prefix, QUOTATION_PREFIX};
use studio_core::pricing::{
    AdditionalService, CoverageKind, CoverageService, QuotationServices, ServiceStage,
};
use studio_core::quotation_status::{plan_transition, QuotationStatus};
use studio_core::types::DbId;
use studio_db::models::customer::CreateCustomer;
use studio_db::models::expense::CreateExpense;
use studio_db::models::payment::CreatePayment;
use studio_db::models::quotation::{CreateQuotation, QuotationFilter, UpdateQuotation};
use studio_db::repositories::quotation_repo::AppliedOrderEffect;
use studio_db::repositories::{CustomerRepo, ExpenseRepo, OrderRepo, PaymentRepo, QuotationRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_customer(pool: &PgPool) -> DbId {
    CustomerRepo::create(
        pool,
        &CreateCustomer {
            name: "Lakshmi Menon".to_string(),
            phone: "9876543210".to_string(),
            email: None,
            address: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn services() -> QuotationServices {
    QuotationServices {
        photography: vec![CoverageService {
            kind: CoverageKind::Candid,
            stage: ServiceStage::Stage,
            camera_count: 2,
            rate: Decimal::from(20_000),
            session: SessionType::Full,
        }],
        videography: vec![],
        additional: vec![AdditionalService {
            name: "LED Wall".to_string(),
            custom_name: None,
            session: SessionType::Full,
            rate: Decimal::from(5_000),
            quantity: 3,
        }],
    }
}

fn new_quotation(customer_id: DbId) -> CreateQuotation {
    CreateQuotation {
        customer_id,
        event_type: "Wedding".to_string(),
        event_date_start: NaiveDate::from_ymd_opt(2026, 12, 4).unwrap(),
        event_date_end: Some(NaiveDate::from_ymd_opt(2026, 12, 5).unwrap()),
        location: "Kochi".to_string(),
        package_type: "Package 2".to_string(),
        session_type: "Full Session".to_string(),
        services: services(),
        deliverables: None,
        manual_total: None,
    }
}

async fn transition(
    pool: &PgPool,
    id: DbId,
    to: QuotationStatus,
    remarks: Option<&str>,
) -> AppliedOrderEffect {
    let mut tx = pool.begin().await.unwrap();
    let quotation = QuotationRepo::find_for_update(&mut *tx, id)
        .await
        .unwrap()
        .unwrap();
    let plan = plan_transition(quotation.status(), to, remarks, quotation.effective_total()).unwrap();
    let (_, effect) = QuotationRepo::apply_transition(&mut *tx, &quotation, &plan)
        .await
        .unwrap();
    tx.commit().await.unwrap();
    effect
}

async fn order_count(pool: &PgPool) -> i64 {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await
        .unwrap();
    n
}

// ---------------------------------------------------------------------------
// Numbering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_quotation_numbers_are_sequential(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let prefix = year_prefix(QUOTATION_PREFIX, Utc::now().date_naive());

    let first = QuotationRepo::create(&pool, &new_quotation(customer_id)).await.unwrap();
    let second = QuotationRepo::create(&pool, &new_quotation(customer_id)).await.unwrap();

    assert_eq!(first.quotation_number, format!("{prefix}0001"));
    assert_eq!(second.quotation_number, format!("{prefix}0002"));
    assert_eq!(first.status(), QuotationStatus::Pending);
    assert_ne!(first.public_token, second.public_token);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_numbering_skips_other_years(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let stale = QuotationRepo::create(&pool, &new_quotation(customer_id)).await.unwrap();
    sqlx::query("UPDATE quotations SET quotation_number = 'Q-AKP-01-0042' WHERE id = $1")
        .bind(stale.id)
        .execute(&pool)
        .await
        .unwrap();

    let fresh = QuotationRepo::create(&pool, &new_quotation(customer_id)).await.unwrap();
    assert!(fresh.quotation_number.ends_with("-0001"));
}

/// Install a BEFORE INSERT trigger that rewrites new quotation numbers to
/// `taken`. With `first_only` only the first insert after installation is
/// rewritten; otherwise every plain `Q-AKP-YY-NNNN` number is.
async fn force_number_collisions(pool: &PgPool, taken: &str, first_only: bool) {
    let condition = if first_only {
        "nextval('forced_number_collisions') = 1"
    } else {
        "NEW.quotation_number ~ '^Q-AKP-[0-9]{2}-[0-9]{4}$'"
    };
    let sql = r#"
        CREATE SEQUENCE forced_number_collisions;
        CREATE FUNCTION force_number_collision() RETURNS trigger AS $$
        BEGIN
            IF CONDITION THEN
                NEW.quotation_number := 'TAKEN';
            END IF;
            RETURN NEW;
        END;
        $$ LANGUAGE plpgsql;
        CREATE TRIGGER force_number_collision BEFORE INSERT ON quotations
            FOR EACH ROW EXECUTE FUNCTION force_number_collision();
    "#
    .replace("CONDITION", condition)
    .replace("TAKEN", taken);
    sqlx::raw_sql(&sql).execute(pool).await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_number_collision_retries_with_next_free_number(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let prefix = year_prefix(QUOTATION_PREFIX, Utc::now().date_naive());
    let first = QuotationRepo::create(&pool, &new_quotation(customer_id)).await.unwrap();

    force_number_collisions(&pool, &first.quotation_number, true).await;

    let second = QuotationRepo::create(&pool, &new_quotation(customer_id)).await.unwrap();
    assert_eq!(second.quotation_number, format!("{prefix}0002"));

    let (attempts,): (i64,) = sqlx::query_as("SELECT last_value FROM forced_number_collisions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(attempts, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_exhausted_retries_use_suffixed_number(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let prefix = year_prefix(QUOTATION_PREFIX, Utc::now().date_naive());
    let first = QuotationRepo::create(&pool, &new_quotation(customer_id)).await.unwrap();

    force_number_collisions(&pool, &first.quotation_number, false).await;

    let second = QuotationRepo::create(&pool, &new_quotation(customer_id)).await.unwrap();
    let suffix = second
        .quotation_number
        .strip_prefix(&format!("{prefix}0002-"))
        .expect("fallback keeps the computed number");
    assert_eq!(suffix.len(), 4);
    assert!(suffix.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quotations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 2);
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_computed_total_ignores_quantity(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let quotation = QuotationRepo::create(&pool, &new_quotation(customer_id)).await.unwrap();

    assert_eq!(quotation.computed_total(), Decimal::from(25_000));
    assert_eq!(quotation.effective_total(), Decimal::from(25_000));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_manual_total_overrides_and_syncs_order(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let quotation = QuotationRepo::create(&pool, &new_quotation(customer_id)).await.unwrap();
    transition(&pool, quotation.id, QuotationStatus::Confirmed, None).await;

    let update = UpdateQuotation {
        manual_total: Some(Some(Decimal::from(90_000))),
        ..Default::default()
    };
    let updated = QuotationRepo::update(&pool, quotation.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.effective_total(), Decimal::from(90_000));

    let order = OrderRepo::find_by_quotation(&pool, quotation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.final_budget, Some(Decimal::from(90_000)));
    assert_eq!(order.estimated_budget, Some(Decimal::from(90_000)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clearing_manual_total_restores_computed(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let mut input = new_quotation(customer_id);
    input.manual_total = Some(Decimal::from(18_000));
    let quotation = QuotationRepo::create(&pool, &input).await.unwrap();
    transition(&pool, quotation.id, QuotationStatus::Confirmed, None).await;

    let untouched = QuotationRepo::update(&pool, quotation.id, &UpdateQuotation::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.manual_total, Some(Decimal::from(18_000)));

    let clear: UpdateQuotation =
        serde_json::from_value(serde_json::json!({ "manual_total": null })).unwrap();
    assert_eq!(clear.manual_total, Some(None));
    let cleared = QuotationRepo::update(&pool, quotation.id, &clear)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.manual_total, None);
    assert_eq!(cleared.effective_total(), Decimal::from(25_000));

    let order = OrderRepo::find_by_quotation(&pool, quotation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.final_budget, Some(Decimal::from(25_000)));
    assert_eq!(order.estimated_budget, Some(Decimal::from(25_000)));
}

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_confirm_creates_single_order(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let quotation = QuotationRepo::create(&pool, &new_quotation(customer_id)).await.unwrap();

    let effect = transition(&pool, quotation.id, QuotationStatus::Confirmed, None).await;
    let order = assert_matches!(effect, AppliedOrderEffect::Created(order) => order);
    assert_eq!(order.final_budget, Some(Decimal::from(25_000)));
    assert_eq!(order.customer_id, customer_id);
    assert!(order.workflow_status.is_pending());

    let again = transition(&pool, quotation.id, QuotationStatus::Confirmed, None).await;
    assert_matches!(again, AppliedOrderEffect::Updated(o) if o.id == order.id);
    assert_eq!(order_count(&pool).await, 1);

    let stored = QuotationRepo::find_by_id(&pool, quotation.id).await.unwrap().unwrap();
    assert!(stored.confirmed_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_decline_removes_order_and_payments(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let quotation = QuotationRepo::create(&pool, &new_quotation(customer_id)).await.unwrap();
    let effect = transition(&pool, quotation.id, QuotationStatus::Confirmed, None).await;
    let order = assert_matches!(effect, AppliedOrderEffect::Created(order) => order);

    for amount in [10_000, 5_000] {
        PaymentRepo::create(
            &pool,
            &CreatePayment {
                order_id: order.id,
                payment_type: PaymentType::InitialAdvance,
                amount: Decimal::from(amount),
                payment_date: None,
                notes: None,
            },
        )
        .await
        .unwrap();
    }

    let effect = transition(
        &pool,
        quotation.id,
        QuotationStatus::Declined,
        Some("Client chose another studio"),
    )
    .await;
    assert_matches!(effect, AppliedOrderEffect::Removed(r) if r.payments_removed == 2);

    assert_eq!(order_count(&pool).await, 0);
    assert!(PaymentRepo::list(&pool, Some(order.id)).await.unwrap().is_empty());

    let stored = QuotationRepo::find_by_id(&pool, quotation.id).await.unwrap().unwrap();
    assert_eq!(stored.status(), QuotationStatus::Declined);
    assert_eq!(stored.remarks.as_deref(), Some("Client chose another studio"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_decline_keeps_expenses_detached(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let quotation = QuotationRepo::create(&pool, &new_quotation(customer_id)).await.unwrap();
    let effect = transition(&pool, quotation.id, QuotationStatus::Confirmed, None).await;
    let order = assert_matches!(effect, AppliedOrderEffect::Created(order) => order);

    let expense = ExpenseRepo::create(
        &pool,
        &CreateExpense {
            order_id: order.id,
            cost_head: "Second shooter".to_string(),
            amount: Decimal::from(30_000),
            vendor_name: None,
            description: None,
            expense_date: None,
        },
    )
    .await
    .unwrap();

    let effect = transition(&pool, quotation.id, QuotationStatus::Declined, Some("Postponed")).await;
    assert_matches!(
        effect,
        AppliedOrderEffect::Removed(r) if r.payments_removed == 0 && r.expenses_detached == 1
    );
    assert_eq!(order_count(&pool).await, 0);

    let kept = ExpenseRepo::find_by_id(&pool, expense.id).await.unwrap().unwrap();
    assert_eq!(kept.order_id, None);
    assert_eq!(kept.amount, Decimal::from(30_000));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_decline_without_order_is_noop(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let quotation = QuotationRepo::create(&pool, &new_quotation(customer_id)).await.unwrap();

    let effect = transition(&pool, quotation.id, QuotationStatus::Declined, Some("Budget")).await;
    assert_matches!(effect, AppliedOrderEffect::NothingToRemove);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reopen_keeps_order(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let quotation = QuotationRepo::create(&pool, &new_quotation(customer_id)).await.unwrap();
    transition(&pool, quotation.id, QuotationStatus::Confirmed, None).await;

    let effect = transition(&pool, quotation.id, QuotationStatus::Pending, None).await;
    assert_matches!(effect, AppliedOrderEffect::Unchanged);
    assert_eq!(order_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_declined_without_remarks_rejected_by_schema(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let quotation = QuotationRepo::create(&pool, &new_quotation(customer_id)).await.unwrap();

    let err = sqlx::query("UPDATE quotations SET status_id = 3, remarks = NULL WHERE id = $1")
        .bind(quotation.id)
        .execute(&pool)
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(e) if e.code().as_deref() == Some("23514"));
}

// ---------------------------------------------------------------------------
// Listing and deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_status(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let a = QuotationRepo::create(&pool, &new_quotation(customer_id)).await.unwrap();
    QuotationRepo::create(&pool, &new_quotation(customer_id)).await.unwrap();
    transition(&pool, a.id, QuotationStatus::Confirmed, None).await;

    let confirmed = QuotationRepo::list(
        &pool,
        &QuotationFilter {
            status_id: Some(QuotationStatus::Confirmed.id()),
            customer_id: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0].id, a.id);

    let all = QuotationRepo::list(&pool, &QuotationFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_blocked_while_order_exists(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let quotation = QuotationRepo::create(&pool, &new_quotation(customer_id)).await.unwrap();
    transition(&pool, quotation.id, QuotationStatus::Confirmed, None).await;

    let err = QuotationRepo::delete(&pool, quotation.id).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(e) if e.code().as_deref() == Some("23503"));

    let err = CustomerRepo::delete(&pool, customer_id).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(e) if e.code().as_deref() == Some("23503"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_token(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;
    let quotation = QuotationRepo::create(&pool, &new_quotation(customer_id)).await.unwrap();

    let found = QuotationRepo::find_by_token(&pool, quotation.public_token)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, quotation.id);

    let missing = QuotationRepo::find_by_token(&pool, uuid::Uuid::new_v4()).await.unwrap();
    assert!(missing.is_none());
}
