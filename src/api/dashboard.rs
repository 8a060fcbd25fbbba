use crate::error::ApiError;
use crate::model::attendance::AttendanceStatus;
use actix_web::{HttpResponse, web};
use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "total_employees": 12,
    "today_present": 9,
    "today_absent": 2,
    "trend": [
        { "date": "2024-01-01", "present_count": 8 },
        { "date": "2024-01-02", "present_count": 9 }
    ]
}))]
pub struct DashboardStats {
    pub total_employees: i64,
    pub today_present: i64,
    pub today_absent: i64,
    pub trend: Vec<TrendPoint>,
}

#[derive(Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct TrendPoint {
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = 8)]
    pub present_count: i64,
}

/// Aggregate dashboard statistics
#[utoipa::path(
    get,
    path = "/api/dashboard-stats",
    responses(
        (status = 200, description = "Counts and 7-day trend, computed on demand", body = DashboardStats)
    ),
    tag = "Dashboard"
)]
pub async fn dashboard_stats(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let total_employees = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
        .fetch_one(pool.get_ref())
        .await?;

    let today = Local::now().date_naive();

    let today_present = count_for_day(pool.get_ref(), today, AttendanceStatus::Present).await?;
    let today_absent = count_for_day(pool.get_ref(), today, AttendanceStatus::Absent).await?;

    // Last 7 calendar days inclusive. Days with no Present rows are simply
    // absent from the series, they are not zero-filled.
    let window_start = today - Duration::days(6);

    let trend = sqlx::query_as::<_, TrendPoint>(
        r#"
        SELECT date, COUNT(*) AS present_count
        FROM attendance
        WHERE status = ? AND date >= ?
        GROUP BY date
        ORDER BY date ASC
        "#,
    )
    .bind(AttendanceStatus::Present)
    .bind(window_start)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(DashboardStats {
        total_employees,
        today_present,
        today_absent,
        trend,
    }))
}

async fn count_for_day(
    pool: &SqlitePool,
    day: NaiveDate,
    status: AttendanceStatus,
) -> Result<i64, ApiError> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT employee_id) FROM attendance WHERE date = ? AND status = ?",
    )
    .bind(day)
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::test_pool, routes};
    use actix_web::{App, test, web::Data};

    async fn seed(pool: &SqlitePool, id: &str, email: &str) {
        sqlx::query("INSERT INTO employees (id, name, email, department) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind("Someone")
            .bind(email)
            .bind("Eng")
            .execute(pool)
            .await
            .unwrap();
    }

    async fn mark(pool: &SqlitePool, id: &str, date: NaiveDate, status: &str) {
        sqlx::query("INSERT INTO attendance (employee_id, date, status) VALUES (?, ?, ?)")
            .bind(id)
            .bind(date)
            .bind(status)
            .execute(pool)
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn counts_and_trend_reflect_current_data() {
        let pool = test_pool().await;
        let today = Local::now().date_naive();

        seed(&pool, "E1", "e1@x.com").await;
        seed(&pool, "E2", "e2@x.com").await;
        seed(&pool, "E3", "e3@x.com").await;

        mark(&pool, "E1", today, "Present").await;
        mark(&pool, "E2", today, "Present").await;
        mark(&pool, "E3", today, "Absent").await;
        // Inside the 7-day window but not today
        mark(&pool, "E1", today - Duration::days(3), "Present").await;
        // Outside the window entirely
        mark(&pool, "E1", today - Duration::days(10), "Present").await;

        let app = test::init_service(
            App::new()
                .app_data(Data::new(pool.clone()))
                .service(web::scope("/api").configure(routes::register)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/dashboard-stats")
            .to_request();
        let stats: DashboardStats = test::call_and_read_body_json(&app, req).await;

        assert_eq!(stats.total_employees, 3);
        assert_eq!(stats.today_present, 2);
        assert_eq!(stats.today_absent, 1);
        assert!(stats.today_present + stats.today_absent <= stats.total_employees);

        // Ascending by date, zero-activity days omitted
        assert_eq!(stats.trend.len(), 2);
        assert_eq!(stats.trend[0].date, today - Duration::days(3));
        assert_eq!(stats.trend[0].present_count, 1);
        assert_eq!(stats.trend[1].date, today);
        assert_eq!(stats.trend[1].present_count, 2);
    }

    #[actix_web::test]
    async fn empty_database_yields_zeros() {
        let pool = test_pool().await;
        let app = test::init_service(
            App::new()
                .app_data(Data::new(pool.clone()))
                .service(web::scope("/api").configure(routes::register)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/dashboard-stats")
            .to_request();
        let stats: DashboardStats = test::call_and_read_body_json(&app, req).await;

        assert_eq!(stats.total_employees, 0);
        assert_eq!(stats.today_present, 0);
        assert_eq!(stats.today_absent, 0);
        assert!(stats.trend.is_empty());
    }
}
