use crate::error::ApiError;
use crate::model::attendance::{Attendance, AttendanceStatus};
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, Serialize, ToSchema)]
pub struct MarkAttendance {
    #[schema(example = "EMP-001", value_type = String)]
    pub employee_id: String,
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "Present")]
    pub status: AttendanceStatus,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendanceQuery {
    /// Substring filter on employee name or employee id
    pub search: Option<String>,
}

#[derive(Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceWithName {
    pub id: i64,
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[schema(example = "John Doe")]
    pub employee_name: String,
}

/// Mark attendance for one employee and day
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "Attendance marked successfully", body = Object, example = json!({
            "message": "Attendance marked successfully"
        })),
        (status = 400, description = "Missing fields or invalid status"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    pool: web::Data<SqlitePool>,
    payload: web::Json<MarkAttendance>,
) -> Result<HttpResponse, ApiError> {
    let exists = sqlx::query_scalar::<_, String>("SELECT id FROM employees WHERE id = ?")
        .bind(&payload.employee_id)
        .fetch_optional(pool.get_ref())
        .await?;

    if exists.is_none() {
        return Err(ApiError::NotFound("Employee not found".into()));
    }

    // One row per (employee_id, date); re-marking a day replaces its status
    sqlx::query(
        r#"
        INSERT INTO attendance (employee_id, date, status)
        VALUES (?, ?, ?)
        ON CONFLICT (employee_id, date) DO UPDATE SET status = excluded.status
        "#,
    )
    .bind(&payload.employee_id)
    .bind(payload.date)
    .bind(payload.status)
    .execute(pool.get_ref())
    .await?;

    info!(employee_id = %payload.employee_id, status = %payload.status, "Attendance marked");

    Ok(HttpResponse::Created().json(json!({
        "message": "Attendance marked successfully"
    })))
}

/// Attendance history for one employee
#[utoipa::path(
    get,
    path = "/api/attendance/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Employee code")
    ),
    responses(
        (status = 200, description = "Attendance rows, newest date first", body = [Attendance])
    ),
    tag = "Attendance"
)]
pub async fn employee_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let records = sqlx::query_as::<_, Attendance>(
        r#"
        SELECT id, employee_id, date, status
        FROM attendance
        WHERE employee_id = ?
        ORDER BY date DESC
        "#,
    )
    .bind(&employee_id)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(records))
}

/// All attendance, joined with employee names
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Attendance rows, newest date first", body = [AttendanceWithName])
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<SqlitePool>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, ApiError> {
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let mut sql = String::from(
        r#"
        SELECT a.id, a.employee_id, a.date, a.status, e.name AS employee_name
        FROM attendance a
        JOIN employees e ON a.employee_id = e.id
        "#,
    );

    if search.is_some() {
        // instr() keeps the match case-sensitive; sqlite LIKE would fold ASCII case
        sql.push_str(" WHERE instr(e.name, ?) > 0 OR instr(a.employee_id, ?) > 0");
    }
    sql.push_str(" ORDER BY a.date DESC");

    let mut q = sqlx::query_as::<_, AttendanceWithName>(&sql);
    if let Some(term) = search {
        q = q.bind(term.to_owned()).bind(term.to_owned());
    }

    let records = q.fetch_all(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(records))
}
