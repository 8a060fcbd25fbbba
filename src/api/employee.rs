use crate::{error::ApiError, model::employee::Employee};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{error, info};
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP-001", value_type = String)]
    pub employee_id: String,
    #[schema(example = "John Doe", value_type = String)]
    pub name: String,
    #[schema(example = "john.doe@company.com", format = "email", value_type = String)]
    pub email: String,
    #[schema(example = "Engineering", value_type = String)]
    pub department: String,
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees, newest first", body = [Employee])
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let employees = sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, name, email, department, created_at
        FROM employees
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(employees))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created successfully", body = Object, example = json!({
            "message": "Employee added successfully"
        })),
        (status = 400, description = "Missing required fields"),
        (status = 409, description = "Duplicate employee id or email", body = Object, example = json!({
            "error": "Employee ID or Email already exists"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let result = sqlx::query(
        r#"
        INSERT INTO employees (id, name, email, department)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&payload.employee_id)
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&payload.department)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => {
            info!(employee_id = %payload.employee_id, "Employee created");
            Ok(HttpResponse::Created().json(json!({
                "message": "Employee added successfully"
            })))
        }

        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
            ApiError::Conflict("Employee ID or Email already exists".into()),
        ),

        Err(e) => {
            error!(error = %e, "Failed to create employee");
            Err(ApiError::Database(e))
        }
    }
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(
        ("id" = String, Path, description = "Employee code")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let employee = sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, name, email, department, created_at
        FROM employees
        WHERE id = ?
        "#,
    )
    .bind(&id)
    .fetch_optional(pool.get_ref())
    .await?;

    match employee {
        Some(emp) => Ok(HttpResponse::Ok().json(emp)),
        None => Err(ApiError::NotFound("Employee not found".into())),
    }
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(
        ("id" = String, Path, description = "Employee code")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Employee deleted successfully"
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    // Attendance rows go with the employee (ON DELETE CASCADE)
    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(&id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Employee not found".into()));
    }

    info!(employee_id = %id, "Employee deleted");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted successfully"
    })))
}
