use crate::api::attendance::{AttendanceWithName, MarkAttendance};
use crate::api::dashboard::{DashboardStats, TrendPoint};
use crate::api::employee::CreateEmployee;
use crate::model::attendance::{Attendance, AttendanceStatus};
use crate::model::employee::Employee;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Attendance API",
        version = "1.0.0",
        description = r#"
## HR Attendance Backend

Stores employee records and daily attendance marks, and serves aggregate
dashboard statistics computed on demand.

### 🔹 Key Features
- **Employee Management**
  - Create, list, view and delete employee records
- **Attendance Tracking**
  - One mark per employee and day; re-marking a day replaces its status
- **Dashboard**
  - Headcount, today's present/absent counts and a 7-day trend

### 📦 Response Format
- JSON-based RESTful responses
- Errors carry an `error` message field

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::employee_attendance,
        crate::api::attendance::list_attendance,

        crate::api::dashboard::dashboard_stats
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            Attendance,
            AttendanceStatus,
            MarkAttendance,
            AttendanceWithName,
            DashboardStats,
            TrendPoint
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance tracking APIs"),
        (name = "Dashboard", description = "Dashboard statistics APIs"),
    )
)]
pub struct ApiDoc;
