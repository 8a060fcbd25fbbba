use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": "EMP-001",
        "name": "John Doe",
        "email": "john.doe@company.com",
        "department": "Engineering",
        "created_at": "2024-01-01T09:30:00"
    })
)]
pub struct Employee {
    /// Externally assigned employee code
    #[schema(example = "EMP-001")]
    pub id: String,

    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(
        example = "2024-01-01T09:30:00",
        value_type = String,
        format = "date-time"
    )]
    pub created_at: NaiveDateTime,
}
