//! Registration persistence operations.
//!
//! Operates on the `students` and `student_courses` tables. A registration
//! is written as one student row plus one course row per selected course,
//! inside a single transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use studentreg_core::{NormalizedRegistration, RegistrationId, StudentDetails};
use uuid::Uuid;

use crate::store::{PersistenceError, RegistrationStore, StoredRegistration};

/// Postgres-backed [`RegistrationStore`].
#[derive(Debug, Clone)]
pub struct PgRegistrationStore {
    pool: PgPool,
}

impl PgRegistrationStore {
    /// Wrap an initialized pool (migrations already applied).
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationStore for PgRegistrationStore {
    async fn save(
        &self,
        registration: &NormalizedRegistration,
    ) -> Result<RegistrationId, PersistenceError> {
        let id = RegistrationId::new();
        insert(&self.pool, id, registration).await?;
        Ok(id)
    }

    async fn get(&self, id: RegistrationId) -> Result<Option<StoredRegistration>, PersistenceError> {
        let Some(row) = fetch_student(&self.pool, *id.as_uuid())
            .await
            .map_err(PersistenceError::from_read)?
        else {
            return Ok(None);
        };
        let courses = fetch_courses(&self.pool, *id.as_uuid())
            .await
            .map_err(PersistenceError::from_read)?;
        row.into_record(courses).map(Some)
    }

    fn is_durable(&self) -> bool {
        true
    }
}

/// Insert a student row and its course rows atomically.
///
/// Any failure drops `tx` uncommitted, which rolls the whole write back.
pub async fn insert(
    pool: &PgPool,
    id: RegistrationId,
    registration: &NormalizedRegistration,
) -> Result<(), sqlx::Error> {
    let (admission_year, previous_school, student_id, year_of_study) = match &registration.details {
        StudentDetails::New {
            admission_year,
            previous_school,
        } => (Some(*admission_year), Some(previous_school.as_str()), None, None),
        StudentDetails::Continuing {
            student_id,
            year_of_study,
        } => (None, None, Some(student_id.as_str()), Some(year_of_study.as_str())),
    };

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO students (id, full_name, program, email, phone_number, student_type,
         admission_year, previous_school, student_id, year_of_study, dues_paid, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW())",
    )
    .bind(*id.as_uuid())
    .bind(&registration.full_name)
    .bind(&registration.program)
    .bind(&registration.email)
    .bind(&registration.phone_number)
    .bind(registration.student_type().as_str())
    .bind(admission_year)
    .bind(previous_school)
    .bind(student_id)
    .bind(year_of_study)
    .bind(registration.dues_paid)
    .execute(&mut *tx)
    .await?;

    for (position, course) in registration.courses.iter().enumerate() {
        sqlx::query(
            "INSERT INTO student_courses (registration_id, position, course_name)
             VALUES ($1, $2, $3)",
        )
        .bind(*id.as_uuid())
        .bind(position as i32)
        .bind(course)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    tracing::debug!(registration_id = %id, courses = registration.courses.len(), "registration committed");
    Ok(())
}

async fn fetch_student(pool: &PgPool, id: Uuid) -> Result<Option<StudentRow>, sqlx::Error> {
    sqlx::query_as::<_, StudentRow>(
        "SELECT id, full_name, program, email, phone_number, student_type,
         admission_year, previous_school, student_id, year_of_study, dues_paid, created_at
         FROM students WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

async fn fetch_courses(pool: &PgPool, id: Uuid) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT course_name FROM student_courses
         WHERE registration_id = $1 ORDER BY position",
    )
    .bind(id)
    .fetch_all(pool)
    .await
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct StudentRow {
    id: Uuid,
    full_name: String,
    program: String,
    email: String,
    phone_number: String,
    student_type: String,
    admission_year: Option<i32>,
    previous_school: Option<String>,
    student_id: Option<String>,
    year_of_study: Option<String>,
    dues_paid: bool,
    created_at: DateTime<Utc>,
}

impl StudentRow {
    fn into_record(self, courses: Vec<String>) -> Result<StoredRegistration, PersistenceError> {
        let id = RegistrationId::from_uuid(self.id);
        let details = match (
            self.student_type.as_str(),
            self.admission_year,
            self.previous_school,
            self.student_id,
            self.year_of_study,
        ) {
            ("new", Some(admission_year), Some(previous_school), _, _) => StudentDetails::New {
                admission_year,
                previous_school,
            },
            ("continuing", _, _, Some(student_id), Some(year_of_study)) => {
                StudentDetails::Continuing {
                    student_id,
                    year_of_study,
                }
            }
            (other, ..) => {
                return Err(PersistenceError::Corrupt {
                    id,
                    reason: format!("incomplete fields for student_type {other:?}"),
                })
            }
        };

        Ok(StoredRegistration {
            id,
            created_at: self.created_at,
            registration: NormalizedRegistration {
                full_name: self.full_name,
                program: self.program,
                email: self.email,
                phone_number: self.phone_number,
                courses,
                dues_paid: self.dues_paid,
                details,
            },
        })
    }
}
