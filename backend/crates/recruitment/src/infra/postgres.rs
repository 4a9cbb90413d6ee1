//! PostgreSQL Repository Implementations

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use kernel::email::Email;
use kernel::id::{ApplicationId, JobPostingId, QuestionId, TestResultId};
use platform::password::HashedPassword;
use sqlx::PgPool;
use sqlx::types::Json;

use crate::domain::entities::{
    Application, AptitudeQuestion, JobPosting, JobPostingDraft, NewApplication, NewQuestion,
    NewTestResult, QuestionSnapshot, TestResult,
};
use crate::domain::repository::{ApplicationRepository, AptitudeRepository, JobPostingRepository};
use crate::domain::value_objects::{Cgpa, Difficulty, MobileNumber};
use crate::error::{RecruitmentError, RecruitmentResult};

const APPLICATION_COLUMNS: &str = "application_id, first_name, last_name, address, mobile, email, \
     graduation, cgpa, position, resume_file, created_at";
const POSTING_COLUMNS: &str =
    "job_posting_id, title, description, location, created_at, updated_at";
const QUESTION_COLUMNS: &str = "question_id, question, options, correct_answer, category, \
     difficulty, is_active, created_at";
const RESULT_COLUMNS: &str = "test_result_id, email, questions, answers, score, total, \
     percentage, elapsed_seconds, created_at";

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgRecruitmentRepository {
    pool: PgPool,
}

impl PgRecruitmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

// ============================================================================
// Application Repository Implementation
// ============================================================================

impl ApplicationRepository for PgRecruitmentRepository {
    async fn find_application_by_email(
        &self,
        email: &Email,
    ) -> RecruitmentResult<Option<Application>> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ApplicationRow::into_application))
    }

    async fn insert_application_with_credential(
        &self,
        application: &NewApplication,
        credential: &HashedPassword,
    ) -> RecruitmentResult<Application> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, ApplicationRow>(&format!(
            r#"
            INSERT INTO applications (
                first_name,
                last_name,
                address,
                mobile,
                email,
                graduation,
                cgpa,
                position,
                resume_file
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(&application.first_name)
        .bind(&application.last_name)
        .bind(&application.address)
        .bind(application.mobile.as_str())
        .bind(application.email.as_str())
        .bind(&application.graduation)
        .bind(application.cgpa.value())
        .bind(&application.position)
        .bind(&application.resume_file)
        .fetch_one(&mut *tx)
        .await;

        let row = match inserted {
            Ok(row) => row,
            Err(e) if is_unique_violation(&e) => return Err(RecruitmentError::DuplicateApplicant),
            Err(e) => return Err(e.into()),
        };

        let credential_inserted = sqlx::query(
            "INSERT INTO aptitude_credentials (email, password_hash) VALUES ($1, $2)",
        )
        .bind(application.email.as_str())
        .bind(credential.as_phc_string())
        .execute(&mut *tx)
        .await;

        match credential_inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => return Err(RecruitmentError::DuplicateApplicant),
            Err(e) => return Err(e.into()),
        }

        tx.commit().await?;

        let application = row.into_application();
        tracing::info!(
            application_id = application.id.as_i64(),
            "Application and aptitude credential stored"
        );
        Ok(application)
    }

    async fn list_applications(&self) -> RecruitmentResult<Vec<Application>> {
        let rows = sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications ORDER BY created_at DESC, application_id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ApplicationRow::into_application).collect())
    }
}

// ============================================================================
// JobPosting Repository Implementation
// ============================================================================

impl JobPostingRepository for PgRecruitmentRepository {
    async fn create_posting(&self, draft: &JobPostingDraft) -> RecruitmentResult<JobPosting> {
        let inserted = sqlx::query_as::<_, JobPostingRow>(&format!(
            r#"
            INSERT INTO job_postings (title, description, location)
            VALUES ($1, $2, $3)
            RETURNING {POSTING_COLUMNS}
            "#
        ))
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(&draft.location)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(row) => Ok(row.into_job_posting()),
            Err(e) if is_unique_violation(&e) => Err(RecruitmentError::Conflict(
                "A job posting with this title and location already exists".into(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn upsert_posting(&self, draft: &JobPostingDraft) -> RecruitmentResult<JobPosting> {
        // Returns no row when the stored description is unchanged
        let changed = sqlx::query_as::<_, JobPostingRow>(&format!(
            r#"
            INSERT INTO job_postings (title, description, location)
            VALUES ($1, $2, $3)
            ON CONFLICT (title, location) DO UPDATE
                SET description = EXCLUDED.description,
                    updated_at = now()
                WHERE job_postings.description IS DISTINCT FROM EXCLUDED.description
            RETURNING {POSTING_COLUMNS}
            "#
        ))
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(&draft.location)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = changed {
            return Ok(row.into_job_posting());
        }

        let row = sqlx::query_as::<_, JobPostingRow>(&format!(
            "SELECT {POSTING_COLUMNS} FROM job_postings WHERE title = $1 AND location = $2"
        ))
        .bind(&draft.title)
        .bind(&draft.location)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_job_posting())
    }

    async fn list_postings(&self) -> RecruitmentResult<Vec<JobPosting>> {
        let rows = sqlx::query_as::<_, JobPostingRow>(&format!(
            "SELECT {POSTING_COLUMNS} FROM job_postings ORDER BY created_at DESC, job_posting_id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(JobPostingRow::into_job_posting).collect())
    }
}

// ============================================================================
// Aptitude Repository Implementation
// ============================================================================

impl AptitudeRepository for PgRecruitmentRepository {
    async fn create_question(&self, question: &NewQuestion) -> RecruitmentResult<AptitudeQuestion> {
        let row = sqlx::query_as::<_, QuestionRow>(&format!(
            r#"
            INSERT INTO aptitude_questions (
                question,
                options,
                correct_answer,
                category,
                difficulty
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING {QUESTION_COLUMNS}
            "#
        ))
        .bind(&question.question)
        .bind(Json(&question.options))
        .bind(&question.correct_answer)
        .bind(&question.category)
        .bind(question.difficulty.code())
        .fetch_one(&self.pool)
        .await?;

        row.into_question()
    }

    async fn list_questions(&self, active_only: bool) -> RecruitmentResult<Vec<AptitudeQuestion>> {
        let rows = sqlx::query_as::<_, QuestionRow>(&format!(
            r#"
            SELECT {QUESTION_COLUMNS}
            FROM aptitude_questions
            WHERE is_active OR NOT $1
            ORDER BY created_at DESC, question_id DESC
            "#
        ))
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(QuestionRow::into_question).collect()
    }

    async fn find_questions_by_ids(
        &self,
        ids: &[QuestionId],
    ) -> RecruitmentResult<Vec<AptitudeQuestion>> {
        let ids: Vec<i64> = ids.iter().map(QuestionId::as_i64).collect();
        let rows = sqlx::query_as::<_, QuestionRow>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM aptitude_questions WHERE question_id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(QuestionRow::into_question).collect()
    }

    async fn set_question_active(
        &self,
        id: QuestionId,
        is_active: bool,
    ) -> RecruitmentResult<Option<AptitudeQuestion>> {
        let row = sqlx::query_as::<_, QuestionRow>(&format!(
            "UPDATE aptitude_questions SET is_active = $2 WHERE question_id = $1 RETURNING {QUESTION_COLUMNS}"
        ))
        .bind(id.as_i64())
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?;

        row.map(QuestionRow::into_question).transpose()
    }

    async fn delete_question(&self, id: QuestionId) -> RecruitmentResult<bool> {
        let deleted = sqlx::query("DELETE FROM aptitude_questions WHERE question_id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn insert_result(&self, result: &NewTestResult) -> RecruitmentResult<TestResult> {
        let row = sqlx::query_as::<_, TestResultRow>(&format!(
            r#"
            INSERT INTO test_results (
                email,
                questions,
                answers,
                score,
                total,
                percentage,
                elapsed_seconds
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {RESULT_COLUMNS}
            "#
        ))
        .bind(result.email.as_str())
        .bind(Json(&result.questions))
        .bind(Json(&result.answers))
        .bind(result.score)
        .bind(result.total)
        .bind(result.percentage)
        .bind(result.elapsed_seconds)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_test_result())
    }

    async fn list_results(&self) -> RecruitmentResult<Vec<TestResult>> {
        let rows = sqlx::query_as::<_, TestResultRow>(&format!(
            "SELECT {RESULT_COLUMNS} FROM test_results ORDER BY created_at DESC, test_result_id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TestResultRow::into_test_result).collect())
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct ApplicationRow {
    application_id: i64,
    first_name: String,
    last_name: String,
    address: String,
    mobile: String,
    email: String,
    graduation: String,
    cgpa: f64,
    position: String,
    resume_file: String,
    created_at: DateTime<Utc>,
}

impl ApplicationRow {
    fn into_application(self) -> Application {
        Application {
            id: ApplicationId::from_i64(self.application_id),
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            mobile: MobileNumber::from_db(self.mobile),
            email: Email::from_db(self.email),
            graduation: self.graduation,
            cgpa: Cgpa::from_db(self.cgpa),
            position: self.position,
            resume_file: self.resume_file,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct JobPostingRow {
    job_posting_id: i64,
    title: String,
    description: Option<String>,
    location: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl JobPostingRow {
    fn into_job_posting(self) -> JobPosting {
        JobPosting {
            id: JobPostingId::from_i64(self.job_posting_id),
            title: self.title,
            description: self.description,
            location: self.location,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct QuestionRow {
    question_id: i64,
    question: String,
    options: Json<Vec<String>>,
    correct_answer: String,
    category: String,
    difficulty: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl QuestionRow {
    fn into_question(self) -> RecruitmentResult<AptitudeQuestion> {
        let difficulty = Difficulty::from_code(&self.difficulty).ok_or_else(|| {
            RecruitmentError::Internal(format!(
                "Unknown difficulty in database: {}",
                self.difficulty
            ))
        })?;

        Ok(AptitudeQuestion {
            id: QuestionId::from_i64(self.question_id),
            question: self.question,
            options: self.options.0,
            correct_answer: self.correct_answer,
            category: self.category,
            difficulty,
            is_active: self.is_active,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TestResultRow {
    test_result_id: i64,
    email: String,
    questions: Json<Vec<QuestionSnapshot>>,
    answers: Json<BTreeMap<i64, Option<String>>>,
    score: i32,
    total: i32,
    percentage: f64,
    elapsed_seconds: i32,
    created_at: DateTime<Utc>,
}

impl TestResultRow {
    fn into_test_result(self) -> TestResult {
        TestResult {
            id: TestResultId::from_i64(self.test_result_id),
            email: Email::from_db(self.email),
            questions: self.questions.0,
            answers: self.answers.0,
            score: self.score,
            total: self.total,
            percentage: self.percentage,
            elapsed_seconds: self.elapsed_seconds,
            created_at: self.created_at,
        }
    }
}
