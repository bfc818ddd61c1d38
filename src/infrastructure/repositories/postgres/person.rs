use super::{super::map_sqlx, article::escape_like};
use crate::domain::common::{ListWindow, PersonId, Slug};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::person::{NewPerson, Person, PersonRepository, PersonUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const PERSON_COLUMNS: &str = "id, full_name, slug, description, created_at";

#[derive(Clone)]
pub struct PostgresPersonRepository {
    pool: PgPool,
}

impl PostgresPersonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PersonRow {
    id: i64,
    full_name: String,
    slug: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PersonRow> for Person {
    type Error = DomainError;

    fn try_from(row: PersonRow) -> Result<Self, Self::Error> {
        Ok(Person {
            id: PersonId::new(row.id)?,
            full_name: row.full_name,
            slug: Slug::new(row.slug)?,
            description: row.description,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl PersonRepository for PostgresPersonRepository {
    async fn insert(&self, person: NewPerson) -> DomainResult<Person> {
        let row = sqlx::query_as::<_, PersonRow>(&format!(
            "INSERT INTO people (full_name, slug, description, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {PERSON_COLUMNS}"
        ))
        .bind(person.full_name)
        .bind(person.slug.into_inner())
        .bind(person.description)
        .bind(person.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Person::try_from(row)
    }

    async fn update(&self, update: PersonUpdate) -> DomainResult<Person> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE people SET id = id");
        if let Some(full_name) = update.full_name {
            builder.push(", full_name = ");
            builder.push_bind(full_name);
        }
        if let Some(slug) = update.slug {
            builder.push(", slug = ");
            builder.push_bind(slug.into_inner());
        }
        if let Some(description) = update.description {
            builder.push(", description = ");
            builder.push_bind(description);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(update.id));
        builder.push(" RETURNING ");
        builder.push(PERSON_COLUMNS);

        builder
            .build_query_as::<PersonRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("person not found".into()))
            .and_then(Person::try_from)
    }

    async fn delete(&self, id: PersonId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM people WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("person not found".into()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: PersonId) -> DomainResult<Option<Person>> {
        sqlx::query_as::<_, PersonRow>(&format!(
            "SELECT {PERSON_COLUMNS} FROM people WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .map(Person::try_from)
        .transpose()
    }

    async fn list(&self, search: Option<&str>, window: ListWindow) -> DomainResult<Vec<Person>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(PERSON_COLUMNS);
        builder.push(" FROM people");
        if let Some(search) = search {
            builder.push(" WHERE full_name ILIKE ");
            builder.push_bind(format!("%{}%", escape_like(search)));
        }
        builder.push(" ORDER BY full_name, id LIMIT ");
        builder.push_bind(i64::from(window.limit));
        builder.push(" OFFSET ");
        builder.push_bind(i64::from(window.offset));

        builder
            .build_query_as::<PersonRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(Person::try_from)
            .collect()
    }
}
