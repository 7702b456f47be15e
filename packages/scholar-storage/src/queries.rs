use scholar_domain::ProfessorFilters;

use crate::{
	Error, Result,
	db::Db,
	models::{CandidateRow, NewProfessor, ProfessorRow},
};

const PROFESSOR_COLUMNS: &str = "\
id::bigint AS id, name, university, faculty, department, email, website, university_logo, \
research_interests";
const FILTER_CLAUSE: &str = "\
($1::text[] IS NULL OR university = ANY($1))
	AND ($2::text[] IS NULL OR faculty = ANY($2))
	AND ($3::text[] IS NULL OR department = ANY($3))";

pub async fn search_exact(
	db: &Db,
	term: &str,
	max_results: u32,
	filters: &ProfessorFilters,
) -> Result<Vec<CandidateRow>> {
	let rows = sqlx::query_as::<_, CandidateRow>(
		"SELECT * FROM search_profs_exact($1, $2, $3, $4, $5)",
	)
	.bind(term)
	.bind(to_i32(max_results, "max_results")?)
	.bind(filters.universities.as_deref())
	.bind(filters.faculties.as_deref())
	.bind(filters.departments.as_deref())
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn search_embeddings(
	db: &Db,
	embedding: &[f32],
	match_threshold: f32,
	max_results: u32,
	filters: &ProfessorFilters,
) -> Result<Vec<CandidateRow>> {
	if embedding.is_empty() {
		return Err(Error::InvalidArgument("Query embedding must not be empty.".to_string()));
	}

	let vec_text = vector_to_pg(embedding);
	let rows = sqlx::query_as::<_, CandidateRow>(
		"SELECT * FROM search_prof_embeddings($1::text::vector, $2, $3, $4, $5, $6)",
	)
	.bind(vec_text.as_str())
	.bind(f64::from(match_threshold))
	.bind(to_i32(max_results, "max_results")?)
	.bind(filters.universities.as_deref())
	.bind(filters.faculties.as_deref())
	.bind(filters.departments.as_deref())
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn count_professors(db: &Db, filters: &ProfessorFilters) -> Result<i64> {
	let sql = format!("SELECT count(*) FROM professors WHERE {FILTER_CLAUSE}");
	let count: i64 = sqlx::query_scalar(sql.as_str())
		.bind(filters.universities.as_deref())
		.bind(filters.faculties.as_deref())
		.bind(filters.departments.as_deref())
		.fetch_one(&db.pool)
		.await?;

	Ok(count)
}

/// Unranked listing ordered by id.
pub async fn list_professors(
	db: &Db,
	offset: u64,
	limit: u32,
	filters: &ProfessorFilters,
) -> Result<Vec<ProfessorRow>> {
	let offset = i64::try_from(offset)
		.map_err(|_| Error::InvalidArgument("offset is out of range.".to_string()))?;
	let sql = format!(
		"SELECT {PROFESSOR_COLUMNS} FROM professors WHERE {FILTER_CLAUSE} ORDER BY id LIMIT $4 OFFSET $5"
	);
	let rows = sqlx::query_as::<_, ProfessorRow>(sql.as_str())
		.bind(filters.universities.as_deref())
		.bind(filters.faculties.as_deref())
		.bind(filters.departments.as_deref())
		.bind(i64::from(limit))
		.bind(offset)
		.fetch_all(&db.pool)
		.await?;

	Ok(rows)
}

pub async fn insert_professor(db: &Db, professor: &NewProfessor) -> Result<i64> {
	let fields = &professor.fields;
	let embedding = professor.embedding.as_deref().map(vector_to_pg);
	let id: i64 = sqlx::query_scalar(
		"\
INSERT INTO professors (
	name,
	university,
	faculty,
	department,
	email,
	website,
	university_logo,
	research_interests,
	embedding
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9::text::vector)
RETURNING id::bigint",
	)
	.bind(fields.name.as_deref())
	.bind(fields.university.as_deref())
	.bind(fields.faculty.as_deref())
	.bind(fields.department.as_deref())
	.bind(fields.email.as_deref())
	.bind(fields.website.as_deref())
	.bind(fields.university_logo.as_deref())
	.bind(fields.research_interests.as_deref())
	.bind(embedding.as_deref())
	.fetch_one(&db.pool)
	.await?;

	Ok(id)
}

pub fn vector_to_pg(vec: &[f32]) -> String {
	let mut out = String::with_capacity(vec.len() * 8);

	out.push('[');

	for (i, value) in vec.iter().enumerate() {
		if i > 0 {
			out.push(',');
		}

		out.push_str(&value.to_string());
	}

	out.push(']');

	out
}

fn to_i32(value: u32, label: &str) -> Result<i32> {
	i32::try_from(value).map_err(|_| Error::InvalidArgument(format!("{label} is out of range.")))
}
