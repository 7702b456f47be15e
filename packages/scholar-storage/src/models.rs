/// Descriptive professor columns shared by every query shape.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct ProfessorFields {
	pub name: Option<String>,
	pub university: Option<String>,
	pub faculty: Option<String>,
	pub department: Option<String>,
	pub email: Option<String>,
	pub website: Option<String>,
	pub university_logo: Option<String>,
	pub research_interests: Option<Vec<String>>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfessorRow {
	pub id: i64,
	#[sqlx(flatten)]
	pub fields: ProfessorFields,
}

/// A row returned by one of the search functions. Nothing here is validated yet.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CandidateRow {
	pub id: Option<i64>,
	pub similarity: Option<f64>,
	#[sqlx(flatten)]
	pub fields: ProfessorFields,
}

#[derive(Debug, Clone)]
pub struct NewProfessor {
	pub fields: ProfessorFields,
	pub embedding: Option<Vec<f32>>,
}
