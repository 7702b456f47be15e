/// Exact-value filters shared by every search path. `None` means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProfessorFilters {
	#[serde(default)]
	pub universities: Option<Vec<String>>,
	#[serde(default)]
	pub faculties: Option<Vec<String>>,
	#[serde(default)]
	pub departments: Option<Vec<String>>,
}
impl ProfessorFilters {
	/// Trims values, drops blanks and duplicates, and turns empty lists into `None`.
	pub fn normalized(self) -> Self {
		Self {
			universities: normalize_values(self.universities),
			faculties: normalize_values(self.faculties),
			departments: normalize_values(self.departments),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.universities.is_none() && self.faculties.is_none() && self.departments.is_none()
	}
}

fn normalize_values(values: Option<Vec<String>>) -> Option<Vec<String>> {
	let mut out: Vec<String> = Vec::new();

	for value in values.unwrap_or_default() {
		let trimmed = value.trim();

		if trimmed.is_empty() || out.iter().any(|existing| existing == trimmed) {
			continue;
		}

		out.push(trimmed.to_string());
	}

	if out.is_empty() { None } else { Some(out) }
}
