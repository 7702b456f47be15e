pub fn render_schema(vector_dim: u32) -> String {
	let init = include_str!("../../../sql/init.sql");
	let expanded = expand_includes(init);

	expanded.replace("<VECTOR_DIM>", &vector_dim.to_string())
}

/// Splits a script on `;`, leaving semicolons inside quotes, dollar-quoted bodies and `--`
/// comments alone. Empty statements are dropped.
pub fn split_statements(sql: &str) -> Vec<String> {
	let mut out = Vec::new();
	let mut current = String::new();
	let mut in_quote = false;
	let mut in_dollar = false;
	let mut in_comment = false;
	let mut chars = sql.chars().peekable();

	while let Some(ch) = chars.next() {
		if in_comment {
			if ch == '\n' {
				in_comment = false;

				current.push(ch);
			}

			continue;
		}

		match ch {
			'-' if !in_quote && !in_dollar && chars.peek() == Some(&'-') => {
				in_comment = true;

				continue;
			},
			'\'' if !in_dollar => in_quote = !in_quote,
			'$' if !in_quote && chars.peek() == Some(&'$') => {
				chars.next();
				current.push_str("$$");

				in_dollar = !in_dollar;

				continue;
			},
			';' if !in_quote && !in_dollar => {
				push_statement(&mut out, &current);
				current.clear();

				continue;
			},
			_ => {},
		}

		current.push(ch);
	}

	push_statement(&mut out, &current);

	out
}

fn push_statement(out: &mut Vec<String>, statement: &str) {
	let trimmed = statement.trim();

	if !trimmed.is_empty() {
		out.push(trimmed.to_string());
	}
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"00_extensions.sql" => out.push_str(include_str!("../../../sql/00_extensions.sql")),
				"tables/001_professors.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_professors.sql")),
				"functions/001_search_profs_exact.sql" => out
					.push_str(include_str!("../../../sql/functions/001_search_profs_exact.sql")),
				"functions/002_search_prof_embeddings.sql" => out.push_str(include_str!(
					"../../../sql/functions/002_search_prof_embeddings.sql"
				)),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renders_vector_dimension_everywhere() {
		let sql = render_schema(1_024);

		assert!(!sql.contains("<VECTOR_DIM>"));
		assert!(!sql.contains("\\ir "));
		assert!(sql.contains("vector(1024)"));
	}

	#[test]
	fn keeps_function_bodies_whole() {
		let statements = split_statements(&render_schema(8));
		let exact = statements
			.iter()
			.find(|statement| statement.contains("FUNCTION search_profs_exact"))
			.expect("Missing search_profs_exact.");

		assert!(exact.ends_with("$$"));
		assert!(statements.iter().any(|statement| statement.contains("search_prof_embeddings")));
		assert!(statements.iter().all(|statement| !statement.starts_with("--")));
	}

	#[test]
	fn splits_on_top_level_semicolons_only() {
		let statements =
			split_statements("SELECT ';'; -- note; here\nSELECT $$ a; b $$;\n\nSELECT 1");

		assert_eq!(statements, vec!["SELECT ';'", "SELECT $$ a; b $$", "SELECT 1"]);
	}
}
