pub fn render_schema(text_config: &str) -> String {
	let init = include_str!("../../../sql/init.sql");
	let expanded = expand_includes(init);

	expanded.replace("<TEXT_CONFIG>", text_config)
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"tables/001_agents.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_agents.sql")),
				"tables/002_analytics_tracker.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_analytics_tracker.sql")),
				"tables/003_featured_agent.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_featured_agent.sql")),
				"tables/004_install_tracker.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_install_tracker.sql")),
				"functions/001_agents_search.sql" =>
					out.push_str(include_str!("../../../sql/functions/001_agents_search.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}
