//! Seed note for projects auto-created in the uncategorized namespace

pub const SMALL_NOTE_FILENAME: &str = "small.md";

/// Title from the last path segment: `no-category/side-quest` → `Side Quest`
pub fn uncategorized_title(project: &str) -> String {
    let topic = project.rsplit('/').next().unwrap_or(project);
    topic
        .split(['-', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn render_small_note(project: &str, last_date: &str) -> String {
    format!(
        "# {title}\n\n**Uncategorized session**\n\nSessions: 1 | Last: {last_date}\n\n## Context\nThis session didn't match any project and wasn't explicit research.\nIf it becomes important, move it to a proper project folder.\n\n---\n*\"remember\" = medium.md | \"ultra remember\" = large.md*\n",
        title = uncategorized_title(project),
    )
}
