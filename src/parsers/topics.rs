//! Keyword-based topic tags shown in session reports

use std::collections::BTreeSet;

const MESSAGE_TOPICS: [(&str, &str); 30] = [
    ("api", "API Development"),
    ("auth", "Authentication"),
    ("database", "Database"),
    ("postgres", "PostgreSQL"),
    ("supabase", "Supabase"),
    ("react", "React"),
    ("next", "Next.js"),
    ("typescript", "TypeScript"),
    ("python", "Python"),
    ("fastapi", "FastAPI"),
    ("docker", "Docker"),
    ("git", "Git"),
    ("deploy", "Deployment"),
    ("test", "Testing"),
    ("debug", "Debugging"),
    ("refactor", "Refactoring"),
    ("css", "CSS/Styling"),
    ("tailwind", "Tailwind CSS"),
    ("ui", "UI Design"),
    ("ux", "UX Design"),
    ("setup", "Setup/Configuration"),
    ("install", "Installation"),
    ("config", "Configuration"),
    ("mcp", "MCP Servers"),
    ("claude", "Claude/AI"),
    ("agent", "AI Agents"),
    ("scrape", "Web Scraping"),
    ("automation", "Automation"),
    ("square", "Square API"),
    ("payment", "Payments"),
];

// Substring of a lowercased file path -> topic
const PATH_TOPICS: [(&str, &str); 9] = [
    (".py", "Python"),
    (".ts", "TypeScript"),
    (".tsx", "TypeScript"),
    (".js", "JavaScript"),
    (".jsx", "JavaScript"),
    ("component", "React Components"),
    ("api", "API Development"),
    ("test", "Testing"),
    (".md", "Documentation"),
];

/// Tag a session from its first message and the files it touched.
///
/// Matching is plain case-insensitive substring search, so short keywords such as `ui`
/// or `git` also fire inside longer words.
pub fn extract_topics<'a, I>(message: &str, files: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let message = message.to_lowercase();
    let mut topics: BTreeSet<String> = MESSAGE_TOPICS
        .iter()
        .filter(|(keyword, _)| message.contains(keyword))
        .map(|(_, topic)| topic.to_string())
        .collect();

    for file in files {
        let file = file.to_lowercase();
        topics.extend(
            PATH_TOPICS
                .iter()
                .filter(|(needle, _)| file.contains(needle))
                .map(|(_, topic)| topic.to_string()),
        );
    }

    topics
}
