pub mod environment;
pub mod paths;

pub use environment::{get_claude_dir, get_goldfish_home, home_user_name};
pub use paths::{
    format_path_with_tilde, safe_open_file, truncate_chars, validate_file_size,
    validate_project_name,
};
