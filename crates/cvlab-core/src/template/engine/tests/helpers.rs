//! Shared test helpers for template engine tests

use serde_json::{json, Value};

/// Create a simple test context with basic scalar values
pub(super) fn simple_context() -> Value {
    json!({
        "title": "My Title",
        "count": 42,
        "price": 9.99,
        "enabled": true,
        "empty": "",
        "zero": 0,
        "date": "2026-01-15"
    })
}

/// Create a resume-shaped context with arrays of records
pub(super) fn resume_context() -> Value {
    json!({
        "full_name": "Jean Dupont",
        "title": "Développeur",
        "summary": "Line one\nLine two",
        "experience_data": [
            {"position": "Lead", "company": "Acme", "start_date": "2020-01-15", "end_date": "2022-12-31", "is_current": false},
            {"position": "Dev", "company": "Initech", "start_date": "2018-06-01", "end_date": "", "is_current": true}
        ],
        "skills_data": [
            {"name": "Rust", "level": "expert", "level_percentage": 100},
            {"name": "SQL", "level": "advanced", "level_percentage": 80}
        ],
        "languages_data": [],
        "custom_sections": [
            {"title": "Centres d'intérêt", "content": "Chess, Running"}
        ]
    })
}
