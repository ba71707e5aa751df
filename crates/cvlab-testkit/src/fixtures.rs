//! Template and resume fixtures
//!
//! Templates are written in the legacy directive dialect the template store
//! serves. [`write_dir_store`] and [`write_json_store`] lay them out in the two
//! supported store formats.

use serde_json::json;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Two-column template covering the personal block, experiences and skills
pub const CLASSIC_TEMPLATE: &str = r#"<div class="cv-classic">
  <aside>
    <h1>{{ full_name }}</h1>
    <p class="title">{{ title }}</p>
    {% if email %}<p>{{ email }}</p>{% endif %}
    {% if phone %}<p>{{ phone }}</p>{% endif %}
    {% if skills_data %}
    <ul class="skills">
      {% for skill in skills_data %}<li>{{ skill.name }} <span style="width: {{ skill.level_percentage }}%"></span></li>{% endfor %}
    </ul>
    {% endif %}
  </aside>
  <main>
    {% if summary %}<section class="summary">{{nl2br summary}}</section>{% endif %}
    {% for exp in experience_data %}
    <article>
      <h3>{{ exp.position }} - {{ exp.company }}</h3>
      <p class="dates">{{ exp.start_date[:4] }} - {% if exp.is_current %}Présent{% endif %}{{ exp.end_date[:4] }}</p>
      <p>{{nl2br exp.description}}</p>
    </article>
    {% endfor %}
  </main>
</div>"#;

pub const CLASSIC_CSS: &str = ".cv-classic { display: flex; }\naside { width: 35%; }";

/// Education, languages and custom sections, mixing in canonical sections
pub const MODERN_TEMPLATE: &str = r#"<header><h1>{{full_name}}</h1><p>{{city}}</p></header>
{{#if (hasItems education_data)}}
<section>
  {% for edu in education_data %}<div>{{ edu.degree }}, {{ edu.institution }} ({{ edu.end_date[:4] }}) {{ edu.grade }}</div>{% endfor %}
</section>
{{/if}}
<section>{% for lang in languages_data %}<p>{{ lang.name }}: {{ lang.level }}</p>{% endfor %}</section>
{% for section in custom_sections %}<section><h2>{{ section.title }}</h2>{{preserveWhitespace section.content}}</section>{% endfor %}"#;

/// Calls a helper that does not exist
pub const BROKEN_TEMPLATE: &str = "<h1>{{ full_name }}</h1><p>{{uppercase title}}</p>";

/// Minimal resume in the editor's JSON shape
pub const SAMPLE_CV_JSON: &str = r#"{
  "personalInfo": {
    "firstName": "Ada",
    "lastName": "Lovelace",
    "email": "ada@example.com",
    "phone": "",
    "address": "",
    "city": "London",
    "postalCode": "",
    "jobTitle": "Analyst"
  },
  "professionalSummary": "Notes on the Analytical Engine",
  "experiences": [
    {
      "id": "1",
      "jobTitle": "Translator",
      "employer": "Taylor's Scientific Memoirs",
      "city": "London",
      "startDate": "1842-10",
      "endDate": "1843-09",
      "currentJob": false,
      "description": "Translation\nNotes A to G"
    }
  ],
  "education": [],
  "skills": [{ "id": "1", "name": "Mathematics", "level": 5 }],
  "languages": [{ "id": "1", "name": "English", "level": "Langue maternelle" }],
  "hobbies": [],
  "references": []
}"#;

/// Write `classic/`, `modern/` and `broken/` template directories under `root`
pub fn write_dir_store(root: &Path) -> io::Result<PathBuf> {
    let entries = [
        ("classic", "1", "Classic Navy", CLASSIC_TEMPLATE, Some(CLASSIC_CSS)),
        ("modern", "2", "Modern", MODERN_TEMPLATE, None),
        ("broken", "3", "Broken Helper", BROKEN_TEMPLATE, None),
    ];

    for (dir, id, name, html, css) in entries {
        let path = root.join(dir);
        fs::create_dir_all(&path)?;
        fs::write(path.join("template.html"), html)?;
        fs::write(
            path.join("meta.toml"),
            format!("id = \"{}\"\nname = \"{}\"\n", id, name),
        )?;
        if let Some(css) = css {
            fs::write(path.join("template.css"), css)?;
        }
    }

    Ok(root.to_path_buf())
}

/// Write the same three templates as a paginated API export at `path`
pub fn write_json_store(path: &Path) -> io::Result<PathBuf> {
    let export = json!({
        "count": 3,
        "results": [
            { "id": 1, "name": "Classic Navy", "template_html": CLASSIC_TEMPLATE, "template_css": CLASSIC_CSS },
            { "id": 2, "name": "Modern", "template_html": MODERN_TEMPLATE, "template_css": "" },
            { "id": 3, "name": "Broken Helper", "template_html": BROKEN_TEMPLATE, "template_css": "" },
        ]
    });
    fs::write(path, serde_json::to_string_pretty(&export)?)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temp_dir_in_workspace;

    #[test]
    fn test_write_dir_store() {
        let temp = temp_dir_in_workspace();
        let root = write_dir_store(temp.path()).unwrap();
        assert!(root.join("classic/template.css").is_file());
        assert!(root.join("modern/meta.toml").is_file());
        assert!(!root.join("modern/template.css").exists());
    }

    #[test]
    fn test_write_json_store() {
        let temp = temp_dir_in_workspace();
        let path = write_json_store(&temp.path().join("templates.json")).unwrap();
        let export: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(export["results"][0]["template_html"], CLASSIC_TEMPLATE);
    }
}
