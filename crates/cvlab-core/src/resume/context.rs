use serde_json::{json, Value};

use super::{
    Certification, CvData, Education, Experience, Language, Project, Reference, Skill,
};

const HOBBIES_TITLE: &str = "Centres d'intérêt";
const REFERENCES_TITLE: &str = "Références";

/// Map a resume onto the template context vocabulary
///
/// Every key is always present. Absent optional fields become `""` and
/// absent collections become `[]`, so templates only ever test truthiness.
pub fn build_context(cv: &CvData) -> Value {
    let info = &cv.personal_info;

    json!({
        "full_name": cv.full_name(),
        "email": info.email,
        "phone": info.phone,
        "address": info.address,
        "city": info.city,
        "postal_code": info.postal_code,
        "website": text(&info.website),
        "linkedin_url": text(&info.linkedin),
        "github_url": text(&info.github),
        "photo": text(&info.photo),
        "date_of_birth": text(&info.date_of_birth),
        "nationality": text(&info.nationality),
        "driving_license": text(&info.driving_license),
        "title": info.job_title,
        "summary": cv.professional_summary,
        "experience_data": cv.experiences.iter().map(experience).collect::<Vec<_>>(),
        "education_data": cv.education.iter().map(education).collect::<Vec<_>>(),
        "skills_data": cv.skills.iter().map(skill).collect::<Vec<_>>(),
        "languages_data": cv.languages.iter().map(language).collect::<Vec<_>>(),
        "certifications_data": cv.certifications.iter().map(certification).collect::<Vec<_>>(),
        "projects_data": cv.projects.iter().map(project).collect::<Vec<_>>(),
        "custom_sections": custom_sections(cv),
    })
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn experience(exp: &Experience) -> Value {
    json!({
        "position": exp.job_title,
        "company": exp.employer,
        "location": exp.city,
        "start_date": exp.start_date,
        "end_date": if exp.current_job { "" } else { exp.end_date.as_str() },
        "is_current": exp.current_job,
        "description": exp.description,
        "work_mode": text(&exp.work_mode),
    })
}

fn education(edu: &Education) -> Value {
    json!({
        "degree": edu.degree,
        "institution": edu.school,
        "field_of_study": text(&edu.field_of_study),
        "location": edu.city,
        "start_date": edu.start_date,
        "end_date": if edu.current_study { "" } else { edu.end_date.as_str() },
        "is_current": edu.current_study,
        "grade": text(&edu.grade),
        "description": edu.description,
        "work_mode": text(&edu.work_mode),
    })
}

fn skill(skill: &Skill) -> Value {
    json!({
        "name": skill.name,
        "level": skill_label(skill.level),
        "level_percentage": skill_percentage(skill.level),
        "category": text(&skill.category),
    })
}

fn language(lang: &Language) -> Value {
    json!({
        "name": lang.name,
        "level": lang.level,
        "level_percentage": language_percentage(&lang.level),
    })
}

fn certification(cert: &Certification) -> Value {
    json!({
        "name": cert.name,
        "issuer": cert.issuer,
        "date": cert.date,
        "url": text(&cert.url),
    })
}

fn project(project: &Project) -> Value {
    json!({
        "name": project.name,
        "description": project.description,
        "technologies": project.technologies,
        "url": text(&project.url),
    })
}

/// Categorical label for a 1-5 rating
pub fn skill_label(level: u8) -> &'static str {
    match level {
        0..=1 => "beginner",
        2 => "intermediate",
        3..=4 => "advanced",
        _ => "expert",
    }
}

/// `level / 5 * 100`
pub fn skill_percentage(level: u8) -> u32 {
    u32::from(level) * 100 / 5
}

/// Percentage for a language label; a trailing CEFR note like " (C1)" is ignored
pub fn language_percentage(label: &str) -> u32 {
    let name = label.split(" (").next().unwrap_or(label).trim();
    match name {
        "Débutant" => 20,
        "Intermédiaire" => 40,
        "Avancé" => 60,
        "Courant" => 80,
        "Bilingue" | "Langue maternelle" => 100,
        _ => 0,
    }
}

fn custom_sections(cv: &CvData) -> Vec<Value> {
    let mut sections = Vec::new();

    if !cv.hobbies.is_empty() {
        let names: Vec<&str> = cv.hobbies.iter().map(|h| h.name.as_str()).collect();
        sections.push(json!({ "title": HOBBIES_TITLE, "content": names.join(", ") }));
    }

    if !cv.references.is_empty() {
        let entries: Vec<String> = cv.references.iter().map(reference).collect();
        sections.push(json!({ "title": REFERENCES_TITLE, "content": entries.join("\n\n") }));
    }

    sections
}

fn reference(r: &Reference) -> String {
    format!(
        "{} - {} chez {}\n{} | {}",
        r.name, r.position, r.company, r.email, r.phone
    )
}

#[cfg(test)]
mod tests {
    use super::super::{Hobby, PersonalInfo};
    use super::*;

    fn walk_for_null(value: &Value, path: &str) {
        match value {
            Value::Null => panic!("null leaked into context at {}", path),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    walk_for_null(item, &format!("{}[{}]", path, i));
                }
            }
            Value::Object(map) => {
                for (key, item) in map {
                    walk_for_null(item, &format!("{}.{}", path, key));
                }
            }
            _ => {}
        }
    }

    #[test]
    fn test_empty_resume_has_full_vocabulary() {
        let context = build_context(&CvData::default());
        walk_for_null(&context, "$");

        for key in [
            "full_name",
            "email",
            "linkedin_url",
            "github_url",
            "date_of_birth",
            "title",
            "summary",
        ] {
            assert_eq!(context[key], "", "key {}", key);
        }
        for key in [
            "experience_data",
            "education_data",
            "skills_data",
            "languages_data",
            "certifications_data",
            "projects_data",
            "custom_sections",
        ] {
            assert_eq!(context[key], json!([]), "key {}", key);
        }
    }

    #[test]
    fn test_personal_fields() {
        let cv = CvData {
            personal_info: PersonalInfo {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                job_title: "Analyst".to_string(),
                linkedin: Some("https://linkedin.com/in/ada".to_string()),
                ..Default::default()
            },
            professional_summary: "Engines".to_string(),
            ..Default::default()
        };
        let context = build_context(&cv);
        assert_eq!(context["full_name"], "Ada Lovelace");
        assert_eq!(context["title"], "Analyst");
        assert_eq!(context["summary"], "Engines");
        assert_eq!(context["linkedin_url"], "https://linkedin.com/in/ada");
        assert_eq!(context["website"], "");
    }

    #[test]
    fn test_current_job_has_empty_end_date() {
        let cv = CvData {
            experiences: vec![Experience {
                job_title: "Lead".to_string(),
                employer: "Acme".to_string(),
                start_date: "2020-03".to_string(),
                end_date: "2023-01".to_string(),
                current_job: true,
                ..Default::default()
            }],
            ..Default::default()
        };
        let exp = &build_context(&cv)["experience_data"][0];
        assert_eq!(exp["position"], "Lead");
        assert_eq!(exp["company"], "Acme");
        assert_eq!(exp["end_date"], "");
        assert_eq!(exp["is_current"], true);
        assert_eq!(exp["work_mode"], "");
    }

    #[test]
    fn test_skill_levels() {
        assert_eq!(skill_label(1), "beginner");
        assert_eq!(skill_label(2), "intermediate");
        assert_eq!(skill_label(3), "advanced");
        assert_eq!(skill_label(4), "advanced");
        assert_eq!(skill_label(5), "expert");
        assert_eq!(skill_percentage(3), 60);
        assert_eq!(skill_percentage(5), 100);

        let cv = CvData {
            skills: vec![Skill {
                name: "Rust".to_string(),
                level: 4,
                ..Default::default()
            }],
            ..Default::default()
        };
        let skill = &build_context(&cv)["skills_data"][0];
        assert_eq!(skill["level"], "advanced");
        assert_eq!(skill["level_percentage"], 80);
    }

    #[test]
    fn test_language_percentage() {
        assert_eq!(language_percentage("Courant (C1)"), 80);
        assert_eq!(language_percentage("Langue maternelle"), 100);
        assert_eq!(language_percentage("Intermédiaire (B1)"), 40);
        assert_eq!(language_percentage("Fluent-ish"), 0);
    }

    #[test]
    fn test_custom_sections() {
        let cv = CvData {
            hobbies: vec![
                Hobby {
                    name: "Chess".to_string(),
                    ..Default::default()
                },
                Hobby {
                    name: "Hiking".to_string(),
                    ..Default::default()
                },
            ],
            references: vec![Reference {
                name: "Bob".to_string(),
                position: "CTO".to_string(),
                company: "Acme".to_string(),
                email: "bob@acme.io".to_string(),
                phone: "0102".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let sections = build_context(&cv)["custom_sections"].clone();
        assert_eq!(
            sections,
            json!([
                { "title": "Centres d'intérêt", "content": "Chess, Hiking" },
                { "title": "Références", "content": "Bob - CTO chez Acme\nbob@acme.io | 0102" }
            ])
        );
    }
}
