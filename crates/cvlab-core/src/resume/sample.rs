//! Fixed synthetic resume used to preview and batch-render templates

use super::{
    Certification, CvData, Education, Experience, Hobby, Language, PersonalInfo, Project, Skill,
};

fn s(value: &str) -> String {
    value.to_string()
}

/// Jean Dupont, senior full-stack developer
///
/// The data is constant so that every batch run produces byte-identical
/// documents for an unchanged template.
pub fn sample_cv() -> CvData {
    CvData {
        personal_info: PersonalInfo {
            photo: None,
            first_name: s("Jean"),
            last_name: s("Dupont"),
            email: s("jean.dupont@email.com"),
            phone: s("+33 6 12 34 56 78"),
            address: s("123 Rue de la Paix"),
            city: s("Paris"),
            postal_code: s("75001"),
            job_title: s("Développeur Full Stack Senior"),
            date_of_birth: Some(s("1990-05-15")),
            nationality: Some(s("Française")),
            driving_license: Some(s("Permis B")),
            linkedin: Some(s("https://linkedin.com/in/jeandupont")),
            website: Some(s("https://jeandupont.fr")),
            github: Some(s("https://github.com/jeandupont")),
        },
        professional_summary: s(
            "Développeur passionné avec plus de 8 ans d'expérience dans le développement \
             d'applications web modernes. Expert en React, Node.js et Python. Capacité \
             démontrée à diriger des équipes techniques et à livrer des projets complexes \
             dans les délais impartis.",
        ),
        experiences: vec![
            Experience {
                id: s("exp-1"),
                job_title: s("Lead Developer"),
                employer: s("TechCorp SAS"),
                city: s("Paris, France"),
                start_date: s("2020-03"),
                end_date: String::new(),
                current_job: true,
                description: s(
                    "• Direction technique d'une équipe de 5 développeurs\n\
                     • Architecture et développement d'une plateforme SaaS (React, Node.js, PostgreSQL)\n\
                     • Mise en place de CI/CD et bonnes pratiques DevOps\n\
                     • Amélioration des performances de 40%",
                ),
                work_mode: Some(s("Hybride")),
            },
            Experience {
                id: s("exp-2"),
                job_title: s("Développeur Full Stack"),
                employer: s("StartupLab"),
                city: s("Lyon, France"),
                start_date: s("2017-06"),
                end_date: s("2020-02"),
                current_job: false,
                description: s(
                    "• Développement de features front-end avec React et Redux\n\
                     • Création d'APIs RESTful avec Node.js et Express\n\
                     • Intégration de services tiers (Stripe, SendGrid)\n\
                     • Participation active aux code reviews",
                ),
                work_mode: None,
            },
            Experience {
                id: s("exp-3"),
                job_title: s("Développeur Junior"),
                employer: s("WebAgency"),
                city: s("Marseille, France"),
                start_date: s("2015-09"),
                end_date: s("2017-05"),
                current_job: false,
                description: s(
                    "• Développement de sites web responsive\n\
                     • Maintenance et évolution d'applications existantes\n\
                     • Collaboration avec les équipes design et marketing",
                ),
                work_mode: None,
            },
        ],
        education: vec![
            Education {
                id: s("edu-1"),
                degree: s("Master en Informatique"),
                school: s("Université Paris-Saclay"),
                field_of_study: Some(s("Génie Logiciel")),
                city: s("Paris, France"),
                start_date: s("2013-09"),
                end_date: s("2015-06"),
                current_study: false,
                grade: Some(s("Mention Bien")),
                description: s("Spécialisation en développement web et architecture logicielle"),
                work_mode: None,
            },
            Education {
                id: s("edu-2"),
                degree: s("Licence en Informatique"),
                school: s("Université de Lyon"),
                field_of_study: Some(s("Informatique")),
                city: s("Lyon, France"),
                start_date: s("2010-09"),
                end_date: s("2013-06"),
                current_study: false,
                grade: Some(s("Mention Assez Bien")),
                description: s("Fondamentaux en programmation et systèmes"),
                work_mode: None,
            },
        ],
        skills: [
            ("JavaScript / TypeScript", 5),
            ("React / Next.js", 5),
            ("Node.js / Express", 4),
            ("Python / Django", 4),
            ("PostgreSQL / MongoDB", 4),
            ("Docker / Kubernetes", 3),
            ("AWS / GCP", 3),
            ("Git / CI/CD", 4),
        ]
        .iter()
        .enumerate()
        .map(|(i, (name, level))| Skill {
            id: format!("skill-{}", i + 1),
            name: s(name),
            level: *level,
            category: None,
        })
        .collect(),
        languages: [
            ("Français", "Langue maternelle"),
            ("Anglais", "Courant (C1)"),
            ("Espagnol", "Intermédiaire (B1)"),
        ]
        .iter()
        .enumerate()
        .map(|(i, (name, level))| Language {
            id: format!("lang-{}", i + 1),
            name: s(name),
            level: s(level),
        })
        .collect(),
        hobbies: [
            "Développement open source",
            "Photographie",
            "Randonnée",
            "Échecs",
        ]
        .iter()
        .enumerate()
        .map(|(i, name)| Hobby {
            id: format!("hobby-{}", i + 1),
            name: s(name),
        })
        .collect(),
        references: Vec::new(),
        certifications: vec![
            Certification {
                id: s("cert-1"),
                name: s("AWS Certified Solutions Architect"),
                issuer: s("Amazon Web Services"),
                date: s("2022-03"),
                url: None,
            },
            Certification {
                id: s("cert-2"),
                name: s("Professional Scrum Master I"),
                issuer: s("Scrum.org"),
                date: s("2021-11"),
                url: None,
            },
        ],
        projects: vec![Project {
            id: s("proj-1"),
            name: s("Plateforme E-commerce"),
            description: s(
                "Développement d'une plateforme e-commerce complète avec gestion des stocks \
                 et paiements",
            ),
            technologies: s("React, Node.js, PostgreSQL, Stripe"),
            url: Some(s("https://github.com/jeandupont/ecommerce")),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::build_context;

    #[test]
    fn test_sample_is_stable() {
        assert_eq!(sample_cv(), sample_cv());
    }

    #[test]
    fn test_sample_context() {
        let context = build_context(&sample_cv());
        assert_eq!(context["full_name"], "Jean Dupont");
        assert_eq!(context["experience_data"].as_array().unwrap().len(), 3);
        assert_eq!(context["experience_data"][0]["end_date"], "");
        assert_eq!(context["education_data"][0]["grade"], "Mention Bien");
        assert_eq!(context["skills_data"][0]["level"], "expert");
        assert_eq!(context["skills_data"][5]["level_percentage"], 60);
        assert_eq!(context["languages_data"][1]["level_percentage"], 80);
        assert_eq!(context["certifications_data"][1]["issuer"], "Scrum.org");
        assert_eq!(
            context["custom_sections"][0]["content"],
            "Développement open source, Photographie, Randonnée, Échecs"
        );
    }

    #[test]
    fn test_sample_round_trips_through_json() {
        let json = serde_json::to_string(&sample_cv()).unwrap();
        assert_eq!(CvData::from_json(&json).unwrap(), sample_cv());
    }
}
