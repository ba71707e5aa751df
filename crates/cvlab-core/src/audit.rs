//! Which context variables a template uses
//!
//! The template is translated and compiled, then every path it evaluates is
//! resolved against its enclosing `#each` sections. A field counts for a
//! collection only when it is read from that collection's items, so
//! `{{name}}` inside `skills_data` does not mark the language name as used.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::template::engine::{Expr, PathExpr, PathRoot};
use crate::template::{translate_with_diagnostics, Diagnostic, Engine, TemplateError};

struct Category {
    key: &'static str,
    label: &'static str,
    collection: Option<&'static str>,
    fields: &'static [&'static str],
}

const VOCABULARY: &[Category] = &[
    Category {
        key: "personal_info",
        label: "Personal information",
        collection: None,
        fields: &[
            "full_name",
            "title",
            "email",
            "phone",
            "address",
            "city",
            "postal_code",
            "photo",
            "date_of_birth",
            "nationality",
            "driving_license",
            "summary",
            "linkedin_url",
            "github_url",
            "website",
        ],
    },
    Category {
        key: "experiences",
        label: "Experiences",
        collection: Some("experience_data"),
        fields: &[
            "position",
            "company",
            "location",
            "start_date",
            "end_date",
            "is_current",
            "description",
            "work_mode",
        ],
    },
    Category {
        key: "education",
        label: "Education",
        collection: Some("education_data"),
        fields: &[
            "degree",
            "field_of_study",
            "institution",
            "location",
            "start_date",
            "end_date",
            "is_current",
            "grade",
            "description",
            "work_mode",
        ],
    },
    Category {
        key: "skills",
        label: "Skills",
        collection: Some("skills_data"),
        fields: &["name", "level", "level_percentage"],
    },
    Category {
        key: "languages",
        label: "Languages",
        collection: Some("languages_data"),
        fields: &["name", "level", "level_percentage"],
    },
    Category {
        key: "certifications",
        label: "Certifications",
        collection: Some("certifications_data"),
        fields: &["name", "issuer", "date", "url"],
    },
    Category {
        key: "projects",
        label: "Projects",
        collection: Some("projects_data"),
        fields: &["name", "description", "technologies", "url"],
    },
    Category {
        key: "custom_sections",
        label: "Custom sections",
        collection: Some("custom_sections"),
        fields: &["title", "content"],
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAudit {
    pub key: String,
    pub label: String,
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    pub categories: Vec<CategoryAudit>,
    pub total: usize,
    pub found: usize,
    pub missing: usize,
    /// Top-level names outside the context vocabulary
    pub unknown: Vec<String>,
    /// Directives the translator kept verbatim
    pub warnings: Vec<Diagnostic>,
}

impl AuditReport {
    /// Share of expected variables found, in percent
    pub fn coverage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.found as f64 / self.total as f64 * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.missing == 0
    }
}

#[derive(Debug, Default)]
struct Usage {
    top_level: BTreeSet<String>,
    /// Collection name → item fields read inside it
    fields: BTreeMap<String, BTreeSet<String>>,
}

impl Usage {
    fn record(&mut self, path: &PathExpr, scope: &[&Expr]) {
        let parents = match path.root {
            PathRoot::Data => return,
            PathRoot::Root => 0,
            PathRoot::Scope { parents } | PathRoot::This { parents } => parents,
        };
        let Some(head) = path.segments.first() else {
            return;
        };

        let depth = if path.root == PathRoot::Root {
            0
        } else {
            scope.len().saturating_sub(parents)
        };
        if depth == 0 {
            self.top_level.insert(head.clone());
        } else if let Some(list) = collection_name(scope[depth - 1]) {
            self.fields.entry(list.to_string()).or_default().insert(head.clone());
        }
    }

    fn uses(&self, category: &Category, variable: &str) -> bool {
        match category.collection {
            None => self.top_level.contains(variable),
            Some(collection) if collection == variable => self.top_level.contains(variable),
            Some(collection) => self
                .fields
                .get(collection)
                .is_some_and(|fields| fields.contains(variable)),
        }
    }
}

/// Single-segment list expression of an `#each`
fn collection_name(list: &Expr) -> Option<&str> {
    match list {
        Expr::Path(path) => match (&path.root, path.segments.as_slice()) {
            (PathRoot::Scope { .. } | PathRoot::Root, [name]) => Some(name.as_str()),
            _ => None,
        },
        _ => None,
    }
}

/// Report the vocabulary variables `source` references and misses
pub fn audit(source: &str) -> Result<AuditReport, TemplateError> {
    let translation = translate_with_diagnostics(source);
    let template = Engine::new().compile(&translation.output)?;

    let mut usage = Usage::default();
    template.for_each_expr_in_scope(&mut |expr, scope| {
        expr.for_each_path(&mut |path| usage.record(path, scope));
    });

    let mut categories = Vec::with_capacity(VOCABULARY.len());
    let mut known = BTreeSet::new();
    let (mut total, mut found) = (0, 0);

    for category in VOCABULARY {
        let expected = category.collection.into_iter().chain(category.fields.iter().copied());
        match category.collection {
            Some(collection) => {
                known.insert(collection);
            }
            None => known.extend(category.fields.iter().copied()),
        }

        let (hits, misses): (Vec<&str>, Vec<&str>) =
            expected.partition(|variable| usage.uses(category, variable));
        total += hits.len() + misses.len();
        found += hits.len();

        categories.push(CategoryAudit {
            key: category.key.to_string(),
            label: category.label.to_string(),
            found: hits.into_iter().map(str::to_string).collect(),
            missing: misses.into_iter().map(str::to_string).collect(),
        });
    }

    let unknown = usage
        .top_level
        .iter()
        .filter(|name| !known.contains(name.as_str()))
        .cloned()
        .collect();

    Ok(AuditReport {
        categories,
        total,
        found,
        missing: total - found,
        unknown,
        warnings: translation.diagnostics,
    })
}
