//! Bulk loading of departments, subjects and content from a TOML catalog.
//!
//! ```toml
//! [[department]]
//! name = "CSAI"
//!
//! [[department.subject]]
//! name = "OOP"
//! syllabus = """
//! Classes
//! Inheritance
//! """
//!
//! [[department.subject.content]]
//! title = "Classes"
//! content_type = "Theory"
//! notes = "..."
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::db::Repository;
use crate::error::Result;
use crate::models::{NewContent, NewSubject};

#[derive(Debug, Deserialize)]
pub struct Catalog {
    #[serde(default, rename = "department")]
    pub departments: Vec<CatalogDepartment>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogDepartment {
    pub name: String,
    #[serde(default, rename = "subject")]
    pub subjects: Vec<CatalogSubject>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogSubject {
    pub name: String,
    pub syllabus: Option<String>,
    #[serde(default, rename = "content")]
    pub contents: Vec<NewContent>,
}

/// Rows created by an import. Rows that already existed are not counted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub departments: usize,
    pub subjects: usize,
    pub contents: usize,
}

pub fn parse_catalog(text: &str) -> Result<Catalog> {
    Ok(toml::from_str(text)?)
}

pub async fn import_catalog_file(repository: &Repository, path: &Path) -> Result<ImportSummary> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let catalog = parse_catalog(&text)?;
    import_catalog(repository, catalog).await
}

/// Imports everything in `catalog`. Departments are matched by name,
/// subjects by name within their department and content by title within
/// its subject, so importing the same file twice changes nothing.
///
/// Rows are written one at a time, not in a single transaction. An import
/// that fails part way keeps what it already wrote; running it again after
/// fixing the file adds only the missing rows.
pub async fn import_catalog(repository: &Repository, catalog: Catalog) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();
    let mut known: HashSet<String> = repository
        .list_departments(None)
        .await?
        .into_iter()
        .map(|d| d.name)
        .collect();

    for department in catalog.departments {
        let department_id = repository.insert_department(&department.name).await?;
        if known.insert(department.name.trim().to_string()) {
            summary.departments += 1;
        }

        for subject in department.subjects {
            let subject_id = match repository.find_subject(department_id, &subject.name).await? {
                Some(id) => id,
                None => {
                    summary.subjects += 1;
                    repository
                        .insert_subject(NewSubject {
                            name: subject.name.clone(),
                            syllabus: subject.syllabus.clone(),
                            department_id,
                        })
                        .await?
                }
            };

            for content in subject.contents {
                if repository.find_content(subject_id, &content.title).await?.is_some() {
                    tracing::debug!(
                        "Skipping existing content {:?} in {}",
                        content.title,
                        subject.name
                    );
                    continue;
                }
                repository.insert_content(subject_id, content).await?;
                summary.contents += 1;
            }
        }
    }

    tracing::info!(
        "Imported {} departments, {} subjects, {} content items",
        summary.departments,
        summary.subjects,
        summary.contents
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{ContentFilter, ContentKind};
    use tokio_test::{assert_err, assert_ok};

    const CATALOG: &str = r#"
[[department]]
name = "CSAI"

[[department.subject]]
name = "OOP"
syllabus = """
Classes
Inheritance
"""

[[department.subject.content]]
title = "Classes"
content_type = "Theory"
youtube_link = "https://example.com/classes"
notes = "Objects bundle state and behaviour."

[[department.subject.content]]
title = "Lab 1"
content_type = "Lab"
problem_statement = "Model a bank account."
solution_code = "class Account {};"

[[department]]
name = "IOT"
"#;

    #[tokio::test]
    async fn test_import_is_idempotent() {
        let repo = Repository::in_memory().await.unwrap();

        let first = import_catalog(&repo, parse_catalog(CATALOG).unwrap()).await.unwrap();
        assert_eq!(
            first,
            ImportSummary {
                departments: 2,
                subjects: 1,
                contents: 2
            }
        );

        let second = import_catalog(&repo, parse_catalog(CATALOG).unwrap()).await.unwrap();
        assert_eq!(second, ImportSummary::default());

        let contents = repo.list_contents(ContentFilter::default()).await.unwrap();
        assert_eq!(contents.len(), 2);
        assert_eq!(contents[1].content_type, ContentKind::Lab);
        assert_eq!(contents[1].solution_code.as_deref(), Some("class Account {};"));
    }

    #[tokio::test]
    async fn test_import_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, CATALOG).unwrap();

        let repo = Repository::in_memory().await.unwrap();
        let summary = import_catalog_file(&repo, &path).await.unwrap();
        assert_eq!(summary.contents, 2);
    }

    #[test]
    fn test_unknown_content_type_is_rejected() {
        let text = r#"
[[department]]
name = "CSAI"
[[department.subject]]
name = "OOP"
[[department.subject.content]]
title = "Video"
content_type = "Video"
"#;
        assert!(matches!(parse_catalog(text), Err(AppError::TomlParse(_))));
    }

    #[tokio::test]
    async fn test_blank_department_name_fails() {
        let repo = Repository::in_memory().await.unwrap();
        let catalog = parse_catalog("[[department]]\nname = \"  \"\n").unwrap();
        assert!(matches!(
            import_catalog(&repo, catalog).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_import_is_completed_by_rerun() {
        let repo = Repository::in_memory().await.unwrap();
        let broken = format!("{CATALOG}\n[[department]]\nname = \"\"\n");
        assert_err!(import_catalog(&repo, parse_catalog(&broken).unwrap()).await);

        // Rows before the failure stay behind.
        assert_eq!(repo.list_departments(None).await.unwrap().len(), 2);
        assert_eq!(repo.list_contents(ContentFilter::default()).await.unwrap().len(), 2);

        let fixed = format!("{CATALOG}\n[[department]]\nname = \"ECE\"\n");
        let summary = assert_ok!(import_catalog(&repo, parse_catalog(&fixed).unwrap()).await);
        assert_eq!(
            summary,
            ImportSummary {
                departments: 1,
                subjects: 0,
                contents: 0
            }
        );
    }
}
