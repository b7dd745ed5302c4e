use serde::Deserialize;

use crate::application::ports::paper_repository::PaperRepository;
use crate::domain::papers::paper::{NewPaper, PaperDetails, Scope, SubjectId, Visibility};

/// Owner of the bundled catalogue.
pub const SYSTEM_SUBJECT: SubjectId = 0;

const SAMPLE_PAPERS: &str = include_str!("sample_papers.json");

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SamplePaper {
    id: String,
    title: String,
    authors: String,
    r#abstract: String,
    cover_image: String,
    published_year: i32,
    field: String,
    classifications: Vec<String>,
    doi: Option<String>,
    journal: Option<String>,
}

fn sample_papers() -> anyhow::Result<Vec<NewPaper>> {
    let rows: Vec<SamplePaper> = serde_json::from_str(SAMPLE_PAPERS)?;
    Ok(rows
        .into_iter()
        .map(|row| NewPaper {
            id: Some(row.id),
            details: PaperDetails {
                title: row.title,
                authors: row.authors,
                r#abstract: row.r#abstract,
                cover_image: row.cover_image,
                published_year: row.published_year,
                field: row.field,
                classifications: row.classifications,
                doi: row.doi,
                journal: row.journal,
            },
            visibility: Visibility::shared(SYSTEM_SUBJECT, Scope::Everyone, None),
        })
        .collect())
}

/// Loads the bundled catalogue into `repo`, returning how many papers were stored.
pub async fn seed_sample_papers<R>(repo: &R) -> anyhow::Result<usize>
where
    R: PaperRepository + ?Sized,
{
    let papers = sample_papers()?;
    let count = papers.len();
    for paper in papers {
        repo.insert(paper).await?;
    }
    tracing::info!(count, "sample_papers_seeded");
    Ok(count)
}
