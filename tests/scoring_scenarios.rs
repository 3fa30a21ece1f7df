//! End-to-end scoring scenarios with stub providers

use async_trait::async_trait;
use resume_scorer::config::{Config, MatchMode, StyleStrategyKind};
use resume_scorer::input::InputManager;
use resume_scorer::output::formatter::{save_report_to_file, ReportGenerator};
use resume_scorer::output::report::{ReportMetadata, ScoreReport};
use resume_scorer::processing::document::normalize;
use resume_scorer::processing::lint::{LintIssue, LintProvider};
use resume_scorer::processing::recommendations::{recommend, WELL_PREPARED};
use resume_scorer::processing::scoring::{aggregate, CompositeScore, StyleMetrics};
use resume_scorer::processing::sections::{detect_sections, SectionKind, SectionTaxonomy};
use resume_scorer::processing::similarity::{score_similarity, SimilarityProvider};
use resume_scorer::processing::skill_matcher::SkillMatchResult;
use resume_scorer::{DocumentText, NormalizedText, Result, ScorerError, ScoringEngine, SkillVocabulary};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct StubSimilarity {
    score: f32,
    calls: AtomicUsize,
}

impl StubSimilarity {
    fn new(score: f32) -> Arc<Self> {
        Arc::new(Self {
            score,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SimilarityProvider for StubSimilarity {
    fn name(&self) -> &str {
        "stub-similarity"
    }

    async fn similarity(&self, _resume: &NormalizedText, _job: &NormalizedText) -> Result<f32> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.score)
    }
}

struct StubLinter;

#[async_trait]
impl LintProvider for StubLinter {
    fn name(&self) -> &str {
        "stub-linter"
    }

    async fn lint(&self, _text: &DocumentText) -> Result<Vec<LintIssue>> {
        Ok(vec![LintIssue {
            message: "Possible spelling mistake found.".to_string(),
            rule_id: "MORFOLOGIK_RULE_EN_US".to_string(),
        }])
    }
}

#[tokio::test]
async fn scenario_a_skill_partition() {
    let provider = StubSimilarity::new(0.5);
    let engine = ScoringEngine::new(provider.clone());
    let vocabulary = SkillVocabulary::new(["python", "sql", "docker", "aws"]);

    let result = engine
        .analyze(
            &DocumentText::from("python developer with aws and docker experience"),
            &DocumentText::from("looking for python, sql, docker expert"),
            &vocabulary,
        )
        .await
        .unwrap();

    assert_eq!(result.skill_match.matched_skills, vec!["python", "docker", "aws"]);
    assert_eq!(result.skill_match.missing_skills, vec!["sql"]);
    assert_eq!(result.composite_score.content, 75);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn scenario_b_empty_resume_is_not_a_zero_score() {
    let provider = StubSimilarity::new(0.9);

    let empty = normalize("");
    let job = normalize("looking for python, sql, docker expert");
    let similarity = score_similarity(&empty, &job, provider.as_ref()).await.unwrap();
    assert_eq!(similarity, None);

    let err = ScoringEngine::new(provider.clone())
        .analyze(
            &DocumentText::default(),
            &DocumentText::from("looking for python, sql, docker expert"),
            &SkillVocabulary::new(["python"]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ScorerError::EmptyInput(_)));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn scenario_b_punctuation_only_resume_is_empty() {
    let err = ScoringEngine::new(StubSimilarity::new(0.9))
        .analyze(
            &DocumentText::from("--- *** ---"),
            &DocumentText::from("python role"),
            &SkillVocabulary::new(["python"]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ScorerError::EmptyInput(_)));
}

#[test]
fn scenario_c_section_detection() {
    let resume = normalize(
        "Education: BSc Computer Science. Experience: 3 years backend work at Acme. Skills: rust, sql",
    );
    let report = detect_sections(&resume, &SectionTaxonomy::standard());

    assert_eq!(
        report.found_sections,
        vec![SectionKind::Education, SectionKind::Experience, SectionKind::Skills]
    );
    assert_eq!(
        report.missing_sections,
        vec![SectionKind::Projects, SectionKind::Summary, SectionKind::Certifications]
    );
    assert_eq!(report.presence_ratio, 50);
}

#[test]
fn scenario_d_well_prepared_resume() {
    let scores = CompositeScore {
        tailoring: 80,
        content: 100,
        style: 86,
        ats_compatibility: 100,
        sections: 100,
    };
    let none: &[String] = &[];

    assert_eq!(recommend(&scores, none, none), vec![WELL_PREPARED.to_string()]);
}

#[tokio::test]
async fn scenario_d_through_the_engine() {
    let resume = DocumentText::from(
        "Summary: backend engineer. Education: BSc. Experience: Acme. \
         Projects: scheduler. Skills: rust, sql. Certifications: AWS.",
    );
    let job = DocumentText::from("rust and sql engineer");

    let result = ScoringEngine::new(StubSimilarity::new(0.9))
        .analyze(&resume, &job, &SkillVocabulary::new(["rust", "sql"]))
        .await
        .unwrap();

    assert_eq!(result.section_report.presence_ratio, 100);
    assert_eq!(result.recommendations, vec![WELL_PREPARED.to_string()]);
}

#[tokio::test]
async fn scenario_e_empty_vocabulary() {
    let provider = StubSimilarity::new(0.9);

    let err = ScoringEngine::new(provider.clone())
        .analyze(
            &DocumentText::from("python developer"),
            &DocumentText::from("python role"),
            &SkillVocabulary::parse(" , \n ,"),
        )
        .await
        .unwrap_err();

    assert!(err.is_warning());
    assert_eq!(provider.calls(), 0);

    let score = aggregate(
        Some(0.9),
        &SkillMatchResult::default(),
        0,
        &Default::default(),
        StyleMetrics {
            bullet_score: 86,
            ats_score: 100,
        },
    )
    .unwrap();
    assert_eq!(score.content, 0);
}

#[tokio::test]
async fn test_word_boundary_mode_avoids_false_positives() {
    let vocabulary = SkillVocabulary::new(["java"]);
    let resume = DocumentText::from("javascript developer");
    let job = DocumentText::from("java developer");

    let substring = ScoringEngine::new(StubSimilarity::new(0.5))
        .analyze(&resume, &job, &vocabulary)
        .await
        .unwrap();
    assert_eq!(substring.skill_match.matched_skills, vec!["java"]);

    let bounded = ScoringEngine::new(StubSimilarity::new(0.5))
        .with_match_mode(MatchMode::WordBoundary)
        .analyze(&resume, &job, &vocabulary)
        .await
        .unwrap();
    assert_eq!(bounded.skill_match.missing_skills, vec!["java"]);
}

#[tokio::test]
async fn test_fixture_pipeline_with_default_config() {
    let mut input = InputManager::new();
    let resume = input
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let job = input
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();
    let vocabulary = SkillVocabulary::parse("React, TypeScript, Kubernetes, AWS, PostgreSQL");

    let config = Config::default();
    assert_eq!(config.scoring.style_strategy, StyleStrategyKind::Heuristic);
    let engine = ScoringEngine::from_config(&config, StubSimilarity::new(0.82), Some(Arc::new(StubLinter)));

    let result = engine.analyze(&resume, &job, &vocabulary).await.unwrap();

    assert_eq!(result.skill_match.matched_skills, vec!["react", "typescript", "postgresql"]);
    assert_eq!(result.skill_match.missing_skills, vec!["kubernetes", "aws"]);
    assert_eq!(
        result.composite_score,
        CompositeScore {
            tailoring: 82,
            content: 60,
            style: 100,
            ats_compatibility: 100,
            sections: 67,
        }
    );
    assert_eq!(
        result.recommendations,
        vec![
            "Add these missing skills: kubernetes, aws.",
            "Add missing sections: Projects, Certifications.",
        ]
    );

    let feedback = result.feedback.clone().unwrap();
    assert_eq!(feedback.grammar_issues.map(|issues| issues.len()), Some(1));
    assert!(feedback.formatting_issues.is_empty());

    let report = ScoreReport::new(
        result,
        ReportMetadata::new("tests/fixtures/sample_resume.txt", "tests/fixtures/sample_job.txt", engine.similarity_model()),
    );
    let markdown = ReportGenerator::with_options(false, true, true, true)
        .generate_report(&report, resume_scorer::config::OutputFormat::Markdown)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("reports").join("sample_score.md");
    save_report_to_file(&markdown, &target).unwrap();

    let saved = std::fs::read_to_string(&target).unwrap();
    assert!(saved.contains("**Resume Score:** 82%"));
    assert!(saved.contains("MORFOLOGIK_RULE_EN_US"));
}

#[test]
fn test_config_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume-scorer").join("config.toml");

    let created = Config::load_from(&path).unwrap();
    assert!(path.exists());
    assert_eq!(created.scoring.match_mode, MatchMode::Substring);

    let mut config = created;
    config.set("scoring.match_mode", "word_boundary").unwrap();
    config.set("feedback.enabled", "false").unwrap();
    config.save_to(&path).unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.scoring.match_mode, MatchMode::WordBoundary);
    assert!(!reloaded.feedback.enabled);
}
