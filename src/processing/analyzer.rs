//! Scoring engine: runs every signal for one resume/job pair and assembles
//! the analysis result

use crate::config::{Config, MatchMode, StyleStrategyKind};
use crate::error::{Result, ScorerError};
use crate::processing::document::{DocumentText, NormalizedText};
use crate::processing::lint::{LintIssue, LintProvider};
use crate::processing::recommendations::RecommendationRules;
use crate::processing::scoring::{aggregate, CompositeScore, StyleMetrics};
use crate::processing::sections::{detect_sections, SectionReport, SectionTaxonomy};
use crate::processing::similarity::{score_similarity, SimilarityProvider};
use crate::processing::skill_matcher::{near_misses, NearMiss, SkillMatchResult, SkillMatcher, SkillVocabulary};
use crate::processing::style::{formatting_issues, AtsLayoutHeuristic, BulletStyleHeuristic, FixedScore, MetricStrategy};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_SIMILARITY_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_GRAMMAR_ISSUES: usize = 10;

/// Everything computed for one analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub composite_score: CompositeScore,
    pub skill_match: SkillMatchResult,
    pub section_report: SectionReport,
    pub recommendations: Vec<String>,
    /// Resume phrases that look like misspelled missing skills
    pub near_misses: Vec<NearMiss>,
    /// Present only when feedback is enabled
    pub feedback: Option<Feedback>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// `None` when no linter is configured or the linter failed
    pub grammar_issues: Option<Vec<LintIssue>>,
    pub formatting_issues: Vec<String>,
}

pub struct ScoringEngine {
    similarity: Arc<dyn SimilarityProvider>,
    linter: Option<Arc<dyn LintProvider>>,
    matcher: SkillMatcher,
    taxonomy: SectionTaxonomy,
    style_strategy: Box<dyn MetricStrategy>,
    ats_strategy: Box<dyn MetricStrategy>,
    rules: RecommendationRules,
    similarity_timeout: Duration,
    feedback_enabled: bool,
    max_grammar_issues: usize,
}

impl ScoringEngine {
    /// Engine with the reference behaviour: substring matching, the
    /// standard section taxonomy, fixed Style (86) and ATS (100) scores,
    /// default thresholds and no feedback.
    pub fn new(similarity: Arc<dyn SimilarityProvider>) -> Self {
        Self {
            similarity,
            linter: None,
            matcher: SkillMatcher::default(),
            taxonomy: SectionTaxonomy::standard(),
            style_strategy: Box::new(FixedScore(86)),
            ats_strategy: Box::new(FixedScore(100)),
            rules: RecommendationRules::default(),
            similarity_timeout: DEFAULT_SIMILARITY_TIMEOUT,
            feedback_enabled: false,
            max_grammar_issues: DEFAULT_MAX_GRAMMAR_ISSUES,
        }
    }

    pub fn from_config(
        config: &Config,
        similarity: Arc<dyn SimilarityProvider>,
        linter: Option<Arc<dyn LintProvider>>,
    ) -> Self {
        let scoring = &config.scoring;
        let (style_strategy, ats_strategy): (Box<dyn MetricStrategy>, Box<dyn MetricStrategy>) =
            match scoring.style_strategy {
                StyleStrategyKind::Fixed => (
                    Box::new(FixedScore(scoring.fixed_style)),
                    Box::new(FixedScore(scoring.fixed_ats)),
                ),
                StyleStrategyKind::Heuristic => (Box::new(BulletStyleHeuristic), Box::new(AtsLayoutHeuristic)),
            };

        let mut engine = Self::new(similarity)
            .with_match_mode(scoring.match_mode)
            .with_style_strategy(style_strategy)
            .with_ats_strategy(ats_strategy)
            .with_rules(RecommendationRules::from(&scoring.thresholds))
            .with_similarity_timeout(Duration::from_secs(config.similarity.timeout_secs))
            .with_feedback(config.feedback.enabled)
            .with_max_grammar_issues(config.feedback.max_grammar_issues);

        if let Some(linter) = linter {
            engine = engine.with_linter(linter);
        }
        engine
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.matcher = SkillMatcher::new(mode);
        self
    }

    pub fn with_taxonomy(mut self, taxonomy: SectionTaxonomy) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    pub fn with_style_strategy(mut self, strategy: Box<dyn MetricStrategy>) -> Self {
        self.style_strategy = strategy;
        self
    }

    pub fn with_ats_strategy(mut self, strategy: Box<dyn MetricStrategy>) -> Self {
        self.ats_strategy = strategy;
        self
    }

    pub fn with_rules(mut self, rules: RecommendationRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_similarity_timeout(mut self, timeout: Duration) -> Self {
        self.similarity_timeout = timeout;
        self
    }

    pub fn with_linter(mut self, linter: Arc<dyn LintProvider>) -> Self {
        self.linter = Some(linter);
        self
    }

    pub fn with_feedback(mut self, enabled: bool) -> Self {
        self.feedback_enabled = enabled;
        self
    }

    pub fn with_max_grammar_issues(mut self, max: usize) -> Self {
        self.max_grammar_issues = max;
        self
    }

    pub fn similarity_model(&self) -> &str {
        self.similarity.name()
    }

    /// Score a resume against a job description for the given skills.
    ///
    /// Fails with `ValidationWarning` for an empty vocabulary (before any
    /// provider call), `EmptyInput` when either text normalizes to nothing
    /// and `ProviderFailure` when similarity cannot be computed in time.
    pub async fn analyze(
        &self,
        resume: &DocumentText,
        job: &DocumentText,
        vocabulary: &SkillVocabulary,
    ) -> Result<AnalysisResult> {
        vocabulary.validate()?;

        let resume_text = resume.normalize();
        let job_text = job.normalize();
        debug!(
            "Normalized resume: {} chars, job description: {} chars, skills: {}",
            resume_text.as_str().len(),
            job_text.as_str().len(),
            vocabulary.len()
        );
        debug!(
            "Style via {}, ATS via {}, matching {:?}",
            self.style_strategy.name(),
            self.ats_strategy.name(),
            self.matcher.mode()
        );

        let keyword_signals = async {
            let skill_match = self.matcher.match_skills(&resume_text, &job_text, vocabulary);
            let near_misses = near_misses(&resume_text, &skill_match.missing_skills);
            let section_report = detect_sections(&resume_text, &self.taxonomy);
            (skill_match, near_misses, section_report)
        };

        let (similarity, (skill_match, near_misses, section_report), feedback) = tokio::join!(
            self.timed_similarity(&resume_text, &job_text),
            keyword_signals,
            self.collect_feedback(resume, &resume_text),
        );

        let similarity = similarity?;
        debug!("Similarity from {}: {:?}", self.similarity.name(), similarity);

        let style = StyleMetrics {
            bullet_score: i32::from(self.style_strategy.score(resume)),
            ats_score: i32::from(self.ats_strategy.score(resume)),
        };

        let composite_score = aggregate(
            similarity,
            &skill_match,
            vocabulary.len(),
            &section_report,
            style,
        )?;

        let recommendations = self.rules.recommend(
            &composite_score,
            &skill_match.missing_skills,
            &section_report.missing_names(),
        );

        debug!("Composite score: {:?}", composite_score);

        Ok(AnalysisResult {
            composite_score,
            skill_match,
            section_report,
            recommendations,
            near_misses,
            feedback,
        })
    }

    async fn timed_similarity(&self, resume: &NormalizedText, job: &NormalizedText) -> Result<Option<f32>> {
        let scoring = score_similarity(resume, job, self.similarity.as_ref());

        match tokio::time::timeout(self.similarity_timeout, scoring).await {
            Ok(result) => result,
            Err(_) => Err(ScorerError::ProviderFailure(format!(
                "Similarity provider '{}' did not respond within {:?}",
                self.similarity.name(),
                self.similarity_timeout
            ))),
        }
    }

    async fn collect_feedback(&self, resume: &DocumentText, normalized: &NormalizedText) -> Option<Feedback> {
        if !self.feedback_enabled {
            return None;
        }

        let grammar_issues = match &self.linter {
            Some(linter) if !normalized.is_empty() => match linter.lint(resume).await {
                Ok(mut issues) => {
                    issues.truncate(self.max_grammar_issues);
                    Some(issues)
                }
                Err(e) => {
                    warn!("Grammar check via {} failed, skipping: {}", linter.name(), e);
                    None
                }
            },
            _ => None,
        };

        Some(Feedback {
            grammar_issues,
            formatting_issues: formatting_issues(resume),
        })
    }
}
