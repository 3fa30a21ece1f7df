//! Integration tests for document extraction

use resume_scorer::input::InputManager;
use resume_scorer::ScorerError;
use std::path::Path;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.as_str().contains("John Doe"));
    assert!(text.as_str().contains("Software Engineer"));
    assert!(text.as_str().contains("React"));
    assert!(text.as_str().contains("Node.js"));
    // whitespace runs are collapsed, layout lines are kept
    assert!(!text.as_str().contains('\n'));
    assert!(!text.as_str().contains("  "));
    assert!(text.lines().iter().any(|line| line == "SKILLS"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.as_str().contains("John Doe"));
    assert!(text.as_str().contains("Software Engineer"));
    assert!(text.as_str().contains("React"));
    assert!(text.as_str().contains("Node.js"));
    // Should not contain markdown formatting
    assert!(!text.as_str().contains("**"));
    assert!(!text.as_str().contains("##"));
    assert!(text.lines().iter().any(|line| line.starts_with("• Built React")));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_cache_can_be_disabled() {
    let mut manager = InputManager::new().with_cache(false);
    let path = Path::new("tests/fixtures/sample_job.txt");

    manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(ScorerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(ScorerError::Extraction(ref m)) if m.contains("nonexistent.txt")));
    assert_eq!(manager.cache_size(), 0);
}
