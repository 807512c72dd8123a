use blitzday::infrastructure::observability::sanitize_prompt;

#[test]
fn given_blank_prompt_when_sanitizing_then_placeholder() {
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_long_prompt_when_sanitizing_then_truncated_with_total_length() {
    let prompt = "a".repeat(150);

    let sanitized = sanitize_prompt(&prompt);

    assert!(sanitized.starts_with(&"a".repeat(100)));
    assert!(sanitized.ends_with("... (150 chars total)"));
}

#[test]
fn given_credentials_in_prompt_when_sanitizing_then_values_redacted() {
    let sanitized = sanitize_prompt("use password=hunter2 and Bearer abc.def please");

    assert_eq!(
        sanitized,
        "use password=[REDACTED] and Bearer [REDACTED] please"
    );
}
