/// A diagnostic log in the staged form the agent server emits: a list of
/// `(stage, [lines])` pairs.
pub fn staged_log_json() -> &'static str {
    return r#"[
        ["RAG-R", ["source 1", "source 2", "source 3"]],
        ["RAG-G", ["This is chunk 1", "This is chunk 2"]]
    ]"#;
}

/// A restored chat history in the shape the change-session endpoint returns:
/// ordered `[user, reply]` pairs, with a null reply for unanswered turns.
pub fn history_display_json() -> &'static str {
    return r#"[
        ["what is a gene?", "A gene is a unit of heredity."],
        ["and what does PKD1 do?", null]
    ]"#;
}
