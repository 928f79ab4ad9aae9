use std::path::Path;

use quizreel::error::LoadError;
use quizreel::loader::{self, Format};
use quizreel::model::AnswerKey;

#[test]
fn test_load_sample_json() {
    let questions = loader::load_file(Path::new("fixtures/sample.json")).unwrap();
    assert_eq!(questions.len(), 3);

    let q1 = &questions[0];
    assert_eq!(q1.text, "Which data structure gives O(1) average lookup by key?");
    assert_eq!(q1.options.len(), 4);
    assert_eq!(q1.answer, AnswerKey::Single("Hash map".to_string()));
    assert_eq!(q1.correct_indices(), vec![1]);
    assert!(q1.has_explanation());
    assert_eq!(q1.topic_id.as_deref(), Some("7"));
    assert_eq!(q1.question_id.as_deref(), Some("ds-001"));

    // Multiple answers, matched case-insensitively
    let q2 = &questions[1];
    assert!(matches!(q2.answer, AnswerKey::Multiple(_)));
    assert_eq!(q2.correct_indices(), vec![0, 2]);
    assert!(!q2.has_explanation());

    // Whitespace-only explanation counts as none
    let q3 = &questions[2];
    assert!(!q3.has_explanation());
    assert_eq!(q3.correct_indices(), vec![2]);
}

#[test]
fn test_load_sample_csv() {
    let questions = loader::load_file(Path::new("fixtures/sample.csv")).unwrap();
    assert_eq!(questions.len(), 3);

    let q1 = &questions[0];
    assert_eq!(q1.answer, AnswerKey::Single("Paris".to_string()));
    assert_eq!(q1.topic_id.as_deref(), Some("geo"));
    assert!(q1.has_explanation());

    // Empty option columns are dropped
    let q2 = &questions[1];
    assert_eq!(q2.options, vec!["Venus".to_string(), "Mars".to_string()]);
    assert_eq!(q2.correct_indices(), vec![1]);
    assert_eq!(q2.explanation, None);

    // A number past the last option column is matched as text
    let q3 = &questions[2];
    assert_eq!(q3.answer, AnswerKey::Single("6".to_string()));
    assert_eq!(q3.correct_indices(), vec![1]);
}

#[test]
fn test_csv_numeric_answer_is_option_position() {
    let csv = "question_text,option_1,option_2,correct_answer\nCapital of France?,Paris,London,1\n";
    let questions = loader::parse_csv(csv).unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].answer, AnswerKey::Single("Paris".to_string()));
    assert!(questions[0].is_correct(0));
    assert!(!questions[0].is_correct(1));
}

#[test]
fn test_csv_position_refers_to_column_not_compacted_list() {
    let csv = "question_text,option_1,option_2,option_3,correct_answer\nPick C,A,,C,3\n";
    let questions = loader::parse_csv(csv).unwrap();
    assert_eq!(questions[0].options, vec!["A".to_string(), "C".to_string()]);
    assert_eq!(questions[0].answer, AnswerKey::Single("C".to_string()));
}

#[test]
fn test_csv_position_wins_over_numeric_option_text() {
    let csv = "question_text,option_1,option_2,correct_answer\nPick the first,2,1,1\n";
    let questions = loader::parse_csv(csv).unwrap();
    assert_eq!(questions[0].answer, AnswerKey::Single("2".to_string()));
    assert_eq!(questions[0].correct_indices(), vec![0]);
}

#[test]
fn test_csv_missing_required_column() {
    let err = loader::load_file(Path::new("fixtures/missing_column.csv")).unwrap_err();
    assert_eq!(err, LoadError::MissingColumn("correct_answer".to_string()));
    assert!(err.to_string().contains("correct_answer"));
}

#[test]
fn test_csv_insufficient_options() {
    let csv = "question_text,option_1,option_2,correct_answer\nLonely?,Only,,1\n";
    let err = loader::parse_csv(csv).unwrap_err();
    assert_eq!(err, LoadError::InsufficientOptions { row: 1, found: 1 });
}

#[test]
fn test_csv_unresolved_answer() {
    let csv = "question_text,option_1,option_2,correct_answer\nQ?,Yes,No,Maybe\n";
    let err = loader::parse_csv(csv).unwrap_err();
    assert_eq!(
        err,
        LoadError::UnresolvedAnswer {
            row: 1,
            answer: "Maybe".to_string()
        }
    );
}

#[test]
fn test_csv_header_case_and_bom() {
    let csv = "\u{feff}Question_Text,Option_1,Option_2,Correct_Answer\nQ?,Yes,No,2\n";
    let questions = loader::parse_csv(csv).unwrap();
    assert_eq!(questions[0].answer, AnswerKey::Single("No".to_string()));
}

#[test]
fn test_csv_only_header_is_empty() {
    let csv = "question_text,option_1,option_2,correct_answer\n";
    assert_eq!(loader::parse_csv(csv).unwrap_err(), LoadError::Empty);
}

#[test]
fn test_json_minimal_question() {
    let json = r#"[{"question":"Q1","options":["A","B"],"answer":"A"}]"#;
    let questions = loader::parse_json(json).unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].correct_indices(), vec![0]);
    assert!(!questions[0].has_explanation());
}

#[test]
fn test_json_answer_is_matched_as_text() {
    let json = r#"[{"question":"Q","options":["2","1"],"answer":1}]"#;
    let questions = loader::parse_json(json).unwrap();
    assert_eq!(questions[0].answer, AnswerKey::Single("1".to_string()));
    assert_eq!(questions[0].correct_indices(), vec![1]);

    let json = r#"[{"question":"Q","options":["Yes","No"],"answer":"2"}]"#;
    assert_eq!(
        loader::parse_json(json).unwrap_err(),
        LoadError::UnresolvedAnswer {
            row: 1,
            answer: "2".to_string()
        }
    );
}

#[test]
fn test_json_errors() {
    assert_eq!(loader::parse_json("[]").unwrap_err(), LoadError::Empty);
    assert!(matches!(
        loader::parse_json("{not json").unwrap_err(),
        LoadError::Parse(_)
    ));
    assert_eq!(
        loader::parse_json(r#"[{"options":["A","B"],"answer":"A"}]"#).unwrap_err(),
        LoadError::MissingField {
            question: 1,
            field: "question"
        }
    );
    assert_eq!(
        loader::parse_json(r#"[{"question":"Q","options":["A"," "],"answer":"A"}]"#).unwrap_err(),
        LoadError::InsufficientOptions { row: 1, found: 1 }
    );
}

#[test]
fn test_load_is_all_or_nothing() {
    let json = r#"[
        {"question":"Good","options":["A","B"],"answer":"A"},
        {"question":"Bad","options":["A","B"],"answer":"Z"}
    ]"#;
    let err = loader::parse_json(json).unwrap_err();
    assert!(matches!(err, LoadError::UnresolvedAnswer { row: 2, .. }));
}

#[test]
fn test_detect_format() {
    assert_eq!(loader::detect_format(Path::new("quiz.JSON"), ""), Format::Json);
    assert_eq!(loader::detect_format(Path::new("quiz.csv"), "["), Format::Csv);
    assert_eq!(loader::detect_format(Path::new("quiz"), "  \n[{}]"), Format::Json);
    assert_eq!(
        loader::detect_format(Path::new("quiz.txt"), "question_text,option_1"),
        Format::Csv
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let err = loader::load_file(Path::new("fixtures/does_not_exist.json")).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}
