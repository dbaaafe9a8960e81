use std::sync::Arc;

use shortlist_lib::catalog::{Catalog, CatalogEntry, EntryField};
use shortlist_lib::config::EngineConfig;
use shortlist_lib::embed::TfIdfEmbedder;
use shortlist_lib::engine::{Projection, RecommendationEngine};
use shortlist_lib::score::ScoreWeights;
use shortlist_lib::{Error, ErrorKind};

const CATALOG: &str = "\
name,url,description,test_type,duration,remote_support,adaptive_support
Java 8 (New),https://example.com/view/java-8-new/,Multi-choice test measuring knowledge of Java class design exceptions generics collections,K,18,Yes,Yes
Core Java (Advanced Level),https://example.com/view/core-java-advanced/,Advanced Java threads concurrency JVM internals and design patterns,K,13,Yes,No
Python (New),https://example.com/view/python-new/,Measures knowledge of Python data structures modules and libraries,K,11,Yes,Yes
SQL Server (New),https://example.com/view/sql-server-new/,Database queries stored procedures indexing and transactions,K,15,Yes,No
Occupational Personality Questionnaire,https://example.com/view/opq32r/,Workplace behavioural styles teamwork influence and leadership potential,P,25,Yes,No
Verify Numerical Reasoning,https://example.com/view/verify-numerical/,Ability to make correct decisions from numerical data charts and tables,A,18,Yes,Yes
Verify Verbal Reasoning,https://example.com/view/verify-verbal/,Ability to evaluate written information and draw logical conclusions,A,17,Yes,Yes
Sales Representative Solution,https://example.com/view/sales-rep/,Customer service persuasion and sales skills for entry level representatives,S,30,No,No
Team Collaboration Survey,https://example.com/view/team-collab/,Collaboration communication and working with stakeholders,P,20,Yes,No
Data Entry Speed,https://example.com/view/data-entry/,Typing accuracy and speed for clerical data entry roles,S,5,No,No
";

fn catalog() -> Catalog {
    Catalog::from_csv_reader(CATALOG.as_bytes()).unwrap()
}

fn engine() -> RecommendationEngine<TfIdfEmbedder> {
    RecommendationEngine::tfidf(catalog(), EngineConfig::default()).unwrap()
}

fn java_and_leadership() -> Catalog {
    Catalog::from_entries(vec![
        CatalogEntry {
            name: "Java Coding Test".into(),
            url: "u1".into(),
            description: "java programming assessment".into(),
            ..CatalogEntry::default()
        },
        CatalogEntry {
            name: "Leadership Survey".into(),
            url: "u2".into(),
            description: "leadership and collaboration".into(),
            ..CatalogEntry::default()
        },
    ])
    .unwrap()
}

#[test]
fn test_invalid_arguments() {
    let engine = engine();

    let err = engine.recommend("", 5).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyQuery);

    let err = engine.recommend("   \n\t", 5).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyQuery);

    let err = engine.recommend("java", 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_result_length_is_min_of_k_and_catalog() {
    let engine = engine();
    for k in [1, 3, 10, 11, 50] {
        let result = engine.recommend("java developer", k).unwrap();
        assert_eq!(result.len(), k.min(engine.len()), "k = {k}");
    }
}

#[test]
fn test_no_duplicate_urls() {
    let engine = engine();
    let result = engine.recommend("data", 10).unwrap();
    let mut urls = result.urls();
    urls.sort_unstable();
    urls.dedup();
    assert_eq!(urls.len(), result.len());
}

#[test]
fn test_deterministic_across_engines() {
    let a = engine();
    let b = engine();
    let query = "Analyst with strong numerical and verbal reasoning";

    let render = |engine: &RecommendationEngine<TfIdfEmbedder>| {
        let result = engine.recommend(query, 5).unwrap();
        serde_json::to_string(&result.project(Projection::Full)).unwrap()
    };
    let first = render(&a);
    let second = render(&a);
    let third = render(&b);

    assert_eq!(first, second);
    assert_eq!(first, third);
}

#[test]
fn test_scores_non_increasing() {
    let engine = engine();
    let result = engine.recommend("python sql database developer", 10).unwrap();

    for pair in result.items().windows(2) {
        assert!(pair[0].score >= pair[1].score);
        assert_eq!(pair[0].rank + 1, pair[1].rank);
    }
}

#[test]
fn test_scores_match_full_score_vector() {
    let engine = engine();
    let query = "java concurrency";
    let scores = engine.scores(query).unwrap();
    let result = engine.recommend(query, 3).unwrap();

    for rec in &result {
        let index = engine.catalog().position(rec.url()).unwrap();
        assert_eq!(rec.score, scores[index]);
    }
}

#[test]
fn test_ties_follow_catalog_order() {
    let entries = vec![
        CatalogEntry {
            name: "Alpha".into(),
            url: "u1".into(),
            description: "identical text".into(),
            ..CatalogEntry::default()
        },
        CatalogEntry {
            name: "Beta".into(),
            url: "u2".into(),
            description: "unrelated words".into(),
            ..CatalogEntry::default()
        },
        CatalogEntry {
            name: "Gamma".into(),
            url: "u3".into(),
            description: "identical text".into(),
            ..CatalogEntry::default()
        },
    ];
    let config = EngineConfig {
        fields: vec![EntryField::Description],
        ..EngineConfig::default()
    };
    let catalog = Catalog::from_entries(entries).unwrap();
    let engine = RecommendationEngine::tfidf(catalog, config).unwrap();

    let result = engine.recommend("identical text", 3).unwrap();
    assert_eq!(result.urls(), vec!["u1", "u3", "u2"]);
    assert_eq!(result.items()[0].score, result.items()[1].score);
}

#[test]
fn test_own_description_finds_entry() {
    let engine = engine();
    for entry in engine.catalog().iter() {
        let result = engine.recommend(&entry.description, 3).unwrap();
        assert!(
            result.urls().contains(&entry.url.as_str()),
            "{} not in top 3 for its own description",
            entry.name
        );
    }
}

#[test]
fn test_own_name_finds_entry() {
    let engine = engine();
    for entry in engine.catalog().iter() {
        let result = engine.recommend(&entry.name, 3).unwrap();
        assert!(
            result.urls().contains(&entry.url.as_str()),
            "{} not in top 3 for its own name",
            entry.name
        );
    }
}

#[test]
fn test_two_entry_example() {
    let engine =
        RecommendationEngine::tfidf(java_and_leadership(), EngineConfig::default()).unwrap();

    let query = "Need a Java developer who collaborates well";
    let first = engine.recommend(query, 2).unwrap();
    let again = engine.recommend(query, 2).unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first.urls(), again.urls());
    assert!(first.urls().contains(&"u1"));
    assert!(first.urls().contains(&"u2"));
    // "java" matches, "collaborates" does not stem to "collaboration"
    assert_eq!(first.urls()[0], "u1");
}

#[test]
fn test_stop_word_query_scores_zero() {
    let engine =
        RecommendationEngine::tfidf(java_and_leadership(), EngineConfig::default()).unwrap();

    // "and" appears in u2's tokens but has no vector weight
    let result = engine.recommend("and", 2).unwrap();
    assert_eq!(result.urls(), vec!["u1", "u2"]);
    assert!(result.iter().all(|r| r.score == 0.0));
}

#[test]
fn test_stop_word_catalog_scores_zero() {
    let entries = vec![
        CatalogEntry {
            name: "The".into(),
            url: "u1".into(),
            description: "and the".into(),
            ..CatalogEntry::default()
        },
        CatalogEntry {
            name: "Of".into(),
            url: "u2".into(),
            description: "the of".into(),
            ..CatalogEntry::default()
        },
    ];
    let catalog = Catalog::from_entries(entries).unwrap();
    let engine = RecommendationEngine::tfidf(catalog, EngineConfig::default()).unwrap();

    let result = engine.recommend("the", 2).unwrap();
    assert_eq!(result.urls(), vec!["u1", "u2"]);
    assert!(result.iter().all(|r| r.score == 0.0));
}

#[test]
fn test_empty_entry_text_ranks_last() {
    let entries = vec![
        CatalogEntry {
            name: "Untitled".into(),
            url: "u1".into(),
            description: String::new(),
            ..CatalogEntry::default()
        },
        CatalogEntry {
            name: "Java Coding Test".into(),
            url: "u2".into(),
            description: "java programming".into(),
            ..CatalogEntry::default()
        },
    ];
    let config = EngineConfig {
        fields: vec![EntryField::Description],
        ..EngineConfig::default()
    };
    let catalog = Catalog::from_entries(entries).unwrap();
    let engine = RecommendationEngine::tfidf(catalog, config).unwrap();

    let result = engine.recommend("java programming", 2).unwrap();
    assert_eq!(result.urls(), vec!["u2", "u1"]);
    assert!(result.items()[0].score > 0.0);
    assert_eq!(result.items()[1].score, 0.0);
}

#[test]
fn test_lexical_only_weights() {
    let config = EngineConfig {
        weights: ScoreWeights { semantic: 0.0, lexical: 1.0 },
        ..EngineConfig::default()
    };
    let engine = RecommendationEngine::tfidf(catalog(), config).unwrap();

    let result = engine.recommend("Typing speed", 1).unwrap();
    assert_eq!(result.first().unwrap().url(), "https://example.com/view/data-entry/");
    assert!((result.first().unwrap().score - 1.0).abs() < 1e-6);
}

#[test]
fn test_concurrent_recommend() {
    let engine = Arc::new(engine());
    let queries = [
        "java developer",
        "numerical reasoning analyst",
        "sales representative",
        "team collaboration and leadership",
    ];
    let expected: Vec<Vec<String>> = queries
        .iter()
        .map(|q| {
            engine
                .recommend(q, 5)
                .unwrap()
                .urls()
                .into_iter()
                .map(str::to_string)
                .collect()
        })
        .collect();

    std::thread::scope(|s| {
        for _ in 0..4 {
            let engine = Arc::clone(&engine);
            let expected = &expected;
            s.spawn(move || {
                for _ in 0..25 {
                    for (q, want) in queries.iter().zip(expected) {
                        let got: Vec<String> = engine
                            .recommend(q, 5)
                            .unwrap()
                            .urls()
                            .into_iter()
                            .map(str::to_string)
                            .collect();
                        assert_eq!(&got, want);
                    }
                }
            });
        }
    });
}

#[test]
fn test_catalog_errors_are_fatal() {
    let err = Catalog::from_csv_reader("name,description\nJava,java\n".as_bytes()).unwrap_err();
    assert!(matches!(err, Error::CatalogLoad(_)));
    assert!(!err.is_recoverable());
}
