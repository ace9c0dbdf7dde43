// File: tests/compose_test.rs
//! End-to-end: learn a corpus, persist it, and compose poems from it

use poet_core::config::{GenerationConfig, PoetConfig};
use poet_core::core::context::ContextModel;
use poet_core::core::types::{Mode, StanzaShape};
use poet_core::learning::Learner;
use poet_core::persistence::{load_from_disk, save_to_disk};
use poet_core::{count_syllables, ComposeRequest, Poet, PoetError, SyllableCache};
use pretty_assertions::assert_eq;
use rstest::rstest;

const CORPUS: &str = "
Whose woods these are I think I know.
His house is in the village though;
He will not see me stopping here
To watch his woods fill up with snow.
My little horse must think it queer
To stop without a farmhouse near
Between the woods and frozen lake
The darkest evening of the year.
";

fn learned_model() -> ContextModel {
    let mut model = ContextModel::new();
    Learner::new().learn_text(&mut model, CORPUS);
    model
}

fn seeded(seed: u64) -> GenerationConfig {
    GenerationConfig {
        seed: Some(seed),
        ..GenerationConfig::default()
    }
}

#[rstest]
#[case(vec![5, 7, 5])]
#[case(vec![4, 4, 4, 4])]
#[case(vec![10, 8])]
fn test_meter_is_exact(#[case] meter: Vec<usize>) {
    let mut poet = Poet::new(Some(learned_model()), None, seeded(42)).unwrap();
    let mut cache = SyllableCache::new();

    let poem = poet
        .compose(&ComposeRequest::new(StanzaShape::Meter(meter.clone()), 2), &mut cache)
        .unwrap();

    assert_eq!(poem.stanzas.len(), 2);
    for stanza in &poem.stanzas {
        let sums: Vec<usize> = stanza
            .lines
            .iter()
            .map(|l| l.words.iter().map(|w| count_syllables(w)).sum())
            .collect();
        assert_eq!(sums, meter);
    }
}

#[test]
fn test_same_seed_same_poem() {
    let shape = StanzaShape::Words {
        lines_per_stanza: 4,
        words_per_line: 5,
    };
    let compose = || {
        let mut poet = Poet::new(Some(learned_model()), None, seeded(1234)).unwrap();
        poet.compose(&ComposeRequest::new(shape.clone(), 2), &mut SyllableCache::new())
            .unwrap()
    };
    assert_eq!(compose(), compose());
}

#[test]
fn test_words_come_from_the_corpus() {
    let model = learned_model();
    let mut poet = Poet::new(Some(model.clone()), None, seeded(8)).unwrap();
    let shape = StanzaShape::Words {
        lines_per_stanza: 3,
        words_per_line: 6,
    };

    let poem = poet
        .compose(&ComposeRequest::new(shape, 1), &mut SyllableCache::new())
        .unwrap();

    assert_eq!(poem.lines().count(), 3);
    for word in poem.lines().flat_map(|l| l.words.iter()) {
        assert!(model.frequency(word) > 0, "unknown word {word}");
    }
}

#[test]
fn test_cache_is_shared_across_poems() {
    let mut poet = Poet::new(Some(learned_model()), None, seeded(3)).unwrap();
    let mut cache = SyllableCache::new();
    let request = ComposeRequest::new(StanzaShape::Meter(vec![5, 7, 5]), 1);

    poet.compose(&request, &mut cache).unwrap();
    let after_first = cache.len();
    poet.compose(&request, &mut cache).unwrap();

    assert!(after_first > 0);
    assert!(cache.len() >= after_first);
    assert!(cache.len() <= learned_model().vocabulary_len());
}

#[test]
fn test_persisted_model_composes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frost.bin");
    save_to_disk(&learned_model(), &path).unwrap();

    let model = load_from_disk(&path).unwrap();
    let mut poet = Poet::new(Some(model), None, seeded(5)).unwrap();
    let poem = poet
        .compose(
            &ComposeRequest::new(StanzaShape::Meter(vec![5, 7, 5]), 1),
            &mut SyllableCache::new(),
        )
        .unwrap();

    assert_eq!(poem.to_string().lines().count(), 3);
}

#[test]
fn test_short_meter_line_is_rejected() {
    let mut poet = Poet::new(Some(learned_model()), None, seeded(1)).unwrap();
    let err = poet
        .compose(
            &ComposeRequest::new(StanzaShape::Meter(vec![5, 2]), 1),
            &mut SyllableCache::new(),
        )
        .unwrap_err();
    assert!(err.to_string().contains("4 or more syllables"));
}

#[test]
fn test_config_controls_minimum_line() {
    let config = PoetConfig::from_json(r#"{"generation": {"min_line_syllables": 2, "seed": 9}}"#)
        .unwrap();
    let mut poet = Poet::new(Some(learned_model()), None, config.generation).unwrap();

    let poem = poet
        .compose(
            &ComposeRequest::new(StanzaShape::Meter(vec![2, 3]), 1),
            &mut SyllableCache::new(),
        )
        .unwrap();

    assert_eq!(poem.lines().count(), 2);
}

#[test]
fn test_free_mode_unavailable_without_service() {
    let mut poet = Poet::new(Some(learned_model()), None, seeded(1)).unwrap();
    assert!(matches!(
        poet.set_mode(Mode::Free),
        Err(PoetError::ModeUnavailable(Mode::Free))
    ));
}

#[test]
fn test_poem_serializes_to_json() {
    let mut poet = Poet::new(Some(learned_model()), None, seeded(2)).unwrap();
    let poem = poet
        .compose(
            &ComposeRequest::new(StanzaShape::Meter(vec![4]), 1),
            &mut SyllableCache::new(),
        )
        .unwrap();

    let json = serde_json::to_value(&poem).unwrap();
    assert_eq!(json["stanzas"].as_array().unwrap().len(), 1);
    assert_eq!(json["stanzas"][0]["lines"].as_array().unwrap().len(), 1);
}
