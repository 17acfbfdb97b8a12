//! End-to-end session scenarios.

use std::time::{Duration, Instant};

use quiz::{
    generate_questions, load_shared, AnswerOutcome, CharacterEntry, Dataset, Language, Localized,
    Messages, Phase, QuizConfig, Session, ShareAffordance, TimeoutKind, QUIZ_LENGTH,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wire::{decode_token, Limits};

fn text(s: String) -> Option<Localized> {
    Some(Localized::Plain(s))
}

fn dataset() -> Dataset {
    Dataset::new(
        (0..24)
            .map(|i| CharacterEntry {
                civilian: text(format!("civilian {i}")),
                transformed: text(format!("cure {i}")),
                voice: text(format!("voice {i}")),
                father: text(format!("father {i}")),
                mother: text(format!("mother {i}")),
                birthday: text(format!("day {i}")),
                series: text(format!("series {}", i / 4)),
            })
            .collect(),
    )
}

fn started(dataset: &Dataset, t0: Instant) -> Session {
    let config = QuizConfig::default();
    let mut rng = StdRng::seed_from_u64(2024);
    let questions = generate_questions(
        dataset,
        &Messages::default(),
        Language::Ja,
        &config,
        &mut rng,
    );
    assert_eq!(questions.len(), QUIZ_LENGTH);
    let mut session = Session::new(&config, Language::Ja);
    session.start(questions, t0).unwrap();
    session
}

fn pick(session: &Session, correct: bool) -> String {
    let question = session.current_question().unwrap();
    if correct {
        question.correct_answer.clone()
    } else {
        question
            .choices
            .iter()
            .find(|c| **c != question.correct_answer)
            .unwrap()
            .clone()
    }
}

#[test]
fn ten_answers_one_second_apart() {
    let dataset = dataset();
    let t0 = Instant::now();
    let mut session = started(&dataset, t0);

    for i in 0..QUIZ_LENGTH {
        let correct = i % 5 != 1 && i % 5 != 3; // 6 right, 4 wrong
        let choice = pick(&session, correct);
        let now = t0 + Duration::from_secs(i as u64 + 1);
        let outcome = session.answer(&dataset, &choice, now).unwrap();
        if i + 1 < QUIZ_LENGTH {
            assert_eq!(outcome, AnswerOutcome::Next { correct });
        } else {
            assert_eq!(outcome, AnswerOutcome::Completed { correct });
        }
    }

    assert_eq!(session.phase(), Phase::Completed);
    let summary = session.summary().unwrap();
    assert_eq!(summary.correct, 6);
    assert_eq!(summary.total.raw(), 1000);
    assert!(session.results().iter().all(|r| r.elapsed.raw() == 100));

    let ShareAffordance::Share { token } = &summary.share else {
        panic!("completed session must be shareable");
    };
    let decoded = decode_token(token, &Limits::default()).unwrap();
    assert_eq!(decoded.header.total.raw(), 1000);
    assert_eq!(decoded.items.len(), 10);
    assert_eq!(decoded.wrong_count(), 4);
    assert!(!decoded.truncated);

    // The share link restores the same outcome.
    let mut viewer = Session::new(&QuizConfig::default(), Language::Ja);
    load_shared(
        &mut viewer,
        &dataset,
        &Messages::default(),
        token,
        &Limits::default(),
    )
    .unwrap();
    let shared = viewer.summary().unwrap();
    assert_eq!(shared.correct, 6);
    assert_eq!(shared.total.raw(), 1000);
    assert_eq!(shared.share, ShareAffordance::PlayYourself);
    for (live, restored) in session.results().iter().zip(viewer.results()) {
        assert_eq!(live.user_answer, restored.user_answer);
        assert_eq!(live.correct_answer, restored.correct_answer);
        assert_eq!(live.is_correct, restored.is_correct);
    }
}

#[test]
fn slow_answer_aborts_to_idle() {
    let dataset = dataset();
    let t0 = Instant::now();
    let mut session = started(&dataset, t0);

    let mut now = t0;
    for _ in 0..5 {
        now += Duration::from_secs(2);
        let choice = pick(&session, true);
        session.answer(&dataset, &choice, now).unwrap();
    }
    now += Duration::from_secs(164);
    let choice = pick(&session, true);
    let outcome = session.answer(&dataset, &choice, now).unwrap();

    assert_eq!(outcome, AnswerOutcome::TimedOut(TimeoutKind::Question));
    assert_eq!(session.phase(), Phase::Idle);
    assert!(session.results().is_empty());
    assert!(session.summary().is_none());
}

#[test]
fn slow_quiz_aborts_on_total_limit() {
    let dataset = dataset();
    let t0 = Instant::now();
    let mut session = started(&dataset, t0);

    // Each answer stays under the per-question limit, the sum does not.
    let mut now = t0;
    let mut outcome = AnswerOutcome::Next { correct: true };
    for _ in 0..5 {
        now += Duration::from_secs(150);
        let choice = pick(&session, true);
        outcome = session.answer(&dataset, &choice, now).unwrap();
        if matches!(outcome, AnswerOutcome::TimedOut(_)) {
            break;
        }
    }
    assert_eq!(outcome, AnswerOutcome::TimedOut(TimeoutKind::Total));
    assert_eq!(session.phase(), Phase::Idle);
    assert!(session.results().is_empty());
}
