use std::rc::Rc;

use assert_matches::assert_matches;
use guessr::audio::{Clip, RecordingPlayer, SilentPlayer};
use guessr::difficulty::Difficulty;
use guessr::game::{Evaluation, GameSession, GuessError, Hint, Message, Status};

fn fixed(difficulty: Difficulty, target: u32) -> GameSession {
    GameSession::with_target(difficulty, target, Rc::new(SilentPlayer)).unwrap()
}

#[test]
fn out_of_range_input_never_counts() {
    for difficulty in Difficulty::ALL {
        let max = difficulty.profile().max_range;
        let mut session = fixed(difficulty, 1);

        for raw in ["0".to_string(), (max + 1).to_string(), "-10".to_string()] {
            assert_matches!(
                session.submit_guess(&raw),
                Err(GuessError::OutOfRange { .. })
            );
        }
        assert_eq!(session.attempts_used(), 0);
        assert!(session.history().is_empty());
        assert_eq!(session.message(), Some(Message::EnterInRange { max }));
    }
}

#[test]
fn max_attempts_wrong_guesses_lose() {
    for difficulty in Difficulty::ALL {
        let profile = difficulty.profile();
        let mut session = fixed(difficulty, profile.max_range);

        for n in 1..profile.max_attempts {
            assert_matches!(session.submit_guess(&n.to_string()), Ok(Evaluation::TooLow(_)));
        }
        assert_eq!(session.status(), Status::InProgress);

        let last = profile.max_attempts.to_string();
        assert_eq!(session.submit_guess(&last), Ok(Evaluation::OutOfAttempts));
        assert_eq!(session.status(), Status::LostByAttempts);
        assert_eq!(session.attempts_used(), profile.max_attempts);
        assert!(session
            .message()
            .unwrap()
            .to_string()
            .contains(&profile.max_range.to_string()));
    }
}

#[test]
fn time_budget_ticks_time_out() {
    for difficulty in Difficulty::ALL {
        let mut session = fixed(difficulty, 1);
        for _ in 0..difficulty.profile().time_budget_secs {
            session.tick();
        }
        assert_eq!(session.status(), Status::LostByTimeout);
        assert_eq!(session.message(), Some(Message::TimeOver { target: 1 }));
    }
}

#[test]
fn correct_guess_halts_everything() {
    let player = Rc::new(RecordingPlayer::new());
    let mut session = GameSession::with_target(Difficulty::Medium, 64, player.clone()).unwrap();

    session.submit_guess("50").unwrap();
    session.tick();
    assert_eq!(session.submit_guess("64"), Ok(Evaluation::Correct));

    let time_left = session.time_remaining();
    for _ in 0..100 {
        session.tick();
    }
    assert_eq!(session.submit_guess("1"), Err(GuessError::SessionOver));

    assert_eq!(session.status(), Status::Won);
    assert_eq!(session.time_remaining(), time_left);
    assert_eq!(session.attempts_used(), 2);
    assert_eq!(player.last(), Some(Clip::Correct));
}

#[test]
fn start_resets_all_counters() {
    for difficulty in Difficulty::ALL {
        let session = GameSession::start(difficulty, Rc::new(SilentPlayer));
        assert_eq!(session.attempts_used(), 0);
        assert!(session.history().is_empty());
        assert_eq!(
            session.time_remaining(),
            difficulty.profile().time_budget_secs
        );
        assert_eq!(session.status(), Status::InProgress);
    }
}

#[test]
fn binary_search_guesses_stay_valid() {
    // binary search keeps every guess in range until the session ends
    for difficulty in Difficulty::ALL {
        for _ in 0..50 {
            let mut session = GameSession::start(difficulty, Rc::new(SilentPlayer));
            let mut low = 1;
            let mut high = difficulty.profile().max_range;
            while !session.is_over() {
                let mid = (low + high) / 2;
                match session.submit_guess(&mid.to_string()) {
                    Ok(Evaluation::TooLow(_)) => low = mid + 1,
                    Ok(Evaluation::TooHigh(_)) => high = mid - 1,
                    Ok(_) => break,
                    Err(e) => panic!("binary search produced invalid guess: {e}"),
                }
            }
            assert_ne!(session.status(), Status::InProgress);
        }
    }
}

#[test]
fn hard_mode_example_loses_after_five() {
    let mut session = fixed(Difficulty::Hard, 111);
    for guess in ["10", "190", "100", "120", "115"] {
        session.submit_guess(guess).unwrap();
    }
    assert_eq!(session.status(), Status::LostByAttempts);
    assert_eq!(
        session.message().unwrap().to_string(),
        "Game Over! Number was 111"
    );
    assert_eq!(session.hint(), None);
}

#[test]
fn hints_follow_distance_bands() {
    let mut session = fixed(Difficulty::Easy, 25);

    assert_eq!(session.submit_guess("20"), Ok(Evaluation::TooLow(Hint::VeryClose)));
    assert_eq!(session.submit_guess("40"), Ok(Evaluation::TooHigh(Hint::Close)));
    assert_eq!(session.submit_guess("41"), Ok(Evaluation::TooHigh(Hint::FarAway)));
    assert_eq!(session.submit_guess("10"), Ok(Evaluation::TooLow(Hint::Close)));
}
