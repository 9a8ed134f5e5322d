//! Tests for game sessions.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::OnceLock;
use tictactoe_oracle::{GameSession, GameStatus, Level, RegistryStore, SessionError};
use tictactoe_oracle_core::{Player, Symbol};

fn store() -> &'static RegistryStore {
    static STORE: OnceLock<RegistryStore> = OnceLock::new();
    STORE.get_or_init(|| RegistryStore::build().expect("registries build"))
}

#[test]
fn test_user_first_alternates() {
    let mut session = GameSession::new(Symbol::X, Level::Impossible, store());
    assert_eq!(session.next_player().unwrap(), Some(Player::User));
    assert_eq!(session.user_move(4).unwrap(), GameStatus::InProgress);
    assert_eq!(session.next_player().unwrap(), Some(Player::Computer));

    let mut rng = StdRng::seed_from_u64(1);
    let slot = session.computer_move(&mut rng).unwrap();
    assert_ne!(slot, 4);
    assert_eq!(session.board().cell(slot), Some(Some(Symbol::O)));
}

#[test]
fn test_computer_first_when_user_is_o() {
    let mut session = GameSession::new(Symbol::O, Level::Easy, store());
    assert_eq!(session.next_player().unwrap(), Some(Player::Computer));
    assert!(matches!(
        session.user_move(0),
        Err(SessionError::WrongTurn {
            player: Player::User
        })
    ));
}

#[test]
fn test_occupied_slot_is_rejected() {
    let mut session = GameSession::new(Symbol::X, Level::Impossible, store());
    session.user_move(0).unwrap();
    session.computer_move(&mut StdRng::seed_from_u64(2)).unwrap();
    assert!(matches!(session.user_move(0), Err(SessionError::Core { .. })));
}

#[test]
fn test_impossible_never_loses() {
    for seed in 0..30 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut user_rng = StdRng::seed_from_u64(seed + 1000);
        for user_symbol in [Symbol::X, Symbol::O] {
            let mut session = GameSession::new(user_symbol, Level::Impossible, store());
            while let Some(player) = session.next_player().unwrap() {
                match player {
                    Player::Computer => {
                        session.computer_move(&mut rng).unwrap();
                    }
                    Player::User => {
                        let slots = session.board().available_slots();
                        let slot = slots[rand::Rng::random_range(&mut user_rng, 0..slots.len())];
                        session.user_move(slot).unwrap();
                    }
                }
            }
            assert!(!matches!(
                session.status(),
                GameStatus::Won {
                    player: Player::User,
                    ..
                }
            ));
            assert!(matches!(
                session.user_move(0),
                Err(SessionError::GameOver)
            ));
        }
    }
}

#[test]
fn test_finished_game_reports_line() {
    // Easy computer as O still takes an open win.
    let mut session = GameSession::new(Symbol::X, Level::Easy, store());
    let mut rng = StdRng::seed_from_u64(5);
    session.user_move(0).unwrap();
    session.computer_move(&mut rng).unwrap();
    // Play until finished, user always taking the lowest free slot.
    while session.next_player().unwrap().is_some() {
        if session.next_player().unwrap() == Some(Player::User) {
            let slot = session.board().available_slots()[0];
            session.user_move(slot).unwrap();
        } else {
            session.computer_move(&mut rng).unwrap();
        }
    }
    match session.status() {
        GameStatus::Won { player, line } => {
            let symbol = session.assignment().symbol_of(player);
            assert!(line.iter().all(|&i| session.board().cell(i) == Some(Some(symbol))));
        }
        GameStatus::Draw => assert!(session.board().is_full()),
        GameStatus::InProgress => panic!("game should be over"),
    }
}
