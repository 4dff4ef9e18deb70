//! Integration tests for the full room message flow.
//!
//! These tests drive the application handlers end-to-end over the in-memory
//! adapters, the same wiring the websocket layer uses:
//! 1. Registration issues tokens and (for the master) resets the ledger
//! 2. Connects mark presence and broadcast the roster
//! 3. Character updates, rolls and coin changes fan out to the room
//! 4. Disconnects shrink the roster idempotently

use std::sync::Arc;

use nocturne::adapters::websocket::{ConnectionRegistry, ServerMessage};
use nocturne::adapters::{InMemoryBroadcaster, InMemoryIdentityStore, SequenceRoller};
use nocturne::application::handlers::{
    ConnectCommand, DisconnectCommand, RegisterCommand, RollDiceCommand, UpdateCoinsCommand,
    UpdateStatsCommand,
};
use nocturne::application::AppState;
use nocturne::domain::character::{CharacterSheet, Role, StatPatch};
use nocturne::domain::coins::CoinUpdate;
use nocturne::domain::dice::RollResult;
use nocturne::domain::foundation::{ConnectionId, PlayerToken};
use nocturne::ports::{IdentityStore, RoomEvent};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn sheet(name: &str) -> CharacterSheet {
    CharacterSheet {
        name: name.to_string(),
        ..CharacterSheet::default()
    }
}

fn captured_state() -> (AppState, Arc<InMemoryBroadcaster>) {
    let broadcaster = Arc::new(InMemoryBroadcaster::new());
    let state = AppState::new(
        Arc::new(InMemoryIdentityStore::new()),
        broadcaster.clone(),
        Arc::new(SequenceRoller::new(vec![4, 1, 6, 3, 2, 5])),
    );
    (state, broadcaster)
}

async fn register(state: &AppState, name: &str, role: Role) -> PlayerToken {
    state
        .register_handler()
        .handle(RegisterCommand {
            sheet: sheet(name),
            role,
        })
        .await
        .unwrap()
}

async fn connect(state: &AppState, token: PlayerToken) -> ConnectionId {
    let connection_id = ConnectionId::new();
    state
        .connect_handler()
        .handle(ConnectCommand {
            token,
            connection_id,
        })
        .await
        .unwrap();
    connection_id
}

fn last_roster(broadcaster: &InMemoryBroadcaster) -> Vec<String> {
    match broadcaster
        .broadcasts_of("update_players")
        .last()
        .expect("no roster broadcast")
    {
        RoomEvent::PlayersUpdated(players) => players.iter().map(|p| p.name.clone()).collect(),
        other => panic!("unexpected event {:?}", other),
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn full_session_flow() {
    let (state, broadcaster) = captured_state();

    // Master registers with some stale coins on the table; the ledger resets.
    state.ledger.apply(CoinUpdate {
        hope: Some(9),
        despair: Some(9),
    });
    let master = register(&state, "GM", Role::Master).await;
    assert_eq!(state.ledger.totals().hope, 0);

    let vera = register(&state, "Vera", Role::Player).await;
    let milo = register(&state, "Milo", Role::Player).await;

    let master_conn = connect(&state, master).await;
    connect(&state, vera).await;
    connect(&state, milo).await;

    // Roster lists players only, in registration order; the master got the
    // ledger pushed to their own connection.
    assert_eq!(last_roster(&broadcaster), vec!["Vera", "Milo"]);
    let unicasts = broadcaster.unicasts();
    assert_eq!(unicasts.len(), 1);
    assert_eq!(unicasts[0].0, master_conn);

    // Vera marks a point of madness; the room sees the refreshed roster.
    state
        .update_stats_handler()
        .handle(UpdateStatsCommand {
            token: vera,
            patch: StatPatch {
                madness: Some(1),
                ..StatPatch::default()
            },
        })
        .await
        .unwrap();
    match broadcaster.broadcasts_of("update_players").last().unwrap() {
        RoomEvent::PlayersUpdated(players) => {
            assert_eq!(players[0].madness, 1);
            assert_eq!(players[1].madness, 0);
        }
        other => panic!("unexpected event {:?}", other),
    }

    // Vera rolls: discipline 3, one extra red over madness 1.
    state
        .roll_dice_handler()
        .handle(RollDiceCommand {
            token: vera,
            request: serde_json::from_value(serde_json::json!({"red_extra": 1})).unwrap(),
        })
        .await
        .unwrap();
    match broadcaster.broadcasts_of("dice_rolled").last().unwrap() {
        RoomEvent::DiceRolled(RollResult::Player(roll)) => {
            assert_eq!(roll.player_name, "Vera");
            assert_eq!(roll.white_dice, 3);
            assert_eq!(roll.red_dice, 2);
            assert!(roll.white_results.windows(2).all(|w| w[0] <= w[1]));
        }
        other => panic!("unexpected event {:?}", other),
    }

    // Master awards hope; everyone sees the new totals.
    state
        .update_coins_handler()
        .handle(UpdateCoinsCommand {
            token: master,
            update: CoinUpdate {
                hope: Some(2),
                despair: None,
            },
        })
        .await
        .unwrap();
    match broadcaster.broadcasts_of("update_coins").last().unwrap() {
        RoomEvent::CoinsUpdated(totals) => assert_eq!((totals.hope, totals.despair), (2, 0)),
        other => panic!("unexpected event {:?}", other),
    }

    // Vera tries to cheat the ledger; nothing happens, nothing is broadcast.
    let coin_broadcasts = broadcaster.broadcasts_of("update_coins").len();
    let _ = state
        .update_coins_handler()
        .handle(UpdateCoinsCommand {
            token: vera,
            update: CoinUpdate {
                hope: Some(99),
                despair: None,
            },
        })
        .await;
    assert_eq!(state.ledger.totals().hope, 2);
    assert_eq!(
        broadcaster.broadcasts_of("update_coins").len(),
        coin_broadcasts
    );
}

#[tokio::test]
async fn concurrent_connects_yield_one_roster_entry_each() {
    let (state, broadcaster) = captured_state();

    let mut tokens = Vec::new();
    for i in 0..8 {
        tokens.push(register(&state, &format!("player-{i}"), Role::Player).await);
    }

    let joins: Vec<_> = tokens
        .iter()
        .map(|&token| {
            let state = state.clone();
            tokio::spawn(async move {
                state
                    .connect_handler()
                    .handle(ConnectCommand {
                        token,
                        connection_id: ConnectionId::new(),
                    })
                    .await
            })
        })
        .collect();
    for join in joins {
        join.await.unwrap().unwrap();
    }

    let roster = state.store.roster().await;
    assert_eq!(roster.len(), 8);
    // Insertion order survives the concurrent joins.
    let names: Vec<String> = roster.iter().map(|p| p.name.clone()).collect();
    assert_eq!(
        names,
        (0..8).map(|i| format!("player-{i}")).collect::<Vec<_>>()
    );
    assert_eq!(broadcaster.broadcasts_of("update_players").len(), 8);
}

#[tokio::test]
async fn reconnect_keeps_exactly_one_entry() {
    let (state, broadcaster) = captured_state();
    let token = register(&state, "Vera", Role::Player).await;

    let first = connect(&state, token).await;
    state
        .disconnect_handler()
        .handle(DisconnectCommand {
            connection_id: first,
        })
        .await;
    connect(&state, token).await;

    assert_eq!(last_roster(&broadcaster), vec!["Vera"]);

    // The stale socket's close arrives late; the player stays in game.
    let roster_broadcasts = broadcaster.broadcasts_of("update_players").len();
    state
        .disconnect_handler()
        .handle(DisconnectCommand {
            connection_id: first,
        })
        .await;
    assert!(state.store.get(&token).await.unwrap().in_game());
    assert_eq!(
        broadcaster.broadcasts_of("update_players").len(),
        roster_broadcasts
    );
}

// =============================================================================
// Fan-out over the real connection registry
// =============================================================================

#[tokio::test]
async fn events_fan_out_to_every_live_connection() {
    let registry = Arc::new(ConnectionRegistry::with_default_capacity());
    let state = AppState::new(
        Arc::new(InMemoryIdentityStore::new()),
        registry.clone(),
        Arc::new(SequenceRoller::new(vec![2])),
    );

    let master = register(&state, "GM", Role::Master).await;
    let vera = register(&state, "Vera", Role::Player).await;

    // Queues register at upgrade time, just before each identity connects -
    // the same order the socket lifecycle uses.
    let master_conn = ConnectionId::new();
    let mut master_rx = registry.register(master_conn).await;
    state
        .connect_handler()
        .handle(ConnectCommand {
            token: master,
            connection_id: master_conn,
        })
        .await
        .unwrap();

    let vera_conn = ConnectionId::new();
    let mut vera_rx = registry.register(vera_conn).await;
    state
        .connect_handler()
        .handle(ConnectCommand {
            token: vera,
            connection_id: vera_conn,
        })
        .await
        .unwrap();

    // Master connection: roster (empty), own coin unicast, roster (Vera).
    assert!(matches!(
        master_rx.recv().await,
        Some(ServerMessage::UpdatePlayers { .. })
    ));
    assert!(matches!(
        master_rx.recv().await,
        Some(ServerMessage::UpdateCoins { .. })
    ));
    match master_rx.recv().await {
        Some(ServerMessage::UpdatePlayers { players, .. }) => {
            assert_eq!(players.len(), 1);
            assert_eq!(players[0].name, "Vera");
        }
        other => panic!("unexpected message {:?}", other),
    }

    // Vera sees her own join broadcast, but never the master's unicast.
    match vera_rx.recv().await {
        Some(ServerMessage::UpdatePlayers { players, .. }) => assert_eq!(players.len(), 1),
        other => panic!("unexpected message {:?}", other),
    }

    // A roll reaches both connections.
    state
        .roll_dice_handler()
        .handle(RollDiceCommand {
            token: vera,
            request: serde_json::from_value(serde_json::json!({})).unwrap(),
        })
        .await
        .unwrap();
    assert!(matches!(
        master_rx.recv().await,
        Some(ServerMessage::DiceRolled { .. })
    ));
    assert!(matches!(
        vera_rx.recv().await,
        Some(ServerMessage::DiceRolled { .. })
    ));
}
