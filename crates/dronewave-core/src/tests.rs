use glam::Vec3;

use crate::components::Health;
use crate::enums::StateKind;
use crate::events::SimEvent;
use crate::types::{ActorId, RoomBounds};
use crate::waves::{WaveTable, WaveTableError};

#[test]
fn test_wave_table_standard_is_valid() {
    assert_eq!(WaveTable::standard().validate(), Ok(()));
}

#[test]
fn test_wave_table_ragged_column_rejected() {
    let mut table = WaveTable::standard();
    table.pain_chance.pop();
    assert_eq!(
        table.validate(),
        Err(WaveTableError::RaggedColumn {
            column: "pain_chance",
            len: 6,
            expected: 7,
        })
    );
}

#[test]
fn test_wave_table_empty_rejected() {
    let table = WaveTable {
        drones_per_wave: vec![],
        max_alive_per_wave: vec![],
        spawn_cadence_secs: vec![],
        skip_in_short_mode: vec![],
        pain_chance: vec![],
        dodge_chance: vec![],
        speed_scale: vec![],
        think_time_secs: vec![],
        weapon_spread_scale: vec![],
    };
    assert_eq!(table.validate(), Err(WaveTableError::Empty));
}

#[test]
fn test_wave_table_index_clamps_to_last_row() {
    let table = WaveTable::standard();
    let last = table.last_wave();
    assert_eq!(table.drones(last + 100), table.drones(last));
    assert_eq!(table.pain(last + 100), table.pain(last));
}

#[test]
fn test_room_bounds_contains_and_clamp() {
    let room = RoomBounds::new(Vec3::new(-3.0, 0.0, -3.0), Vec3::new(3.0, 2.5, 3.0));
    assert!(room.contains(Vec3::new(0.0, 1.0, 0.0)));
    assert!(!room.contains(Vec3::new(0.0, 3.0, 0.0)));

    let clamped = room.clamp_inside(Vec3::new(10.0, -10.0, 0.0));
    assert!(room.contains(clamped));
}

#[test]
fn test_room_bounding_radius() {
    let room = RoomBounds::new(Vec3::new(-3.0, 0.0, -4.0), Vec3::new(3.0, 2.0, 4.0));
    let r = room.bounding_radius();
    let expected = Vec3::new(3.0, 1.0, 4.0).length();
    assert!((r - expected).abs() < 1e-5);
}

#[test]
fn test_health_liveness() {
    let mut health = Health::full(100.0);
    assert!(health.is_alive());
    health.damage(100.0);
    assert!(!health.is_alive());
}

#[test]
fn test_sim_event_serde_round_trip() {
    let event = SimEvent::StateChanged {
        id: ActorId(3),
        from: StateKind::Plan,
        to: StateKind::Pain,
    };
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("\"type\":\"StateChanged\""));
    let back: SimEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(event, back);
}

#[test]
fn test_wave_table_serde_round_trip() {
    let table = WaveTable::standard();
    let json = serde_json::to_string(&table).unwrap();
    let back: WaveTable = serde_json::from_str(&json).unwrap();
    assert_eq!(table, back);
}

#[test]
fn test_heal_is_uncapped() {
    let mut health = Health::full(100.0);
    health.damage(30.0);
    health.heal(80.0);
    assert_eq!(health.current, 150.0);
}
