use glam::Vec3;
use noteflow::{
    BlockProvider, DespawnWall, HitDetector, SequencerConfig, SpawnScheduler, parse_chart,
};

const CHART: &str = r#"{"_time": 0, "_lineIndex": 0, "_lineLayer": 0, "_cutDirection": 1},
    {"_time": 2, "_lineIndex": 1, "_lineLayer": 1, "_cutDirection": 0},
    {"_time": 4, "_lineIndex": 2, "_lineLayer": 2, "_cutDirection": 2},
    {"_time": 10, "_lineIndex": 3, "_lineLayer": 0, "_cutDirection": 3}"#;

fn sequencer() -> SpawnScheduler {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = SequencerConfig {
        pool_amount: 5,
        queue_capacity: 5,
        beats_per_minute: 120.0,
        song_duration: 10.0,
        note_speed: 10.0,
        note_starting_rotation: [0.0, 0.0, 0.0],
        ..Default::default()
    };
    let chart = parse_chart(CHART).expect("well-formed chart");
    let mut seq = SpawnScheduler::new(config, chart, &mut BlockProvider::new("NoteBlock"))
        .expect("valid config");
    seq.set_transform(Vec3::ZERO, Vec3::Z);
    seq
}

/// Ticks a quarter-second frame `n` times.
fn run_frames(seq: &mut SpawnScheduler, n: usize) {
    for _ in 0..n {
        seq.tick(0.25);
    }
}

#[test]
fn whole_song_run_spawns_hits_and_auto_stops() {
    let mut seq = sequencer();
    let saber = HitDetector::new("Saber");
    let wall = DespawnWall::new("NoteBlock");

    seq.start();
    assert!(seq.is_running());

    // t=1s: 2.0 beats accumulated, the beat-0 and beat-2 notes spawn together.
    run_frames(&mut seq, 4);
    assert_eq!(seq.active_len(), 2);
    assert!(seq.instance(0).unwrap().visible);
    assert!(seq.instance(1).unwrap().visible);

    // The player slices the first note; the second sails into the wall.
    assert!(saber.on_contact(&mut seq, 0, "LeftSaber"));
    assert!(wall.on_contact(&mut seq, 1));
    assert_eq!(seq.active_len(), 0);
    assert!(!seq.instance(0).unwrap().visible);
    assert!(!seq.instance(1).unwrap().visible);

    // t=2s: 4.0 beats, the beat-4 note spawns into a recycled slot.
    run_frames(&mut seq, 4);
    assert_eq!(seq.active_len(), 1);
    let spawned_z = seq.instance(2).unwrap().position.z;

    // t=5s: 10.0 beats, the beat-10 note spawns; the earlier note kept flying.
    run_frames(&mut seq, 12);
    assert_eq!(seq.active_len(), 2);
    assert_eq!(seq.next_event_index(), 4);
    assert!(
        seq.instance(2).unwrap().position.z > spawned_z,
        "in-flight note should advance along the spawner's forward axis"
    );

    // t=10s: the song timer expires and playback retires everything.
    run_frames(&mut seq, 20);
    assert!(!seq.is_running());
    assert_eq!(seq.active_len(), 0);
    assert!(seq.instances().all(|inst| !inst.visible));
    assert_eq!(seq.overflow_count(), 0);
    assert_eq!(seq.reuse_count(), 0);
}

#[test]
fn restart_after_a_full_run_replays_the_chart() {
    let mut seq = sequencer();

    seq.start();
    run_frames(&mut seq, 41);
    assert!(!seq.is_running());

    seq.start();
    assert!(seq.is_running());
    assert_eq!(seq.accumulated_beats(), 0.0);
    assert_eq!(seq.next_event_index(), 0);

    run_frames(&mut seq, 4);
    assert_eq!(seq.active_len(), 2, "second run spawns from the top of the chart");
}
