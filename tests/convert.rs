mod common;

use common::{voice_events, write_units};
use neuro_midi::{IndexError, prelude::*};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn convert(spike_times: &[f64], index: &[u64], options: &ConvertOptions) -> Vec<u8> {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("session.nwb");
    write_units(&input, spike_times, index);

    let output = default_output_path(&input);
    units_to_midi(&input, options).unwrap().save(&output).unwrap();
    std::fs::read(output).unwrap()
}

#[test]
fn two_units_merged() {
    let bytes = convert(&[0.1, 0.2, 0.5], &[2, 3], &ConvertOptions::default());
    let smf = midly::Smf::parse(&bytes).unwrap();

    assert_eq!(smf.header.format, midly::Format::Parallel);
    let midly::Timing::Metrical(tpqn) = smf.header.timing else {
        panic!("expected metrical timing");
    };
    assert_eq!(tpqn.as_int(), 1000);
    assert_eq!(smf.tracks.len(), 1);

    let events = voice_events(&smf);
    assert_eq!(
        events[0],
        vec![
            (200, true, 0, 0, 64),
            (202, false, 0, 0, 64),
            (400, true, 0, 0, 64),
            (402, false, 0, 0, 64),
            (1000, true, 0, 1, 64),
            (1002, false, 0, 1, 64),
        ]
    );
}

#[test]
fn tempo_and_end_of_track_are_written() {
    let options = ConvertOptions {
        tempo_bpm: 60.,
        ..Default::default()
    };
    let bytes = convert(&[0.1, 0.2, 0.5], &[2, 3], &options);
    let smf = midly::Smf::parse(&bytes).unwrap();
    let track = &smf.tracks[0];

    let midly::TrackEventKind::Meta(midly::MetaMessage::Tempo(tempo)) = track[0].kind else {
        panic!("first event should set the tempo, got {:?}", track[0].kind);
    };
    assert_eq!(tempo.as_int(), 1_000_000);
    assert_eq!(
        track.last().unwrap().kind,
        midly::TrackEventKind::Meta(midly::MetaMessage::EndOfTrack)
    );

    // 1000 ticks per second at 60 BPM
    let ons: Vec<_> = voice_events(&smf)[0]
        .iter()
        .filter(|e| e.1)
        .map(|e| e.0)
        .collect();
    assert_eq!(ons, vec![100, 200, 500]);
}

#[test]
fn separate_tracks_per_unit() {
    let options = ConvertOptions {
        merge_tracks: false,
        start_note: Note::from_databyte(60u8).unwrap(),
        velocity: Velocity::new(100u8).unwrap(),
        ..Default::default()
    };
    let bytes = convert(&[0.3, 0.1, 0.2, 0.5], &[3, 3, 4], &options);
    let smf = midly::Smf::parse(&bytes).unwrap();
    assert_eq!(smf.tracks.len(), 3);

    let events = voice_events(&smf);
    assert_eq!(
        events[0],
        vec![
            (200, true, 0, 60, 100),
            (202, false, 0, 60, 100),
            (400, true, 0, 60, 100),
            (402, false, 0, 60, 100),
            (600, true, 0, 60, 100),
            (602, false, 0, 60, 100),
        ]
    );
    assert!(events[1].is_empty());
    assert_eq!(
        events[2],
        vec![(1000, true, 0, 62, 100), (1002, false, 0, 62, 100)]
    );
}

#[test]
fn start_and_count_select_units() {
    let options = ConvertOptions {
        start: 1,
        n: Some(1),
        ..Default::default()
    };
    let bytes = convert(&[0.1, 0.2, 0.5, 0.7], &[1, 3, 4], &options);
    let smf = midly::Smf::parse(&bytes).unwrap();

    // unit 1 is the first converted unit, so it plays note 0
    let ons: Vec<_> = voice_events(&smf)[0]
        .iter()
        .filter(|e| e.1)
        .map(|e| (e.0, e.3))
        .collect();
    assert_eq!(ons, vec![(400, 0), (1000, 0)]);
}

#[test]
fn start_past_the_end_writes_an_empty_file() {
    let options = ConvertOptions {
        start: 10,
        ..Default::default()
    };
    let bytes = convert(&[0.1, 0.2], &[1, 2], &options);
    let smf = midly::Smf::parse(&bytes).unwrap();
    assert_eq!(smf.tracks.len(), 1);
    assert!(voice_events(&smf)[0].is_empty());
}

#[test]
fn parsed_back_by_our_own_model() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("session.nwb");
    write_units(&input, &[0.1, 0.2, 0.5], &[2u64, 3]);

    let file = units_to_midi(&input, &ConvertOptions::default()).unwrap();
    assert_eq!(file.note_on_count(), 3);
    assert_eq!(file.timing().ticks_per_quarter_note(), 1000);

    let seconds: Vec<_> = file.tracks()[0]
        .ticked()
        .filter(|t| t.event().is_note_on())
        .map(|t| file.timing().ticks_to_seconds(t.accumulated_ticks(), Tempo::DEFAULT))
        .collect();
    assert_eq!(seconds, vec![0.1, 0.2, 0.5]);
}

#[test]
fn missing_units_table() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.nwb");
    hdf5::File::create(&input).unwrap();

    let err = units_to_midi(&input, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Hdf5(_)));
}

#[test]
fn not_an_hdf5_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("notes.txt");
    std::fs::write(&input, "not hdf5").unwrap();

    let err = units_to_midi(&input, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Hdf5(_)));
}

#[test]
fn malformed_index() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("session.nwb");
    write_units(&input, &[0.1, 0.2], &[2u64, 5]);

    let err = units_to_midi(&input, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedIndex {
            unit: 1,
            reason: IndexError::PastEnd { end: 5, len: 2 }
        }
    ));
}
