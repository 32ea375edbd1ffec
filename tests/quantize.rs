use neuro_midi::prelude::*;
use pretty_assertions::assert_eq;

/// A spike train with bursts, repeats and gaps, in no particular order
fn spike_train() -> Vec<f64> {
    let mut spikes = Vec::new();
    for i in 0..200u32 {
        // a cheap scramble so the train is neither sorted nor evenly spaced
        let t = (i * 7919 % 200) as f64 * 0.0123 + (i % 3) as f64 * 0.0004;
        spikes.push(t);
    }
    spikes.extend([0.0, 0.0005, 1.0, 1.0, 1.0001]);
    spikes
}

#[test]
fn input_order_does_not_matter() {
    let options = QuantizeOptions::default();
    let spikes = spike_train();
    let expected = timestamps_to_track(&spikes, &options).unwrap();

    let mut reversed = spikes.clone();
    reversed.reverse();
    assert_eq!(timestamps_to_track(&reversed, &options).unwrap(), expected);

    let mut sorted = spikes.clone();
    sorted.sort_by(f64::total_cmp);
    assert_eq!(timestamps_to_track(&sorted, &options).unwrap(), expected);

    let mut rotated = spikes;
    rotated.rotate_left(37);
    assert_eq!(timestamps_to_track(&rotated, &options).unwrap(), expected);
}

#[test]
fn quantizing_twice_is_identical() {
    let options = QuantizeOptions {
        duration_ms: 5.,
        tempo: Tempo::from_bpm(97.).unwrap(),
        ..Default::default()
    };
    let spikes = spike_train();
    assert_eq!(
        timestamps_to_track(&spikes, &options).unwrap(),
        timestamps_to_track(&spikes, &options).unwrap()
    );
}

#[test]
fn close_spikes_collapse_into_one_note() {
    let track = timestamps_to_track(&[0.0, 0.0005], &QuantizeOptions::default()).unwrap();
    assert_eq!(track.len(), 2);
    assert_eq!(track.note_on_count(), 1);
}

#[test]
fn every_note_starts_after_the_previous_one_ended() {
    for duration_ms in [0., 1., 3., 25.] {
        let options = QuantizeOptions {
            duration_ms,
            ..Default::default()
        };
        let track = timestamps_to_track(&spike_train(), &options).unwrap();
        let ticked: Vec<_> = track.ticked().collect();
        assert!(!ticked.is_empty());

        let mut previous_end = 0;
        for pair in ticked.chunks(2) {
            let [on, off] = pair else {
                panic!("notes come in on/off pairs");
            };
            assert!(on.event().is_note_on());
            assert!(!off.event().is_note_on());
            assert!(on.accumulated_ticks() > previous_end);
            previous_end = off.accumulated_ticks();
        }
    }
}

#[test]
fn never_more_notes_than_spikes() {
    let spikes = spike_train();
    for duration_ms in [0., 1., 10., 100.] {
        let options = QuantizeOptions {
            duration_ms,
            ..Default::default()
        };
        let track = timestamps_to_track(&spikes, &options).unwrap();
        assert!(track.note_on_count() <= spikes.len());
    }
}

#[test]
fn unit_130_plays_note_2_on_channel_2() {
    let (note, channel) = assign(130, Note::default()).unwrap();
    assert_eq!(note.byte(), 2);
    assert_eq!(channel.index(), 1);
}
