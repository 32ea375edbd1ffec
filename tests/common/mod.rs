use std::path::Path;

use hdf5::H5Type;
use ndarray::arr1;

/// Write a minimal NWB units table: the flat spike times and their ragged index.
pub fn write_units<I: H5Type + Clone>(path: &Path, spike_times: &[f64], index: &[I]) {
    let file = hdf5::File::create(path).unwrap();
    let units = file.create_group("units").unwrap();
    units
        .new_dataset_builder()
        .with_data(&arr1(spike_times))
        .create("spike_times")
        .unwrap();
    units
        .new_dataset_builder()
        .with_data(&arr1(index))
        .create("spike_times_index")
        .unwrap();
}

/// Every channel message of a parsed file as
/// (absolute tick, is note on, channel, key, velocity), per track.
pub fn voice_events(smf: &midly::Smf<'_>) -> Vec<Vec<(u64, bool, u8, u8, u8)>> {
    smf.tracks
        .iter()
        .map(|track| {
            let mut tick = 0u64;
            track
                .iter()
                .filter_map(|event| {
                    tick += event.delta.as_int() as u64;
                    let midly::TrackEventKind::Midi { channel, message } = event.kind else {
                        return None;
                    };
                    let (on, key, vel) = match message {
                        midly::MidiMessage::NoteOn { key, vel } => (true, key, vel),
                        midly::MidiMessage::NoteOff { key, vel } => (false, key, vel),
                        other => panic!("unexpected message {other:?}"),
                    };
                    Some((tick, on, channel.as_int(), key.as_int(), vel.as_int()))
                })
                .collect()
        })
        .collect()
}
