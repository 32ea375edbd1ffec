mod common;

use common::write_units;
use neuro_midi::{Error, nwb::NwbUnits, nwb::iter_units};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const SPIKE_TIMES: [f64; 10] = [0.3, 0.1, 0.2, 1.0, 1.1, 1.2, 1.3, 2.0, 2.5, 2.1];
const INDEX: [u64; 4] = [3, 7, 7, 10];

fn session(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("session.nwb");
    write_units(&path, &SPIKE_TIMES, &INDEX);
    path
}

#[test]
fn iterates_every_unit_in_order() {
    let dir = TempDir::new().unwrap();
    let units: Vec<_> = iter_units(session(&dir), 0, None)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        units,
        vec![
            vec![0.3, 0.1, 0.2],
            vec![1.0, 1.1, 1.2, 1.3],
            vec![],
            vec![2.0, 2.5, 2.1],
        ]
    );
}

#[test]
fn start_and_count() {
    let dir = TempDir::new().unwrap();
    let path = session(&dir);

    let units: Vec<_> = iter_units(&path, 1, Some(2))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(units, vec![vec![1.0, 1.1, 1.2, 1.3], vec![]]);

    let iter = iter_units(&path, 2, Some(100)).unwrap();
    assert_eq!(iter.len(), 2);
    assert_eq!(iter.remaining(), 2..4);

    assert_eq!(iter_units(&path, 4, None).unwrap().count(), 0);
    assert_eq!(iter_units(&path, 40, Some(2)).unwrap().count(), 0);
}

#[test]
fn early_drop_releases_the_file() {
    let dir = TempDir::new().unwrap();
    let path = session(&dir);

    let mut iter = iter_units(&path, 0, None).unwrap();
    assert_eq!(iter.next().unwrap().unwrap().len(), 3);
    drop(iter);

    // the file can be opened again, for writing even
    write_units(&path, &[0.5], &[1u64]);
    assert_eq!(NwbUnits::open(&path).unwrap().len(), 1);
}

#[test]
fn random_access() {
    let dir = TempDir::new().unwrap();
    let units = NwbUnits::open(session(&dir)).unwrap();

    assert_eq!(units.len(), 4);
    assert_eq!(units.index().span(3), Some(7..10));
    assert_eq!(units.spike_times(3).unwrap(), vec![2.0, 2.5, 2.1]);
    assert!(units.spike_times(2).unwrap().is_empty());
    assert!(matches!(
        units.spike_times(4),
        Err(Error::UnitOutOfRange { unit: 4, len: 4 })
    ));
}

#[test]
fn signed_index_dataset() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("signed.nwb");
    write_units(&path, &[0.1, 0.2, 0.3], &[1i64, 3]);

    let units = NwbUnits::open(&path).unwrap();
    assert_eq!(units.spike_times(1).unwrap(), vec![0.2, 0.3]);
}
