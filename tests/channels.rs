use pretty_assertions::assert_eq;
use simt16::channels::{flatten, locate, to_logical, to_physical, ChannelAddr, ChannelError};

#[test]
fn four_channel_example() {
    let data = vec![10, 11, 12, 13, 14, 15, 16, 17];
    let lanes = to_physical(&data, 4).unwrap();
    assert_eq!(lanes, vec![vec![10, 14], vec![11, 15], vec![12, 16], vec![13, 17]]);

    let flat = flatten(&lanes);
    assert_eq!(flat, data);
    assert_eq!(to_logical(&flat, 4).unwrap(), data);
}

#[test]
fn round_trip_for_multiples_of_channel_count() {
    for channels in 1..=8usize {
        for rows in 0..5usize {
            let data: Vec<u32> = (0..(channels * rows) as u32).map(|v| v * 7 + 1).collect();
            let lanes = to_physical(&data, channels).unwrap();
            assert_eq!(lanes.len(), channels);
            assert!(lanes.iter().all(|l| l.len() == rows));
            assert_eq!(to_logical(&flatten(&lanes), channels).unwrap(), data);
        }
    }
}

#[test]
fn uneven_length_shortens_trailing_lanes() {
    let data = [1, 2, 3, 4, 5, 6, 7];
    let lanes = to_physical(&data, 3).unwrap();
    assert_eq!(lanes, vec![vec![1, 4, 7], vec![2, 5], vec![3, 6]]);
    // Flattening still walks back through logical order.
    assert_eq!(flatten(&lanes), data.to_vec());
}

#[test]
fn partial_row_is_dropped_from_dump() {
    let dump = [9, 8, 7, 6, 5, 4];
    assert_eq!(to_logical(&dump, 4).unwrap(), vec![9, 8, 7, 6]);
    assert_eq!(to_logical(&dump[..3], 4).unwrap(), Vec::<i32>::new());
}

#[test]
fn more_channels_than_elements() {
    let lanes = to_physical(&["a", "b"], 4).unwrap();
    assert_eq!(lanes, vec![vec!["a"], vec!["b"], vec![], vec![]]);
}

#[test]
fn zero_channels_is_rejected_everywhere() {
    let err = ChannelError::ChannelCountInvalid(0);
    assert_eq!(to_physical(&[1, 2], 0).unwrap_err(), err);
    assert_eq!(to_logical(&[1, 2], 0).unwrap_err(), err);
    assert_eq!(locate(5, 0).unwrap_err(), err);
}

#[test]
fn address_mapping_is_invertible() {
    let a = locate(13, 4).unwrap();
    assert_eq!(a, ChannelAddr { channel: 1, offset: 3 });
    assert_eq!(a.linear(4), 13);
}
