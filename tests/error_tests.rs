use blockdeque::{BlockDeque, DequeError};

#[test]
fn test_error_at_out_of_range() {
    let deque = BlockDeque::from([1, 2, 3]);

    assert_eq!(
        deque.at(3).unwrap_err(),
        DequeError::IndexOutOfBounds {
            index: 3,
            length: 3
        }
    );
    assert_eq!(deque.at(2), Ok(&3));
}

#[test]
fn test_error_at_boundary_for_many_sizes() {
    for len in 1..300u32 {
        let deque: BlockDeque<u32> = (0..len).collect();
        let size = deque.len();

        assert!(deque.at(size).is_err());
        assert_eq!(deque.at(size - 1), Ok(&(len - 1)));
    }
}

#[test]
fn test_error_at_on_empty() {
    let mut deque: BlockDeque<String> = BlockDeque::new();

    assert!(deque.at(0).is_err());
    assert!(deque.at_mut(0).is_err());
    assert_eq!(deque.get(0), None);
    assert_eq!(deque.front(), None);
    assert_eq!(deque.back_mut(), None);
}

#[test]
fn test_error_detailed_invalid_position() {
    let mut deque = BlockDeque::from([1]);

    match deque.remove(1).unwrap_err() {
        DequeError::InvalidPosition { position, length } => {
            assert_eq!(position, 1);
            assert_eq!(length, 1);
        }
        _ => panic!("Expected InvalidPosition error"),
    }
}

#[test]
fn test_error_empty_pop() {
    let mut deque: BlockDeque<u8> = BlockDeque::new();
    assert_eq!(deque.try_pop_front().unwrap_err(), DequeError::EmptyDeque);
}

#[test]
fn test_error_display_messages() {
    assert_eq!(
        DequeError::IndexOutOfBounds {
            index: 4,
            length: 2
        }
        .to_string(),
        "Index out of bounds: index 4 is beyond deque length 2"
    );
    assert_eq!(
        DequeError::OutOfMemory { bytes: 512 }.to_string(),
        "Out of memory: failed to allocate 512 bytes"
    );
    assert_eq!(
        DequeError::EmptyDeque.to_string(),
        "Operation attempted on an empty deque"
    );
}

#[test]
fn test_error_is_std_error() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    assert_error(&DequeError::CapacityOverflow);
}

#[test]
#[should_panic(expected = "Index 3 out of bounds for deque of length 3")]
fn test_index_out_of_bounds_panics() {
    let deque = BlockDeque::from([1, 2, 3]);
    let _ = deque[3];
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_index_mut_out_of_bounds_panics() {
    let mut deque: BlockDeque<i32> = BlockDeque::new();
    deque[0] = 1;
}

#[test]
fn test_try_from_fn_propagates_error_unchanged() {
    #[derive(Debug, PartialEq)]
    enum BuildError {
        Rejected(usize),
        Deque(DequeError),
    }

    impl From<DequeError> for BuildError {
        fn from(err: DequeError) -> Self {
            BuildError::Deque(err)
        }
    }

    let result = BlockDeque::<usize>::try_from_fn(100, |i| {
        if i == 42 {
            Err(BuildError::Rejected(i))
        } else {
            Ok(i)
        }
    });

    assert_eq!(result.unwrap_err(), BuildError::Rejected(42));
}
