use blockdeque::{BlockDeque, DequeError};

/// Addresses of every element, front to back.
fn addresses<T>(deque: &BlockDeque<T>) -> Vec<*const T> {
    deque.iter().map(|value| value as *const T).collect()
}

/// Deque with plenty of free room at both ends.
fn spacious(values: &[u64]) -> BlockDeque<u64> {
    let mut deque = BlockDeque::with_capacity(1000).unwrap();
    for &value in values {
        deque.push_back(value).unwrap();
    }
    deque
}

#[test]
fn test_insert_at_both_ends() {
    let mut deque = BlockDeque::from([2, 3]);

    deque.insert(0, 1).unwrap();
    deque.insert(3, 4).unwrap();

    assert_eq!(deque, [1, 2, 3, 4]);
}

#[test]
fn test_insert_into_empty() {
    let mut deque = BlockDeque::new();
    deque.insert(0, "only").unwrap();
    assert_eq!(deque, ["only"]);
}

#[test]
fn test_insert_past_end_is_rejected() {
    let mut deque = BlockDeque::from([1, 2]);

    assert_eq!(
        deque.insert(3, 9),
        Err(DequeError::InvalidPosition {
            position: 3,
            length: 2
        })
    );
    assert_eq!(deque, [1, 2]);
}

#[test]
fn test_insert_near_back_moves_back_part() {
    let mut deque = spacious(&[0, 1, 2, 3, 4]);
    let before = addresses(&deque);

    deque.insert(3, 99).unwrap();
    assert_eq!(deque, [0, 1, 2, 99, 3, 4]);

    // Front part stays in place
    let after = addresses(&deque);
    assert_eq!(&after[..3], &before[..3]);
}

#[test]
fn test_insert_near_front_moves_front_part() {
    let mut deque = spacious(&[0, 1, 2, 3, 4]);
    let before = addresses(&deque);

    deque.insert(1, 99).unwrap();
    assert_eq!(deque, [0, 99, 1, 2, 3, 4]);

    // Back part stays in place
    let after = addresses(&deque);
    assert_eq!(&after[2..], &before[1..]);
}

#[test]
fn test_insert_tie_moves_back_part() {
    let mut deque = spacious(&[0, 1, 2, 3]);
    let before = addresses(&deque);

    deque.insert(2, 99).unwrap();
    assert_eq!(deque, [0, 1, 99, 2, 3]);

    let after = addresses(&deque);
    assert_eq!(&after[..2], &before[..2]);
}

#[test]
fn test_remove_near_back_moves_back_part() {
    let mut deque = spacious(&[0, 1, 2, 3, 4]);
    let before = addresses(&deque);

    assert_eq!(deque.remove(3), Ok(3));
    assert_eq!(deque, [0, 1, 2, 4]);

    let after = addresses(&deque);
    assert_eq!(&after[..3], &before[..3]);
}

#[test]
fn test_remove_near_front_moves_front_part() {
    let mut deque = spacious(&[0, 1, 2, 3, 4]);
    let before = addresses(&deque);

    assert_eq!(deque.remove(1), Ok(1));
    assert_eq!(deque, [0, 2, 3, 4]);

    let after = addresses(&deque);
    assert_eq!(&after[1..], &before[2..]);
}

#[test]
fn test_remove_tie_moves_back_part() {
    let mut deque = spacious(&[0, 1, 2, 3, 4]);
    let before = addresses(&deque);

    assert_eq!(deque.remove(2), Ok(2));
    assert_eq!(deque, [0, 1, 3, 4]);

    let after = addresses(&deque);
    assert_eq!(&after[..2], &before[..2]);
}

#[test]
fn test_remove_end_is_rejected() {
    let mut deque = BlockDeque::from([1, 2, 3]);

    assert_eq!(
        deque.remove(3),
        Err(DequeError::InvalidPosition {
            position: 3,
            length: 3
        })
    );
    let mut empty: BlockDeque<i32> = BlockDeque::new();
    assert!(empty.remove(0).is_err());
}

#[test]
fn test_insert_triggers_growth() {
    let block_len = BlockDeque::<u64>::BLOCK_LEN as u64;
    let mut deque: BlockDeque<u64> = (0..block_len).collect();
    assert_eq!(deque.len(), deque.capacity());

    deque.insert(block_len as usize - 1, 500).unwrap();
    deque.insert(1, 600).unwrap();

    assert_eq!(deque.len(), block_len as usize + 2);
    assert_eq!(deque[1], 600);
    assert_eq!(deque[block_len as usize], 500);
    assert_eq!(deque.back(), Some(&(block_len - 1)));
}

#[test]
fn test_emplace_returns_new_element() {
    let mut deque = BlockDeque::from([String::from("a"), String::from("c")]);

    let inserted = deque.emplace(1, || String::from("b")).unwrap();
    inserted.push('!');

    assert_eq!(deque.to_string(), "a b! c");
}

#[test]
fn test_middle_operations_match_model() {
    let mut deque = BlockDeque::new();
    let mut model = Vec::new();

    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    for step in 0..3000u64 {
        seed ^= seed << 7;
        seed ^= seed >> 9;
        let len = model.len();
        if seed % 3 == 0 && len > 0 {
            let index = (seed as usize >> 8) % len;
            assert_eq!(deque.remove(index), Ok(model.remove(index)));
        } else {
            let index = (seed as usize >> 8) % (len + 1);
            deque.insert(index, step).unwrap();
            model.insert(index, step);
        }
    }

    assert_eq!(deque.len(), model.len());
    assert!(deque.iter().eq(model.iter()));
}

#[test]
fn test_drop_counts_after_remove() {
    use std::rc::Rc;

    let marker = Rc::new(());
    let mut deque = BlockDeque::new();
    for _ in 0..10 {
        deque.push_back(Rc::clone(&marker)).unwrap();
    }

    let removed = deque.remove(4).unwrap();
    assert_eq!(Rc::strong_count(&marker), 11);
    drop(removed);
    assert_eq!(Rc::strong_count(&marker), 10);

    drop(deque);
    assert_eq!(Rc::strong_count(&marker), 1);
}
