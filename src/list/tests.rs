use super::*;
use proptest::prelude::*;

fn values<T: Clone>(list: &NodeList<T>) -> Vec<T> {
    list.iter().map(|(_, v)| v.clone()).collect()
}

fn values_backward<T: Clone>(list: &NodeList<T>) -> Vec<T> {
    let mut out = Vec::new();
    let mut cursor = list.tail();
    while let Some(h) = cursor {
        out.push(list.get(h).unwrap().clone());
        cursor = list.prev(h);
    }
    out
}

#[test]
fn new_list_is_empty() {
    let list: NodeList<u32> = NodeList::new();
    assert!(list.is_empty());
    assert_eq!(list.len(), 0);
    assert!(list.head().is_none());
    assert!(list.tail().is_none());
    assert!(list.verify_links());
}

#[test]
fn push_front_and_back_link_both_directions() {
    let mut list = NodeList::new();
    list.push_back(2);
    list.push_back(3);
    list.push_front(1);

    assert_eq!(list.len(), 3);
    assert_eq!(values(&list), vec![1, 2, 3]);
    assert_eq!(values_backward(&list), vec![3, 2, 1]);
    assert_eq!(list.get(list.head().unwrap()), Some(&1));
    assert_eq!(list.get(list.tail().unwrap()), Some(&3));
    assert!(list.prev(list.head().unwrap()).is_none());
    assert!(list.next(list.tail().unwrap()).is_none());
}

#[test]
fn insert_at_middle_splices_between_neighbours() {
    let mut list: NodeList<char> = "abd".chars().collect();
    let h = list.insert_at(3, 'c').unwrap();

    assert_eq!(values(&list), vec!['a', 'b', 'c', 'd']);
    assert_eq!(values_backward(&list), vec!['d', 'c', 'b', 'a']);
    assert_eq!(list.position_of(h), Some(3));
}

#[test]
fn insert_at_boundaries_match_push_front_and_back() {
    let mut list: NodeList<u32> = vec![2, 3].into_iter().collect();
    let front = list.insert_at(1, 1).unwrap();
    let back = list.insert_at(list.len() + 1, 4).unwrap();

    assert_eq!(values(&list), vec![1, 2, 3, 4]);
    assert_eq!(list.head(), Some(front));
    assert_eq!(list.tail(), Some(back));
}

#[test]
fn insert_at_on_empty_list_accepts_only_position_one() {
    let mut list = NodeList::new();
    assert_eq!(
        list.insert_at(2, 'x'),
        Err(ListError::InvalidPosition { position: 2, len: 0 })
    );
    assert!(list.is_empty());

    let h = list.insert_at(1, 'x').unwrap();
    assert_eq!(list.head(), Some(h));
    assert_eq!(list.tail(), Some(h));
}

#[test]
fn insert_at_out_of_range_leaves_list_unchanged() {
    let mut list: NodeList<u32> = vec![1, 2, 3].into_iter().collect();

    assert_eq!(
        list.insert_at(0, 9),
        Err(ListError::InvalidPosition { position: 0, len: 3 })
    );
    assert_eq!(
        list.insert_at(5, 9),
        Err(ListError::InvalidPosition { position: 5, len: 3 })
    );
    assert_eq!(list.len(), 3);
    assert_eq!(values(&list), vec![1, 2, 3]);
}

#[test]
fn pop_front_and_back_are_noops_on_empty_list() {
    let mut list: NodeList<u32> = NodeList::new();
    assert_eq!(list.pop_front(), None);
    assert_eq!(list.pop_back(), None);
    assert_eq!(list.len(), 0);
}

#[test]
fn pop_front_and_back_shrink_from_both_ends() {
    let mut list: NodeList<u32> = vec![1, 2, 3].into_iter().collect();

    assert_eq!(list.pop_front(), Some(1));
    assert_eq!(list.pop_back(), Some(3));
    assert_eq!(values(&list), vec![2]);
    assert_eq!(list.head(), list.tail());

    assert_eq!(list.pop_back(), Some(2));
    assert!(list.is_empty());
    assert!(list.head().is_none() && list.tail().is_none());
}

#[test]
fn remove_by_handle_unlinks_middle_head_and_tail() {
    let mut list = NodeList::new();
    let a = list.push_back("a");
    let b = list.push_back("b");
    let c = list.push_back("c");
    let d = list.push_back("d");

    assert_eq!(list.remove(b), Ok("b"));
    assert_eq!(values(&list), vec!["a", "c", "d"]);
    assert_eq!(list.next(a), Some(c));
    assert_eq!(list.prev(c), Some(a));

    assert_eq!(list.remove(a), Ok("a"));
    assert_eq!(list.head(), Some(c));

    assert_eq!(list.remove(d), Ok("d"));
    assert_eq!(list.tail(), Some(c));
    assert_eq!(list.len(), 1);
}

#[test]
fn stale_handle_is_rejected_even_after_slot_reuse() {
    let mut list = NodeList::new();
    let a = list.push_back(1);
    list.push_back(2);

    assert_eq!(list.remove(a), Ok(1));
    assert!(!list.contains(a));
    assert_eq!(list.get(a), None);
    assert_eq!(list.next(a), None);
    assert_eq!(list.remove(a), Err(ListError::StaleHandle));

    // The freed slot is reused, but the old handle must not see the new value.
    let reused = list.push_front(3);
    assert_ne!(reused, a);
    assert_eq!(list.get(a), None);
    assert_eq!(list.get(reused), Some(&3));
    assert_eq!(list.len(), 2);
}

#[test]
fn remove_at_validates_position_and_emptiness() {
    let mut list: NodeList<u32> = NodeList::new();
    assert_eq!(list.remove_at(1), Err(ListError::Empty));

    list.extend([10, 20, 30]);
    assert_eq!(
        list.remove_at(4),
        Err(ListError::InvalidPosition { position: 4, len: 3 })
    );
    assert_eq!(
        list.remove_at(0),
        Err(ListError::InvalidPosition { position: 0, len: 3 })
    );
    assert_eq!(list.remove_at(2), Ok(20));
    assert_eq!(list.remove_at(2), Ok(30));
    assert_eq!(list.remove_at(1), Ok(10));
    assert!(list.is_empty());
}

#[test]
fn get_mut_edits_value_in_place() {
    let mut list = NodeList::new();
    let h = list.push_back(String::from("old"));
    list.get_mut(h).unwrap().push_str("-new");
    assert_eq!(list.get(h).map(String::as_str), Some("old-new"));
}

#[test]
fn clear_empties_list_and_invalidates_handles() {
    let mut list = NodeList::new();
    let a = list.push_back(1);
    let b = list.push_back(2);

    list.clear();
    assert!(list.is_empty());
    assert!(list.head().is_none());
    assert!(!list.contains(a));
    assert!(!list.contains(b));

    let c = list.push_back(3);
    assert!(!list.contains(a));
    assert!(!list.contains(b));
    assert_eq!(values(&list), vec![3]);
    assert_eq!(list.head(), Some(c));
}

#[test]
fn iter_reports_exact_len() {
    let list: NodeList<u32> = (0..5).collect();
    let it = list.iter();
    assert_eq!(it.len(), 5);
    assert_eq!((&list).into_iter().count(), 5);
}

#[test]
fn position_of_is_none_for_stale_handle() {
    let mut list = NodeList::new();
    let a = list.push_back('a');
    let b = list.push_back('b');
    list.remove(a).unwrap();
    assert_eq!(list.position_of(a), None);
    assert_eq!(list.position_of(b), Some(1));
}

#[derive(Debug, Clone)]
enum Op {
    PushFront(u8),
    PushBack(u8),
    InsertAt(usize, u8),
    PopFront,
    PopBack,
    RemoveAt(usize),
    RemoveNth(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::PushFront),
        any::<u8>().prop_map(Op::PushBack),
        (0usize..12, any::<u8>()).prop_map(|(p, v)| Op::InsertAt(p, v)),
        Just(Op::PopFront),
        Just(Op::PopBack),
        (0usize..12).prop_map(Op::RemoveAt),
        (0usize..12).prop_map(Op::RemoveNth),
    ]
}

proptest! {
    #[test]
    fn list_matches_vec_model(ops in proptest::collection::vec(op(), 0..64)) {
        let mut list = NodeList::new();
        let mut model: Vec<u8> = Vec::new();

        for op in ops {
            let before = list.len();
            match op {
                Op::PushFront(v) => {
                    list.push_front(v);
                    model.insert(0, v);
                    prop_assert_eq!(list.len(), before + 1);
                }
                Op::PushBack(v) => {
                    list.push_back(v);
                    model.push(v);
                    prop_assert_eq!(list.len(), before + 1);
                }
                Op::InsertAt(p, v) => {
                    let accepted = list.insert_at(p, v).is_ok();
                    prop_assert_eq!(accepted, p >= 1 && p <= model.len() + 1);
                    if accepted {
                        model.insert(p - 1, v);
                        prop_assert_eq!(list.len(), before + 1);
                    } else {
                        prop_assert_eq!(list.len(), before);
                    }
                }
                Op::PopFront => {
                    let expected = if model.is_empty() { None } else { Some(model.remove(0)) };
                    prop_assert_eq!(list.pop_front(), expected);
                }
                Op::PopBack => {
                    prop_assert_eq!(list.pop_back(), model.pop());
                }
                Op::RemoveAt(p) => {
                    let result = list.remove_at(p);
                    if p >= 1 && p <= model.len() {
                        prop_assert_eq!(result, Ok(model.remove(p - 1)));
                    } else {
                        prop_assert!(result.is_err());
                    }
                }
                Op::RemoveNth(n) => {
                    let handle = list.iter().nth(n).map(|(h, _)| h);
                    if let Some(h) = handle {
                        prop_assert_eq!(list.remove(h), Ok(model.remove(n)));
                        prop_assert!(!list.contains(h));
                    }
                }
            }

            prop_assert!(list.verify_links());
            prop_assert_eq!(list.len(), model.len());
            prop_assert_eq!(list.iter().count(), model.len());
            prop_assert_eq!(values(&list), model.clone());
        }
    }
}
